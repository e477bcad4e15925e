mod helpers;

use helpers::{write_file, OBSERVER_TS, SINGLETON_TS};
use quarry::dataset;
use quarry::validate::{remove_duplicates, validate_dataset};

#[test]
fn detects_duplicates_that_differ_only_in_comments() {
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    write_file(out.path(), "Singleton/a__config.ts", SINGLETON_TS);
    let commented = format!("// mined from elsewhere\n{SINGLETON_TS}");
    write_file(out.path(), "Singleton/b__config.ts", &commented);
    write_file(out.path(), "Observer/a__subject.ts", OBSERVER_TS);

    let report = validate_dataset(out.path()).unwrap();
    assert_eq!(report.total_files, 3);
    assert_eq!(report.duplicate_files, 1);
    assert_eq!(report.duplicate_groups.len(), 1);
    assert_eq!(report.duplicate_groups[0].len(), 2);
}

#[test]
fn flags_trivial_and_unstructured_samples() {
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    write_file(out.path(), "Facade/tiny__f.ts", "class F {}");
    write_file(out.path(), "Observer/ok__subject.ts", OBSERVER_TS);

    let report = validate_dataset(out.path()).unwrap();
    assert_eq!(report.total_files, 2);
    assert_eq!(report.invalid_files, 1);
    assert_eq!(report.valid_files, 1);
    assert_eq!(report.invalid[0].pattern, "Facade");
}

#[test]
fn remove_duplicates_keeps_first_of_each_group() {
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    let first = write_file(out.path(), "Singleton/a__config.ts", SINGLETON_TS);
    let second = write_file(out.path(), "Singleton/b__config.ts", SINGLETON_TS);

    let removed = remove_duplicates(out.path(), false).unwrap();
    assert_eq!(removed.len(), 1);
    assert!(first.exists());
    assert!(!second.exists());
}

#[test]
fn dry_run_removes_nothing() {
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    write_file(out.path(), "Singleton/a__config.ts", SINGLETON_TS);
    write_file(out.path(), "Singleton/b__config.ts", SINGLETON_TS);

    let removed = remove_duplicates(out.path(), true).unwrap();
    assert_eq!(removed.len(), 1);
    assert!(out.path().join("Singleton/a__config.ts").exists());
    assert!(out.path().join("Singleton/b__config.ts").exists());
}

#[test]
fn reports_missing_patterns() {
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();
    write_file(out.path(), "Singleton/a__config.ts", SINGLETON_TS);

    let report = validate_dataset(out.path()).unwrap();
    let missing_note = report
        .recommendations
        .iter()
        .find(|r| r.contains("no samples"))
        .expect("missing-pattern recommendation");
    assert!(missing_note.contains("Visitor"));
    assert!(!missing_note.contains("Singleton,"));
}

#[test]
fn empty_dataset_scores_zero_without_panicking() {
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    let report = validate_dataset(out.path()).unwrap();
    assert_eq!(report.total_files, 0);
    assert_eq!(report.quality_score, 0.0);
}
