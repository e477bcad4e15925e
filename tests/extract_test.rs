mod helpers;

use helpers::{default_limits, write_file, OBSERVER_TS, SINGLETON_TS};
use quarry::dataset;
use quarry::miner::{extract_patterns, is_valid_source};

#[test]
fn extracts_files_under_pattern_dirs() {
    let repo = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    write_file(repo.path(), "src/Singleton/app-config.ts", SINGLETON_TS);
    write_file(repo.path(), "src/Observer/subject.ts", OBSERVER_TS);
    write_file(repo.path(), "src/utils/helpers.ts", SINGLETON_TS);

    let records =
        extract_patterns("acme/widgets", repo.path(), out.path(), &default_limits()).unwrap();

    assert_eq!(records.len(), 2, "only pattern-dir files are extracted");
    assert!(out
        .path()
        .join("Singleton/acme_widgets__app-config.ts")
        .is_file());
    assert!(out.path().join("Observer/acme_widgets__subject.ts").is_file());

    let singleton = records.iter().find(|r| r.pattern == "Singleton").unwrap();
    assert_eq!(singleton.original_repo, "acme/widgets");
    assert_eq!(singleton.original_path, "src/Singleton/app-config.ts");
    assert_eq!(singleton.local_filename, "acme_widgets__app-config.ts");
}

#[test]
fn pattern_dir_matching_is_case_insensitive() {
    let repo = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    write_file(repo.path(), "lib/singleton/config.ts", SINGLETON_TS);
    write_file(repo.path(), "lib/OBSERVER/bus.ts", OBSERVER_TS);

    let records =
        extract_patterns("acme/widgets", repo.path(), out.path(), &default_limits()).unwrap();

    let mut labels: Vec<&str> = records.iter().map(|r| r.pattern.as_str()).collect();
    labels.sort();
    assert_eq!(labels, vec!["Observer", "Singleton"]);
    // canonical casing in the output tree, whatever the source used
    assert!(out.path().join("Singleton/acme_widgets__config.ts").is_file());
}

#[test]
fn skips_tests_specs_declarations_and_vendor_dirs() {
    let repo = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    write_file(repo.path(), "src/Singleton/config.test.ts", SINGLETON_TS);
    write_file(repo.path(), "src/Singleton/config.spec.ts", SINGLETON_TS);
    write_file(repo.path(), "src/Singleton/config.d.ts", SINGLETON_TS);
    write_file(repo.path(), "src/Singleton/MockConfig.ts", SINGLETON_TS);
    write_file(
        repo.path(),
        "node_modules/pkg/Singleton/config.ts",
        SINGLETON_TS,
    );
    write_file(repo.path(), "dist/Singleton/config.ts", SINGLETON_TS);

    let records =
        extract_patterns("acme/widgets", repo.path(), out.path(), &default_limits()).unwrap();
    assert!(records.is_empty(), "got: {records:?}");
}

#[test]
fn skips_minified_and_unstructured_files() {
    let repo = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    let minified = format!("export class A {{}} {}", "x".repeat(1500));
    write_file(repo.path(), "src/Singleton/bundle.ts", &minified);
    write_file(
        repo.path(),
        "src/Singleton/constants.ts",
        "export const TIMEOUT = 30;\nexport const RETRIES = 0;\n",
    );

    let records =
        extract_patterns("acme/widgets", repo.path(), out.path(), &default_limits()).unwrap();
    assert!(records.is_empty());
}

#[test]
fn same_filename_in_two_pattern_dirs_gets_collision_suffix() {
    let repo = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    dataset::ensure_layout(out.path()).unwrap();

    write_file(repo.path(), "src/Singleton/index.ts", SINGLETON_TS);
    write_file(repo.path(), "lib/Singleton/index.ts", SINGLETON_TS);

    let records =
        extract_patterns("acme/widgets", repo.path(), out.path(), &default_limits()).unwrap();

    assert_eq!(records.len(), 2);
    let mut names: Vec<&str> = records.iter().map(|r| r.local_filename.as_str()).collect();
    names.sort();
    assert_eq!(
        names,
        vec!["acme_widgets__index.ts", "acme_widgets__index_1.ts"]
    );
    assert!(out.path().join("Singleton/acme_widgets__index.ts").is_file());
    assert!(out
        .path()
        .join("Singleton/acme_widgets__index_1.ts")
        .is_file());
}

#[test]
fn validity_gate_size_cap() {
    let repo = tempfile::tempdir().unwrap();
    let big = format!(
        "export class Big {{}}\n{}",
        "// padding line\n".repeat(200)
    );
    let path = write_file(repo.path(), "src/big.ts", &big);

    let mut limits = default_limits();
    assert!(is_valid_source(&path, &limits));

    limits.max_file_bytes = 64;
    assert!(!is_valid_source(&path, &limits));
}
