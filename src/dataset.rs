//! Dataset tree layout and on-disk formats.
//!
//! The miner writes samples to `<dataset>/<Pattern>/<Repo>__<File>.ts` with
//! provenance encoded in the filename, plus a `dataset_metadata.json` manifest.
//! The embedder reads the same tree and writes `embeddings_dataset.json`.
//! Both JSON documents are regenerated wholesale on each run.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::patterns;

/// Manifest filename written next to the pattern directories.
pub const METADATA_FILE: &str = "dataset_metadata.json";

/// Provenance for one copied sample.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MiningRecord {
    /// Canonical pattern label (dataset directory name).
    pub pattern: String,
    /// `owner/name` of the source repository.
    pub original_repo: String,
    /// Path of the file inside the source repository.
    pub original_path: String,
    /// Filename the sample was copied to under the pattern directory.
    pub local_filename: String,
}

/// The `dataset_metadata.json` document.
#[derive(Debug, Serialize, Deserialize)]
pub struct MiningMetadata {
    pub generated_at: String,
    pub repos_processed: usize,
    pub total_samples: usize,
    pub pattern_distribution: BTreeMap<String, usize>,
    pub samples: Vec<MiningRecord>,
}

/// One entry of `embeddings_dataset.json`: a sample and its per-model vectors.
/// `BTreeMap` keeps model keys sorted so re-serialization is byte-stable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EmbeddingRecord {
    pub filename: String,
    /// Pattern label the sample was mined under.
    pub label: String,
    pub embeddings: BTreeMap<String, Vec<f32>>,
}

/// A sample file found in the dataset tree.
#[derive(Debug, Clone)]
pub struct PatternSample {
    pub path: PathBuf,
    pub pattern: &'static str,
    pub filename: String,
}

/// Create the dataset root and one subdirectory per catalog pattern.
/// Existing directories (and their samples) are left in place — reruns add
/// to the dataset.
pub fn ensure_layout(root: &Path) -> Result<()> {
    for pattern in patterns::GOF_PATTERNS {
        std::fs::create_dir_all(root.join(pattern))
            .with_context(|| format!("failed to create dataset dir for {pattern}"))?;
    }
    Ok(())
}

/// Provenance filename: `owner/name` + `file.ts` → `owner_name__file.ts`.
/// Deterministic for a given repo + file.
pub fn sample_filename(repo_full_name: &str, file_name: &str) -> String {
    let safe_repo = repo_full_name.replace('/', "_");
    format!("{safe_repo}__{file_name}")
}

/// Resolve a destination path that does not collide with an existing sample:
/// `name.ts`, then `name_1.ts`, `name_2.ts`, …
pub fn unique_dest(dir: &Path, filename: &str) -> PathBuf {
    let mut dest = dir.join(filename);
    let (stem, ext) = match filename.rsplit_once('.') {
        Some((s, e)) => (s.to_string(), format!(".{e}")),
        None => (filename.to_string(), String::new()),
    };
    let mut counter = 1;
    while dest.exists() {
        dest = dir.join(format!("{stem}_{counter}{ext}"));
        counter += 1;
    }
    dest
}

/// Enumerate all `.ts` samples under recognized pattern directories,
/// skipping anything else (stray files, unknown directories, the manifest).
pub fn list_samples(root: &Path) -> Result<Vec<PatternSample>> {
    let mut samples = Vec::new();
    for pattern in patterns::GOF_PATTERNS {
        let dir = root.join(pattern);
        if !dir.is_dir() {
            continue;
        }
        let entries = std::fs::read_dir(&dir)
            .with_context(|| format!("failed to read dataset dir: {}", dir.display()))?;
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_file() && name.ends_with(".ts") {
                samples.push(PatternSample {
                    pattern,
                    filename: name.to_string(),
                    path,
                });
            }
        }
    }
    // Stable order regardless of filesystem iteration order
    samples.sort_by(|a, b| (a.pattern, &a.filename).cmp(&(b.pattern, &b.filename)));
    Ok(samples)
}

/// Per-pattern sample counts for the whole dataset tree.
pub fn pattern_distribution(root: &Path) -> Result<BTreeMap<String, usize>> {
    let mut counts = BTreeMap::new();
    for sample in list_samples(root)? {
        *counts.entry(sample.pattern.to_string()).or_insert(0) += 1;
    }
    Ok(counts)
}

pub fn save_metadata(root: &Path, metadata: &MiningMetadata) -> Result<()> {
    let path = root.join(METADATA_FILE);
    let json = serde_json::to_string_pretty(metadata)?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn save_embeddings(path: &Path, records: &[EmbeddingRecord]) -> Result<()> {
    let json = serde_json::to_string(records)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

#[allow(dead_code)]
pub fn load_embeddings(path: &Path) -> Result<Vec<EmbeddingRecord>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_filename_is_deterministic() {
        assert_eq!(
            sample_filename("nestjs/nest", "container.ts"),
            "nestjs_nest__container.ts"
        );
        assert_eq!(
            sample_filename("nestjs/nest", "container.ts"),
            sample_filename("nestjs/nest", "container.ts"),
        );
    }

    #[test]
    fn unique_dest_adds_counter_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();

        let first = unique_dest(dir, "repo__a.ts");
        assert_eq!(first, dir.join("repo__a.ts"));
        std::fs::write(&first, "x").unwrap();

        let second = unique_dest(dir, "repo__a.ts");
        assert_eq!(second, dir.join("repo__a_1.ts"));
        std::fs::write(&second, "y").unwrap();

        let third = unique_dest(dir, "repo__a.ts");
        assert_eq!(third, dir.join("repo__a_2.ts"));
    }

    #[test]
    fn layout_creates_all_pattern_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        ensure_layout(tmp.path()).unwrap();
        for pattern in patterns::GOF_PATTERNS {
            assert!(tmp.path().join(pattern).is_dir(), "{pattern} dir missing");
        }
    }

    #[test]
    fn list_samples_ignores_unknown_dirs_and_non_ts_files() {
        let tmp = tempfile::tempdir().unwrap();
        ensure_layout(tmp.path()).unwrap();

        std::fs::write(tmp.path().join("Singleton/repo__a.ts"), "class A {}").unwrap();
        std::fs::write(tmp.path().join("Singleton/notes.md"), "notes").unwrap();
        std::fs::create_dir_all(tmp.path().join("NotAPattern")).unwrap();
        std::fs::write(tmp.path().join("NotAPattern/repo__b.ts"), "class B {}").unwrap();
        std::fs::write(tmp.path().join(METADATA_FILE), "{}").unwrap();

        let samples = list_samples(tmp.path()).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].pattern, "Singleton");
        assert_eq!(samples[0].filename, "repo__a.ts");
    }
}
