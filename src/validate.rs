//! Dataset quality validation.
//!
//! Run after mining: finds duplicate samples by normalized-content
//! fingerprint, flags files that do not look like pattern implementations,
//! and summarizes the label distribution with improvement hints.

use anyhow::Result;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::dataset;
use crate::patterns;

/// Comment- and whitespace-insensitive content hashing. Two samples that
/// differ only in formatting or comments fingerprint identically.
pub struct Normalizer {
    block_comments: Regex,
    line_comments: Regex,
    whitespace: Regex,
}

impl Normalizer {
    pub fn new() -> Self {
        Self {
            block_comments: Regex::new(r"(?s)/\*.*?\*/").expect("valid regex"),
            line_comments: Regex::new(r"//[^\n]*").expect("valid regex"),
            whitespace: Regex::new(r"\s+").expect("valid regex"),
        }
    }

    /// blake3 hex digest of the normalized content.
    pub fn fingerprint(&self, content: &str) -> String {
        let stripped = self.block_comments.replace_all(content, "");
        let stripped = self.line_comments.replace_all(&stripped, "");
        let normalized = self.whitespace.replace_all(&stripped, "");
        blake3::hash(normalized.as_bytes()).to_hex().to_string()
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// A sample that failed a validity check.
#[derive(Debug, Serialize)]
pub struct InvalidSample {
    pub file: String,
    pub pattern: String,
    pub reason: String,
}

/// The full quality report, exportable as JSON.
#[derive(Debug, Serialize)]
pub struct ValidationReport {
    pub total_files: usize,
    pub valid_files: usize,
    pub invalid_files: usize,
    /// Number of redundant copies (group size minus one, summed).
    pub duplicate_files: usize,
    pub pattern_distribution: BTreeMap<String, usize>,
    pub invalid: Vec<InvalidSample>,
    /// Paths sharing a fingerprint, one inner list per duplicate group.
    pub duplicate_groups: Vec<Vec<String>>,
    pub quality_score: f64,
    pub recommendations: Vec<String>,
}

/// Meaningful lines: non-empty and not line comments.
fn code_line_count(content: &str) -> usize {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("//"))
        .count()
}

fn check_sample(content: &str) -> Option<String> {
    if code_line_count(content) < 5 {
        return Some("fewer than 5 lines of code".into());
    }
    if !content.contains("class ") && !content.contains("interface ") {
        return Some("no class or interface declaration".into());
    }
    None
}

/// Validate every sample in the dataset tree.
pub fn validate_dataset(root: &Path) -> Result<ValidationReport> {
    let normalizer = Normalizer::new();
    let samples = dataset::list_samples(root)?;

    let mut by_fingerprint: BTreeMap<String, Vec<String>> = BTreeMap::new();
    let mut pattern_distribution: BTreeMap<String, usize> = BTreeMap::new();
    let mut invalid = Vec::new();

    for sample in &samples {
        *pattern_distribution
            .entry(sample.pattern.to_string())
            .or_insert(0) += 1;

        let content = match std::fs::read_to_string(&sample.path) {
            Ok(c) => c,
            Err(e) => {
                invalid.push(InvalidSample {
                    file: sample.path.display().to_string(),
                    pattern: sample.pattern.to_string(),
                    reason: format!("unreadable: {e}"),
                });
                continue;
            }
        };

        if let Some(reason) = check_sample(&content) {
            invalid.push(InvalidSample {
                file: sample.path.display().to_string(),
                pattern: sample.pattern.to_string(),
                reason,
            });
        }

        by_fingerprint
            .entry(normalizer.fingerprint(&content))
            .or_default()
            .push(sample.path.display().to_string());
    }

    let duplicate_groups: Vec<Vec<String>> = by_fingerprint
        .into_values()
        .filter(|group| group.len() > 1)
        .collect();
    let duplicate_files: usize = duplicate_groups.iter().map(|g| g.len() - 1).sum();

    let total_files = samples.len();
    let invalid_files = invalid.len();
    let valid_files = total_files - invalid_files;
    let quality_score = if total_files > 0 {
        (valid_files.saturating_sub(duplicate_files)) as f64 / total_files as f64
    } else {
        0.0
    };

    let recommendations = build_recommendations(
        &pattern_distribution,
        invalid_files,
        duplicate_files,
        quality_score,
    );

    Ok(ValidationReport {
        total_files,
        valid_files,
        invalid_files,
        duplicate_files,
        pattern_distribution,
        invalid,
        duplicate_groups,
        quality_score,
        recommendations,
    })
}

fn build_recommendations(
    distribution: &BTreeMap<String, usize>,
    invalid_files: usize,
    duplicate_files: usize,
    quality_score: f64,
) -> Vec<String> {
    let mut recommendations = Vec::new();

    if quality_score < 0.7 {
        recommendations.push(format!(
            "quality score is low ({:.0}%) — review invalid samples manually",
            quality_score * 100.0
        ));
    }

    let counted: Vec<usize> = distribution.values().copied().collect();
    if !counted.is_empty() {
        let avg = counted.iter().sum::<usize>() as f64 / counted.len() as f64;
        let under: Vec<&str> = distribution
            .iter()
            .filter(|(_, &c)| (c as f64) < avg * 0.3)
            .map(|(p, _)| p.as_str())
            .collect();
        if !under.is_empty() {
            recommendations.push(format!(
                "under-represented patterns: {} — mine repositories specific to these",
                under.join(", ")
            ));
        }
        let over: Vec<&str> = distribution
            .iter()
            .filter(|(_, &c)| c as f64 > avg * 2.0)
            .map(|(p, _)| p.as_str())
            .collect();
        if !over.is_empty() {
            recommendations.push(format!(
                "over-represented patterns: {} — consider undersampling",
                over.join(", ")
            ));
        }
    }

    let missing: Vec<&str> = patterns::GOF_PATTERNS
        .iter()
        .filter(|p| distribution.get(**p).copied().unwrap_or(0) == 0)
        .copied()
        .collect();
    if !missing.is_empty() {
        recommendations.push(format!(
            "patterns with no samples: {}",
            missing.join(", ")
        ));
    }

    if duplicate_files > 0 {
        recommendations.push(format!(
            "{duplicate_files} duplicate files — run `quarry validate --remove-duplicates`"
        ));
    }
    if invalid_files > 10 {
        recommendations.push(format!(
            "{invalid_files} samples look misfiled or trivial — re-mine or prune"
        ));
    }

    recommendations
}

/// Delete redundant duplicate copies, keeping the first path of each group.
/// With `dry_run`, nothing is deleted. Returns the (would-be) removed paths.
pub fn remove_duplicates(root: &Path, dry_run: bool) -> Result<Vec<PathBuf>> {
    let report = validate_dataset(root)?;
    let mut removed = Vec::new();

    for group in &report.duplicate_groups {
        for path in group.iter().skip(1) {
            let path = PathBuf::from(path);
            if !dry_run {
                std::fs::remove_file(&path)?;
            }
            removed.push(path);
        }
    }

    Ok(removed)
}
