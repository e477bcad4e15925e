//! CLI `validate` command — dataset quality report and duplicate cleanup.

use anyhow::{Context, Result};
use std::path::Path;

use crate::config::QuarryConfig;
use crate::validate;

pub fn run(
    config: &QuarryConfig,
    remove_duplicates: bool,
    dry_run: bool,
    export: Option<&Path>,
) -> Result<()> {
    let dataset_root = config.resolved_dataset_dir();
    let report = validate::validate_dataset(&dataset_root)?;

    println!("Dataset Quality Report");
    println!("{}", "=".repeat(40));
    println!("  Dataset:        {}", dataset_root.display());
    println!("  Total files:    {}", report.total_files);
    println!("  Valid:          {}", report.valid_files);
    println!("  Invalid:        {}", report.invalid_files);
    println!("  Duplicates:     {}", report.duplicate_files);
    println!("  Quality score:  {:.1}%", report.quality_score * 100.0);
    println!();

    println!("Samples per pattern:");
    for (pattern, count) in &report.pattern_distribution {
        let bar = "#".repeat((*count).min(30));
        println!("  {:<24} {:>4} {}", pattern, count, bar);
    }

    if !report.invalid.is_empty() {
        println!();
        println!("Invalid samples (first 10):");
        for sample in report.invalid.iter().take(10) {
            println!("  {} [{}]", sample.file, sample.pattern);
            println!("    {}", sample.reason);
        }
    }

    if !report.recommendations.is_empty() {
        println!();
        println!("Recommendations:");
        for rec in &report.recommendations {
            println!("  - {rec}");
        }
    }

    if let Some(path) = export {
        let json = serde_json::to_string_pretty(&report)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        println!();
        println!("Report written to {}", path.display());
    }

    if remove_duplicates {
        println!();
        let removed = validate::remove_duplicates(&dataset_root, dry_run)?;
        if dry_run {
            for path in &removed {
                println!("  [dry-run] would remove {}", path.display());
            }
            println!("Dry run: {} duplicate files would be removed.", removed.len());
        } else {
            for path in &removed {
                println!("  removed {}", path.display());
            }
            println!("Removed {} duplicate files.", removed.len());
        }
    }

    Ok(())
}
