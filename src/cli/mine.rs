//! CLI `mine` command — build the ground-truth dataset from GitHub.

use anyhow::Result;
use chrono::Utc;

use crate::config::QuarryConfig;
use crate::dataset::{self, MiningMetadata};
use crate::miner::Miner;

/// Run the full mining pipeline and write `dataset_metadata.json`.
pub async fn mine(config: &QuarryConfig) -> Result<()> {
    let dataset_root = config.resolved_dataset_dir();
    if dataset_root.exists() {
        println!(
            "Dataset directory {} already exists — new samples will be added.",
            dataset_root.display()
        );
    }

    println!(
        "Mining up to {} repositories (min {} stars) across {} queries...",
        config.github.max_repos,
        config.github.min_stars,
        config.github.queries.len()
    );

    let miner = Miner::new(config)?;
    let report = miner.run().await?;

    let metadata = MiningMetadata {
        generated_at: Utc::now().to_rfc3339(),
        repos_processed: report.repos_processed,
        total_samples: report.records.len(),
        pattern_distribution: report.pattern_distribution.clone(),
        samples: report.records,
    };
    dataset::save_metadata(&dataset_root, &metadata)?;

    println!();
    println!("Mining complete");
    println!("{}", "=".repeat(40));
    println!("  Dataset:            {}", dataset_root.display());
    println!("  Repos processed:    {}", metadata.repos_processed);
    println!("  Repos failed:       {}", report.repos_failed);
    println!("  Samples collected:  {}", metadata.total_samples);
    println!();

    if !metadata.pattern_distribution.is_empty() {
        println!("Samples per pattern:");
        for (pattern, count) in &metadata.pattern_distribution {
            println!("  {:<24} {}", pattern, count);
        }

        let avg = metadata.total_samples as f64 / metadata.pattern_distribution.len() as f64;
        let under: Vec<&str> = metadata
            .pattern_distribution
            .iter()
            .filter(|(_, &c)| (c as f64) < avg * 0.3)
            .map(|(p, _)| p.as_str())
            .collect();
        if !under.is_empty() {
            println!();
            println!("Under-represented patterns: {}", under.join(", "));
            println!("Consider adding queries targeting these patterns.");
        }
    }

    println!();
    println!(
        "Metadata written to {}",
        dataset_root.join(dataset::METADATA_FILE).display()
    );
    Ok(())
}
