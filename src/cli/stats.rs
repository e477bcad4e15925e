use anyhow::Result;

use crate::config::QuarryConfig;
use crate::dataset;
use crate::patterns::{self, Category};

/// Display dataset statistics in the terminal.
pub fn stats(config: &QuarryConfig) -> Result<()> {
    let dataset_root = config.resolved_dataset_dir();
    if !dataset_root.exists() {
        println!(
            "No dataset at {} — run `quarry mine` first.",
            dataset_root.display()
        );
        return Ok(());
    }

    let distribution = dataset::pattern_distribution(&dataset_root)?;
    let total: usize = distribution.values().sum();

    println!("Dataset Statistics");
    println!("{}", "=".repeat(40));
    println!("  Dataset:        {}", dataset_root.display());
    println!("  Total samples:  {total}");
    println!();

    for family in [
        Category::Creational,
        Category::Structural,
        Category::Behavioral,
    ] {
        println!("{}:", capitalize(family.as_str()));
        for pattern in patterns::GOF_PATTERNS {
            if patterns::category_of(pattern) != Some(family) {
                continue;
            }
            let count = distribution.get(pattern).copied().unwrap_or(0);
            let bar = "#".repeat(count.min(30));
            println!("  {:<24} {:>4} {}", pattern, count, bar);
        }
        println!();
    }

    let empty: Vec<&str> = patterns::GOF_PATTERNS
        .iter()
        .filter(|p| distribution.get(**p).copied().unwrap_or(0) == 0)
        .copied()
        .collect();
    if !empty.is_empty() {
        println!("Patterns with no samples: {}", empty.join(", "));
    }

    Ok(())
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
