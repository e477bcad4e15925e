//! CLI `doctor` command — check every external dependency of the pipeline.

use anyhow::Result;

use crate::config::QuarryConfig;
use crate::dataset;
use crate::embedding;
use crate::gitclone;

/// Run environment diagnostics and print a health report: GitHub token,
/// `git` binary, embedding server, configured models, dataset presence.
pub async fn doctor(config: &QuarryConfig) -> Result<()> {
    println!("Quarry Health Report");
    println!("====================");
    println!();

    // GitHub token (only needed for `mine`)
    match &config.github.token {
        Some(token) => {
            let preview: String = token.chars().take(8).collect();
            println!("GitHub token:      set ({preview}...)");
        }
        None => {
            println!("GitHub token:      NOT SET");
            println!("                   `quarry mine` will fail — export GITHUB_TOKEN first.");
        }
    }

    // git binary
    if gitclone::git_available().await {
        println!("git binary:        found");
    } else {
        println!("git binary:        NOT FOUND on PATH");
    }
    println!();

    // Embedding server + models
    println!("Embedding server:  {}", config.embedding.base_url);
    let provider = embedding::create_provider(&config.embedding)?;
    match provider.list_models().await {
        Ok(installed) => {
            println!("  Status:          reachable ({} models installed)", installed.len());
            for model in &config.embedding.models {
                // The server may report a more specific tag, so match on containment.
                let present = installed.iter().any(|name| name.contains(model.as_str()))
                    || installed.iter().any(|name| model.contains(name.as_str()));
                if present {
                    println!("  {:<24} installed", model);
                } else {
                    println!("  {:<24} MISSING — pull it on the server", model);
                }
            }
        }
        Err(e) => {
            println!("  Status:          UNREACHABLE ({e})");
            println!("                   Start the model server before running `quarry embed`.");
        }
    }
    println!();

    // Dataset
    let dataset_root = config.resolved_dataset_dir();
    if dataset_root.exists() {
        let count = dataset::list_samples(&dataset_root)?.len();
        println!("Dataset:           {} ({count} samples)", dataset_root.display());
        if count == 0 {
            println!("                   Empty — run `quarry mine`.");
        }
    } else {
        println!("Dataset:           not created yet — run `quarry mine`.");
    }

    Ok(())
}
