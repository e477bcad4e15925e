//! CLI `embed` command — generate per-model embeddings for every sample.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::config::QuarryConfig;
use crate::dataset::{self, EmbeddingRecord};
use crate::embedding::{self, EmbeddingError};
use crate::textclean::TextCleaner;

/// Read the dataset, clean every sample, run each configured model over the
/// cleaned text, and write `embeddings_dataset.json`. Best-effort: a failed
/// sample is skipped, a missing model is abandoned for the rest of the run.
pub async fn embed(config: &QuarryConfig) -> Result<()> {
    let dataset_root = config.resolved_dataset_dir();
    let samples = dataset::list_samples(&dataset_root)?;
    if samples.is_empty() {
        println!(
            "No samples found under {} — run `quarry mine` first.",
            dataset_root.display()
        );
        return Ok(());
    }
    println!("Found {} samples in {}", samples.len(), dataset_root.display());

    let provider = embedding::create_provider(&config.embedding)
        .context("failed to create embedding provider")?;
    let cleaner = TextCleaner::new(config.embedding.max_chars);

    // Clean once up front; every model sees identical input.
    let mut cleaned: Vec<(usize, String)> = Vec::with_capacity(samples.len());
    for (idx, sample) in samples.iter().enumerate() {
        let bytes = match std::fs::read(&sample.path) {
            Ok(b) => b,
            Err(e) => {
                warn!(file = %sample.path.display(), error = %e, "failed to read sample");
                continue;
            }
        };
        let text = cleaner.clean(&String::from_utf8_lossy(&bytes));
        if text.is_empty() {
            debug!(file = %sample.filename, "nothing left after cleaning, skipping");
            continue;
        }
        cleaned.push((idx, text));
    }
    println!("Cleaned {} samples for embedding.", cleaned.len());

    // vectors[sample index] -> model -> embedding
    let mut vectors: BTreeMap<usize, BTreeMap<String, Vec<f32>>> = BTreeMap::new();

    for model in &config.embedding.models {
        println!();
        println!("Embedding with model '{model}'...");
        let pb = super::progress_bar(cleaned.len() as u64, model);

        for (idx, text) in &cleaned {
            match provider.embed(model, text).await {
                Ok(vector) => {
                    vectors
                        .entry(*idx)
                        .or_default()
                        .insert(model.clone(), vector);
                }
                Err(EmbeddingError::ModelMissing(_)) => {
                    pb.finish_and_clear();
                    eprintln!(
                        "Model '{model}' is not installed — skipping it. \
                         Pull it on the server and re-run."
                    );
                    break;
                }
                Err(e) => {
                    warn!(
                        file = %samples[*idx].filename,
                        model = %model,
                        error = %e,
                        "embedding request failed"
                    );
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();
    }

    // Keep only samples that got at least one vector.
    let records: Vec<EmbeddingRecord> = vectors
        .into_iter()
        .filter(|(_, models)| !models.is_empty())
        .map(|(idx, models)| EmbeddingRecord {
            filename: samples[idx].filename.clone(),
            label: samples[idx].pattern.to_string(),
            embeddings: models,
        })
        .collect();

    let output = crate::config::expand_tilde(&config.embedding.output_file);
    dataset::save_embeddings(&output, &records)?;

    println!();
    println!(
        "Wrote {} embedded samples to {}",
        records.len(),
        output.display()
    );
    Ok(())
}
