//! Two-stage pipeline for building a Gang-of-Four design-pattern ground-truth
//! dataset from real-world TypeScript code.
//!
//! **Stage 1 — mining**: search GitHub for TypeScript repositories, filter by
//! a star threshold, shallow-clone each candidate, and copy `.ts` files found
//! under pattern-named directories into a labeled dataset tree. Provenance is
//! encoded in the filename: `<dataset>/<Pattern>/<owner_repo>__<file>.ts`.
//!
//! **Stage 2 — embedding**: clean and truncate every sample, then request a
//! vector from each configured model on a locally served embedding API,
//! writing all vectors to a single JSON document for downstream analysis.
//!
//! Both stages are sequential, best-effort, rerunnable batch jobs: a failed
//! repository or sample is logged and skipped, never retried.
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`patterns`] — The 23-pattern GoF catalog and folder-name matching
//! - [`github`] — GitHub REST search client with pagination
//! - [`gitclone`] — Shallow clones via the `git` binary and temp-dir lifecycle
//! - [`miner`] — The mining pipeline: filter, clone, extract, copy
//! - [`dataset`] — Dataset tree layout and on-disk JSON formats
//! - [`textclean`] — Comment stripping, whitespace collapse, truncation
//! - [`embedding`] — Embedding providers over a local model-serving API
//! - [`validate`] — Duplicate detection and dataset quality reporting

pub mod config;
pub mod dataset;
pub mod embedding;
pub mod github;
pub mod gitclone;
pub mod miner;
pub mod patterns;
pub mod textclean;
pub mod validate;
