//! Mining pipeline — search, filter, clone, extract.
//!
//! [`Miner::run`] is the single entry point. For each configured query it
//! pages through GitHub search results, gates repositories on the star
//! threshold, shallow-clones each candidate, walks the clone for
//! pattern-named directories, and copies valid `.ts` files into the dataset
//! tree. Every per-repository failure is logged and skipped; the run only
//! aborts on setup errors.

use anyhow::{Context, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::{MiningConfig, QuarryConfig};
use crate::dataset::{self, MiningRecord};
use crate::github::{GithubClient, RepoRecord};
use crate::gitclone;
use crate::patterns;

/// Vendor and output directories never worth descending into.
const PRUNED_DIRS: [&str; 5] = ["node_modules", "dist", "build", ".git", "coverage"];

/// A file must contain at least one of these to count as structured source
/// rather than scripts, configs, or barrel re-exports.
const STRUCTURAL_KEYWORDS: [&str; 5] = [
    "class ",
    "interface ",
    "abstract class ",
    "implements ",
    "extends ",
];

/// Size and shape limits for the source validity gate.
#[derive(Debug, Clone)]
pub struct SourceLimits {
    pub max_file_bytes: u64,
    pub max_line_len: usize,
}

impl From<&MiningConfig> for SourceLimits {
    fn from(config: &MiningConfig) -> Self {
        Self {
            max_file_bytes: config.max_file_bytes,
            max_line_len: config.max_line_len,
        }
    }
}

/// Outcome of a full mining run.
#[derive(Debug)]
pub struct MiningReport {
    pub repos_processed: usize,
    pub repos_failed: usize,
    pub records: Vec<MiningRecord>,
    pub pattern_distribution: BTreeMap<String, usize>,
}

pub struct Miner<'a> {
    config: &'a QuarryConfig,
    github: GithubClient,
}

impl<'a> Miner<'a> {
    /// Fails fast if no GitHub token is configured — everything else is
    /// handled per-repository at run time.
    pub fn new(config: &'a QuarryConfig) -> Result<Self> {
        let token = config
            .github
            .token
            .as_deref()
            .context("no GitHub token configured — set GITHUB_TOKEN")?;
        let github = GithubClient::new(&config.github.api_url, token)?;
        Ok(Self { config, github })
    }

    pub async fn run(&self) -> Result<MiningReport> {
        let dataset_root = self.config.resolved_dataset_dir();
        let temp_dir = self.config.resolved_temp_dir();
        let limits = SourceLimits::from(&self.config.mining);

        dataset::ensure_layout(&dataset_root)?;
        gitclone::prepare_temp_dir(&temp_dir)?;

        let max_repos = self.config.github.max_repos;
        let min_stars = self.config.github.min_stars;
        let delay = Duration::from_millis(self.config.mining.clone_delay_ms);

        let mut processed: HashSet<String> = HashSet::new();
        let mut records: Vec<MiningRecord> = Vec::new();
        let mut failed = 0usize;

        'queries: for query in &self.config.github.queries {
            if processed.len() >= max_repos {
                break;
            }
            info!(query = %query, "running search query");

            let repos = match self
                .github
                .search_repositories(query, self.config.github.per_page, max_repos)
                .await
            {
                Ok(repos) => repos,
                Err(e) => {
                    warn!(query = %query, error = %e, "search query failed, moving to next");
                    continue;
                }
            };

            for repo in repos {
                if processed.len() >= max_repos {
                    break 'queries;
                }
                if !should_mine(&repo, min_stars, &processed) {
                    debug!(
                        repo = %repo.full_name,
                        stars = repo.stargazers_count,
                        "skipping (already processed or below star threshold)"
                    );
                    continue;
                }

                info!(
                    repo = %repo.full_name,
                    stars = repo.stargazers_count,
                    scanned = processed.len() + 1,
                    max = max_repos,
                    "cloning repository"
                );

                match self.process_repo(&repo, &dataset_root, &temp_dir, &limits).await {
                    Ok(repo_records) => {
                        if !repo_records.is_empty() {
                            info!(repo = %repo.full_name, samples = repo_records.len(), "extracted samples");
                        }
                        records.extend(repo_records);
                        processed.insert(repo.full_name.clone());
                    }
                    Err(e) => {
                        failed += 1;
                        warn!(repo = %repo.full_name, error = %e, "skipping repository");
                    }
                }

                tokio::time::sleep(delay).await;
            }
        }

        let mut pattern_distribution = BTreeMap::new();
        for record in &records {
            *pattern_distribution
                .entry(record.pattern.clone())
                .or_insert(0) += 1;
        }

        Ok(MiningReport {
            repos_processed: processed.len(),
            repos_failed: failed,
            records,
            pattern_distribution,
        })
    }

    /// Clone, extract, clean up. The clone directory is removed whether or
    /// not extraction succeeded.
    async fn process_repo(
        &self,
        repo: &RepoRecord,
        dataset_root: &Path,
        temp_dir: &Path,
        limits: &SourceLimits,
    ) -> Result<Vec<MiningRecord>> {
        let clone_dir = temp_dir.join(&repo.name);
        gitclone::remove_clone(&clone_dir);

        let outcome = match gitclone::shallow_clone(&repo.clone_url, &clone_dir).await {
            Ok(()) => extract_patterns(&repo.full_name, &clone_dir, dataset_root, limits),
            Err(e) => Err(e),
        };

        gitclone::remove_clone(&clone_dir);
        outcome
    }
}

/// Gate applied to every search result before cloning: a repository is mined
/// once, and only at or above the star threshold.
fn should_mine(repo: &RepoRecord, min_stars: u32, processed: &HashSet<String>) -> bool {
    !processed.contains(&repo.full_name) && repo.stargazers_count >= min_stars
}

/// Walk a cloned repository and copy every valid `.ts` file that lives under
/// a pattern-named directory into the dataset tree. Returns one provenance
/// record per copied file.
pub fn extract_patterns(
    repo_full_name: &str,
    repo_dir: &Path,
    dataset_root: &Path,
    limits: &SourceLimits,
) -> Result<Vec<MiningRecord>> {
    let mut records = Vec::new();

    let walker = WalkDir::new(repo_dir)
        .into_iter()
        .filter_entry(|e| !is_pruned_dir(e.path()));

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let path = entry.path();
        if !path.is_file() || !is_typescript_source(path) {
            continue;
        }

        // Match against the path inside the repo, so the clone location
        // itself can never label files.
        let rel_path = path.strip_prefix(repo_dir).unwrap_or(path);
        let Some(pattern) = patterns::match_pattern_in_path(rel_path) else {
            continue;
        };

        if !is_valid_source(path, limits) {
            continue;
        }

        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default();
        let filename = dataset::sample_filename(repo_full_name, file_name);
        let dest = dataset::unique_dest(&dataset_root.join(pattern), &filename);

        if let Err(e) = std::fs::copy(path, &dest) {
            warn!(file = %path.display(), error = %e, "failed to copy sample");
            continue;
        }

        records.push(MiningRecord {
            pattern: pattern.to_string(),
            original_repo: repo_full_name.to_string(),
            original_path: rel_path.to_string_lossy().into_owned(),
            local_filename: dest
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or(filename),
        });
    }

    Ok(records)
}

fn is_pruned_dir(path: &Path) -> bool {
    path.is_dir()
        && path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|name| PRUNED_DIRS.contains(&name))
            .unwrap_or(false)
}

/// `.ts` sources only — declaration files carry no implementation.
fn is_typescript_source(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    name.ends_with(".ts") && !name.ends_with(".d.ts")
}

/// Filename-level exclusion: tests, specs, and mocks are not ground truth.
fn is_excluded_filename(name: &str) -> bool {
    let lower = name.to_lowercase();
    lower.contains("test") || lower.contains("spec") || lower.contains("mock")
}

/// A single over-long line is the signature of minified or generated output.
fn looks_minified(content: &str, max_line_len: usize) -> bool {
    content.lines().any(|line| line.len() > max_line_len)
}

fn has_structural_code(content: &str) -> bool {
    STRUCTURAL_KEYWORDS.iter().any(|kw| content.contains(kw))
}

/// Full validity gate for a candidate sample file.
pub fn is_valid_source(path: &Path, limits: &SourceLimits) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if is_excluded_filename(name) {
        return false;
    }

    let Ok(metadata) = std::fs::metadata(path) else {
        return false;
    };
    if metadata.len() > limits.max_file_bytes {
        return false;
    }

    // Tolerate invalid UTF-8 — mined repos contain everything.
    let Ok(bytes) = std::fs::read(path) else {
        return false;
    };
    let content = String::from_utf8_lossy(&bytes);

    if content.trim().is_empty() {
        return false;
    }
    if looks_minified(&content, limits.max_line_len) {
        return false;
    }
    has_structural_code(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repo(full_name: &str, stars: u32) -> RepoRecord {
        RepoRecord {
            full_name: full_name.to_string(),
            name: full_name.rsplit('/').next().unwrap().to_string(),
            stargazers_count: stars,
            clone_url: format!("https://github.com/{full_name}.git"),
        }
    }

    #[test]
    fn star_threshold_excludes_low_star_repos() {
        let processed = HashSet::new();
        assert!(!should_mine(&repo("a/low", 9), 10, &processed));
        assert!(should_mine(&repo("a/exact", 10), 10, &processed));
        assert!(should_mine(&repo("a/high", 5000), 10, &processed));
    }

    #[test]
    fn processed_repos_are_not_mined_twice() {
        let mut processed = HashSet::new();
        let candidate = repo("a/again", 100);
        assert!(should_mine(&candidate, 10, &processed));
        processed.insert("a/again".to_string());
        assert!(!should_mine(&candidate, 10, &processed));
    }

    #[test]
    fn excluded_filenames() {
        assert!(is_excluded_filename("singleton.test.ts"));
        assert!(is_excluded_filename("singleton.spec.ts"));
        assert!(is_excluded_filename("MockLogger.ts"));
        assert!(!is_excluded_filename("singleton.ts"));
    }

    #[test]
    fn typescript_source_filter() {
        assert!(is_typescript_source(Path::new("a/b/logger.ts")));
        assert!(!is_typescript_source(Path::new("a/b/logger.d.ts")));
        assert!(!is_typescript_source(Path::new("a/b/logger.js")));
    }

    #[test]
    fn minified_detection() {
        let normal = "class A {\n  run() {}\n}";
        assert!(!looks_minified(normal, 1000));

        let minified = format!("var a={};{}", "{}", "x".repeat(1200));
        assert!(looks_minified(&minified, 1000));
    }

    #[test]
    fn structural_keyword_gate() {
        assert!(has_structural_code("export class Foo {}"));
        assert!(has_structural_code("interface Shape { area(): number }"));
        assert!(has_structural_code("class B extends A {}"));
        assert!(!has_structural_code("const x = 1;\nexport default x;"));
    }
}
