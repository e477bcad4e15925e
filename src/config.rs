use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct QuarryConfig {
    pub github: GithubConfig,
    pub mining: MiningConfig,
    pub embedding: EmbeddingConfig,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct GithubConfig {
    pub api_url: String,
    /// Bearer token. Usually supplied via the `GITHUB_TOKEN` env var.
    pub token: Option<String>,
    /// Search queries run in order until `max_repos` repositories are scanned.
    pub queries: Vec<String>,
    pub min_stars: u32,
    pub max_repos: usize,
    pub per_page: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MiningConfig {
    pub dataset_dir: String,
    pub temp_dir: String,
    /// Politeness delay between repository clones, in milliseconds.
    pub clone_delay_ms: u64,
    /// Files larger than this are treated as generated output and skipped.
    pub max_file_bytes: u64,
    /// A line longer than this marks the file as minified.
    pub max_line_len: usize,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub provider: String,
    pub base_url: String,
    /// Models to run over every sample. Names must match the server's tags.
    pub models: Vec<String>,
    /// Character budget applied after cleaning, before the text is sent.
    pub max_chars: usize,
    pub output_file: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
}

impl Default for QuarryConfig {
    fn default() -> Self {
        Self {
            github: GithubConfig::default(),
            mining: MiningConfig::default(),
            embedding: EmbeddingConfig::default(),
            log: LogConfig::default(),
        }
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".into(),
            token: None,
            queries: vec![
                "language:TypeScript stars:>1000".into(),
                "language:TypeScript stars:500..1000".into(),
                "topic:clean-architecture language:TypeScript".into(),
                "topic:nestjs language:TypeScript".into(),
                "topic:design-patterns language:TypeScript".into(),
            ],
            min_stars: 10,
            max_repos: 100,
            per_page: 100,
        }
    }
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            dataset_dir: "dataset_ground_truth".into(),
            temp_dir: "temp_clones".into(),
            clone_delay_ms: 500,
            max_file_bytes: 1_000_000,
            max_line_len: 1000,
        }
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: "ollama".into(),
            base_url: "http://localhost:11434".into(),
            models: vec![
                "nomic-embed-text:latest".into(),
                "qwen2.5-coder:7b".into(),
                "llama3.2:latest".into(),
            ],
            max_chars: 12_000,
            output_file: "embeddings_dataset.json".into(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
        }
    }
}

/// Returns `~/.quarry/`
pub fn default_quarry_dir() -> PathBuf {
    dirs::home_dir()
        .expect("home directory must exist")
        .join(".quarry")
}

/// Returns the default config file path: `~/.quarry/config.toml`
pub fn default_config_path() -> PathBuf {
    default_quarry_dir().join("config.toml")
}

impl QuarryConfig {
    /// Load config from TOML file (if it exists) then apply env var overrides.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from a specific path, then apply env var overrides.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            let contents =
                std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str(&contents).context("failed to parse config TOML")?
        } else {
            info!("no config file at {}, using defaults", path.display());
            QuarryConfig::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply environment variable overrides (GITHUB_TOKEN, QUARRY_DATASET_DIR,
    /// QUARRY_OLLAMA_URL, QUARRY_LOG_LEVEL).
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("GITHUB_TOKEN") {
            if !val.is_empty() {
                self.github.token = Some(val);
            }
        }
        if let Ok(val) = std::env::var("QUARRY_DATASET_DIR") {
            self.mining.dataset_dir = val;
        }
        if let Ok(val) = std::env::var("QUARRY_OLLAMA_URL") {
            self.embedding.base_url = val;
        }
        if let Ok(val) = std::env::var("QUARRY_LOG_LEVEL") {
            self.log.level = val;
        }
    }

    /// Resolve the dataset directory, expanding `~` if needed.
    pub fn resolved_dataset_dir(&self) -> PathBuf {
        expand_tilde(&self.mining.dataset_dir)
    }

    /// Resolve the temp clone directory, expanding `~` if needed.
    pub fn resolved_temp_dir(&self) -> PathBuf {
        expand_tilde(&self.mining.temp_dir)
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        dirs::home_dir()
            .expect("home directory must exist")
            .join(rest)
    } else {
        PathBuf::from(path)
    }
}
