//! GitHub REST search client.
//!
//! Thin typed wrapper over `GET /search/repositories`: bearer-token auth,
//! page-by-page iteration, and the API's 1000-result search window. Network
//! failures surface as errors; the caller decides whether to skip or abort.

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

/// GitHub caps repository search at the first 1000 results per query.
const RESULT_WINDOW: usize = 1000;

/// A repository as returned by the search API. Transient — exists only
/// while mining.
#[derive(Debug, Clone, Deserialize)]
pub struct RepoRecord {
    /// `owner/name`, used for provenance in sample filenames.
    pub full_name: String,
    /// Bare repository name, used for the temp clone directory.
    pub name: String,
    pub stargazers_count: u32,
    pub clone_url: String,
}

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<RepoRecord>,
}

pub struct GithubClient {
    http: reqwest::Client,
    api_url: String,
    token: String,
}

impl GithubClient {
    pub fn new(api_url: &str, token: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("quarry/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self {
            http,
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        })
    }

    /// Fetch one page of search results, sorted by stars descending.
    /// Pages are 1-based, matching the API.
    pub async fn search_page(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchResponse> {
        let url = format!("{}/search/repositories", self.api_url);
        let per_page = per_page.to_string();
        let page_param = page.to_string();
        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.token)
            .header("Accept", "application/vnd.github+json")
            .query(&[
                ("q", query),
                ("sort", "stars"),
                ("order", "desc"),
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
            ])
            .send()
            .await
            .with_context(|| format!("search request failed for query '{query}'"))?;

        let status = response.status();
        anyhow::ensure!(
            status.is_success(),
            "GitHub search returned HTTP {status} for query '{query}'"
        );

        let parsed: SearchResponse = response
            .json()
            .await
            .context("failed to parse search response")?;

        debug!(
            query,
            page,
            returned = parsed.items.len(),
            total = parsed.total_count,
            "search page fetched"
        );
        Ok(parsed)
    }

    /// Iterate a query's result pages until `limit` repositories have been
    /// collected, the search window is exhausted, or a page comes back empty.
    pub async fn search_repositories(
        &self,
        query: &str,
        per_page: u32,
        limit: usize,
    ) -> Result<Vec<RepoRecord>> {
        let limit = limit.min(RESULT_WINDOW);
        let mut repos = Vec::new();
        let mut page = 1u32;

        while repos.len() < limit {
            let response = self.search_page(query, page, per_page).await?;
            if response.items.is_empty() {
                break;
            }
            if response.incomplete_results {
                warn!(query, page, "GitHub reported incomplete results");
            }
            repos.extend(response.items);
            page += 1;
        }

        repos.truncate(limit);
        Ok(repos)
    }
}
