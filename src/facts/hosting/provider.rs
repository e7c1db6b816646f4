use super::client::{ApiResult, Client, Commit, Failure, SearchItem, SearchResults};
use crate::Result;
use chrono::{DateTime, SecondsFormat, Utc};
use ohno::EnrichableExt;
use reqwest::Method;

const LOG_TARGET: &str = "   hosting";
const COMMIT_PAGE_SIZE: u8 = 100;

/// Fetches repository rankings and commit listings from GitHub.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Client,
}

impl Provider {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn client(&self) -> &Client {
        &self.client
    }

    /// Get the `limit` most-starred repositories, most popular first.
    ///
    /// A failed search is not fatal: it is logged and yields an empty list. The one exception
    /// is a rejected access token, which is returned as an error since no later request could
    /// succeed either.
    pub async fn discover(&self, limit: u8) -> Result<Vec<SearchItem>> {
        log::info!(target: LOG_TARGET, "Querying GitHub for the {limit} most-starred repositories");

        let params = [
            ("q", "stars:>1".to_string()),
            ("sort", "stars".to_string()),
            ("order", "desc".to_string()),
            ("per_page", limit.to_string()),
        ];

        match self.client.execute::<SearchResults>(Method::GET, "search/repositories", &params).await {
            ApiResult::Success(results, _) => {
                log::debug!(target: LOG_TARGET, "Repository search returned {} item(s)", results.items.len());
                Ok(results.items)
            }
            ApiResult::Failed(failure, _) if failure.is_unauthorized() => {
                Err(ohno::AppError::new(failure).enrich("GitHub rejected the access token"))
            }
            ApiResult::Failed(failure, _) => {
                log::warn!(target: LOG_TARGET, "Repository search failed, continuing with no repositories: {failure}");
                Ok(Vec::new())
            }
        }
    }

    /// Get the commits made to `owner/name` since `since`.
    ///
    /// Only the first page of 100 commits is fetched.
    pub async fn fetch_commits(&self, owner: &str, name: &str, since: DateTime<Utc>) -> Result<Vec<Commit>, Failure> {
        let endpoint = format!("repos/{owner}/{name}/commits");
        let params = [
            ("since", since.to_rfc3339_opts(SecondsFormat::Secs, true)),
            ("per_page", COMMIT_PAGE_SIZE.to_string()),
        ];

        let commits = self.client.execute::<Vec<Commit>>(Method::GET, &endpoint, &params).await.into_result()?;
        log::debug!(target: LOG_TARGET, "Fetched {} commit(s) for repository '{owner}/{name}'", commits.len());

        Ok(commits)
    }
}
