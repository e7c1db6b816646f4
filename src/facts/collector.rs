use super::authors::count_authors;
use super::hosting::{Client, Provider, SearchItem};
use super::omission::{Omission, OmissionReason};
use super::repository::{Repository, UNKNOWN};
use crate::Result;
use chrono::{DateTime, NaiveTime, Utc};
use core::time::Duration;
use futures_util::future::join_all;

/// Log target for collector
const LOG_TARGET: &str = " collector";

/// Number of repositories requested from the search endpoint
pub const DISCOVERY_LIMIT: u8 = 100;

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_MAX_CONCURRENT: usize = 5;
pub const DEFAULT_MAX_RPS: u32 = 10;
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Repositories gathered by one collection run, with the ones that had to be dropped
#[derive(Debug, Default)]
pub struct Collection {
    /// Start of the window commits were counted in
    pub since: DateTime<Utc>,

    /// Successfully summarized repositories in ascending `position` order
    pub repositories: Vec<Repository>,

    /// Dropped repositories in ascending `position` order
    pub omissions: Vec<Omission>,
}

/// Collects the top-starred repositories and today's commit authors for each.
#[derive(Debug)]
pub struct Collector {
    provider: Provider,
}

impl Collector {
    /// Create a collector talking to the public GitHub API.
    pub fn new(github_token: Option<&str>, max_concurrent: usize, max_rps: u32) -> Result<Self> {
        Self::with_base_url(github_token, DEFAULT_API_URL, max_concurrent, max_rps, DEFAULT_TIMEOUT)
    }

    /// Create a collector talking to a GitHub-compatible API at `base_url`.
    pub fn with_base_url(
        github_token: Option<&str>,
        base_url: impl Into<String>,
        max_concurrent: usize,
        max_rps: u32,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::new(github_token, base_url, max_concurrent, max_rps, timeout)?;
        Ok(Self {
            provider: Provider::new(client),
        })
    }

    #[must_use]
    pub const fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Get the summaries of the top-starred repositories, ordered by rank.
    ///
    /// Repositories that could not be summarized are left out; use [`Collector::collect`]
    /// to find out which ones and why.
    pub async fn get_repositories(&self) -> Result<Vec<Repository>> {
        Ok(self.collect().await?.repositories)
    }

    /// Same as [`Collector::get_repositories`].
    pub async fn run(&self) -> Result<Vec<Repository>> {
        self.get_repositories().await
    }

    /// Discover the top-starred repositories and summarize each of them concurrently.
    pub async fn collect(&self) -> Result<Collection> {
        let since = start_of_day(Utc::now());
        let candidates = self.provider.discover(DISCOVERY_LIMIT).await?;
        if candidates.is_empty() {
            log::info!(target: LOG_TARGET, "No repositories discovered");
            return Ok(Collection {
                since,
                ..Collection::default()
            });
        }

        log::info!(target: LOG_TARGET, "Collecting commits since {} for {} repositories", since.format("%F %T UTC"), candidates.len());

        let pipelines = candidates
            .into_iter()
            .zip(1_u32..)
            .map(|(candidate, position)| self.summarize(candidate, position, since));

        let mut collection = Collection {
            since,
            ..Collection::default()
        };
        for outcome in join_all(pipelines).await {
            match outcome {
                Ok(repository) => collection.repositories.push(repository),
                Err(omission) => {
                    log::warn!(
                        target: LOG_TARGET,
                        "Dropping repository #{} ({}): {}",
                        omission.position,
                        omission.repository.as_deref().unwrap_or("unnamed"),
                        omission.reason
                    );
                    collection.omissions.push(omission);
                }
            }
        }

        // Completion order is irrelevant, the rank captured at discovery time decides
        collection.repositories.sort_by_key(|r| r.position);
        collection.omissions.sort_by_key(|o| o.position);

        log::info!(
            target: LOG_TARGET,
            "Collected {} repositories, dropped {}",
            collection.repositories.len(),
            collection.omissions.len()
        );

        Ok(collection)
    }

    /// Fetch and aggregate today's commits for one discovered repository.
    async fn summarize(&self, candidate: SearchItem, position: u32, since: DateTime<Utc>) -> Result<Repository, Omission> {
        let SearchItem {
            name,
            owner,
            stargazers_count,
            watchers_count,
            forks_count,
            language,
        } = candidate;

        let owner = owner.and_then(|o| o.login).filter(|s| !s.is_empty());
        let name = name.filter(|s| !s.is_empty());
        let (owner, name) = match (owner, name) {
            (Some(owner), Some(name)) => (owner, name),
            (None, name) => {
                return Err(Omission {
                    position,
                    repository: name,
                    reason: OmissionReason::MissingField("owner.login"),
                });
            }
            (Some(owner), None) => {
                return Err(Omission {
                    position,
                    repository: Some(owner),
                    reason: OmissionReason::MissingField("name"),
                });
            }
        };

        let commits = match self.provider.fetch_commits(&owner, &name, since).await {
            Ok(commits) => commits,
            Err(failure) => {
                return Err(Omission {
                    position,
                    repository: Some(format!("{owner}/{name}")),
                    reason: OmissionReason::CommitsUnavailable(failure),
                });
            }
        };

        let authors = count_authors(&commits);
        log::debug!(target: LOG_TARGET, "Repository #{position} '{owner}/{name}' has {} author(s) today", authors.len());

        Ok(Repository {
            name,
            owner,
            position,
            stars: stargazers_count.unwrap_or(0),
            watchers: watchers_count.unwrap_or(0),
            forks: forks_count.unwrap_or(0),
            language: language.filter(|s| !s.is_empty()).unwrap_or_else(|| UNKNOWN.to_string()),
            authors,
        })
    }

    /// Release the underlying HTTP connections.
    ///
    /// Consumes the collector, so it runs at most once.
    pub fn close(self) {
        log::debug!(target: LOG_TARGET, "Closing connections to {}", self.provider.client().base_url());
        drop(self.provider);
    }
}

/// Midnight UTC of the day containing `now`.
#[must_use]
pub fn start_of_day(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}
