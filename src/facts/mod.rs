//! Data collection for the most-starred GitHub repositories
//!
//! # Implementation Model
//!
//! The [`Collector`] first asks the hosting [`Provider`](hosting::Provider) for the top-starred
//! repositories, then summarizes every one of them concurrently: it fetches the commits made
//! since midnight UTC and reduces them to per-author counts with [`count_authors`].
//!
//! All requests go through a single [`Client`](hosting::Client), which is the only place that
//! touches the network. Before each request it takes a slot from the [`Throttler`] (bounding
//! requests in flight) and an admission from the [`RateLimiter`] (bounding requests per second).
//! Those two are the only state shared between the per-repository pipelines.
//!
//! Failures never abort a run. A repository whose summary cannot be built is recorded as an
//! [`Omission`] and left out of the results, which keep the rank each repository had in the
//! search results.

mod authors;
mod collector;
pub mod hosting;
mod omission;
mod rate_limiter;
mod repository;
mod throttler;

pub use authors::{count_authors, resolve_author};
pub use collector::{
    Collection, Collector, DEFAULT_API_URL, DEFAULT_MAX_CONCURRENT, DEFAULT_MAX_RPS, DEFAULT_TIMEOUT, DISCOVERY_LIMIT, start_of_day,
};
pub use omission::{Omission, OmissionReason};
pub use rate_limiter::RateLimiter;
pub use repository::{AuthorCommits, Repository, UNKNOWN};
pub use throttler::Throttler;
