mod client;
mod provider;

pub use client::{Account, ApiResult, Client, Commit, CommitDetails, Failure, RateLimitInfo, SearchItem, SearchResults, Signature};
pub use provider::Provider;
