use super::hosting::Failure;
use core::fmt::{Display, Formatter};

/// Why a discovered repository is missing from the results
#[derive(Debug)]
pub enum OmissionReason {
    /// The search result lacked a field needed to query the repository
    MissingField(&'static str),

    /// The commit listing could not be fetched
    CommitsUnavailable(Failure),
}

impl Display for OmissionReason {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "search result has no '{field}' field"),
            Self::CommitsUnavailable(failure) => write!(f, "could not fetch today's commits: {failure}"),
        }
    }
}

impl core::error::Error for OmissionReason {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::MissingField(_) => None,
            Self::CommitsUnavailable(failure) => Some(failure),
        }
    }
}

/// A discovered repository that was dropped from the results.
#[derive(Debug)]
pub struct Omission {
    /// 1-based rank of the repository in the search results
    pub position: u32,

    /// `owner/name`, or whatever part of it is known
    pub repository: Option<String>,
    pub reason: OmissionReason,
}
