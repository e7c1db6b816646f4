use serde::Serialize;

/// Placeholder used when a language or an author cannot be determined.
pub const UNKNOWN: &str = "Unknown";

/// Number of commits one author made to a repository today.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorCommits {
    pub author: String,
    pub commits: u32,
}

/// Summary of one of the top-starred repositories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Repository {
    pub name: String,
    pub owner: String,

    /// 1-based rank in the repository search, kept even when other repositories are dropped
    pub position: u32,
    pub stars: u64,
    pub watchers: u64,
    pub forks: u64,
    pub language: String,

    /// Today's commit authors, in order of first appearance
    pub authors: Vec<AuthorCommits>,
}

impl Repository {
    /// Total number of commits made today across all authors.
    #[must_use]
    pub fn total_commits(&self) -> u64 {
        self.authors.iter().map(|a| u64::from(a.commits)).sum()
    }

    /// `owner/name` form of the repository.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Repository {
        Repository {
            name: "tokio".to_string(),
            owner: "tokio-rs".to_string(),
            position: 3,
            stars: 100,
            watchers: 100,
            forks: 10,
            language: "Rust".to_string(),
            authors: vec![
                AuthorCommits {
                    author: "alice".to_string(),
                    commits: 2,
                },
                AuthorCommits {
                    author: "bob".to_string(),
                    commits: 5,
                },
            ],
        }
    }

    #[test]
    fn test_total_commits() {
        assert_eq!(sample().total_commits(), 7);
    }

    #[test]
    fn test_total_commits_no_authors() {
        let repo = Repository {
            authors: Vec::new(),
            ..sample()
        };
        assert_eq!(repo.total_commits(), 0);
    }

    #[test]
    fn test_full_name() {
        assert_eq!(sample().full_name(), "tokio-rs/tokio");
    }

    #[test]
    fn test_serialize_field_names() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["position"], 3);
        assert_eq!(value["language"], "Rust");
        assert_eq!(value["authors"][1]["author"], "bob");
        assert_eq!(value["authors"][1]["commits"], 5);
    }
}
