use super::hosting::Commit;
use super::repository::{AuthorCommits, UNKNOWN};
use std::collections::HashMap;

/// Determine who authored a commit.
///
/// Tries, in order, the linked GitHub login, then the name recorded in the commit
/// metadata, then falls back to [`UNKNOWN`]. Only missing values fall through; an empty
/// login or name is still an identity.
#[must_use]
pub fn resolve_author(commit: &Commit) -> &str {
    if let Some(login) = commit.author.as_ref().and_then(|a| a.login.as_deref()) {
        return login;
    }

    if let Some(name) = commit
        .commit
        .as_ref()
        .and_then(|c| c.author.as_ref())
        .and_then(|a| a.name.as_deref())
    {
        return name;
    }

    UNKNOWN
}

/// Count commits per author.
///
/// Every commit is attributed to exactly one author. Authors appear in the order in
/// which they were first seen.
#[must_use]
pub fn count_authors(commits: &[Commit]) -> Vec<AuthorCommits> {
    let mut authors: Vec<AuthorCommits> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(commits.len());

    for commit in commits {
        let author = resolve_author(commit);
        match index.get(author) {
            Some(&i) => authors[i].commits += 1,
            None => {
                let _ = index.insert(author, authors.len());
                authors.push(AuthorCommits {
                    author: author.to_string(),
                    commits: 1,
                });
            }
        }
    }

    authors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::hosting::{Account, CommitDetails, Signature};

    fn by_login(login: &str) -> Commit {
        Commit {
            author: Some(Account {
                login: Some(login.to_string()),
            }),
            commit: None,
        }
    }

    fn by_name(name: &str) -> Commit {
        Commit {
            author: None,
            commit: Some(CommitDetails {
                author: Some(Signature {
                    name: Some(name.to_string()),
                }),
            }),
        }
    }

    fn counts(authors: &[AuthorCommits]) -> Vec<(&str, u32)> {
        authors.iter().map(|a| (a.author.as_str(), a.commits)).collect()
    }

    #[test]
    fn test_identity_fallback_order() {
        let commits = vec![by_login("alice"), by_name("bob"), Commit::default()];
        let authors = count_authors(&commits);
        assert_eq!(counts(&authors), vec![("alice", 1), ("bob", 1), ("Unknown", 1)]);
    }

    #[test]
    fn test_login_preferred_over_name() {
        let commit = Commit {
            author: Some(Account {
                login: Some("octocat".to_string()),
            }),
            commit: Some(CommitDetails {
                author: Some(Signature {
                    name: Some("The Octocat".to_string()),
                }),
            }),
        };
        assert_eq!(resolve_author(&commit), "octocat");
    }

    #[test]
    fn test_linked_account_without_login_falls_back_to_name() {
        let commit = Commit {
            author: Some(Account { login: None }),
            commit: Some(CommitDetails {
                author: Some(Signature {
                    name: Some("Jane Doe".to_string()),
                }),
            }),
        };
        assert_eq!(resolve_author(&commit), "Jane Doe");
    }

    #[test]
    fn test_empty_login_is_an_identity() {
        let commit = Commit {
            author: Some(Account {
                login: Some(String::new()),
            }),
            commit: Some(CommitDetails {
                author: Some(Signature {
                    name: Some("Jane Doe".to_string()),
                }),
            }),
        };
        assert_eq!(resolve_author(&commit), "");
    }

    #[test]
    fn test_empty_name_is_an_identity() {
        let commit = Commit {
            author: None,
            commit: Some(CommitDetails {
                author: Some(Signature { name: Some(String::new()) }),
            }),
        };
        assert_eq!(resolve_author(&commit), "");

        let authors = count_authors(&[commit, by_login(""), Commit::default()]);
        assert_eq!(counts(&authors), vec![("", 2), (UNKNOWN, 1)]);
    }

    #[test]
    fn test_counts_summed_in_first_appearance_order() {
        let commits = vec![
            by_login("carol"),
            by_login("alice"),
            by_login("carol"),
            by_name("dave"),
            by_login("alice"),
            by_login("carol"),
        ];
        let authors = count_authors(&commits);
        assert_eq!(counts(&authors), vec![("carol", 3), ("alice", 2), ("dave", 1)]);
    }

    #[test]
    fn test_every_commit_counted_once() {
        let commits = vec![by_login("a"), Commit::default(), by_name("b"), Commit::default(), by_login("a")];
        let authors = count_authors(&commits);
        let total: u32 = authors.iter().map(|a| a.commits).sum();
        assert_eq!(total as usize, commits.len());
        assert!(authors.iter().all(|a| a.commits >= 1));
    }

    #[test]
    fn test_login_and_name_share_bucket_when_equal() {
        let authors = count_authors(&[by_login("sam"), by_name("sam")]);
        assert_eq!(counts(&authors), vec![("sam", 2)]);
    }

    #[test]
    fn test_no_commits() {
        assert!(count_authors(&[]).is_empty());
    }
}
