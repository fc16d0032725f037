use chrono::{DateTime, Utc};
use std::fmt;

/// The repository every API call is scoped to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    pub owner: String, // organization or user
    pub repo: String,
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}

/// A closed pull request as returned by the listing call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosedPullRequest {
    pub number: u64,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// A comment from either thread, reduced to when it was posted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentStamp {
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_ref_display() {
        let repo = RepoRef {
            owner: "mozilla".to_string(),
            repo: "testpilot".to_string(),
        };
        assert_eq!(repo.to_string(), "mozilla/testpilot");
    }
}
