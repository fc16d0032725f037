use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::github::types::{ClosedPullRequest, CommentStamp};

/// Everything the report needs to know about one closed pull request
///
/// Written to the record cache the first time the pull request is seen
/// and never updated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub total_comments: usize,
    pub first_comment_created_at: Option<DateTime<Utc>>,
}

impl PullRequestRecord {
    /// Build a record from a listing entry and the comments of both threads
    pub fn from_listing(pr: &ClosedPullRequest, mut comments: Vec<CommentStamp>) -> Self {
        comments.sort_by_key(|comment| comment.created_at);

        Self {
            number: pr.number,
            created_at: pr.created_at,
            closed_at: pr.closed_at,
            total_comments: comments.len(),
            first_comment_created_at: comments.first().map(|comment| comment.created_at),
        }
    }
}
