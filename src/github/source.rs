//! The three listing calls the report needs, behind a trait so the
//! fetch logic can run against something other than the live API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use octocrab::{params, Octocrab};

use crate::github::types::{ClosedPullRequest, CommentStamp, RepoRef};

/// Page size requested from the API; `all_pages` follows the rest
const PER_PAGE: u8 = 100;

/// Read-only access to the pull requests and comments of one repository
///
/// Every method returns the complete result set, following pagination.
#[async_trait]
pub trait PullRequestSource: Send + Sync {
    /// List every closed (including merged) pull request
    async fn list_closed_pull_requests(&self) -> Result<Vec<ClosedPullRequest>>;

    /// List the review comments posted on the pull request's diff
    async fn list_pull_request_comments(&self, number: u64) -> Result<Vec<CommentStamp>>;

    /// List the conversation comments on the issue sharing the pull request's number
    async fn list_issue_comments(&self, number: u64) -> Result<Vec<CommentStamp>>;
}

/// `PullRequestSource` backed by the GitHub REST API
#[derive(Clone)]
pub struct OctocrabSource {
    client: Octocrab,
    repo: RepoRef,
}

impl OctocrabSource {
    pub fn new(client: Octocrab, repo: RepoRef) -> Self {
        Self { client, repo }
    }

    pub fn repo(&self) -> &RepoRef {
        &self.repo
    }
}

#[async_trait]
impl PullRequestSource for OctocrabSource {
    async fn list_closed_pull_requests(&self) -> Result<Vec<ClosedPullRequest>> {
        let first_page = self
            .client
            .pulls(&self.repo.owner, &self.repo.repo)
            .list()
            .state(params::State::Closed)
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| format!("Failed to list closed pull requests for {}", self.repo))?;

        let pulls = self
            .client
            .all_pages(first_page)
            .await
            .with_context(|| format!("Failed to page through closed pull requests for {}", self.repo))?;

        pulls
            .into_iter()
            .map(|pr| {
                let created_at = pr
                    .created_at
                    .ok_or_else(|| anyhow!("Pull request #{} has no created_at", pr.number))?;
                Ok(ClosedPullRequest {
                    number: pr.number,
                    created_at,
                    closed_at: pr.closed_at,
                })
            })
            .collect()
    }

    async fn list_pull_request_comments(&self, number: u64) -> Result<Vec<CommentStamp>> {
        let first_page = self
            .client
            .pulls(&self.repo.owner, &self.repo.repo)
            .list_comments(Some(number))
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| format!("Failed to list pull request comments for #{}", number))?;

        let comments = self
            .client
            .all_pages(first_page)
            .await
            .with_context(|| format!("Failed to page through pull request comments for #{}", number))?;

        Ok(comments
            .into_iter()
            .map(|comment| CommentStamp {
                created_at: comment.created_at,
            })
            .collect())
    }

    async fn list_issue_comments(&self, number: u64) -> Result<Vec<CommentStamp>> {
        let first_page = self
            .client
            .issues(&self.repo.owner, &self.repo.repo)
            .list_comments(number)
            .per_page(PER_PAGE)
            .send()
            .await
            .with_context(|| format!("Failed to list issue comments for #{}", number))?;

        let comments = self
            .client
            .all_pages(first_page)
            .await
            .with_context(|| format!("Failed to page through issue comments for #{}", number))?;

        Ok(comments
            .into_iter()
            .map(|comment| CommentStamp {
                created_at: comment.created_at,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    fn pull_json(number: u64, created_at: Option<&str>, closed_at: Option<&str>) -> serde_json::Value {
        serde_json::json!({
            "url": format!("https://api.github.com/repos/o/r/pulls/{}", number),
            "id": 1000 + number,
            "node_id": format!("PR_{}", number),
            "number": number,
            "state": "closed",
            "created_at": created_at,
            "closed_at": closed_at,
            "head": { "ref": "feature", "sha": "abc123", "label": "o:feature" },
            "base": { "ref": "main", "sha": "def456", "label": "o:main" }
        })
    }

    fn source_for(server: &Server) -> OctocrabSource {
        let client = Octocrab::builder()
            .base_uri(server.url())
            .unwrap()
            .build()
            .unwrap();
        OctocrabSource::new(
            client,
            RepoRef {
                owner: "o".to_string(),
                repo: "r".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn test_closed_pull_requests_follow_next_page() {
        let mut server = Server::new_async().await;
        let next = format!("<{}/repos/o/r/pulls?page=2>; rel=\"next\"", server.url());

        let first_page = server
            .mock("GET", "/repos/o/r/pulls")
            .match_query(Matcher::UrlEncoded("state".into(), "closed".into()))
            .with_header("content-type", "application/json")
            .with_header("link", &next)
            .with_body(
                serde_json::json!([pull_json(1, Some("2024-01-05T10:00:00Z"), Some("2024-02-01T09:30:00Z"))])
                    .to_string(),
            )
            .create_async()
            .await;

        let second_page = server
            .mock("GET", "/repos/o/r/pulls")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!([pull_json(2, Some("2024-01-07T08:00:00Z"), None)]).to_string())
            .create_async()
            .await;

        let prs = source_for(&server).list_closed_pull_requests().await.unwrap();

        first_page.assert_async().await;
        second_page.assert_async().await;

        let numbers: Vec<u64> = prs.iter().map(|pr| pr.number).collect();
        assert_eq!(numbers, vec![1, 2]);
        assert!(prs[0].closed_at.is_some());
        assert_eq!(prs[1].closed_at, None);
        assert_eq!(prs[1].created_at.to_rfc3339(), "2024-01-07T08:00:00+00:00");
    }

    #[tokio::test]
    async fn test_pull_request_without_created_at_is_an_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/o/r/pulls")
            .match_query(Matcher::UrlEncoded("state".into(), "closed".into()))
            .with_header("content-type", "application/json")
            .with_body(serde_json::json!([pull_json(3, None, Some("2024-02-01T09:30:00Z"))]).to_string())
            .create_async()
            .await;

        let err = source_for(&server).list_closed_pull_requests().await.unwrap_err();
        assert_eq!(err.to_string(), "Pull request #3 has no created_at");
    }

    #[tokio::test]
    async fn test_empty_issue_comment_thread() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/o/r/issues/4/comments")
            .match_query(Matcher::Any)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let comments = source_for(&server).list_issue_comments(4).await.unwrap();

        mock.assert_async().await;
        assert!(comments.is_empty());
    }

    #[tokio::test]
    async fn test_comment_failure_names_the_pull_request() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/o/r/issues/1/comments")
            .match_query(Matcher::Any)
            .with_status(403)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message": "API rate limit exceeded for user", "documentation_url": "https://docs.github.com/rest"}"#)
            .create_async()
            .await;

        let err = source_for(&server).list_issue_comments(1).await.unwrap_err();
        assert!(format!("{:#}", err).starts_with("Failed to list issue comments for #1"));
    }
}
