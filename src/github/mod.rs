pub mod client;
pub mod source;
pub mod types;

pub use client::{classify_error, create_client, ApiFailure};
pub use source::{OctocrabSource, PullRequestSource};
pub use types::{ClosedPullRequest, CommentStamp, RepoRef};
