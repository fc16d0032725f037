use anyhow::{Context, Result};
use octocrab::Octocrab;

/// Create a GitHub client authenticated with a username and API token
pub fn create_client(username: &str, token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .basic_auth(username.to_string(), token.to_string())
        .build()
        .context("Failed to create GitHub client")
}

/// Broad category of a failed API call, used to pick an exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFailure {
    RateLimited,
    Unauthorized,
    Other,
}

/// Inspect an error chain for a GitHub API error and categorize it
pub fn classify_error(err: &anyhow::Error) -> ApiFailure {
    match err.downcast_ref::<octocrab::Error>() {
        Some(octocrab::Error::GitHub { source, .. }) => {
            let message = source.message.to_lowercase();
            if message.contains("rate limit") {
                ApiFailure::RateLimited
            } else if message.contains("bad credentials") || message.contains("requires authentication") {
                ApiFailure::Unauthorized
            } else {
                ApiFailure::Other
            }
        }
        _ => ApiFailure::Other,
    }
}
