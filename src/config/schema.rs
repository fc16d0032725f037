use serde::Deserialize;
use std::fmt;

use crate::github::types::RepoRef;

/// Settings read from `GH_USERNAME`, `GH_TOKEN`, `GH_REPO` and `GH_ORGANIZATION`
#[derive(Clone, Deserialize)]
pub struct Settings {
    /// User the API token belongs to
    pub gh_username: String,
    pub gh_token: String,
    /// Repository name, e.g. "testpilot"
    pub gh_repo: String,
    /// Organization or user owning the repository, e.g. "mozilla"
    pub gh_organization: String,
}

impl Settings {
    pub fn repo_ref(&self) -> RepoRef {
        RepoRef {
            owner: self.gh_organization.clone(),
            repo: self.gh_repo.clone(),
        }
    }
}

// Keeps the token out of logs and error output
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("gh_username", &self.gh_username)
            .field("gh_token", &"<redacted>")
            .field("gh_repo", &self.gh_repo)
            .field("gh_organization", &self.gh_organization)
            .finish()
    }
}
