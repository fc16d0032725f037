//! Environment configuration.
//!
//! All four settings are required and have no defaults. A `.env` file in the
//! working directory is read first if one exists; real environment
//! variables take precedence over it.

mod schema;

pub use schema::Settings;

use anyhow::{Context, Result};

/// Environment variables that must be set
pub const REQUIRED_VARS: [&str; 4] = ["GH_USERNAME", "GH_TOKEN", "GH_REPO", "GH_ORGANIZATION"];

/// Load settings from the process environment
///
/// # Errors
///
/// Returns an error if:
/// - A `.env` file exists but cannot be parsed
/// - Any required variable is missing or blank
pub fn load_settings() -> Result<Settings> {
    match dotenvy::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e).context("Failed to read .env file"),
    }

    settings_from_pairs(std::env::vars())
}

fn settings_from_pairs<I>(pairs: I) -> Result<Settings>
where
    I: IntoIterator<Item = (String, String)>,
{
    let settings: Settings = envy::from_iter(pairs).with_context(|| {
        format!("Missing configuration: {} must be set", REQUIRED_VARS.join(", "))
    })?;

    validate(settings)
}

fn validate(mut settings: Settings) -> Result<Settings> {
    let fields = [
        ("GH_USERNAME", &mut settings.gh_username),
        ("GH_TOKEN", &mut settings.gh_token),
        ("GH_REPO", &mut settings.gh_repo),
        ("GH_ORGANIZATION", &mut settings.gh_organization),
    ];

    for (name, value) in fields {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            anyhow::bail!("{} is set but empty", name);
        }
        *value = trimmed.to_string();
    }

    Ok(settings)
}
