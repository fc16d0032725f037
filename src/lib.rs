pub mod cache;
pub mod config;
pub mod fetch;
pub mod github;
pub mod output;
