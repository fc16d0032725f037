pub mod record;
pub mod store;

pub use record::PullRequestRecord;
pub use store::{cache_key, RecordCache, DEFAULT_CACHE_PATH};
