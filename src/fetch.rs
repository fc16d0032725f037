use std::collections::HashSet;
use std::fmt;

use crate::cache::{PullRequestRecord, RecordCache};
use crate::github::{ClosedPullRequest, PullRequestSource};

/// Why a harvest stopped
#[derive(Debug)]
pub enum HarvestError {
    /// A call to the API failed
    Source(anyhow::Error),
    /// The record cache could not be read or written
    Cache(anyhow::Error),
}

impl fmt::Display for HarvestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HarvestError::Source(e) => write!(f, "GitHub API error: {:#}", e),
            HarvestError::Cache(e) => write!(f, "Cache error: {:#}", e),
        }
    }
}

impl std::error::Error for HarvestError {}

/// Produces one record per closed pull request, fetching comments only for
/// numbers the cache has never seen.
///
/// Any failure aborts the harvest. Records written before the failure stay
/// in the cache and are reused by the next run.
pub struct Harvester<'a, S: PullRequestSource + ?Sized> {
    source: &'a S,
    cache: &'a mut RecordCache,
    hits: usize,
    misses: usize,
}

impl<'a, S: PullRequestSource + ?Sized> Harvester<'a, S> {
    pub fn new(source: &'a S, cache: &'a mut RecordCache) -> Self {
        Self {
            source,
            cache,
            hits: 0,
            misses: 0,
        }
    }

    /// Return the record for one pull request, from cache if possible
    pub async fn fetch_record(
        &mut self,
        pr: &ClosedPullRequest,
    ) -> Result<PullRequestRecord, HarvestError> {
        if let Some(record) = self.cache.get(pr.number).map_err(HarvestError::Cache)? {
            log::debug!("#{}: cache hit", pr.number);
            self.hits += 1;
            return Ok(record);
        }

        log::debug!("#{}: cache miss, fetching comments", pr.number);
        self.misses += 1;

        // Review comments and conversation comments are disjoint sets, both
        // shown on the same pull request page.
        let mut comments = self
            .source
            .list_pull_request_comments(pr.number)
            .await
            .map_err(HarvestError::Source)?;
        comments.extend(
            self.source
                .list_issue_comments(pr.number)
                .await
                .map_err(HarvestError::Source)?,
        );

        let record = PullRequestRecord::from_listing(pr, comments);
        self.cache.insert(&record).map_err(HarvestError::Cache)?;

        Ok(record)
    }

    /// Produce records for every listed pull request, in listing order
    ///
    /// A number listed more than once keeps its first position.
    pub async fn harvest(
        &mut self,
        prs: &[ClosedPullRequest],
    ) -> Result<Vec<PullRequestRecord>, HarvestError> {
        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(prs.len());

        for pr in prs {
            if !seen.insert(pr.number) {
                continue;
            }
            records.push(self.fetch_record(pr).await?);
        }

        log::info!(
            "Harvested {} pull requests ({} cached, {} fetched)",
            records.len(),
            self.hits,
            self.misses
        );

        Ok(records)
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
