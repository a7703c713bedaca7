//! Caller-side follower for index documents.
//!
//! Built purely on repeated [`ResourceSync::process`] calls. Documents are
//! visited one at a time, depth first, in document order.

use std::collections::HashSet;

use url::Url;

use super::classify::{Feed, FeedBody, FeedError, FeedKind};
use super::client::ResourceSync;
use super::fetcher::Fetcher;

/// Default limit on how many index levels are followed below the start URL.
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// A document that was fetched and parsed during a walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visited {
    pub url: String,
    pub kind: FeedKind,
    pub depth: usize,
}

/// A child document that could not be processed. The walk carries on.
#[derive(Debug)]
pub struct WalkFailure {
    pub url: String,
    pub error: FeedError,
}

/// Totals gathered over a walk.
#[derive(Debug, Default)]
pub struct WalkSummary {
    pub start: String,
    /// Rows seen in index documents.
    pub index_links: usize,
    /// Rows seen in terminal documents.
    pub resource_links: usize,
    pub visited: Vec<Visited>,
    pub failures: Vec<WalkFailure>,
    /// Child locations not fetched because they were already seen or too deep.
    pub skipped: usize,
}

#[derive(Debug)]
pub struct Walker<'a, F> {
    client: &'a ResourceSync<F>,
    follow: bool,
    max_depth: usize,
}

impl<'a, F: Fetcher> Walker<'a, F> {
    pub fn new(client: &'a ResourceSync<F>) -> Self {
        Self {
            client,
            follow: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// When false only the start document is processed.
    pub fn follow(mut self, follow: bool) -> Self {
        self.follow = follow;
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Walks from `start`, handing every decoded document to `observer`.
    ///
    /// # Errors
    ///
    /// Only a failure on the start document is returned. Failures further down
    /// are collected in [`WalkSummary::failures`].
    pub async fn walk<O>(&self, start: &str, mut observer: O) -> Result<WalkSummary, FeedError>
    where
        O: FnMut(&str, &Feed),
    {
        let mut summary = WalkSummary {
            start: start.to_string(),
            ..WalkSummary::default()
        };
        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(start.to_string());

        let mut stack: Vec<(String, usize)> = vec![(start.to_string(), 0)];
        while let Some((url, depth)) = stack.pop() {
            let feed = match self.client.process(&url).await {
                Ok(feed) => feed,
                Err(e) if depth == 0 => return Err(e),
                Err(e) => {
                    tracing::warn!(url = %url, error = %e, "Skipping child feed");
                    summary.failures.push(WalkFailure { url, error: e });
                    continue;
                }
            };

            observer(&url, &feed);
            summary.visited.push(Visited {
                url: url.clone(),
                kind: feed.kind(),
                depth,
            });

            let index = match feed.into_body() {
                FeedBody::List(list) => {
                    summary.resource_links += list.entries.len();
                    continue;
                }
                FeedBody::Index(index) => index,
            };
            summary.index_links += index.entries.len();

            if !self.follow {
                continue;
            }
            if depth >= self.max_depth {
                tracing::debug!(url = %url, depth, "Depth limit reached, not following");
                summary.skipped += index.entries.len();
                continue;
            }

            // Reversed so the stack pops children in document order
            for entry in index.entries.iter().rev() {
                let child = resolve_location(&url, &entry.location);
                if !seen.insert(child.clone()) {
                    tracing::debug!(url = %child, "Already visited, skipping");
                    summary.skipped += 1;
                    continue;
                }
                stack.push((child, depth + 1));
            }
        }

        Ok(summary)
    }
}

/// Trims a `<loc>` value and resolves it against the document it came from.
pub fn resolve_location(parent: &str, location: &str) -> String {
    let location = location.trim();
    match Url::parse(parent).and_then(|base| base.join(location)) {
        Ok(url) => url.to_string(),
        Err(_) => location.to_string(),
    }
}
