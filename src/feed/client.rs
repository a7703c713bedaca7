use super::classify::{parse, Feed, FeedError};
use super::fetcher::{Fetcher, HttpFetcher};

/// Entry point for reading ResourceSync endpoints.
///
/// Each call to [`process`](ResourceSync::process) handles exactly one
/// document. Following index entries is up to the caller (see
/// [`Walker`](super::Walker) for a ready-made follower).
#[derive(Debug, Clone)]
pub struct ResourceSync<F> {
    fetcher: F,
}

impl<F: Fetcher> ResourceSync<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches `url` and parses the returned document.
    ///
    /// # Errors
    ///
    /// - [`FeedError::Transport`] if the fetch fails; the body is not looked at
    /// - [`FeedError::UnsupportedFeedType`] / [`FeedError::Decode`] as for
    ///   [`parse`]
    pub async fn process(&self, url: &str) -> Result<Feed, FeedError> {
        let bytes = self.fetcher.fetch(url).await?;
        let feed = parse(&bytes)?;
        tracing::debug!(
            url = %url,
            kind = %feed.kind(),
            entries = feed.entry_count(),
            "Processed feed"
        );
        Ok(feed)
    }
}

impl Default for ResourceSync<HttpFetcher> {
    fn default() -> Self {
        Self::new(HttpFetcher::default())
    }
}
