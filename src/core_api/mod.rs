//! CORE metadata decoding.
//!
//! Resource lists published by CORE link every PDF to a JSON metadata
//! document (`rel="describedBy"`), and resource dumps ship FastSync article
//! JSON. This module decodes both into plain structs; it does no further
//! processing.

mod article;
mod fastsync;

pub use article::{Article, ArticleWrapper, Language, Repository, RepositoryDocument};
pub use fastsync::{DocumentType, FsArticle, FsEnrichment, FsJournal, FsLanguage};

use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::feed::{FetchError, Fetcher};

/// Errors that can occur while retrieving or decoding CORE metadata.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid target URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ExtractError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ExtractError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Fetches and decodes CORE article metadata.
#[derive(Debug, Clone)]
pub struct Extractor<F> {
    fetcher: F,
}

impl<F: Fetcher> Extractor<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Fetches `target` with the API key appended as the `apiKey` query
    /// parameter and decodes the article response.
    pub async fn process(&self, target: &str, api_key: &str) -> Result<ArticleWrapper, ExtractError> {
        let mut url = url::Url::parse(target.trim())?;
        url.query_pairs_mut().append_pair("apiKey", api_key);

        // The key is part of the URL; log the target without it
        tracing::debug!(url = %target, "Fetching CORE article metadata");
        let bytes = self.fetcher.fetch(url.as_str()).await?;
        extract_article(&bytes)
    }
}

/// Decodes a CORE API article response.
pub fn extract_article(bytes: &[u8]) -> Result<ArticleWrapper, ExtractError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Decodes one FastSync article, as found inside a resource dump.
pub fn extract_fastsync_article(bytes: &[u8]) -> Result<FsArticle, ExtractError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Reads `null` as the type's default, so absent and null fields look alike.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Appends `label: value` on its own line when `value` is non-empty.
pub(crate) fn push_field(out: &mut String, label: &str, value: &str) {
    if !value.is_empty() {
        out.push_str(label);
        out.push_str(": ");
        out.push_str(value);
        out.push('\n');
    }
}

/// Same as [`push_field`] for lists, joined with `", "`.
pub(crate) fn push_list(out: &mut String, label: &str, values: &[String]) {
    if !values.is_empty() {
        push_field(out, label, &values.join(", "));
    }
}
