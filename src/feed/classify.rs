//! Shape sniffing, structural decode and capability-based kind refinement.
//!
//! Parsing happens in three steps:
//!
//! 1. [`classify_shape`] looks for the root element markers in the raw bytes
//! 2. the bytes are decoded into [`UrlSet`] or [`SitemapIndex`]
//! 3. the top-level `capability` attribute selects the final [`FeedKind`]
//!
//! Any failure aborts the whole parse; no partially decoded document is ever
//! handed back.

use std::fmt;

use thiserror::Error;

use super::fetcher::FetchError;
use super::model::{Capability, SitemapIndex, UrlSet};

/// Top-level structure of a document, decided before any decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Root is `<sitemapindex>`.
    Index,
    /// Root is `<urlset>`.
    List,
    /// Neither root marker is present.
    Unknown,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Index => "index",
            Shape::List => "list",
            Shape::Unknown => "unknown",
        })
    }
}

const INDEX_MARKER: &[u8] = b"<sitemapindex";
const LIST_MARKER: &[u8] = b"<urlset";

/// Sniffs the root element of a feed without parsing it.
///
/// Index wins when both markers occur, since a list root never contains an
/// index element.
pub fn classify_shape(bytes: &[u8]) -> Shape {
    if contains(bytes, INDEX_MARKER) {
        Shape::Index
    } else if contains(bytes, LIST_MARKER) {
        Shape::List
    } else {
        Shape::Unknown
    }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}

/// Precise kind of a decoded feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    ResourceListIndex,
    ChangeListIndex,
    ResourceList,
    CapabilityList,
    ChangeList,
    ResourceDumpManifest,
    ChangeDumpManifest,
}

impl FeedKind {
    /// The one place mapping `(shape, capability)` to a kind.
    ///
    /// Only the top-level metadata of a document is consulted. Returns `None`
    /// for every combination the protocol does not define.
    pub fn refine(shape: Shape, capability: Option<Capability>) -> Option<FeedKind> {
        match (shape, capability?) {
            (Shape::Index, Capability::ResourceList) => Some(FeedKind::ResourceListIndex),
            (Shape::Index, Capability::ChangeList) => Some(FeedKind::ChangeListIndex),
            (Shape::List, Capability::ResourceList) => Some(FeedKind::ResourceList),
            (Shape::List, Capability::CapabilityList) => Some(FeedKind::CapabilityList),
            (Shape::List, Capability::ChangeList) => Some(FeedKind::ChangeList),
            (Shape::List, Capability::ResourceDumpManifest) => {
                Some(FeedKind::ResourceDumpManifest)
            }
            (Shape::List, Capability::ChangeDumpManifest) => Some(FeedKind::ChangeDumpManifest),
            _ => None,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            FeedKind::ResourceListIndex | FeedKind::ChangeListIndex => Shape::Index,
            _ => Shape::List,
        }
    }

    /// Index kinds point at further documents; every other kind is a leaf.
    pub fn is_index(&self) -> bool {
        self.shape() == Shape::Index
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedKind::ResourceListIndex => "ResourceListIndex",
            FeedKind::ChangeListIndex => "ChangeListIndex",
            FeedKind::ResourceList => "ResourceList",
            FeedKind::CapabilityList => "CapabilityList",
            FeedKind::ChangeList => "ChangeList",
            FeedKind::ResourceDumpManifest => "ResourceDumpManifest",
            FeedKind::ChangeDumpManifest => "ChangeDumpManifest",
        }
    }
}

impl fmt::Display for FeedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decoded document, tagged by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedBody {
    List(UrlSet),
    Index(SitemapIndex),
}

/// Result of a successful parse: a kind plus the matching document.
///
/// Only [`parse`] builds this type, so the body shape always agrees with
/// `kind().shape()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    kind: FeedKind,
    body: FeedBody,
}

impl Feed {
    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    pub fn body(&self) -> &FeedBody {
        &self.body
    }

    pub fn as_list(&self) -> Option<&UrlSet> {
        match &self.body {
            FeedBody::List(list) => Some(list),
            FeedBody::Index(_) => None,
        }
    }

    pub fn as_index(&self) -> Option<&SitemapIndex> {
        match &self.body {
            FeedBody::Index(index) => Some(index),
            FeedBody::List(_) => None,
        }
    }

    pub fn into_body(self) -> FeedBody {
        self.body
    }

    /// Number of rows in the document, whichever shape it has.
    pub fn entry_count(&self) -> usize {
        match &self.body {
            FeedBody::List(list) => list.entries.len(),
            FeedBody::Index(index) => index.entries.len(),
        }
    }
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.kind)?;
        match &self.body {
            FeedBody::List(list) => write!(f, "{list}"),
            FeedBody::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Errors surfaced by parsing and processing feeds.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The fetcher failed or returned a non-success status.
    #[error("transport error: {0}")]
    Transport(#[from] FetchError),
    /// No root marker was found, or the capability is absent or outside the
    /// mapping table.
    #[error("unsupported feed type")]
    UnsupportedFeedType,
    /// The root marker matched but the document does not fit its shape.
    #[error("failed to decode {shape} document: {source}")]
    Decode {
        shape: Shape,
        #[source]
        source: quick_xml::DeError,
    },
}

impl FeedError {
    /// HTTP status behind a transport failure, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            FeedError::Transport(e) => e.status(),
            _ => None,
        }
    }
}

/// Classifies and decodes a raw feed.
///
/// # Errors
///
/// - [`FeedError::UnsupportedFeedType`] when the shape is unknown (no decode is
///   attempted) or the top-level capability does not map to a kind
/// - [`FeedError::Decode`] when the document does not match the sniffed shape
pub fn parse(bytes: &[u8]) -> Result<Feed, FeedError> {
    let shape = classify_shape(bytes);
    let (capability, body) = match shape {
        Shape::Unknown => return Err(FeedError::UnsupportedFeedType),
        Shape::Index => {
            let index: SitemapIndex = decode(bytes, shape)?;
            (index.metadata.capability(), FeedBody::Index(index))
        }
        Shape::List => {
            let list: UrlSet = decode(bytes, shape)?;
            (list.metadata.capability(), FeedBody::List(list))
        }
    };

    let kind = FeedKind::refine(shape, capability).ok_or(FeedError::UnsupportedFeedType)?;
    Ok(Feed { kind, body })
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &[u8], shape: Shape) -> Result<T, FeedError> {
    quick_xml::de::from_reader(bytes).map_err(|source| FeedError::Decode { shape, source })
}
