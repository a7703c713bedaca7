//! ResourceSync feed classification and parsing.
//!
//! - [`model`] - Typed wire shapes (`urlset`, `sitemapindex`, `rs:ln`, `rs:md`)
//! - [`classify_shape`] / [`parse`] - Root sniffing, decoding and kind refinement
//! - [`Fetcher`] - Document retrieval capability, with [`HttpFetcher`] as default
//! - [`ResourceSync`] - `process(url)`: fetch plus parse, one document per call
//! - [`Walker`] - Optional follower over index documents
//!
//! # Example
//!
//! ```no_run
//! use resourcesync::feed::{FeedKind, HttpFetcher, ResourceSync};
//!
//! # async fn example() -> Result<(), resourcesync::feed::FeedError> {
//! let rs = ResourceSync::new(HttpFetcher::default());
//! let feed = rs.process("https://example.org/resourcesync/capabilitylist.xml").await?;
//! if feed.kind() == FeedKind::CapabilityList {
//!     for entry in &feed.as_list().unwrap().entries {
//!         println!("{} -> {}", entry.metadata.capability, entry.location.trim());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod classify;
mod client;
mod fetcher;
pub mod model;
mod render;
mod walker;

pub use classify::{classify_shape, parse, Feed, FeedBody, FeedError, FeedKind, Shape};
pub use client::ResourceSync;
pub use fetcher::{FetchError, Fetcher, HttpFetcher, DEFAULT_MAX_BODY_BYTES, DEFAULT_TIMEOUT};
pub use model::{Capability, Entry, IndexEntry, Link, Metadata, SitemapIndex, UrlSet};
pub use walker::{resolve_location, Visited, WalkFailure, WalkSummary, Walker, DEFAULT_MAX_DEPTH};
