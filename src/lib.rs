//! ResourceSync feed client.
//!
//! - [`feed`] - Shape sniffing, decoding and kind refinement of ResourceSync
//!   documents, plus fetching and an optional index follower
//! - [`core_api`] - CORE article and FastSync metadata decoding
//! - [`config`] - TOML configuration for the `rsprobe` binary
//! - [`util`] - URL validation and W3C datetime helpers

pub mod config;
pub mod core_api;
pub mod feed;
pub mod util;
