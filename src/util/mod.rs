//! Utility functions shared by the library and the CLI.
//!
//! - **URL validation**: targets must be absolute http(s) URLs
//! - **Datetimes**: lenient W3C datetime parsing for feed timestamps

mod datetime;
mod url_validator;

pub use datetime::parse_w3c_datetime;
pub use url_validator::{validate_target_url, UrlValidationError};
