use thiserror::Error;
use url::Url;

/// Errors that can occur during target URL validation.
#[derive(Error, Debug)]
pub enum UrlValidationError {
    /// The URL string could not be parsed (relative URLs land here too).
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The URL uses a scheme other than http or https.
    #[error("Unsupported scheme: {0} (only http/https allowed)")]
    UnsupportedScheme(String),
    /// The URL has no host component.
    #[error("URL has no host")]
    MissingHost,
}

/// Validates a URL string for use as a ResourceSync or CORE target.
///
/// The target must be absolute, use `http` or `https`, and name a host.
/// Loopback and private addresses are accepted.
///
/// # Examples
///
/// ```
/// use resourcesync::util::validate_target_url;
///
/// let url = validate_target_url("https://example.com/resourcesync.xml").unwrap();
/// assert_eq!(url.host_str(), Some("example.com"));
///
/// assert!(validate_target_url("/resourcesync.xml").is_err());
/// assert!(validate_target_url("file:///etc/passwd").is_err());
/// ```
pub fn validate_target_url(url_str: &str) -> Result<Url, UrlValidationError> {
    let url = Url::parse(url_str.trim())?;

    match url.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlValidationError::UnsupportedScheme(scheme.to_owned())),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}
