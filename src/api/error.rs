//! Error kinds for bot API calls
//!
//! A non-200 response is not an error here; callers see it as `Ok(false)`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// An identifier was empty. Checked before any request is made.
    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    /// An identifier holds characters that would alter the request URL.
    #[error("{field} {value:?} is not a valid identifier")]
    InvalidField { field: &'static str, value: String },

    /// The file to upload could not be opened or read. No request was made.
    #[error("cannot read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid endpoint URL {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    /// Connection, DNS, timeout or body I/O failure.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: reqwest::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}
