//! Error types for speedrun.com API operations.

use thiserror::Error;

/// Errors that can occur during speedrun.com API operations.
///
/// Every variant that corresponds to a failed request carries the HTTP
/// method and URL, so callers can log a useful diagnostic without poking
/// at internal state.
#[derive(Debug, Error)]
pub enum Error {
    /// Connection, DNS or timeout failure while talking to the API.
    #[error("network error during {method} {url}: {source}")]
    Network {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// A request URL could not be constructed. Outside of bugs in this
    /// crate, this should never occur.
    #[error("invalid URL '{url}': {source}")]
    BadUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The response body was not valid JSON (or not the expected shape).
    /// This usually means the site is having issues and served a non-JSON
    /// error page.
    #[error("could not decode response body for {method} {url}: {message}")]
    BadJson {
        method: &'static str,
        url: String,
        message: String,
    },

    /// Caller-side misuse, like requesting a leaderboard without a category.
    #[error("{0}")]
    BadLogic(&'static str),

    /// A navigation or relation link was absent when the caller expected
    /// one. For pagination this is the normal terminal condition.
    #[error("could not find a '{0}' link")]
    NoSuchLink(String),

    /// A well-formed error payload returned by the service itself,
    /// carrying its original HTTP status code and message.
    #[error("API error {status} during {method} {url}: {message}")]
    Upstream {
        status: u16,
        message: String,
        method: &'static str,
        url: String,
    },
}

impl Error {
    /// The upstream HTTP status, if this error came from the service.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Upstream { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if this is the "no such link" terminal condition.
    pub fn is_no_such_link(&self) -> bool {
        matches!(self, Error::NoSuchLink(_))
    }
}

/// Result type alias for speedrun.com API operations.
pub type Result<T> = core::result::Result<T, Error>;
