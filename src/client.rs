//! speedrun.com API client.
//!
//! Low-level HTTP transport: one GET per call, query-string assembly,
//! envelope decoding and error mapping. Resource-specific operations live
//! on the model types and funnel through here.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::error::{Error, Result};
use crate::query::Query;

/// Base URL for all API calls.
pub const DEFAULT_API_URL: &str = "https://www.speedrun.com/api/v1";

const USER_AGENT: &str = concat!("speedrun-api/", env!("CARGO_PKG_VERSION"));

/// Client for the speedrun.com REST API.
///
/// The API is read-only and anonymous; there is no authentication to
/// configure. This struct is cheaply cloneable; clones share the same
/// underlying connection pool, which is safe for concurrent use. Fetched
/// resources are plain values with no reference back to the client; pass
/// the client into any accessor that may need the network.
///
/// # Example
///
/// ```no_run
/// use speedrun_api::{Embeds, Game, SpeedrunClient};
///
/// # async fn example() -> speedrun_api::Result<()> {
/// let client = SpeedrunClient::new()?;
/// let game = Game::by_id(&client, "v1pxjz68", &Embeds::none()).await?;
/// println!("{} ({})", game.names.international, game.released);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct SpeedrunClient {
    http: Client,
    base_url: Arc<Url>,
}

impl std::fmt::Debug for SpeedrunClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeedrunClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Single-resource responses wrap their payload in `{"data": {...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}

impl SpeedrunClient {
    /// Create a client against the public API at
    /// [`DEFAULT_API_URL`].
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client against a custom base URL (test servers, proxies).
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        // Ensure the base ends with / so Url::join keeps the /api/v1 part
        let base_url_str = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{base_url}/")
        };

        let base_url = Url::parse(&base_url_str).map_err(|source| Error::BadUrl {
            url: base_url_str,
            source,
        })?;

        let http = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|source| Error::Network {
                method: "GET",
                url: base_url.to_string(),
                source,
            })?;

        Ok(Self {
            http,
            base_url: Arc::new(base_url),
        })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Perform a GET against a path relative to the base URL.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str, query: &Query) -> Result<T> {
        let mut url = self.base_url.join(path).map_err(|source| Error::BadUrl {
            url: format!("{}{path}", self.base_url),
            source,
        })?;
        append_query(&mut url, query);

        self.execute(url).await
    }

    /// Perform a GET against a link's URI, taken verbatim (navigation links
    /// already encode offset/max), with optional extra query pairs.
    #[tracing::instrument(skip(self))]
    pub(crate) async fn get_link<T: DeserializeOwned>(
        &self,
        uri: &str,
        query: &Query,
    ) -> Result<T> {
        // Strip the fixed base prefix to recover the relative path, then
        // rejoin onto the configured base so overridden base URLs (tests,
        // proxies) keep working. Links from the public API carry the
        // public prefix even when we talk to a different host.
        let relative = uri
            .strip_prefix(self.base_url.as_str())
            .or_else(|| uri.strip_prefix(DEFAULT_API_URL))
            .map(|rest| rest.trim_start_matches('/'));

        let mut url = match relative {
            Some(rest) => self.base_url.join(rest).map_err(|source| Error::BadUrl {
                url: uri.to_string(),
                source,
            })?,
            None => Url::parse(uri).map_err(|source| Error::BadUrl {
                url: uri.to_string(),
                source,
            })?,
        };
        append_query(&mut url, query);

        self.execute(url).await
    }

    /// One network round-trip: no retries, no caching.
    async fn execute<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        let url_str = url.to_string();

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| Error::Network {
                method: "GET",
                url: url_str.clone(),
                source,
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|source| Error::Network {
            method: "GET",
            url: url_str.clone(),
            source,
        })?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|err| Error::BadJson {
                method: "GET",
                url: url_str,
                message: err.to_string(),
            });
        }

        Err(upstream_error(status.as_u16(), &body, url_str))
    }
}

/// Error envelope returned by the service for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    status: Option<u16>,
    #[serde(default)]
    message: Option<String>,
}

fn upstream_error(status: u16, body: &str, url: String) -> Error {
    match serde_json::from_str::<ErrorPayload>(body) {
        Ok(payload) => Error::Upstream {
            status: payload.status.unwrap_or(status),
            message: payload
                .message
                .unwrap_or_else(|| format!("HTTP {status}")),
            method: "GET",
            url,
        },
        Err(_) => Error::BadJson {
            method: "GET",
            url,
            message: "could not decode response body as JSON; the site is probably having issues"
                .to_string(),
        },
    }
}

fn append_query(url: &mut Url, query: &Query) {
    if query.is_empty() {
        return;
    }

    let mut pairs = url.query_pairs_mut();
    for (key, value) in query {
        pairs.append_pair(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_omits_connection_details() {
        let client = SpeedrunClient::new().unwrap();
        let debug = format!("{client:?}");
        assert!(debug.contains("SpeedrunClient"));
        assert!(debug.contains("speedrun.com"));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client1 = SpeedrunClient::with_base_url("https://www.speedrun.com/api/v1").unwrap();
        let client2 = SpeedrunClient::with_base_url("https://www.speedrun.com/api/v1/").unwrap();
        assert_eq!(client1.base_url().as_str(), client2.base_url().as_str());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = SpeedrunClient::with_base_url("not a url");
        assert!(matches!(result, Err(Error::BadUrl { .. })));
    }

    #[test]
    fn upstream_error_prefers_payload_status() {
        let err = upstream_error(
            404,
            r#"{"status": 404, "message": "Game not found"}"#,
            "https://example.test/games/nope".to_string(),
        );
        match err {
            Error::Upstream {
                status, message, ..
            } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Game not found");
            }
            other => panic!("expected Upstream, got {other:?}"),
        }
    }

    #[test]
    fn non_json_error_body_becomes_bad_json() {
        let err = upstream_error(
            503,
            "<html>maintenance</html>",
            "https://example.test/games".to_string(),
        );
        assert!(matches!(err, Error::BadJson { .. }));
    }
}
