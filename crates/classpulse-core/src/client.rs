//! Remote counter client -- the single network surface of the system.
//!
//! The shared "confused" counter lives on a fixed HTTP service with two
//! endpoints: `POST /add_question` bumps it, `GET /get_question` returns a
//! JSON body carrying `current_count`. Everything else in the crate talks to
//! the service through the [`CounterService`] seam so runners and state
//! machines can be exercised against in-memory fakes.

use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::{ConfigError, RemoteError};

/// Seam for the remote shared counter.
///
/// Implementations do not retry; callers decide what a failure means
/// (gauge keeps polling, auto loop self-disables, button stays idle).
#[allow(async_fn_in_trait)]
pub trait CounterService {
    /// Increment the shared counter by one.
    async fn increment(&self) -> Result<(), RemoteError>;

    /// Read the current counter value.
    async fn read(&self) -> Result<i64, RemoteError>;
}

/// HTTP implementation of [`CounterService`].
pub struct HttpCounterClient {
    base_url: String,
    http_client: Client,
}

impl HttpCounterClient {
    /// Create a client against the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] if the URL does not parse.
    pub fn new(base_url: &str) -> Result<Self, ConfigError> {
        Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
            key: "remote.base_url".into(),
            message: e.to_string(),
        })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: Client::new(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl CounterService for HttpCounterClient {
    async fn increment(&self) -> Result<(), RemoteError> {
        let url = format!("{}/add_question", self.base_url);
        let resp = self.http_client.post(&url).send().await?;
        if resp.status().is_success() {
            Ok(())
        } else {
            Err(RemoteError::Unavailable {
                message: format!("HTTP {} from {url}", resp.status()),
            })
        }
    }

    async fn read(&self) -> Result<i64, RemoteError> {
        let url = format!("{}/get_question", self.base_url);
        let resp = self.http_client.get(&url).send().await?;
        if !resp.status().is_success() {
            return Err(RemoteError::Unavailable {
                message: format!("HTTP {} from {url}", resp.status()),
            });
        }
        let body: Value =
            resp.json()
                .await
                .map_err(|e| RemoteError::MalformedResponse {
                    detail: format!("body is not JSON: {e}"),
                })?;
        parse_count(&body)
    }
}

/// Extract `current_count` from a response body.
///
/// The service has emitted both JSON integers and integer-valued strings,
/// so both are accepted. Anything that does not parse as an integer is a
/// hard error -- never silently coerced to zero.
fn parse_count(body: &Value) -> Result<i64, RemoteError> {
    let field = body
        .get("current_count")
        .ok_or_else(|| RemoteError::MalformedResponse {
            detail: "missing field 'current_count'".into(),
        })?;
    match field {
        Value::Number(n) => n.as_i64().ok_or_else(|| RemoteError::MalformedResponse {
            detail: format!("'current_count' is not an integer: {n}"),
        }),
        Value::String(s) => {
            s.trim()
                .parse::<i64>()
                .map_err(|_| RemoteError::MalformedResponse {
                    detail: format!("'current_count' is not numeric: {s:?}"),
                })
        }
        other => Err(RemoteError::MalformedResponse {
            detail: format!("'current_count' has unexpected type: {other}"),
        }),
    }
}
