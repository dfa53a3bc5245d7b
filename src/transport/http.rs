use crate::config::StudioConfig;
use crate::{Error, Result};
use reqwest::{Proxy, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &StudioConfig) -> Result<Self> {
        // No overall request timeout: synthesis of a long script may take minutes.
        let mut builder = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(proxy_url) = &config.proxy_url {
            let proxy = Proxy::all(proxy_url).map_err(|e| {
                Error::configuration_with_context(
                    format!("invalid proxy: {}", e),
                    crate::ErrorContext::new()
                        .with_field_path("VOICE_STUDIO_PROXY_URL")
                        .with_source("transport"),
                )
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| Error::Transport(TransportError::Other(e.to_string())))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn get(&self, path: &str) -> Result<Response> {
        self.send(self.client.get(self.url(path))).await
    }

    pub async fn post_json<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response> {
        self.send(self.client.post(self.url(path)).json(body)).await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<Response> {
        self.send(self.client.post(self.url(path)).multipart(form))
            .await
    }

    /// Decode a successful response body as JSON.
    ///
    /// A malformed body is a transport failure, not a remote one: the server
    /// said yes but we could not understand it.
    pub async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(TransportError::Http)?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::Transport(TransportError::Decode(e.to_string())))
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(TransportError::Http)?;
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "backend response");
        if status.is_success() {
            return Ok(response);
        }
        // Error bodies are small JSON documents; if even that cannot be read, fall back to the status.
        let body = response.bytes().await.unwrap_or_default();
        Err(remote_error(status, &body))
    }
}

/// Build a [`Error::RemoteRequestFailed`] from a non-success status and its body.
///
/// Prefers the server's `detail` field; falls back to the status reason phrase.
pub fn remote_error(status: StatusCode, body: &[u8]) -> Error {
    let detail = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|json| json.get("detail").cloned())
        .and_then(|detail| match detail {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s),
            other => Some(other.to_string()),
        });
    let message = detail.unwrap_or_else(|| {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.as_u16().to_string())
    });
    Error::RemoteRequestFailed {
        status: status.as_u16(),
        message,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Malformed response body: {0}")]
    Decode(String),

    #[error("Transport error: {0}")]
    Other(String),
}
