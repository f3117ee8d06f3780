//! HttpSessionStore - REST implementation of the remote session store.
//!
//! | Operation | Request |
//! |---|---|
//! | list | `GET /honeypot/sessions` |
//! | load | `GET /honeypot/session/{id}` |
//! | send | `POST /honeypot/message` |
//! | delete | `DELETE /honeypot/session/{id}` |
//!
//! No authentication headers are sent.

use crate::dto::{MessageReplyDto, SendMessageRequest, SessionLookupDto, SessionSummaryDto};
use async_trait::async_trait;
use honeypot_core::config::ApiConfig;
use honeypot_core::session::{MessageReply, SessionRecord, SessionStore, SessionSummary};
use honeypot_core::{HoneypotError, Result};
use reqwest::{Client, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Session store backed by the honeypot service's HTTP API.
#[derive(Clone)]
pub struct HttpSessionStore {
    client: Client,
    base_url: Url,
}

impl HttpSessionStore {
    /// Creates a store for the given API configuration.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            HoneypotError::config(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(HoneypotError::config(format!(
                "base_url '{}' cannot carry a path",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| HoneypotError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Appends path segments to the base URL. Segments are percent-encoded,
    /// so ids cannot escape their path position.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HoneypotError::config("base_url cannot carry a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Fails on non-success status, keeping the body for the error message.
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(HoneypotError::status(status.as_u16(), body))
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response.bytes().await.map_err(transport_error)?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

fn transport_error(err: reqwest::Error) -> HoneypotError {
    if err.is_decode() {
        HoneypotError::decode(err.to_string())
    } else {
        HoneypotError::transport(err.to_string())
    }
}

#[async_trait]
impl SessionStore for HttpSessionStore {
    async fn list_sessions(&self) -> Result<Vec<SessionSummary>> {
        let url = self.endpoint(&["honeypot", "sessions"])?;
        tracing::debug!("[HttpSessionStore] GET {}", url);

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        let response = Self::ensure_success(response).await?;
        let rows: Vec<SessionSummaryDto> = Self::decode(response).await?;

        tracing::debug!("[HttpSessionStore] listed {} sessions", rows.len());
        Ok(rows.into_iter().map(SessionSummary::from).collect())
    }

    async fn load_session(&self, session_id: &str) -> Result<Option<SessionRecord>> {
        let url = self.endpoint(&["honeypot", "session", session_id])?;
        tracing::debug!("[HttpSessionStore] GET {}", url);

        let response = self.client.get(url).send().await.map_err(transport_error)?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let response = Self::ensure_success(response).await?;
        let lookup: SessionLookupDto = Self::decode(response).await?;

        lookup.into_record()
    }

    async fn send_message(&self, session_id: Option<&str>, message: &str) -> Result<MessageReply> {
        let url = self.endpoint(&["honeypot", "message"])?;
        tracing::debug!(
            "[HttpSessionStore] POST {} (session_id: {:?})",
            url,
            session_id
        );

        let body = SendMessageRequest {
            session_id,
            message,
        };

        // `.json()` sets Content-Type: application/json
        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let response = Self::ensure_success(response).await?;
        let reply: MessageReplyDto = Self::decode(response).await?;

        Ok(reply.into())
    }

    async fn delete_session(&self, session_id: &str) -> Result<()> {
        let url = self.endpoint(&["honeypot", "session", session_id])?;
        tracing::debug!("[HttpSessionStore] DELETE {}", url);

        let response = self
            .client
            .delete(url)
            .send()
            .await
            .map_err(transport_error)?;
        Self::ensure_success(response).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(base_url: &str) -> HttpSessionStore {
        HttpSessionStore::new(&ApiConfig {
            base_url: base_url.to_string(),
            request_timeout_secs: None,
        })
        .unwrap()
    }

    #[test]
    fn test_endpoint_joins_segments() {
        let store = store("https://example.com");
        let url = store.endpoint(&["honeypot", "session", "abc"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/honeypot/session/abc");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let store = store("https://example.com/api/");
        let url = store.endpoint(&["honeypot", "sessions"]).unwrap();
        assert_eq!(url.as_str(), "https://example.com/api/honeypot/sessions");
    }

    #[test]
    fn test_endpoint_encodes_ids() {
        let store = store("https://example.com");
        let url = store.endpoint(&["honeypot", "session", "../x"]).unwrap();
        assert_eq!(url.path(), "/honeypot/session/..%2Fx");
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpSessionStore::new(&ApiConfig {
            base_url: "not a url".to_string(),
            request_timeout_secs: None,
        });
        assert!(matches!(result, Err(HoneypotError::Config(_))));
    }
}
