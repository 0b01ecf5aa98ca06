//! Client seam to the voting service.
//!
//! The workflows talk to the service through [`VoteBackend`], so tests
//! and alternative transports can stand in for the HTTP client. The
//! production implementation is [`HttpBackend`], a thin `reqwest`
//! wrapper around the documented endpoints.

use crate::config::AppConfig;
use async_trait::async_trait;
use serde::Serialize;
use votecast_core::{
    Channel, ChannelListResponse, CreateCommunityRequest, CreatePollRequest, ErrorCategory,
};

/// Shown when a failure carries no usable message of its own.
const FALLBACK_MESSAGE: &str = "Something went wrong, please try again";

// ============================================================================
// Errors
// ============================================================================

/// A failed backend call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BackendError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message text from the response body, or a status fallback.
        message: String,
    },
    /// The request never completed (connectivity, TLS, timeout).
    #[error("transport failure: {0}")]
    Transport(String),
    /// The service answered with a body the client cannot interpret.
    #[error("unexpected response body: {0}")]
    InvalidResponse(String),
}

impl BackendError {
    /// Build a server error from a response status and body.
    ///
    /// The body text is surfaced verbatim when present; otherwise the
    /// message names the status so the error is never blank.
    #[must_use]
    pub fn server(status: u16, body: &str) -> Self {
        let trimmed = body.trim();
        let message = if trimmed.is_empty() {
            format!("request failed with status {status}")
        } else {
            trimmed.to_string()
        };
        Self::Server { status, message }
    }

    /// The text to show the user.
    ///
    /// Service-reported messages pass through verbatim; transport and
    /// decoding details stay in the logs and the user sees a generic
    /// fallback.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Server { message, .. } => message.clone(),
            Self::Transport(_) | Self::InvalidResponse(_) => FALLBACK_MESSAGE.to_string(),
        }
    }

    /// Error category for presentation routing.
    #[must_use]
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Server { .. } => ErrorCategory::Server,
            Self::Transport(_) => ErrorCategory::Network,
            Self::InvalidResponse(_) => ErrorCategory::Operation,
        }
    }
}

// ============================================================================
// Backend Trait
// ============================================================================

/// Asynchronous client interface to the voting service.
///
/// Object-safe so views can hold a `&dyn VoteBackend`.
#[async_trait]
pub trait VoteBackend: Send + Sync {
    /// Create a poll. Returns the raw identifier text exactly as the
    /// service sent it (callers trim any trailing newline).
    async fn create_poll(&self, request: &CreatePollRequest) -> Result<String, BackendError>;

    /// Create a community. Returns the raw identifier text.
    async fn create_community(
        &self,
        request: &CreateCommunityRequest,
    ) -> Result<String, BackendError>;

    /// Search channels by free-text query.
    async fn search_channels(&self, query: &str) -> Result<Vec<Channel>, BackendError>;
}

// ============================================================================
// HTTP Implementation
// ============================================================================

/// `reqwest`-backed [`VoteBackend`] against the hosted service.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// Create a client for the given API base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// Create a client from the application configuration.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.api_base_url.clone())
    }

    async fn post_for_text(
        &self,
        path: &str,
        body: &(impl Serialize + Sync),
    ) -> Result<String, BackendError> {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!(%url, "posting creation request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|error| {
                tracing::warn!(%url, %error, "creation request failed to send");
                BackendError::Transport(error.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| BackendError::Transport(error.to_string()))?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "service reported failure");
            return Err(BackendError::server(status.as_u16(), &text));
        }
        Ok(text)
    }
}

#[async_trait]
impl VoteBackend for HttpBackend {
    async fn create_poll(&self, request: &CreatePollRequest) -> Result<String, BackendError> {
        self.post_for_text("create", request).await
    }

    async fn create_community(
        &self,
        request: &CreateCommunityRequest,
    ) -> Result<String, BackendError> {
        self.post_for_text("communities", request).await
    }

    async fn search_channels(&self, query: &str) -> Result<Vec<Channel>, BackendError> {
        let url = format!("{}/channels", self.base_url);
        tracing::debug!(%url, query, "searching channels");

        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(|error| {
                tracing::warn!(%url, %error, "channel search failed to send");
                BackendError::Transport(error.to_string())
            })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|error| BackendError::Transport(error.to_string()))?;

        if !status.is_success() {
            tracing::warn!(%url, status = status.as_u16(), "channel search failed");
            return Err(BackendError::server(status.as_u16(), &text));
        }

        let list: ChannelListResponse = serde_json::from_str(&text)
            .map_err(|error| BackendError::InvalidResponse(error.to_string()))?;
        Ok(list.channels)
    }
}
