//! Outbound dispatch to backend nodes.
//!
//! # Responsibilities
//! - POST the (version-stamped) session message to the chosen host
//! - Enforce independently configured connect and response timeouts
//! - Follow redirects; parse the reply back into a session message
//!
//! # Design Decisions
//! - A trait seam so the routing engine is testable without a network
//! - Transport failures and malformed bodies are distinct error variants;
//!   the engine audits them differently but retries identically

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use thiserror::Error;

use crate::config::schema::TimeoutConfig;
use crate::wire::SessionMessage;

/// Failure of a single dispatch attempt.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// Connect/I-O failure or timeout; the response never arrived.
    #[error("{0}")]
    Transport(String),

    /// A response arrived but its body could not be interpreted.
    #[error("{0}")]
    MalformedResponse(String),
}

/// A parsed backend response.
#[derive(Debug)]
pub struct BackendReply {
    pub status: u16,
    pub message: SessionMessage,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// One attempt against one host. Implementations must not retry internally;
/// retrying is the routing engine's job.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(
        &self,
        route: &str,
        path: &str,
        message: &SessionMessage,
    ) -> Result<BackendReply, DispatchError>;
}

/// Production dispatcher over a pooled HTTP client.
#[derive(Debug, Clone)]
pub struct HttpDispatcher {
    client: reqwest::Client,
}

impl HttpDispatcher {
    pub fn new(timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .timeout(Duration::from_secs(timeouts.response_secs))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Dispatcher for HttpDispatcher {
    async fn dispatch(
        &self,
        route: &str,
        path: &str,
        message: &SessionMessage,
    ) -> Result<BackendReply, DispatchError> {
        let target = format!("{}{}", route.trim_end_matches('/'), path);

        let response = self
            .client
            .post(&target)
            .header(ACCEPT, "application/json")
            .json(message)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;
        let message = SessionMessage::from_slice(&body)
            .map_err(|e| DispatchError::MalformedResponse(e.to_string()))?;

        Ok(BackendReply { status, message })
    }
}
