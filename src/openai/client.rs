//! Responses API client.

use reqwest::StatusCode;
use reqwest::header::AUTHORIZATION;
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::error::RequestError;

use super::response::{GeneratedMessage, ResponsesEnvelope};

/// Connection settings for [`ResponsesClient`].
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    pub model: String,
    pub endpoint: String,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

/// Request body for `POST /v1/responses`.
#[derive(Serialize, Debug)]
struct ResponsesRequest<'a> {
    model: &'a str,
    instructions: &'a str,
    input: &'a str,
}

/// Sends one request per call; no retries.
#[derive(Debug)]
pub struct ResponsesClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl ResponsesClient {
    /// Create a client. An empty API key is rejected here, before any request.
    pub fn new(config: ClientConfig) -> Result<Self, RequestError> {
        if config.api_key.trim().is_empty() {
            return Err(RequestError::MissingCredential);
        }

        Ok(Self {
            config,
            http: reqwest::Client::new(),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Ask the model to summarize `input` following `instructions`.
    ///
    /// Only a 200 response is accepted. Its first output text is parsed as
    /// the generated message and gets a `length` field.
    pub async fn generate(
        &self,
        instructions: &str,
        input: &str,
    ) -> Result<GeneratedMessage, RequestError> {
        let body = ResponsesRequest {
            model: &self.config.model,
            instructions,
            input,
        };

        info!(model = %self.config.model, input_len = input.len(), "Requesting commit message");
        trace!(?body);

        let resp = self
            .http
            .post(&self.config.endpoint)
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        debug!(%status, "Response received");

        if status != StatusCode::OK {
            let body = resp.text().await.unwrap_or_else(|e| {
                warn!(%status, "Failed to read error response body: {e}");
                String::new()
            });
            return Err(RequestError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let raw = resp.text().await?;
        trace!(%raw, "Raw response");

        let envelope: ResponsesEnvelope = serde_json::from_str(&raw).map_err(|e| {
            RequestError::UnexpectedShape(format!("response is not a Responses envelope: {}", e))
        })?;

        GeneratedMessage::from_model_text(envelope.first_text()?)
    }
}
