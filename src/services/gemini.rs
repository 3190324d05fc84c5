// src/services/gemini.rs
//! Client for the Gemini `streamGenerateContent` REST endpoint.
use futures_util::StreamExt;
use memchr::memchr;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("request to model API failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("model API returned HTTP {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("could not decode streamed chunk: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
        line: String,
    },
    #[error("model API reported error {code} mid-stream: {message}")]
    Stream { code: i64, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self::with_role("user", text)
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self::with_role("model", text)
    }

    fn with_role(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: Some(role.to_string()),
            parts: vec![Part { text: Some(text.into()) }],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct GenerateContentRequest<'a> {
    pub contents: &'a [Content],
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub error: Option<ApiErrorBody>,
}

/// Error object the API may send as an event after a 200 status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    fn stream_url(&self) -> String {
        format!(
            "{}/models/{}:streamGenerateContent?alt=sse",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Send the whole conversation and collect every streamed chunk in order.
    pub async fn stream_generate(
        &self,
        contents: &[Content],
    ) -> Result<Vec<GenerateContentResponse>, GeminiError> {
        tracing::debug!(model = %self.model, turns = contents.len(), "calling model");

        let response = self
            .client
            .post(self.stream_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateContentRequest { contents })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GeminiError::Api { status, body });
        }

        let mut stream = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut chunks = Vec::new();

        while let Some(bytes) = stream.next().await {
            buffer.extend_from_slice(&bytes?);
            while let Some(newline_pos) = memchr(b'\n', &buffer) {
                let line: Vec<u8> = buffer.drain(..=newline_pos).collect();
                if let Some(chunk) = parse_sse_line(&String::from_utf8_lossy(&line))? {
                    chunks.push(chunk);
                }
            }
        }
        // Last event may arrive without a trailing newline.
        if !buffer.is_empty() {
            if let Some(chunk) = parse_sse_line(&String::from_utf8_lossy(&buffer))? {
                chunks.push(chunk);
            }
        }

        tracing::debug!(chunks = chunks.len(), "model stream finished");
        Ok(chunks)
    }
}

/// Decode one server-sent-event line. Comments, blank lines and
/// non-`data` fields yield `None`.
pub fn parse_sse_line(line: &str) -> Result<Option<GenerateContentResponse>, GeminiError> {
    let line = line.trim();
    let Some(payload) = line.strip_prefix("data:") else {
        return Ok(None);
    };
    let payload = payload.trim_start();
    if payload.is_empty() || payload == "[DONE]" {
        return Ok(None);
    }
    let chunk: GenerateContentResponse = serde_json::from_str(payload)
        .map_err(|source| GeminiError::Decode { source, line: payload.to_string() })?;
    if let Some(err) = &chunk.error {
        tracing::warn!(code = err.code, status = ?err.status, "error event in model stream");
        return Err(GeminiError::Stream {
            code: err.code,
            message: err.message.clone(),
        });
    }
    Ok(Some(chunk))
}
