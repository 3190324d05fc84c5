// src/services/extract.rs
use thiserror::Error;

use super::gemini::GenerateContentResponse;

/// What users see when the model produced no text.
pub const FALLBACK_RESPONSE: &str = "Failed to generate a response.";

/// Ways a well-formed response can still carry no text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmptyResponse {
    #[error("no candidates returned (block reason: {})", .block_reason.as_deref().unwrap_or("none"))]
    NoCandidates { block_reason: Option<String> },
    #[error("first candidate has no parts (finish reason: {})", .finish_reason.as_deref().unwrap_or("none"))]
    NoParts { finish_reason: Option<String> },
    #[error("first part carries no text")]
    NoText,
}

/// First candidate's first text part.
pub fn first_text(response: &GenerateContentResponse) -> Result<&str, EmptyResponse> {
    let candidate = response.candidates.first().ok_or_else(|| EmptyResponse::NoCandidates {
        block_reason: response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone()),
    })?;

    let part = candidate
        .content
        .as_ref()
        .and_then(|c| c.parts.first())
        .ok_or_else(|| EmptyResponse::NoParts {
            finish_reason: candidate.finish_reason.clone(),
        })?;

    match part.text.as_deref() {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(EmptyResponse::NoText),
    }
}

/// Join the first text part of every streamed chunk, in stream order.
///
/// Chunks without text are skipped. When none has text the first chunk's
/// reason is reported.
pub fn collect_text(chunks: &[GenerateContentResponse]) -> Result<String, EmptyResponse> {
    let mut text = String::new();
    let mut first_error = None;

    for chunk in chunks {
        match first_text(chunk) {
            Ok(piece) => text.push_str(piece),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    if !text.is_empty() {
        return Ok(text);
    }
    Err(first_error.unwrap_or(EmptyResponse::NoCandidates { block_reason: None }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(json: &str) -> GenerateContentResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn takes_first_candidate_first_part() {
        let c = chunk(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"one"},{"text":"two"}]}},
                {"content":{"parts":[{"text":"other"}]}}
            ]}"#,
        );
        assert_eq!(first_text(&c), Ok("one"));
    }

    #[test]
    fn reports_block_reason_without_candidates() {
        let c = chunk(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#);
        assert_eq!(
            first_text(&c),
            Err(EmptyResponse::NoCandidates { block_reason: Some("SAFETY".into()) })
        );
    }

    #[test]
    fn reports_finish_reason_without_parts() {
        let c = chunk(r#"{"candidates":[{"finishReason":"MAX_TOKENS"}]}"#);
        assert_eq!(
            first_text(&c),
            Err(EmptyResponse::NoParts { finish_reason: Some("MAX_TOKENS".into()) })
        );
        let c = chunk(r#"{"candidates":[{"content":{"parts":[]}}]}"#);
        assert!(matches!(first_text(&c), Err(EmptyResponse::NoParts { .. })));
    }

    #[test]
    fn empty_or_missing_text_is_no_text() {
        let c = chunk(r#"{"candidates":[{"content":{"parts":[{}]}}]}"#);
        assert_eq!(first_text(&c), Err(EmptyResponse::NoText));
        let c = chunk(r#"{"candidates":[{"content":{"parts":[{"text":""}]}}]}"#);
        assert_eq!(first_text(&c), Err(EmptyResponse::NoText));
    }

    #[test]
    fn joins_stream_and_skips_empty_chunks() {
        let chunks = vec![
            chunk(r#"{"candidates":[{"content":{"parts":[{"text":"Paris is "}]}}]}"#),
            chunk(r#"{"candidates":[{"finishReason":"STOP"}]}"#),
            chunk(r#"{"candidates":[{"content":{"parts":[{"text":"the capital."}]}}]}"#),
        ];
        assert_eq!(collect_text(&chunks).unwrap(), "Paris is the capital.");
    }

    #[test]
    fn empty_stream_has_no_candidates() {
        assert_eq!(
            collect_text(&[]),
            Err(EmptyResponse::NoCandidates { block_reason: None })
        );
    }
}
