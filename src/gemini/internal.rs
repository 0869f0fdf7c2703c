//! Wire types for the `generateContent` REST call

use crate::config::SafetySetting;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentRequest<'a> {
    pub contents: Vec<Content<'a>>,
    pub safety_settings: &'a [SafetySetting],
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub(super) struct Content<'a> {
    pub role: &'static str,
    pub parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
pub(super) struct RequestPart<'a> {
    pub text: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct GenerationConfig {
    pub temperature: f32,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Candidate {
    #[serde(default)]
    pub content: Option<CandidateContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub thought: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl GenerateContentResponse {
    /// Joined text of the first candidate, skipping thought parts.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts
            .iter()
            .filter(|p| !p.thought)
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Explain why no text came back.
    pub fn empty_reason(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("prompt was blocked ({})", reason);
        }
        match self.candidates.first() {
            None => "response contained no candidates".to_string(),
            Some(candidate) => match candidate.finish_reason.as_deref() {
                Some(reason) => format!("response contained no text (finish reason: {})", reason),
                None => "response contained no text".to_string(),
            },
        }
    }
}

/// Best-effort message from a non-success response body.
pub(super) fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(resp) if !resp.error.message.is_empty() => match resp.error.status {
            Some(s) => format!("{} {}: {}", status.as_u16(), s, resp.error.message),
            None => format!("{}: {}", status, resp.error.message),
        },
        _ if body.trim().is_empty() => format!("remote service returned {}", status),
        _ => format!("remote service returned {}: {}", status, body.trim()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_body_shape() {
        let safety = vec![SafetySetting::new(
            "HARM_CATEGORY_DANGEROUS_CONTENT",
            "BLOCK_NONE",
        )];
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: "hello" }],
            }],
            safety_settings: &safety,
            generation_config: GenerationConfig { temperature: 0.5 },
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{"role": "user", "parts": [{"text": "hello"}]}],
                "safetySettings": [
                    {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_NONE"}
                ],
                "generationConfig": {"temperature": 0.5}
            })
        );
    }

    #[test]
    fn test_text_joins_parts_and_skips_thoughts() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"text": "thinking...", "thought": true},
                    {"text": "Security score: "},
                    {"text": "55/100"}
                ]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"totalTokenCount": 12}
        }))
        .unwrap();

        assert_eq!(resp.text().as_deref(), Some("Security score: 55/100"));
    }

    #[test]
    fn test_blocked_prompt_has_no_text() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        assert_eq!(resp.text(), None);
        assert_eq!(resp.empty_reason(), "prompt was blocked (SAFETY)");
    }

    #[test]
    fn test_empty_candidate_reports_finish_reason() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{"finishReason": "MAX_TOKENS"}]
        }))
        .unwrap();

        assert_eq!(resp.text(), None);
        assert!(resp.empty_reason().contains("MAX_TOKENS"));
    }

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error":{"code":400,"message":"API key not valid.","status":"INVALID_ARGUMENT"}}"#;
        assert_eq!(
            error_message(reqwest::StatusCode::BAD_REQUEST, body),
            "400 INVALID_ARGUMENT: API key not valid."
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body() {
        let msg = error_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down\n");
        assert_eq!(msg, "remote service returned 502 Bad Gateway: upstream down");
    }
}
