//! Remote text generation via the Gemini `generateContent` API.
//!
//! One blocking request per call, no retries. Every failure, from transport
//! to an empty response, surfaces as [`AuditError::RemoteCall`].

mod internal;

use crate::config::{AuditConfig, SafetySetting};
use crate::error::AuditError;
use internal::{
    error_message, Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig,
    RequestPart,
};
use reqwest::blocking::Client as HttpClient;
use std::net::IpAddr;

/// Everything sent with a single generation call
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub safety_settings: Vec<SafetySetting>,
}

impl GenerationRequest {
    pub fn new(config: &AuditConfig, prompt: String) -> Self {
        Self {
            model: config.model.clone(),
            prompt,
            temperature: config.temperature,
            safety_settings: config.safety_settings.clone(),
        }
    }
}

/// A backend that turns a prompt into free-form text.
pub trait TextGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AuditError>;
}

/// Blocking Gemini REST client
pub struct GeminiClient {
    endpoint: String,
    api_key: String,
    http: HttpClient,
}

impl GeminiClient {
    /// Create a client for the given API base URL.
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self, AuditError> {
        let mut builder =
            HttpClient::builder().user_agent(concat!("aegis-audit/", env!("CARGO_PKG_VERSION")));
        if is_loopback(endpoint) {
            builder = builder.no_proxy();
        }
        let http = builder
            .build()
            .map_err(|e| AuditError::remote(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            http,
        })
    }

    fn url(&self, model: &str) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, model)
    }
}

/// Local endpoints (test stubs, sidecar proxies) never go through HTTP_PROXY.
fn is_loopback(endpoint: &str) -> bool {
    let Ok(url) = reqwest::Url::parse(endpoint) else {
        return false;
    };
    match url.host_str() {
        Some("localhost") => true,
        Some(host) => host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map(|ip| ip.is_loopback())
            .unwrap_or(false),
        None => false,
    }
}

impl TextGenerator for GeminiClient {
    fn generate(&self, request: &GenerationRequest) -> Result<String, AuditError> {
        let url = self.url(&request.model);
        let body = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart {
                    text: &request.prompt,
                }],
            }],
            safety_settings: &request.safety_settings,
            generation_config: GenerationConfig {
                temperature: request.temperature,
            },
        };

        tracing::debug!(%url, model = %request.model, prompt_bytes = request.prompt.len(), "sending generateContent");

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .map_err(|e| AuditError::remote(format!("request to {} failed: {}", self.endpoint, e)))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|e| AuditError::remote(format!("failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(AuditError::remote(error_message(status, &text)));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&text)
            .map_err(|e| AuditError::remote(format!("failed to parse response: {}", e)))?;

        match parsed.text() {
            Some(text) => Ok(text),
            None => {
                let reason = parsed.empty_reason();
                tracing::warn!(%reason, "response carried no text");
                Err(AuditError::remote(reason))
            }
        }
    }
}
