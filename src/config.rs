use serde::Serialize;

/// Model used when none is given on the command line.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";

/// Base URL of the Generative Language API.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Sampling temperature sent with every request.
pub const DEFAULT_TEMPERATURE: f32 = 0.3;

/// Minimum acceptable security score.
pub const DEFAULT_THRESHOLD: i64 = 70;

/// A single content-safety override sent with the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SafetySetting {
    pub category: String,
    pub threshold: String,
}

impl SafetySetting {
    pub fn new(category: &str, threshold: &str) -> Self {
        Self {
            category: category.to_string(),
            threshold: threshold.to_string(),
        }
    }
}

/// Configuration for one audit run
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Model identifier, e.g. `gemini-3-pro-preview`
    pub model: String,
    /// API base URL without trailing slash
    pub endpoint: String,
    pub temperature: f32,
    pub safety_settings: Vec<SafetySetting>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            // Only dangerous-content blocking is relaxed; other categories keep API defaults
            safety_settings: vec![SafetySetting::new(
                "HARM_CATEGORY_DANGEROUS_CONTENT",
                "BLOCK_NONE",
            )],
        }
    }
}

impl AuditConfig {
    /// Apply optional overrides on top of the defaults.
    pub fn with_overrides(model: Option<String>, endpoint: Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            config.endpoint = endpoint.trim().trim_end_matches('/').to_string();
        }
        config
    }
}
