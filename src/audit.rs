//! Audit orchestration: load, prompt, generate, score, gate.

use crate::config::AuditConfig;
use crate::error::AuditError;
use crate::gemini::{GenerationRequest, TextGenerator};
use crate::prompt::build_prompt;
use crate::score::{extract_score, GateOutcome, Score};
use crate::source::load_source;
use std::path::{Path, PathBuf};

/// Input to a single audit run
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub path: PathBuf,
    pub source: String,
    pub threshold: i64,
}

impl AnalysisRequest {
    pub fn load(path: &Path, threshold: i64) -> Result<Self, AuditError> {
        Ok(Self {
            path: path.to_path_buf(),
            source: load_source(path)?,
            threshold,
        })
    }
}

/// Raw model output and the score found in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub response: String,
    pub score: Option<Score>,
}

impl AnalysisResult {
    pub fn from_response(response: String) -> Self {
        let score = extract_score(&response);
        Self { response, score }
    }
}

/// Everything the caller needs to report and exit
#[derive(Debug, Clone)]
pub struct AuditReport {
    pub file: PathBuf,
    pub model: String,
    pub threshold: i64,
    pub result: AnalysisResult,
    pub outcome: GateOutcome,
}

impl AuditReport {
    pub fn exit_code(&self) -> i32 {
        self.outcome.exit_code()
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "file": self.file.display().to_string(),
            "model": self.model,
            "threshold": self.threshold,
            "score": self.result.score.as_ref().map(score_json),
            "outcome": self.outcome.label(),
            "response": self.result.response,
        })
    }
}

/// Exact scores serialize as numbers; overflowing ones keep their digits as a string.
fn score_json(score: &Score) -> serde_json::Value {
    if score.is_exact() {
        serde_json::Value::from(score.value())
    } else {
        serde_json::Value::from(score.as_str())
    }
}

/// Run one audit. A file that cannot be read fails before any remote call.
pub fn run(
    path: &Path,
    threshold: i64,
    config: &AuditConfig,
    generator: &dyn TextGenerator,
) -> Result<AuditReport, AuditError> {
    let request = AnalysisRequest::load(path, threshold)?;

    let prompt = build_prompt(&request.source);
    let response = generator.generate(&GenerationRequest::new(config, prompt))?;

    let result = AnalysisResult::from_response(response);
    let outcome = GateOutcome::evaluate(result.score.as_ref().map(Score::value), request.threshold);
    tracing::info!(score = ?result.score.as_ref().map(Score::as_str), threshold = request.threshold, outcome = outcome.label(), "gate evaluated");

    Ok(AuditReport {
        file: request.path,
        model: config.model.clone(),
        threshold: request.threshold,
        result,
        outcome,
    })
}
