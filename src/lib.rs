pub mod audit;
pub mod config;
pub mod error;
pub mod gemini;
pub mod prompt;
pub mod score;
pub mod source;

// Re-export commonly used types
pub use audit::{AnalysisRequest, AnalysisResult, AuditReport};
pub use config::AuditConfig;
pub use error::AuditError;
pub use gemini::{GeminiClient, GenerationRequest, TextGenerator};
pub use score::{GateOutcome, Score};
