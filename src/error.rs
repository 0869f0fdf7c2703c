//! Error types surfaced by the audit pipeline.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure of an audit run. Either kind ends the process with status 1.
#[derive(Debug, Error)]
pub enum AuditError {
    /// The source file is missing, unreadable, or not text.
    #[error("failed to read {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Anything the remote service or the transport to it reported.
    #[error("{message}")]
    RemoteCall { message: String },
}

impl AuditError {
    pub fn remote(message: impl Into<String>) -> Self {
        Self::RemoteCall {
            message: message.into(),
        }
    }
}
