//! Input loading for the file under audit.

use crate::error::AuditError;
use std::fs;
use std::path::Path;

/// Read the whole file as UTF-8 text.
pub fn load_source(path: &Path) -> Result<String, AuditError> {
    let source = fs::read_to_string(path).map_err(|source| AuditError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "loaded source");
    Ok(source)
}
