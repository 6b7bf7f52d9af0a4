use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::gl_enums::{error_name, GLenum};

/// Error reported by the driver after a forwarded call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlError {
    pub code: GLenum,
    /// Symbol of the call that raised it.
    pub call: &'static str,
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (0x{:04X}) after {}", error_name(self.code), self.code, self.call)
    }
}

impl std::error::Error for GlError {}

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("native context could not be made current")]
    MakeCurrent,
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read driver snapshot {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid driver snapshot")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gl_enums::INVALID_OPERATION;

    #[test]
    fn test_gl_error_display() {
        let err = GlError {
            code: INVALID_OPERATION,
            call: "glBindVertexArray",
        };
        assert_eq!(err.to_string(), "GL_INVALID_OPERATION (0x0502) after glBindVertexArray");
    }
}
