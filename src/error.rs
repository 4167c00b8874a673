//! Error types and exit-code mapping.
//!
//! `RefmarkError` is the single error type the CLI reports; domain errors
//! (currently only [`ExpandError`]) bridge into it via `From` impls.
//!
//! ## Error Code Mapping
//!
//! Exit codes form the CLI contract:
//! - `2`: invalid input (missing/unreadable/malformed document, cyclic
//!   inheritance)
//! - `3`: output failure (directory creation, page write)
//!
//! Unresolvable references (unknown ancestors, unknown union members) are
//! not errors at all — they degrade silently inside the core.

use std::fmt;
use std::io;

use thiserror::Error;

pub use crate::expand::ExpandError;

// ============================================================================
// Error Codes
// ============================================================================

/// Stable exit codes for CLI error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ErrorCode {
    /// The structure document is missing, unreadable or malformed.
    InvalidInput = 2,
    /// A generated page or the output directory could not be written.
    OutputFailure = 3,
}

impl ErrorCode {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Unified error type for the generation pipeline.
#[derive(Debug, Error)]
pub enum RefmarkError {
    /// The structure document could not be read.
    #[error("cannot read structure document {path}: {source}")]
    InputRead {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The structure document is not well-formed.
    #[error("malformed structure document {path}: {source}")]
    InputMalformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Inheritance expansion failed (cyclic graph in malformed input).
    #[error(transparent)]
    Expand(#[from] ExpandError),

    /// An output page or directory could not be written.
    #[error("cannot write {path}: {source}")]
    OutputWrite {
        path: String,
        #[source]
        source: io::Error,
    },
}

impl From<&RefmarkError> for ErrorCode {
    fn from(err: &RefmarkError) -> Self {
        match err {
            RefmarkError::InputRead { .. }
            | RefmarkError::InputMalformed { .. }
            | RefmarkError::Expand(_) => ErrorCode::InvalidInput,
            RefmarkError::OutputWrite { .. } => ErrorCode::OutputFailure,
        }
    }
}

impl RefmarkError {
    /// Exit code the CLI should terminate with for this error.
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::from(self)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_errors_map_to_invalid_input() {
        let err = RefmarkError::InputRead {
            path: "structure.json".to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.error_code(), ErrorCode::InvalidInput);
        assert_eq!(err.error_code().code(), 2);
    }

    #[test]
    fn cyclic_inheritance_maps_to_invalid_input() {
        let err = RefmarkError::from(ExpandError::CyclicInheritance {
            type_name: "A".to_string(),
        });
        assert_eq!(err.error_code(), ErrorCode::InvalidInput);
        assert_eq!(err.to_string(), "cyclic inheritance detected at 'A'");
    }

    #[test]
    fn output_errors_map_to_output_failure() {
        let err = RefmarkError::OutputWrite {
            path: "docs/Bag.md".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.error_code().code(), 3);
    }

    #[test]
    fn display_includes_path() {
        let err = RefmarkError::OutputWrite {
            path: "docs/Bag.md".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "cannot write docs/Bag.md: denied");
    }
}
