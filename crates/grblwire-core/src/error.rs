//! Error handling for grblwire
//!
//! Decoding a controller line can fail in exactly three ways:
//! - Framing errors (the line matches no known outer framing)
//! - Unknown machine state (the status report's leading token is unrecognized)
//! - Field format errors (a recognized field's payload violates its grammar)
//!
//! An unrecognized status field tag is not an error; it is skipped.
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Decode error type
///
/// Returned by every decode entry point. A failure rejects the whole line;
/// nothing is partially populated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Outer delimiters absent or malformed
    #[error("Unrecognized line framing: {line:?}")]
    Framing {
        /// The offending line, trimmed.
        line: String,
    },

    /// Leading state token is not a known machine state
    #[error("Unknown machine state: {state:?}")]
    UnknownState {
        /// The state name as received.
        state: String,
    },

    /// A recognized field's payload violates its grammar
    #[error("Malformed '{tag}' field: {payload:?}")]
    FieldFormat {
        /// The field tag (or state name, for a bad sub-state).
        tag: String,
        /// The payload that failed to decode.
        payload: String,
    },
}

impl DecodeError {
    /// Create a framing error for a line
    pub fn framing(line: impl Into<String>) -> Self {
        Self::Framing { line: line.into() }
    }

    /// Create an unknown-state error
    pub fn unknown_state(state: impl Into<String>) -> Self {
        Self::UnknownState {
            state: state.into(),
        }
    }

    /// Create a field format error naming the offending tag
    pub fn field_format(tag: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::FieldFormat {
            tag: tag.into(),
            payload: payload.into(),
        }
    }

    /// Check if this is a framing error
    pub fn is_framing_error(&self) -> bool {
        matches!(self, Self::Framing { .. })
    }

    /// Check if this is an unknown-state error
    pub fn is_unknown_state(&self) -> bool {
        matches!(self, Self::UnknownState { .. })
    }

    /// Check if this is a field format error
    pub fn is_field_format_error(&self) -> bool {
        matches!(self, Self::FieldFormat { .. })
    }

    /// The field tag named by a field format error
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::FieldFormat { tag, .. } => Some(tag),
            _ => None,
        }
    }
}

/// Result type using DecodeError
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
