//! # API Error Type
//!
//! Unified error type for session operations.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow                                           │
//! │                                                                         │
//! │  Frontend                    Rust Backend                               │
//! │  ────────                    ────────────                               │
//! │                                                                         │
//! │  save edit ──────────────►  EditSession::save                          │
//! │                                    │                                    │
//! │             size "0"? ──── EditError::InvalidPackageSize ──┐           │
//! │                                    │                       ▼           │
//! │             no open edit? ── no draft held ────────► ApiError ────►    │
//! │                                    │                                    │
//! │             success ──► replacement RecipeResult ─────────────────►    │
//! │                                                                         │
//! │  try { await saveEdit(...) }                                            │
//! │  catch (e) { /* e.code = "VALIDATION_ERROR", e.message = ... */ }       │
//! │                                                                         │
//! │  Every failure is scoped to the one edit attempt; the session's         │
//! │  result is left fully intact on all error paths.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use unitcost_core::EditError;

/// API error returned from session operations.
///
/// ## Serialization
/// This is what the frontend receives when an operation fails:
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "invalid package size: '0'"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// The addressed ingredient line does not exist
    NotFound,

    /// Input validation failed (bad size, bad price, wrong unit family)
    ValidationError,

    /// A stored size string did not match the unit grammar
    ParseError,

    /// Edit state conflict (an edit is already open, or none is)
    EditConflict,

    /// The pricing-service payload could not be decoded
    PayloadError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an edit-state conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::EditConflict, message)
    }
}

/// Converts core edit errors to API errors.
impl From<EditError> for ApiError {
    fn from(err: EditError) -> Self {
        let code = match &err {
            EditError::IndexOutOfRange { .. } => ErrorCode::NotFound,
            EditError::NotEditable { .. }
            | EditError::InvalidPackageSize { .. }
            | EditError::InvalidPackagePrice { .. }
            | EditError::UnitMismatch { .. }
            | EditError::InvalidYield { .. } => ErrorCode::ValidationError,
            EditError::Parse(_) => ErrorCode::ParseError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts payload decode failures to API errors.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::new(
            ErrorCode::PayloadError,
            format!("could not decode pricing payload: {err}"),
        )
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = EditError::InvalidPackageSize {
            input: "0".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "invalid package size: '0'");

        let err: ApiError = EditError::IndexOutOfRange { index: 9, len: 2 }.into();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::validation("invalid package price: '-1'");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["message"], "invalid package price: '-1'");
    }
}
