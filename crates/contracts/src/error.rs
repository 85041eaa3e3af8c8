//! Layered error definitions
//!
//! Categorized by stage: encode / decode / validation

use serde_json::error::Category;
use thiserror::Error;

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Encoding Errors =====
    /// Serializer rejected the value
    #[error("failed to encode {structure}: {source}")]
    Encode {
        structure: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// Value cannot be represented on the wire without losing information
    #[error("cannot encode {structure}: field '{field}' {message}")]
    Unencodable {
        structure: &'static str,
        field: &'static str,
        message: String,
    },

    // ===== Decoding Errors =====
    /// Input is not a well-formed document for the target structure
    #[error("failed to decode {structure}: {source}")]
    Decode {
        structure: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // ===== Validation Errors =====
    /// Producer-side invariant violated
    #[error("validation error at '{field}': {message}")]
    Validation { field: String, message: String },

    /// Event kind name not recognized
    #[error("unknown event kind: {0}")]
    UnknownKind(String),
}

/// Coarse classification of a decode failure
///
/// Lets a consumer choose between redelivery and dead-lettering without
/// inspecting serializer internals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeFailure {
    /// Not valid JSON
    Syntax,
    /// Valid JSON with the wrong shape (missing field, wrong type, bad timestamp)
    Data,
    /// Input ended early
    Truncated,
}

impl ContractError {
    pub fn decode(structure: &'static str, source: serde_json::Error) -> Self {
        Self::Decode { structure, source }
    }

    pub fn encode(structure: &'static str, source: serde_json::Error) -> Self {
        Self::Encode { structure, source }
    }

    /// Create validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create unencodable-value error
    pub fn unencodable(
        structure: &'static str,
        field: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self::Unencodable {
            structure,
            field,
            message: message.into(),
        }
    }

    /// Classify a decode error, `None` for every other variant
    pub fn decode_failure(&self) -> Option<DecodeFailure> {
        match self {
            Self::Decode { source, .. } => Some(match source.classify() {
                Category::Syntax => DecodeFailure::Syntax,
                Category::Eof => DecodeFailure::Truncated,
                Category::Data | Category::Io => DecodeFailure::Data,
            }),
            _ => None,
        }
    }

    /// Name of the structure that failed, for encode/decode errors
    pub fn structure(&self) -> Option<&'static str> {
        match self {
            Self::Encode { structure, .. }
            | Self::Unencodable { structure, .. }
            | Self::Decode { structure, .. } => Some(structure),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_error(input: &str) -> serde_json::Error {
        serde_json::from_str::<serde_json::Value>(input).unwrap_err()
    }

    #[test]
    fn test_decode_failure_classification() {
        let truncated = ContractError::decode("PNGCreated", json_error("{\"pngKey\": "));
        assert_eq!(truncated.decode_failure(), Some(DecodeFailure::Truncated));

        let syntax = ContractError::decode("PNGCreated", json_error("{pngKey}"));
        assert_eq!(syntax.decode_failure(), Some(DecodeFailure::Syntax));

        let data = ContractError::decode(
            "PNGCreated",
            serde_json::from_str::<u32>("\"one\"").unwrap_err(),
        );
        assert_eq!(data.decode_failure(), Some(DecodeFailure::Data));
    }

    #[test]
    fn test_display_names_structure() {
        let err = ContractError::decode("PDFCreated", json_error("["));
        assert!(err.to_string().starts_with("failed to decode PDFCreated"));
        assert_eq!(err.structure(), Some("PDFCreated"));

        let err = ContractError::validation("header.workflowId", "must not be empty");
        assert_eq!(
            err.to_string(),
            "validation error at 'header.workflowId': must not be empty"
        );
        assert_eq!(err.structure(), None);
        assert_eq!(err.decode_failure(), None);
    }

    #[test]
    fn test_unknown_kind_has_no_structure() {
        let err = ContractError::UnknownKind("PageDeleted".into());
        assert_eq!(err.to_string(), "unknown event kind: PageDeleted");
        assert_eq!(err.structure(), None);
        assert_eq!(err.decode_failure(), None);
    }
}
