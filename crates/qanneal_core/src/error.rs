//! Error types for QAnneal
//!
//! Gantree: L0_Foundation → Errors
//!
//! One error enum shared by every crate in the workspace.

// Error variant fields are self-documenting via error messages
#![allow(missing_docs)]

use crate::types::{NodeId, VarId};
use thiserror::Error;

/// Main error type for QAnneal
/// Gantree: QannealError // enum
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QannealError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    /// Parameter outside its admissible range
    /// Gantree: InvalidParameter{name,reason} // 파라미터 검증
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },

    // ========================================================================
    // Topology Errors
    // ========================================================================
    /// Empty edge list
    #[error("Coupling map is empty")]
    EmptyCouplingMap,

    /// Self loop in an edge list
    #[error("Invalid coupling ({0}, {1}): endpoints must be different")]
    InvalidCoupling(usize, usize),

    /// Node index outside the topology
    #[error("Node {node} out of range: topology has {num_nodes} nodes")]
    NodeOutOfRange { node: NodeId, num_nodes: usize },

    // ========================================================================
    // Embedding Errors
    // ========================================================================
    /// Every embedding attempt failed
    /// Gantree: EmbeddingNotFound{tries} // 임베딩 실패
    #[error("Cannot find embedding after {tries} tries{}", detail_suffix(.last_error))]
    EmbeddingNotFound {
        tries: usize,
        last_error: Option<String>,
    },

    /// Embedding does not realise the source graph
    #[error("Invalid embedding: {0}")]
    InvalidEmbedding(String),

    // ========================================================================
    // Model Errors
    // ========================================================================
    /// Sample has no value for a model variable
    #[error("Sample is missing variable {0}")]
    MissingVariable(VarId),

    /// Sample value outside the vartype domain
    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    // ========================================================================
    // I/O Errors
    // ========================================================================
    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(String),

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    InternalError(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_ref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// Result type alias for QAnneal operations
/// Gantree: QannealResult<T> // type alias
pub type QannealResult<T> = Result<T, QannealError>;

// ============================================================================
// Error Conversion Helpers
// ============================================================================

impl From<serde_json::Error> for QannealError {
    fn from(err: serde_json::Error) -> Self {
        QannealError::JsonError(err.to_string())
    }
}

// ============================================================================
// Error Helpers
// ============================================================================

impl QannealError {
    /// Shorthand for [`QannealError::InvalidParameter`]
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        QannealError::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Check if error is recoverable
    ///
    /// Only a failed embedding search is worth retrying unchanged (with more
    /// tries or a different finder). Everything else needs corrected input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, QannealError::EmbeddingNotFound { .. })
    }

    /// Check if error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            QannealError::InvalidParameter { .. }
                | QannealError::InvalidCoupling(..)
                | QannealError::NodeOutOfRange { .. }
                | QannealError::MissingVariable(_)
                | QannealError::InvalidSample(_)
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QannealError::invalid_parameter("s_target", "must be in [0, 1], got 1.1");
        let msg = err.to_string();
        assert!(msg.contains("s_target"));
        assert!(msg.contains("1.1"));
    }

    #[test]
    fn test_embedding_not_found_display() {
        let bare = QannealError::EmbeddingNotFound {
            tries: 5,
            last_error: None,
        };
        assert_eq!(bare.to_string(), "Cannot find embedding after 5 tries");

        let detailed = QannealError::EmbeddingNotFound {
            tries: 3,
            last_error: Some("no room".into()),
        };
        assert!(detailed.to_string().ends_with(": no room"));
    }

    #[test]
    fn test_is_recoverable() {
        assert!(QannealError::EmbeddingNotFound {
            tries: 1,
            last_error: None
        }
        .is_recoverable());
        assert!(!QannealError::invalid_parameter("hold_time", "negative").is_recoverable());
    }

    #[test]
    fn test_is_validation_error() {
        assert!(QannealError::invalid_parameter("x", "y").is_validation_error());
        assert!(QannealError::MissingVariable(3).is_validation_error());
        assert!(!QannealError::EmptyCouplingMap.is_validation_error());
    }

    #[test]
    fn test_from_json_error() {
        let err: QannealError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, QannealError::JsonError(_)));
    }
}
