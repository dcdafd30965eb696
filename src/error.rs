//! Error types for input validation

use thiserror::Error;

/// Errors raised while validating clustering input.
///
/// All of these are detected eagerly, before any graph work starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClusteringError {
    #[error("invalid input: max cluster size (N) must be positive")]
    NonPositiveMaxSize,

    #[error("invalid input: max cluster count (M) must be positive")]
    NonPositiveMaxClusters,

    #[error("invalid input: missing constraint {0}")]
    MissingConstraint(&'static str),

    #[error("invalid input: node at position {index} has an empty path")]
    EmptyNodePath { index: usize },

    #[error("invalid input: duplicate node path '{path}'")]
    DuplicateNode { path: String },

    #[error("invalid input: edge at position {index} has an empty {endpoint} path")]
    EmptyEdgeEndpoint { index: usize, endpoint: &'static str },

    #[error("invalid input: edge at position {index} references unknown node '{path}'")]
    UnknownNode { index: usize, path: String },

    #[error("invalid input: edge at position {index} has invalid weight {value}")]
    InvalidWeight { index: usize, value: f64 },
}

pub type Result<T> = std::result::Result<T, ClusteringError>;
