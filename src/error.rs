use thiserror::Error;

use crate::{Algorithm, NodeId};

/// Precondition failures of the transducers.
///
/// Unreachable nodes, disconnected graphs and negative cycles are not errors: they end in a
/// regular `final` step.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AlgorithmError {
    #[error("Start node is required for {0}.")]
    MissingStartNode(Algorithm),

    #[error("Start node {1} does not exist in the graph. A start node is required for {0}.")]
    UnknownStartNode(Algorithm, NodeId),

    #[error("{algorithm} requires non-negative edge weights, but edge {edge} has weight {weight}.")]
    NegativeWeight {
        algorithm: Algorithm,
        edge: String,
        weight: f64,
    },
}

/// Errors of the graph document import.
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("invalid graph document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("edge {edge} references unknown node {node}")]
    UnknownNode { edge: String, node: String },

    #[error("node id {0} is used more than once")]
    DuplicateNode(String),
}

/// Unknown algorithm selector.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown algorithm: {0}")]
pub struct UnknownAlgorithm(pub String);
