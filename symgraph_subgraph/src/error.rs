//! Error types for graph construction and bijection queries.
//!
//! Relation conflicts and degree mismatches are not errors: inside the
//! search they only end the current branch.

use thiserror::Error;

/// Errors raised while building a [`crate::PatternGraph`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// No edges, so no initiator can be chosen.
    #[error("cannot build a pattern graph from an empty edge list")]
    EmptyEdgeList,

    /// An edge connects a node to itself.
    #[error("edge ({0}, {0}) is a self-loop")]
    SelfLoop(String),

    /// Some nodes cannot be reached from the initiator.
    #[error("pattern graph is not connected: {reached} of {total} nodes reachable from the initiator")]
    Disconnected {
        /// Nodes reachable from the initiator.
        reached: usize,
        /// Nodes in the graph.
        total: usize,
    },
}

impl GraphError {
    /// Create a self-loop error for any printable node.
    pub fn self_loop(node: &impl std::fmt::Debug) -> Self {
        Self::SelfLoop(format!("{node:?}"))
    }
}

/// Errors raised by [`crate::Bijection`] lookups and compositions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BijectionError {
    /// The queried source has no destination.
    #[error("no destination recorded for source {0}")]
    MissingSource(String),

    /// The queried destination has no source.
    #[error("no source recorded for destination {0}")]
    MissingDestination(String),

    /// A composition where the inner bijection reaches outside the outer one.
    #[error("cannot compose: {0} is not a source of the outer bijection")]
    Domain(String),
}

impl BijectionError {
    /// Create a missing-source error.
    pub fn missing_source(source: &impl std::fmt::Debug) -> Self {
        Self::MissingSource(format!("{source:?}"))
    }

    /// Create a missing-destination error.
    pub fn missing_destination(destination: &impl std::fmt::Debug) -> Self {
        Self::MissingDestination(format!("{destination:?}"))
    }

    /// Create a domain mismatch error.
    pub fn domain(value: &impl std::fmt::Debug) -> Self {
        Self::Domain(format!("{value:?}"))
    }
}
