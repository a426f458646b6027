//! Error types for CpForge

use thiserror::Error;

use crate::var::{IntVarId, VariableKind};

/// Main error type for CpForge operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CpForgeError {
    /// A snapshot was asked for a variable it does not track.
    #[error("{kind} variable #{index} is not tracked by this assignment")]
    VariableNotTracked {
        /// Kind of the requested variable.
        kind: VariableKind,
        /// Arena index of the requested variable.
        index: usize,
    },

    /// A second objective was registered on the same assignment.
    #[error("assignment already has an objective (int variable #{})", .existing.index())]
    ObjectiveAlreadySet {
        /// The objective variable already registered.
        existing: IntVarId,
    },

    /// A value was read from a captured range that holds more than one value.
    #[error("{kind} variable #{index}: {field} is not bound ({min}..{max})")]
    NotBound {
        /// Kind of the variable.
        kind: VariableKind,
        /// Arena index of the variable.
        index: usize,
        /// Which bound pair was read.
        field: &'static str,
        /// Captured lower bound.
        min: i64,
        /// Captured upper bound.
        max: i64,
    },

    /// A handle does not refer to a variable of the live network.
    #[error("unknown {kind} variable #{index}")]
    UnknownVariable {
        /// Kind of the requested variable.
        kind: VariableKind,
        /// Arena index of the requested variable.
        index: usize,
    },

    /// A write on the live network left a variable without any value.
    #[error("Infeasible: {0}")]
    Infeasible(String),

    /// A captured element violates its own invariants.
    #[error("Invalid element: {0}")]
    InvalidElement(String),

    /// Invalid operation for current solver state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Error in solver configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Failure while saving or loading an assignment record
    #[error("Record error: {0}")]
    Record(String),
}

/// Result type alias for CpForge operations
pub type Result<T> = std::result::Result<T, CpForgeError>;
