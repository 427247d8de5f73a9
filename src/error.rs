//! Error types for the Phasor AC circuit solver.
//!
//! This module provides a unified error type [`PhasorError`] that covers
//! all error conditions that can occur while building a network, discovering
//! a circuit, converting between complex and real systems, and solving.

use thiserror::Error;

use crate::circuit::{BipoleId, NodeId};

/// Result type alias using [`PhasorError`].
pub type Result<T> = std::result::Result<T, PhasorError>;

/// Unified error type for all Phasor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhasorError {
    // ============ Graph Contract Violations ============
    /// No ground node was reached during discovery
    #[error("Circuit has no ground node - no reference potential defined")]
    MissingGround,

    /// Two nodes could not be merged because they disagree on a property
    #[error("Cannot merge nodes {keep} and {other}: {field} differs")]
    GroundMergeConflict {
        keep: NodeId,
        other: NodeId,
        field: &'static str,
    },

    /// Node handle does not refer to a live node
    #[error("Node {node} not found in network")]
    NodeNotFound { node: NodeId },

    /// Bipole handle does not refer to a live bipole
    #[error("Bipole {bipole} not found in network")]
    BipoleNotFound { bipole: BipoleId },

    /// Invalid component parameter value
    #[error("Invalid {param} value {value}: {message}")]
    InvalidParameter {
        param: &'static str,
        value: f64,
        message: String,
    },

    // ============ Solve Contract Violations ============
    /// Circuit has no independent source
    #[error("Circuit has no voltage or current source - at least one is required")]
    NoSources,

    /// Sources disagree on the analysis frequency
    #[error("Source {bipole} runs at {found} rad/s, expected {expected} rad/s")]
    FrequencyMismatch {
        expected: f64,
        found: f64,
        bipole: BipoleId,
    },

    /// Component admittance is not finite at the analysis frequency
    #[error("Component {bipole} has a degenerate impedance at {omega} rad/s")]
    DegenerateImpedance { bipole: BipoleId, omega: f64 },

    // ============ Hermitian Embedding Violations ============
    /// Doubled real matrix has an odd extent
    #[error("Doubled real matrix has {size} {axis}, which is odd")]
    OddHermitianDimension { axis: &'static str, size: usize },

    /// Quadrants of a doubled real matrix do not encode one complex matrix
    #[error("Real/imaginary quadrant mismatch at block ({row}, {col}): {quadrant}")]
    HermitianQuadrantMismatch {
        row: usize,
        col: usize,
        quadrant: &'static str,
    },

    /// Column-vector split requested on a matrix with several columns
    #[error("Expected a column vector, found {columns} columns")]
    NotAColumnVector { columns: usize },

    // ============ Numerical Failures ============
    /// Coefficient matrix is singular and cannot be solved
    #[error("Singular matrix at pivot {pivot} - floating node or voltage source loop")]
    SingularMatrix { pivot: usize },

    /// Coefficient matrix and right-hand side do not form a square system
    #[error("System is not square: {rows}x{cols} matrix with {rhs}-element right-hand side")]
    NonSquareSystem {
        rows: usize,
        cols: usize,
        rhs: usize,
    },

    /// Solver returned a vector of unexpected length
    #[error("Solver returned {found} values, expected {expected}")]
    MalformedSolution { expected: usize, found: usize },
}

impl PhasorError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(param: &'static str, value: f64, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param,
            value,
            message: message.into(),
        }
    }

    /// Create a quadrant mismatch error
    pub fn quadrant_mismatch(row: usize, col: usize, quadrant: &'static str) -> Self {
        Self::HermitianQuadrantMismatch { row, col, quadrant }
    }

    /// Check whether this error is a contract violation rather than a numerical failure.
    pub fn is_contract_violation(&self) -> bool {
        !matches!(
            self,
            Self::SingularMatrix { .. }
                | Self::NonSquareSystem { .. }
                | Self::MalformedSolution { .. }
        )
    }
}
