//! Error types for the allot workspace

use thiserror::Error;

use crate::status::SolveStatus;

/// Main error type for allot operations
#[derive(Debug, Error)]
pub enum AllotError {
    /// Malformed or dimensionally inconsistent caller input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A result accessor was called before any solve
    #[error("model has not been solved")]
    NotSolved,

    /// A result accessor was called after a solve that produced no solution
    #[error("no feasible solution available (last status: {0})")]
    NoFeasibleSolution(SolveStatus),

    /// An accessor index exceeded the matrix bounds
    #[error("{axis} index {index} out of range (size {len})")]
    IndexOutOfRange {
        axis: &'static str,
        index: usize,
        len: usize,
    },
}

/// Result type alias for allot operations
pub type Result<T> = std::result::Result<T, AllotError>;
