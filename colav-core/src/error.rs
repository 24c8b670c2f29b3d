//! Error types for the unsafe-set pipeline
//!
//! Only programmer-contract violations surface as errors. Arithmetic
//! degeneracies (coincident positions, zero relative velocity, closest
//! approach in the past) are represented as [`CpaMetric`](crate::CpaMetric)
//! values and filtered out by threshold comparisons downstream.

use thiserror::Error;

/// Errors produced by the unsafe-set pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnsafeSetError {
    /// A caller-supplied argument violates its documented range
    /// (non-positive prediction time step, negative safety radius or
    /// distance safety factor).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A documented precondition between arguments was broken
    /// (e.g. an I1 member handed to the cluster rule without being part
    /// of the full obstacle list).
    #[error("contract violation: {0}")]
    ContractViolation(String),

    /// The collected vertex set cannot form a two-dimensional hull.
    /// Recoverable: the pipeline reports an empty unsafe region instead
    /// of propagating this.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),
}
