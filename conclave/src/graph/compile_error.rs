//! Graph compilation error.
//!
//! Returned by `TeamGraph::compile` when the registered workers do not match the
//! supervisor's roster one-to-one.

use thiserror::Error;

use super::RosterError;

/// Error when compiling a team graph.
#[derive(Debug, Error)]
pub enum CompilationError {
    /// A roster member has no worker node registered via `add_worker`.
    #[error("roster member has no worker node: {0}")]
    MissingWorker(String),

    /// A worker node id is not a member of the supervisor's roster.
    #[error("worker not in roster: {0}")]
    UnknownWorker(String),

    /// Two worker nodes share the same id.
    #[error("duplicate worker node: {0}")]
    DuplicateWorker(String),

    /// Recursion limit must be at least one cycle.
    #[error("recursion limit must be greater than zero")]
    InvalidRecursionLimit,

    #[error("invalid roster: {0}")]
    Roster(#[from] RosterError),
}
