//! Run error types.
//!
//! Returned by `Node::run`, `CompiledTeamGraph::invoke`, the graph stream and the driver.
//! Routing errors (contract violation, step limit, invalid transition) are fatal to the
//! current invocation; worker failures are normally converted to messages by `WorkerNode`
//! before they reach the runner.

use thiserror::Error;

/// Error raised while running a team graph or one of its nodes.
#[derive(Debug, Error)]
pub enum AgentError {
    /// The supervisor named a worker that is not in its roster.
    #[error("routing contract violation: {name:?} is not one of {roster:?} or FINISH")]
    RoutingContractViolation {
        /// Name returned by the reasoning component.
        name: String,
        /// Roster the supervisor was constructed with.
        roster: Vec<String>,
    },

    /// The cycle cap was reached before the supervisor emitted FINISH.
    #[error("step limit of {limit} reached without termination")]
    StepLimitExceeded { limit: usize },

    /// A node emitted a transition the routing state machine does not allow
    /// (e.g. a worker routing to another worker, or the supervisor routing to itself).
    #[error("invalid transition from {from:?}: {goto}")]
    InvalidTransition { from: String, goto: String },

    /// A worker's action kept failing; its text is the in-band report the supervisor sees.
    #[error("{worker} failed: {message}")]
    WorkerFailed { worker: String, message: String },

    /// Execution failed with a message (e.g. LLM call failed, empty sub-team result).
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

impl AgentError {
    /// True for errors that abort the whole invocation and must never be
    /// folded into an in-band failure message.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AgentError::RoutingContractViolation { .. }
                | AgentError::StepLimitExceeded { .. }
                | AgentError::InvalidTransition { .. }
        )
    }
}
