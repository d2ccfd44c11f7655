//! Graph node trait: one cycle of a team graph.
//!
//! Receives the current `TeamState`, returns a `Command` (next target + state update).
//! Implemented by `SupervisorNode`, `WorkerNode` and `TeamWorker`; the runner applies the
//! update and performs the transition.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::state::TeamState;

use super::Command;

/// One step in a team graph: state in, routing command out.
///
/// Nodes never mutate the state themselves. Worker nodes must return
/// `Goto::Supervisor`; only the supervisor may return `Goto::Worker` or `Goto::End`.
#[async_trait]
pub trait Node: Send + Sync {
    /// Node id (`"supervisor"`, a worker role, or a team name). Unique within a graph.
    fn id(&self) -> &str;

    async fn run(&self, state: &TeamState) -> Result<Command, AgentError>;
}
