//! Supervisor node: decides which roster member acts next, or terminates the team.
//!
//! The decision comes from a [`Router`] and is validated against the [`Roster`]; a name
//! outside the roster aborts the invocation with `RoutingContractViolation`.

mod prompt;
mod router;

pub use prompt::{supervisor_system_prompt, ROUTING_INSTRUCTION, SUPERVISOR_PROMPT};
pub use router::{parse_next, Decision, LlmRouter, Router};

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Command, Node, Roster, SUPERVISOR};
use crate::state::TeamState;

/// Routing node of a team graph.
///
/// **Interaction**: `TeamGraph::new` takes one; the runner calls it after every worker.
pub struct SupervisorNode {
    roster: Roster,
    router: Arc<dyn Router>,
}

impl SupervisorNode {
    pub fn new(roster: Roster, router: Arc<dyn Router>) -> Self {
        Self { roster, router }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }
}

#[async_trait]
impl Node for SupervisorNode {
    fn id(&self) -> &str {
        SUPERVISOR
    }

    async fn run(&self, state: &TeamState) -> Result<Command, AgentError> {
        let decision = self.router.decide(state, &self.roster).await?;
        let route = self.roster.resolve(&decision.next)?;
        tracing::info!(next = route.as_str(), "Supervisor routed");
        Ok(Command::route(route, decision.messages))
    }
}
