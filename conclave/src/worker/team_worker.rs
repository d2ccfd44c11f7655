//! Team-as-worker adapter: runs a whole team graph as one worker of an enclosing team.
//!
//! Only the most recent enclosing message is handed down, so the sub-team starts from a
//! focused request instead of the full history. The sub-team's final message comes back
//! as a single report attributed to the team. A non-fatal failure inside the sub-team is
//! reported the same way a failing worker is; fatal routing errors abort the enclosing run.

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Command, CompiledTeamGraph, Node, RunConfig};
use crate::message::{Message, Role};
use crate::state::TeamState;

use super::failure_report;

/// Node that delegates to a nested [`CompiledTeamGraph`].
///
/// **Interaction**: registered in the root team under the team name; the nested graph
/// runs to completion before control returns to the enclosing supervisor.
pub struct TeamWorker {
    name: String,
    graph: CompiledTeamGraph,
    config: RunConfig,
}

impl TeamWorker {
    /// Adapter named after the nested graph.
    pub fn new(graph: CompiledTeamGraph) -> Self {
        Self {
            name: graph.name().to_string(),
            graph,
            config: RunConfig::default(),
        }
    }

    /// Config for each nested invocation (recursion limit).
    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    /// Runs the nested team and returns its final message.
    async fn report(&self, state: &TeamState) -> Result<Message, AgentError> {
        let result = self.graph.invoke(Self::seed_state(state), &self.config).await?;
        result.messages.into_iter().last().ok_or_else(|| {
            AgentError::ExecutionFailed(format!("team {} produced no message", self.name))
        })
    }

    /// Initial sub-team state: the last enclosing message only.
    pub fn seed_state(state: &TeamState) -> TeamState {
        TeamState::new(state.last_message().cloned().into_iter().collect())
    }
}

#[async_trait]
impl Node for TeamWorker {
    fn id(&self) -> &str {
        &self.name
    }

    async fn run(&self, state: &TeamState) -> Result<Command, AgentError> {
        tracing::debug!(team = %self.name, "Delegating to sub-team");
        match self.report(state).await {
            Ok(last) => Ok(Command::to_supervisor(
                Message::new(Role::User, last.content).with_name(self.name.clone()),
            )),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => Ok(Command::to_supervisor(failure_report(&self.name, &e))),
        }
    }
}
