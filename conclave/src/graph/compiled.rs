//! Compiled team graph: immutable, supports invoke and stream.
//!
//! Built by `TeamGraph::compile`. Execution is a single-threaded routing loop: the
//! supervisor runs, then the worker it named, then the supervisor again, until the
//! supervisor emits FINISH or the recursion limit is hit.

use std::collections::HashMap;
use std::sync::Arc;

use futures::stream;
use tracing::Instrument;

use crate::error::AgentError;
use crate::state::TeamState;
use crate::stream::{GraphStream, StepSnapshot};
use crate::supervisor::SupervisorNode;

use super::logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_state_update,
};
use super::{Goto, Node, Roster, RunConfig, WorkerId};

/// Runnable team graph. Cheap to clone; clones share nodes.
///
/// **Interaction**: Used directly by the driver (root team) and wrapped by `TeamWorker`
/// when a team acts as a worker of an enclosing team.
#[derive(Clone)]
pub struct CompiledTeamGraph {
    name: Arc<str>,
    supervisor: Arc<SupervisorNode>,
    workers: Arc<HashMap<String, Arc<dyn Node>>>,
    recursion_limit: usize,
}

impl CompiledTeamGraph {
    pub(super) fn new(
        name: String,
        supervisor: Arc<SupervisorNode>,
        workers: HashMap<String, Arc<dyn Node>>,
        recursion_limit: usize,
    ) -> Self {
        Self {
            name: Arc::from(name),
            supervisor,
            workers: Arc::new(workers),
            recursion_limit,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn roster(&self) -> &Roster {
        self.supervisor.roster()
    }

    /// Cycle cap used when `RunConfig::recursion_limit` is unset.
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Runs the routing loop to termination and returns the final state.
    pub async fn invoke(
        &self,
        state: TeamState,
        config: &RunConfig,
    ) -> Result<TeamState, AgentError> {
        let mut run = TeamRun::new(self.clone(), state, config);
        while run.step().await?.is_some() {}
        Ok(run.state)
    }

    /// Lazy stream of per-cycle snapshots.
    ///
    /// Each poll runs exactly one node. The stream ends after the supervisor emits
    /// FINISH; after an error it yields that error once and then ends.
    pub fn stream(&self, state: TeamState, config: RunConfig) -> GraphStream {
        let run = TeamRun::new(self.clone(), state, &config);
        Box::pin(stream::unfold(run, |mut run| async move {
            match run.step().await {
                Ok(Some(snapshot)) => Some((Ok(snapshot), run)),
                Ok(None) => None,
                Err(e) => Some((Err(e), run)),
            }
        }))
    }
}

/// Which node runs next.
enum Position {
    Supervisor,
    Worker(WorkerId),
    Done,
}

/// One invocation in progress.
struct TeamRun {
    graph: CompiledTeamGraph,
    state: TeamState,
    position: Position,
    steps: usize,
    limit: usize,
    span: tracing::Span,
}

impl TeamRun {
    fn new(graph: CompiledTeamGraph, state: TeamState, config: &RunConfig) -> Self {
        let limit = config.recursion_limit.unwrap_or(graph.recursion_limit);
        let run_id = config.run_id_or_new();
        let span = tracing::info_span!("team_graph", team = %graph.name, run_id = %run_id);
        span.in_scope(|| log_graph_start(&graph.name, limit));
        Self {
            graph,
            state,
            position: Position::Supervisor,
            steps: 0,
            limit,
            span,
        }
    }

    /// Runs one node. `Ok(None)` once terminated; after an error the run is finished.
    async fn step(&mut self) -> Result<Option<StepSnapshot>, AgentError> {
        if matches!(self.position, Position::Done) {
            return Ok(None);
        }
        match self.advance().await {
            Ok(snapshot) => {
                if matches!(self.position, Position::Done) {
                    self.span
                        .in_scope(|| log_graph_complete(&self.graph.name, self.steps));
                }
                Ok(Some(snapshot))
            }
            Err(e) => {
                self.position = Position::Done;
                self.span.in_scope(|| log_graph_error(&self.graph.name, &e));
                Err(e)
            }
        }
    }

    async fn advance(&mut self) -> Result<StepSnapshot, AgentError> {
        let node: Arc<dyn Node> = match &self.position {
            Position::Supervisor => self.graph.supervisor.clone() as Arc<dyn Node>,
            Position::Worker(id) => self.graph.workers.get(id.as_str()).cloned().ok_or_else(|| {
                AgentError::InvalidTransition {
                    from: super::SUPERVISOR.to_string(),
                    goto: format!("worker {}", id),
                }
            })?,
            Position::Done => {
                return Err(AgentError::ExecutionFailed("graph already terminated".into()))
            }
        };
        if self.steps >= self.limit {
            return Err(AgentError::StepLimitExceeded { limit: self.limit });
        }
        self.steps += 1;
        let node_id = node.id().to_string();

        self.span.in_scope(|| log_node_start(&node_id, self.steps));
        let command = node.run(&self.state).instrument(self.span.clone()).await?;
        self.span
            .in_scope(|| log_node_complete(&node_id, &command.goto));

        let next = match (&self.position, command.goto) {
            (Position::Supervisor, Goto::Worker(id)) => Position::Worker(id),
            (Position::Supervisor, Goto::End) => Position::Done,
            (Position::Worker(_), Goto::Supervisor) => Position::Supervisor,
            (_, goto) => {
                return Err(AgentError::InvalidTransition {
                    from: node_id,
                    goto: goto.to_string(),
                })
            }
        };

        self.state.apply(&command.update);
        self.span.in_scope(|| {
            log_state_update(
                &node_id,
                command.update.messages.len(),
                command.update.next.as_deref(),
            )
        });
        self.position = next;
        Ok(StepSnapshot {
            step: self.steps,
            node: node_id,
            update: command.update,
        })
    }
}
