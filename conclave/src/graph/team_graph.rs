//! Team graph builder.
//!
//! One supervisor plus one worker node per roster member. Edges are implicit: the
//! supervisor routes to any worker or to END, every worker returns to the supervisor.

use std::collections::HashMap;
use std::sync::Arc;

use crate::supervisor::SupervisorNode;

use super::compile_error::CompilationError;
use super::compiled::CompiledTeamGraph;
use super::node::Node;
use super::run_config::DEFAULT_RECURSION_LIMIT;

/// Builder for a team graph.
///
/// # Example
///
/// ```rust,ignore
/// let graph = TeamGraph::new("research_team", supervisor)
///     .add_worker(search)
///     .add_worker(web_scraper)
///     .compile()?;
/// ```
pub struct TeamGraph {
    name: String,
    supervisor: SupervisorNode,
    workers: Vec<Arc<dyn Node>>,
    recursion_limit: usize,
}

impl TeamGraph {
    pub fn new(name: impl Into<String>, supervisor: SupervisorNode) -> Self {
        Self {
            name: name.into(),
            supervisor,
            workers: Vec::new(),
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Registers a worker node; its `id()` must be a roster member.
    pub fn add_worker(mut self, worker: Arc<dyn Node>) -> Self {
        self.workers.push(worker);
        self
    }

    /// Default cycle cap for invocations that do not set one in `RunConfig`.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// Validates that workers match the roster one-to-one and builds the runnable graph.
    pub fn compile(self) -> Result<CompiledTeamGraph, CompilationError> {
        if self.recursion_limit == 0 {
            return Err(CompilationError::InvalidRecursionLimit);
        }
        let roster = self.supervisor.roster();
        let mut workers: HashMap<String, Arc<dyn Node>> = HashMap::new();
        for worker in self.workers {
            let id = worker.id().to_string();
            if !roster.contains(&id) {
                return Err(CompilationError::UnknownWorker(id));
            }
            if workers.contains_key(&id) {
                return Err(CompilationError::DuplicateWorker(id));
            }
            workers.insert(id, worker);
        }
        if let Some(missing) = roster.members().iter().find(|m| !workers.contains_key(m.as_str())) {
            return Err(CompilationError::MissingWorker(missing.to_string()));
        }
        Ok(CompiledTeamGraph::new(
            self.name,
            Arc::new(self.supervisor),
            workers,
            self.recursion_limit,
        ))
    }
}
