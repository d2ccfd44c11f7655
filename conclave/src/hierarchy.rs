//! Research/writing hierarchy: two worker teams under a top-level supervisor.
//!
//! ```text
//! supervisor ─┬─ research_team ── supervisor ─┬─ search
//!             │                               └─ web_scraper
//!             └─ writing_team ─── supervisor ─┬─ doc_writer
//!                                             ├─ note_taker
//!                                             └─ chart_generator
//! ```

use std::sync::Arc;

use crate::graph::{
    CompilationError, CompiledTeamGraph, RetryPolicy, Roster, TeamGraph, DEFAULT_RECURSION_LIMIT,
};
use crate::llm::LlmClient;
use crate::supervisor::{LlmRouter, Router, SupervisorNode};
use crate::worker::{LlmWorker, TeamWorker, Worker, WorkerNode};

pub const RESEARCH_TEAM: &str = "research_team";
pub const WRITING_TEAM: &str = "writing_team";
pub const ROOT_TEAM: &str = "root";

pub const RESEARCH_ROLES: [&str; 2] = ["search", "web_scraper"];
pub const WRITING_ROLES: [&str; 3] = ["doc_writer", "note_taker", "chart_generator"];

/// Routers for the three supervisors.
#[derive(Clone)]
pub struct TeamRouters {
    pub root: Arc<dyn Router>,
    pub research: Arc<dyn Router>,
    pub writing: Arc<dyn Router>,
}

impl TeamRouters {
    /// Same router for every supervisor.
    pub fn shared(router: Arc<dyn Router>) -> Self {
        Self {
            root: router.clone(),
            research: router.clone(),
            writing: router,
        }
    }
}

/// Build options shared by all three teams.
#[derive(Debug, Clone)]
pub struct HierarchyOptions {
    /// Cycle cap of each team graph.
    pub recursion_limit: usize,
    /// Retry policy of every role worker.
    pub worker_retry: RetryPolicy,
}

impl Default for HierarchyOptions {
    fn default() -> Self {
        Self {
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            worker_retry: RetryPolicy::none(),
        }
    }
}

/// Builds the hierarchy with LLM supervisors and LLM role workers.
pub fn build_hierarchy(
    supervisor_llm: Arc<dyn LlmClient>,
    worker_llm: Arc<dyn LlmClient>,
    options: &HierarchyOptions,
) -> Result<CompiledTeamGraph, CompilationError> {
    let routers = TeamRouters::shared(Arc::new(LlmRouter::new(supervisor_llm)));
    let mut workers: Vec<Arc<dyn Worker>> = Vec::new();
    for role in RESEARCH_ROLES.iter().chain(WRITING_ROLES.iter()) {
        let worker = LlmWorker::for_role(role, worker_llm.clone())
            .ok_or_else(|| CompilationError::UnknownWorker(role.to_string()))?;
        workers.push(Arc::new(worker));
    }
    build_hierarchy_with_workers(routers, workers, options)
}

/// Builds the hierarchy from custom routers and role workers.
///
/// Each worker joins the team whose roster lists its name; a name in neither roster is
/// `UnknownWorker`, a role without a worker is `MissingWorker`.
pub fn build_hierarchy_with_workers(
    routers: TeamRouters,
    workers: Vec<Arc<dyn Worker>>,
    options: &HierarchyOptions,
) -> Result<CompiledTeamGraph, CompilationError> {
    let mut research = team(RESEARCH_TEAM, &RESEARCH_ROLES, routers.research, options)?;
    let mut writing = team(WRITING_TEAM, &WRITING_ROLES, routers.writing, options)?;
    for worker in workers {
        let node =
            Arc::new(WorkerNode::new(worker.clone()).with_retry(options.worker_retry.clone()));
        let name = worker.name();
        if RESEARCH_ROLES.iter().any(|r| *r == name) {
            research = research.add_worker(node);
        } else if WRITING_ROLES.iter().any(|r| *r == name) {
            writing = writing.add_worker(node);
        } else {
            return Err(CompilationError::UnknownWorker(name.to_string()));
        }
    }
    let research = research.compile()?;
    let writing = writing.compile()?;

    team(ROOT_TEAM, &[RESEARCH_TEAM, WRITING_TEAM], routers.root, options)?
        .add_worker(Arc::new(TeamWorker::new(research)))
        .add_worker(Arc::new(TeamWorker::new(writing)))
        .compile()
}

fn team(
    name: &str,
    roles: &[&str],
    router: Arc<dyn Router>,
    options: &HierarchyOptions,
) -> Result<TeamGraph, CompilationError> {
    let roster = Roster::new(roles.iter().copied())?;
    Ok(TeamGraph::new(name, SupervisorNode::new(roster, router))
        .with_recursion_limit(options.recursion_limit))
}
