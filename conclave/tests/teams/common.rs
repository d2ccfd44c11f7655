//! Shared helpers for team graph integration tests: scripted routers and workers.
//!
//! Used by invoke, stream, routing_errors, team_worker, driver and hierarchy modules.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use conclave::{
    AgentError, CompiledTeamGraph, Decision, MessageContent, Roster, Router, SupervisorNode,
    TeamGraph, TeamState, Worker, WorkerNode,
};

/// Router that returns scripted decisions in order, then `FINISH`.
/// Records every state it was asked to decide on.
pub struct ScriptedRouter {
    script: Mutex<VecDeque<String>>,
    seen: Mutex<Vec<TeamState>>,
}

impl ScriptedRouter {
    pub fn new(decisions: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(decisions.iter().map(|s| s.to_string()).collect()),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<TeamState> {
        self.seen.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl Router for ScriptedRouter {
    async fn decide(&self, state: &TeamState, _roster: &Roster) -> Result<Decision, AgentError> {
        self.seen.lock().unwrap().push(state.clone());
        let next = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| "FINISH".to_string());
        Ok(Decision::new(next))
    }
}

/// Router that always names the same worker; never terminates.
pub struct LoopRouter(pub &'static str);

#[async_trait]
impl Router for LoopRouter {
    async fn decide(&self, _: &TeamState, _: &Roster) -> Result<Decision, AgentError> {
        Ok(Decision::new(self.0))
    }
}

/// Worker replying with fixed content; records the states it acted on.
pub struct FixedWorker {
    name: String,
    reply: MessageContent,
    seen: Mutex<Vec<TeamState>>,
}

impl FixedWorker {
    pub fn new(name: &str, reply: impl Into<MessageContent>) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            reply: reply.into(),
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<TeamState> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Worker for FixedWorker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn act(&self, state: &TeamState) -> Result<MessageContent, AgentError> {
        self.seen.lock().unwrap().push(state.clone());
        Ok(self.reply.clone())
    }
}

/// Worker whose external call always fails.
pub struct FailingWorker {
    pub name: &'static str,
    pub message: &'static str,
}

#[async_trait]
impl Worker for FailingWorker {
    fn name(&self) -> &str {
        self.name
    }

    async fn act(&self, _: &TeamState) -> Result<MessageContent, AgentError> {
        Err(AgentError::ExecutionFailed(self.message.to_string()))
    }
}

/// Builder for a team whose workers are wrapped in `WorkerNode`.
pub fn team(
    name: &str,
    roster: &[&str],
    router: Arc<dyn Router>,
    workers: Vec<Arc<dyn Worker>>,
) -> TeamGraph {
    let roster = Roster::new(roster.iter().copied()).expect("valid roster");
    workers.into_iter().fold(
        TeamGraph::new(name, SupervisorNode::new(roster, router)),
        |graph, worker| graph.add_worker(Arc::new(WorkerNode::new(worker))),
    )
}

/// Compiled team; panics on compile errors.
pub fn compiled(
    name: &str,
    roster: &[&str],
    router: Arc<dyn Router>,
    workers: Vec<Arc<dyn Worker>>,
) -> CompiledTeamGraph {
    team(name, roster, router, workers)
        .compile()
        .expect("team compiles")
}

/// Research team (`search`, `web_scraper`) with fixed replies.
pub fn research_team(router: Arc<dyn Router>, search: &str, scraper: &str) -> CompiledTeamGraph {
    compiled(
        "research_team",
        &["search", "web_scraper"],
        router,
        vec![
            FixedWorker::new("search", search),
            FixedWorker::new("web_scraper", scraper),
        ],
    )
}
