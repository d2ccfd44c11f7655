//! # Conclave
//!
//! Hierarchical multi-agent orchestration in Rust. A **supervisor** reads a shared
//! conversation and names the next **worker** (or `FINISH`); the worker acts, appends one
//! message, and hands control back. A whole team can act as a single worker of an
//! enclosing team, which gives a hierarchy of supervisors.
//!
//! ## Design principles
//!
//! - **Closed routing**: a supervisor's decision is validated against its [`Roster`]; a name
//!   outside it is a fatal [`AgentError::RoutingContractViolation`], never coerced.
//! - **Explicit routing commands**: every node returns a [`Command`] (next target plus
//!   [`StateUpdate`]); the runner enforces supervisor → worker → supervisor.
//! - **Append-only state**: [`TeamState`] messages are only ever appended.
//! - **Lazy streaming**: [`CompiledTeamGraph::stream`] runs one node per poll, so the consumer
//!   paces the model calls.
//!
//! ## Main modules
//!
//! - [`graph`]: [`TeamGraph`], [`CompiledTeamGraph`], [`Node`], [`Command`], [`Roster`],
//!   [`RunConfig`], [`RetryPolicy`].
//! - [`supervisor`]: [`SupervisorNode`], [`Router`], [`LlmRouter`].
//! - [`worker`]: [`Worker`], [`WorkerNode`], [`LlmWorker`], [`TeamWorker`].
//! - [`driver`]: [`Driver`] — request in, trace and final answer out.
//! - [`hierarchy`]: the research/writing teams under one top-level supervisor.
//! - [`llm`]: [`LlmClient`] trait, [`MockLlm`], [`ChatOpenAI`].
//! - [`message`], [`state`], [`stream`]: data types.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use conclave::{build_hierarchy, Driver, DriverConfig, HierarchyOptions, LlmClient, MockLlm};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let llm: Arc<dyn LlmClient> = Arc::new(MockLlm::with_reply("FINISH"));
//! let root = build_hierarchy(llm.clone(), llm, &HierarchyOptions::default())?;
//! let driver = Driver::new(root, DriverConfig::default().with_step_delay(Duration::ZERO));
//! let outcome = driver.run("hello", |_, _| {}).await?;
//! println!("{}", outcome.answer.text());
//! # Ok(())
//! # }
//! ```

pub mod driver;
pub mod error;
pub mod graph;
pub mod hierarchy;
pub mod llm;
pub mod message;
pub mod state;
pub mod stream;
pub mod supervisor;
pub mod worker;

pub use driver::{Driver, DriverConfig, FinalAnswer, RunOutcome, DEFAULT_STEP_DELAY, NO_ANSWER};
pub use error::AgentError;
pub use graph::{
    Backoff, Command, CompilationError, CompiledTeamGraph, Goto, Node, RetryPolicy, Roster,
    RosterError, Route, RunConfig, TeamGraph, WorkerId, DEFAULT_RECURSION_LIMIT, FINISH,
    SUPERVISOR,
};
pub use hierarchy::{
    build_hierarchy, build_hierarchy_with_workers, HierarchyOptions, TeamRouters, RESEARCH_ROLES,
    RESEARCH_TEAM, ROOT_TEAM, WRITING_ROLES, WRITING_TEAM,
};
pub use llm::{ChatOpenAI, LlmClient, LlmResponse, LlmUsage, MockLlm};
pub use message::{ContentBlock, Message, MessageContent, Role};
pub use state::{StateUpdate, TeamState};
pub use stream::{GraphStream, StepSnapshot};
pub use supervisor::{Decision, LlmRouter, Router, SupervisorNode};
pub use worker::{LlmWorker, TeamWorker, Worker, WorkerNode};
