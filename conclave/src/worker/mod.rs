//! Worker nodes: role workers and the team-as-worker adapter.
//!
//! A worker performs one role-specific action and hands control back to its supervisor.
//! Failures of the action are retried per [`RetryPolicy`], then reported in-band as a
//! message so the supervisor can reroute or finish.

mod llm_worker;
mod prompt;
mod team_worker;

pub use llm_worker::LlmWorker;
pub use prompt::{
    role_prompt, CHART_GENERATOR_PROMPT, DOC_WRITER_PROMPT, NOTE_TAKER_PROMPT, SEARCH_PROMPT,
    WEB_SCRAPER_PROMPT,
};
pub use team_worker::TeamWorker;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::graph::{Command, Node, RetryPolicy};
use crate::message::{Message, MessageContent, Role};
use crate::state::TeamState;

/// Role-specific action (search, scraping, drafting, ...).
#[async_trait]
pub trait Worker: Send + Sync {
    /// Role name; also the worker's roster entry and message attribution.
    fn name(&self) -> &str;

    async fn act(&self, state: &TeamState) -> Result<MessageContent, AgentError>;
}

/// Graph node around a [`Worker`].
///
/// Output is recorded as a User message named with the role. When the action keeps
/// failing, the message reads `"<name> failed: <error>"` instead; fatal routing errors
/// are propagated.
pub struct WorkerNode {
    worker: Arc<dyn Worker>,
    retry: RetryPolicy,
}

impl WorkerNode {
    pub fn new(worker: Arc<dyn Worker>) -> Self {
        Self {
            worker,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[async_trait]
impl Node for WorkerNode {
    fn id(&self) -> &str {
        self.worker.name()
    }

    async fn run(&self, state: &TeamState) -> Result<Command, AgentError> {
        let name = self.worker.name();
        match self.retry.run(name, || self.worker.act(state)).await {
            Ok(content) => Ok(Command::to_supervisor(
                Message::new(Role::User, content).with_name(name),
            )),
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => Ok(Command::to_supervisor(failure_report(name, &e))),
        }
    }
}

/// In-band report for a worker whose action failed for good.
fn failure_report(name: &str, error: &AgentError) -> Message {
    let failure = AgentError::WorkerFailed {
        worker: name.to_string(),
        message: error.to_string(),
    };
    tracing::warn!(worker = name, error = %error, "Worker failed, reporting to supervisor");
    Message::new(Role::User, failure.to_string()).with_name(name)
}
