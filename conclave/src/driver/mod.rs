//! Top-level driver: feeds a user request into the root team and collects the answer.
//!
//! The root graph is consumed as a stream. Each snapshot is appended to a textual trace,
//! reported to the caller, and followed by a fixed delay that paces calls to the
//! rate-limited model service. The final answer is the content of the last snapshot from
//! a designated team.

use std::time::Duration;

use futures::StreamExt;

use crate::error::AgentError;
use crate::graph::{CompiledTeamGraph, RunConfig, DEFAULT_RECURSION_LIMIT};
use crate::state::TeamState;
use crate::stream::StepSnapshot;

/// Answer text shown when no designated team reported.
pub const NO_ANSWER: &str = "No final answer generated.";

/// Default pause after each snapshot.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_secs(12);

/// Driver settings.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    pub step_delay: Duration,
    pub recursion_limit: usize,
    /// Nodes whose output is captured as the final answer; the last capture wins.
    ///
    /// Defaults to both teams, not only `research_team`, so a run that ends on a
    /// writing-team report still has an answer.
    pub answer_from: Vec<String>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
            answer_from: vec!["research_team".to_string(), "writing_team".to_string()],
        }
    }
}

impl DriverConfig {
    pub fn with_step_delay(mut self, delay: Duration) -> Self {
        self.step_delay = delay;
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    pub fn with_answer_from<I, S>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.answer_from = nodes.into_iter().map(Into::into).collect();
        self
    }
}

/// Final answer of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalAnswer {
    Answer(String),
    NoAnswer,
}

impl FinalAnswer {
    /// Text to show the user; the sentinel for `NoAnswer`.
    pub fn text(&self) -> &str {
        match self {
            FinalAnswer::Answer(s) => s,
            FinalAnswer::NoAnswer => NO_ANSWER,
        }
    }

    pub fn is_answer(&self) -> bool {
        matches!(self, FinalAnswer::Answer(_))
    }
}

/// Completed run: full trace plus answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub trace: String,
    pub answer: FinalAnswer,
}

/// Runs requests against the root team graph.
pub struct Driver {
    graph: CompiledTeamGraph,
    config: DriverConfig,
}

impl Driver {
    pub fn new(graph: CompiledTeamGraph, config: DriverConfig) -> Self {
        Self { graph, config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Runs one request to completion.
    ///
    /// `on_step` is called after each snapshot with the snapshot and the trace so far.
    /// Fatal routing errors abort the run with no answer.
    pub async fn run<F>(&self, request: &str, mut on_step: F) -> Result<RunOutcome, AgentError>
    where
        F: FnMut(&StepSnapshot, &str),
    {
        let config = RunConfig::default().with_recursion_limit(self.config.recursion_limit);
        let mut steps = self.graph.stream(TeamState::from_user(request), config);
        let mut trace = String::new();
        let mut captured: Option<String> = None;

        while let Some(item) = steps.next().await {
            let snapshot = item?;
            trace.push_str(&snapshot.to_trace_line());
            trace.push_str("\n\n");
            on_step(&snapshot, &trace);

            if !self.config.step_delay.is_zero() {
                tokio::time::sleep(self.config.step_delay).await;
            }

            if self.config.answer_from.iter().any(|n| n == &snapshot.node) {
                if let Some(msg) = snapshot.last_message() {
                    tracing::debug!(node = %snapshot.node, "Captured candidate answer");
                    captured = Some(msg.content.to_text());
                }
            }
        }

        let answer = match captured {
            Some(text) if !text.is_empty() => FinalAnswer::Answer(text),
            _ => FinalAnswer::NoAnswer,
        };
        Ok(RunOutcome { trace, answer })
    }
}
