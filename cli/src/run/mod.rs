//! Run orchestration: builds the team hierarchy and drives one request, printing each step.

mod display;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use conclave::{
    build_hierarchy, AgentError, ChatOpenAI, CompilationError, Driver, DriverConfig, FinalAnswer,
    HierarchyOptions, LlmClient,
};
use config::Settings;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunError {
    #[error("build teams: {0}")]
    Compile(#[from] CompilationError),
    #[error(transparent)]
    Agent(#[from] AgentError),
    #[error("write output: {0}")]
    Io(#[from] std::io::Error),
}

/// Options for one CLI session.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub step_delay: Duration,
    pub recursion_limit: usize,
    /// NDJSON events on stdout instead of a human trace on stderr.
    pub output_json: bool,
    /// Max chars per human trace line; 0 means no truncation.
    pub display_max_len: usize,
}

impl RunOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            step_delay: settings.step_delay,
            recursion_limit: settings.recursion_limit,
            output_json: false,
            display_max_len: 0,
        }
    }
}

/// Supervisor and worker clients for the configured endpoints.
pub fn openai_clients(settings: &Settings) -> (Arc<dyn LlmClient>, Arc<dyn LlmClient>) {
    let endpoint = |e: &config::EndpointSettings| -> Arc<dyn LlmClient> {
        Arc::new(ChatOpenAI::for_endpoint(&e.base_url, &e.api_key, &e.model).with_temperature(0.0))
    };
    (endpoint(&settings.supervisor), endpoint(&settings.worker))
}

/// Builds the research/writing hierarchy and wraps it in a [`Driver`].
pub fn build_driver(
    supervisor: Arc<dyn LlmClient>,
    worker: Arc<dyn LlmClient>,
    opts: &RunOptions,
) -> Result<Driver, RunError> {
    let hierarchy = HierarchyOptions {
        recursion_limit: opts.recursion_limit,
        ..HierarchyOptions::default()
    };
    let root = build_hierarchy(supervisor, worker, &hierarchy)?;
    let config = DriverConfig::default()
        .with_step_delay(opts.step_delay)
        .with_recursion_limit(opts.recursion_limit);
    Ok(Driver::new(root, config))
}

/// Runs one request. Steps go to `err` as trace lines, or to `out` as NDJSON with
/// `output_json`; the final answer is always the last line written to `out`.
pub async fn run_turn<W, E>(
    driver: &Driver,
    message: &str,
    opts: &RunOptions,
    out: &mut W,
    err: &mut E,
) -> Result<FinalAnswer, RunError>
where
    W: Write,
    E: Write,
{
    let mut write_failure: Option<std::io::Error> = None;
    let outcome = driver
        .run(message, |snapshot, _trace| {
            if write_failure.is_some() {
                return;
            }
            let written = if opts.output_json {
                writeln!(out, "{}", display::step_event(snapshot)).and_then(|_| out.flush())
            } else {
                writeln!(err, "{}", display::format_step(snapshot, opts.display_max_len))
            };
            if let Err(e) = written {
                write_failure = Some(e);
            }
        })
        .await?;
    if let Some(e) = write_failure {
        return Err(e.into());
    }

    if opts.output_json {
        writeln!(out, "{}", display::answer_event(&outcome.answer))?;
    } else {
        writeln!(out, "{}", outcome.answer.text())?;
    }
    out.flush()?;
    tracing::info!(answered = outcome.answer.is_answer(), "Request finished");
    Ok(outcome.answer)
}
