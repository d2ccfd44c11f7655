//! `conclave` binary: send a request to the research/writing team hierarchy.
//!
//! Each step of the root team is printed as it happens, then the final answer.

mod logging;
mod prompt;
mod repl;

use std::time::Duration;

use clap::Parser;
use cli::{build_driver, openai_clients, run_turn, RunOptions};
use config::Settings;

/// Default max chars per human trace line on stderr.
const DEFAULT_MAX_TRACE_LEN: usize = 0;

#[derive(Parser, Debug)]
#[command(name = "conclave")]
#[command(about = "Conclave: hierarchical research/writing agent teams")]
struct Args {
    /// User request; positional words are joined with spaces
    #[arg(trailing_var_arg = true, value_name = "MESSAGE")]
    message: Vec<String>,

    /// Interactive REPL: read one request per line after the initial one
    #[arg(short, long)]
    interactive: bool,

    /// Emit steps and the answer as JSON lines on stdout
    #[arg(long)]
    json: bool,

    /// Also log to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Pause after each step, in seconds (overrides CONCLAVE_STEP_DELAY_SECS)
    #[arg(long, value_name = "SECS")]
    step_delay: Option<u64>,

    /// Maximum node executions per team run (overrides CONCLAVE_RECURSION_LIMIT)
    #[arg(long, value_name = "N")]
    recursion_limit: Option<usize>,

    /// Max chars per trace line on stderr; 0 for no truncation
    #[arg(long, value_name = "N", env = "CONCLAVE_MAX_TRACE_LEN", default_value_t = DEFAULT_MAX_TRACE_LEN)]
    max_trace_len: usize,
}

impl Args {
    fn request(&self) -> Option<String> {
        let joined = self.message.join(" ");
        (!joined.trim().is_empty()).then_some(joined)
    }

    fn run_options(&self, settings: &Settings) -> Result<RunOptions, String> {
        let mut opts = RunOptions::from_settings(settings);
        if let Some(secs) = self.step_delay {
            opts.step_delay = Duration::from_secs(secs);
        }
        if let Some(limit) = self.recursion_limit {
            if limit == 0 {
                return Err("--recursion-limit must be at least 1".to_string());
            }
            opts.recursion_limit = limit;
        }
        opts.output_json = self.json;
        opts.display_max_len = self.max_trace_len;
        Ok(opts)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let applied = config::load_and_apply("conclave", None);
    let args = Args::parse();
    logging::init(args.verbose)?;
    match applied {
        Ok(keys) => tracing::debug!(count = keys.len(), "Applied config variables"),
        Err(e) => tracing::warn!(error = %e, "Config files not applied"),
    }

    let request = args.request();
    if !args.interactive && request.is_none() {
        eprintln!("conclave: provide a request as positional arguments, or use -i");
        std::process::exit(2);
    }

    let settings = match Settings::from_env(prompt::ask_secret) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("conclave: {}", e);
            std::process::exit(1);
        }
    };
    tracing::debug!(?settings, "Loaded settings");

    let opts = match args.run_options(&settings) {
        Ok(o) => o,
        Err(e) => {
            eprintln!("conclave: {}", e);
            std::process::exit(2);
        }
    };
    let (supervisor, worker) = openai_clients(&settings);
    let driver = build_driver(supervisor, worker, &opts)?;

    if let Some(request) = request {
        let (mut out, mut err) = (std::io::stdout(), std::io::stderr());
        if let Err(e) = run_turn(&driver, &request, &opts, &mut out, &mut err).await {
            eprintln!("error: {}", e);
            if !args.interactive {
                std::process::exit(1);
            }
        }
    }
    if args.interactive {
        repl::run_repl_loop(&driver, &opts).await?;
    }
    Ok(())
}
