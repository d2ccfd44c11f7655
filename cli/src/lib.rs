//! Library side of the `conclave` binary: hierarchy construction, per-request driving and
//! output formatting. `main.rs` handles arguments, logging, credentials and the REPL.

mod run;

pub use run::{build_driver, openai_clients, run_turn, RunError, RunOptions};
