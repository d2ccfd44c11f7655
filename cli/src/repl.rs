//! Interactive REPL: one request per line until EOF or a quit command.
//!
//! Each line is an independent run of the hierarchy; state does not carry over.

use std::io::Write;

use tokio::io::{AsyncBufReadExt, BufReader};

use cli::{run_turn, RunOptions};
use conclave::Driver;

pub async fn run_repl_loop(
    driver: &Driver,
    opts: &RunOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = BufReader::new(tokio::io::stdin()).lines();

    loop {
        if !opts.output_json {
            eprint!("> ");
            std::io::stderr().flush()?;
        }

        let line = match reader.next_line().await? {
            None => break,
            Some(s) if s.trim().is_empty() => continue,
            Some(s) if is_quit_command(&s) => break,
            Some(s) => s,
        };

        let (mut out, mut err) = (std::io::stdout(), std::io::stderr());
        if let Err(e) = run_turn(driver, &line, opts, &mut out, &mut err).await {
            eprintln!("error: {}", e);
        }
    }

    if !opts.output_json {
        eprintln!("Bye.");
    }
    Ok(())
}

fn is_quit_command(s: &str) -> bool {
    let lower = s.trim().to_lowercase();
    matches!(lower.as_str(), "quit" | "exit" | "/quit")
}
