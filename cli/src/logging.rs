//! Logging initialization. Stdout is reserved for the trace and the answer.
//!
//! - **RUST_LOG**: filter, e.g. `info`, `conclave=debug`. Default: `info`.
//! - **LOG_FILE**: when set, logs are appended there as plain text.
//! - `--verbose`: logs also go to stderr. Without it and without `LOG_FILE` they are dropped.

use std::io::Write;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,hyper_util=off"))
}

pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let file_layer = match std::env::var("LOG_FILE") {
        Ok(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::sync::Mutex::new(StripAnsi::new(file)))
                    .with_ansi(false)
                    .with_filter(filter()),
            )
        }
        Err(_) => None,
    };
    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(filter())
    });

    tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;
    if let Ok(path) = std::env::var("LOG_FILE") {
        tracing::info!(path = %path, "conclave logging to file");
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Escape {
    None,
    /// Saw ESC.
    Start,
    /// Inside `ESC [ ...` until a final byte.
    Csi,
}

/// Drops ANSI escape sequences (`ESC [ params final` and two-byte `ESC x`) from the stream.
struct StripAnsi<W> {
    inner: W,
    state: Escape,
}

impl<W: Write> StripAnsi<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            state: Escape::None,
        }
    }
}

impl<W: Write> Write for StripAnsi<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut plain = Vec::with_capacity(buf.len());
        for &b in buf {
            self.state = match (self.state, b) {
                (Escape::None, 0x1b) => Escape::Start,
                (Escape::None, _) => {
                    plain.push(b);
                    Escape::None
                }
                (Escape::Start, b'[') => Escape::Csi,
                (Escape::Start, _) => Escape::None,
                (Escape::Csi, 0x40..=0x7e) => Escape::None,
                (Escape::Csi, _) => Escape::Csi,
            };
        }
        self.inner.write_all(&plain)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.inner.flush()
    }
}
