//! Hidden credential prompt for API keys missing from the environment.

use std::io::{BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// Asks for `key` on stderr. Input is not echoed when stdin is a terminal; otherwise one line
/// is read from stdin.
pub fn ask_secret(key: &str) -> std::io::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Please provide your {key}: ")?;
    stderr.flush()?;

    let value = if std::io::stdin().is_terminal() {
        read_hidden()
    } else {
        read_line(&mut std::io::stdin().lock())
    };
    writeln!(stderr)?;
    value
}

fn read_line<R: BufRead>(reader: &mut R) -> std::io::Result<String> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "stdin closed before a value was entered",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn read_hidden() -> std::io::Result<String> {
    terminal::enable_raw_mode()?;
    let result = collect_keys(|| loop {
        if let Event::Key(key) = event::read()? {
            return Ok(key);
        }
    });
    terminal::disable_raw_mode()?;
    result
}

/// Accumulates typed characters until Enter. Ctrl+C aborts.
fn collect_keys<F>(mut next_key: F) -> std::io::Result<String>
where
    F: FnMut() -> std::io::Result<KeyEvent>,
{
    let mut value = String::new();
    loop {
        let key = next_key()?;
        if key.kind == KeyEventKind::Release {
            continue;
        }
        match key.code {
            KeyCode::Enter => return Ok(value),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Interrupted,
                    "prompt cancelled",
                ))
            }
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            _ => {}
        }
    }
}
