//! Configuration for conclave.
//!
//! Two layers:
//!
//! * [`load_and_apply`] fills the process environment from a project `.env` and the
//!   `[env]` table of `~/.config/<app>/config.toml`, with priority
//!   **existing env > .env > XDG**.
//! * [`Settings`] reads the resolved environment into typed endpoint and driver settings,
//!   prompting for missing API keys.

mod dotenv;
mod settings;
mod xdg_toml;

use std::collections::HashMap;
use std::path::Path;

use thiserror::Error;

pub use settings::{
    EndpointSettings, Settings, SettingsError, DEFAULT_RECURSION_LIMIT, DEFAULT_STEP_DELAY_SECS,
    GOOGLE_API_KEY, MISTRAL_API_KEY,
};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("xdg config path: {0}")]
    XdgPath(String),
    #[error("read xdg config: {0}")]
    XdgRead(std::io::Error),
    #[error("parse xdg toml: {0}")]
    XdgParse(#[from] toml::de::Error),
    #[error("xdg [env] value for {key} must be a scalar, got {kind}")]
    XdgValue { key: String, kind: String },
    #[error("read .env: {0}")]
    DotenvRead(std::io::Error),
}

/// Pairs to set: keys from `.env` or XDG that `is_set` reports absent, with the `.env`
/// value preferred. Sorted by key.
fn pending_vars(
    is_set: impl Fn(&str) -> bool,
    dotenv: &HashMap<String, String>,
    xdg: &HashMap<String, String>,
) -> Vec<(String, String)> {
    let mut merged: HashMap<&str, &str> = xdg
        .iter()
        .map(|(k, v)| (k.as_str(), v.as_str()))
        .collect();
    merged.extend(dotenv.iter().map(|(k, v)| (k.as_str(), v.as_str())));

    let mut out: Vec<(String, String)> = merged
        .into_iter()
        .filter(|(k, _)| !is_set(k))
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    out.sort();
    out
}

/// Loads `.env` (from `override_dir`, else the current directory) and
/// `$XDG_CONFIG_HOME/<app_name>/config.toml`, then sets every variable not already present
/// in the process environment. Returns the names that were set.
pub fn load_and_apply(
    app_name: &str,
    override_dir: Option<&Path>,
) -> Result<Vec<String>, LoadError> {
    let xdg = xdg_toml::load_env_map(app_name)?;
    let dotenv = dotenv::load_env_map(override_dir).map_err(LoadError::DotenvRead)?;

    let pending = pending_vars(|k| std::env::var_os(k).is_some(), &dotenv, &xdg);
    let mut applied = Vec::with_capacity(pending.len());
    for (key, value) in pending {
        std::env::set_var(&key, value);
        applied.push(key);
    }
    Ok(applied)
}
