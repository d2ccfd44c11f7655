//! Typed settings read from the environment after [`crate::load_and_apply`].

use std::fmt;
use std::time::Duration;

use thiserror::Error;

/// Credential for the supervisor endpoint.
pub const MISTRAL_API_KEY: &str = "MISTRAL_API_KEY";
/// Credential for the worker endpoint.
pub const GOOGLE_API_KEY: &str = "GOOGLE_API_KEY";

pub const DEFAULT_STEP_DELAY_SECS: u64 = 12;
pub const DEFAULT_RECURSION_LIMIT: usize = 150;

const SUPERVISOR_BASE_URL: &str = "https://api.mistral.ai/v1";
const SUPERVISOR_MODEL: &str = "mistral-large-latest";
const WORKER_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const WORKER_MODEL: &str = "gemini-2.0-flash";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("{0} is not set")]
    Missing(String),
    #[error("invalid {key}={value:?}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
    #[error("prompt for {key}: {source}")]
    Prompt {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// One OpenAI-compatible chat endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct EndpointSettings {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl fmt::Debug for EndpointSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndpointSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

/// Everything the CLI needs to build and drive the demo hierarchy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    /// Mistral by default. Routes all three teams.
    pub supervisor: EndpointSettings,
    /// Gemini by default. Backs every role worker.
    pub worker: EndpointSettings,
    pub step_delay: Duration,
    pub recursion_limit: usize,
}

impl Settings {
    /// Reads the process environment. `prompt` is asked for each missing API key.
    pub fn from_env<P>(prompt: P) -> Result<Self, SettingsError>
    where
        P: FnMut(&str) -> std::io::Result<String>,
    {
        Self::from_lookup(|key| std::env::var(key).ok(), prompt)
    }

    /// Like [`Settings::from_env`] over an arbitrary variable source.
    ///
    /// Blank values count as unset. A prompted key that comes back blank is
    /// [`SettingsError::Missing`].
    pub fn from_lookup<L, P>(lookup: L, mut prompt: P) -> Result<Self, SettingsError>
    where
        L: Fn(&str) -> Option<String>,
        P: FnMut(&str) -> std::io::Result<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let supervisor = EndpointSettings {
            api_key: credential(MISTRAL_API_KEY, &get, &mut prompt)?,
            base_url: get("CONCLAVE_SUPERVISOR_BASE_URL")
                .unwrap_or_else(|| SUPERVISOR_BASE_URL.to_string()),
            model: get("CONCLAVE_SUPERVISOR_MODEL").unwrap_or_else(|| SUPERVISOR_MODEL.to_string()),
        };
        let worker = EndpointSettings {
            api_key: credential(GOOGLE_API_KEY, &get, &mut prompt)?,
            base_url: get("CONCLAVE_WORKER_BASE_URL").unwrap_or_else(|| WORKER_BASE_URL.to_string()),
            model: get("CONCLAVE_WORKER_MODEL").unwrap_or_else(|| WORKER_MODEL.to_string()),
        };

        let step_delay = match get("CONCLAVE_STEP_DELAY_SECS") {
            Some(v) => Duration::from_secs(parse_number::<u64>("CONCLAVE_STEP_DELAY_SECS", &v)?),
            None => Duration::from_secs(DEFAULT_STEP_DELAY_SECS),
        };
        let recursion_limit = match get("CONCLAVE_RECURSION_LIMIT") {
            Some(v) => match parse_number::<usize>("CONCLAVE_RECURSION_LIMIT", &v)? {
                0 => {
                    return Err(SettingsError::Invalid {
                        key: "CONCLAVE_RECURSION_LIMIT".into(),
                        value: v,
                        reason: "must be at least 1".into(),
                    })
                }
                n => n,
            },
            None => DEFAULT_RECURSION_LIMIT,
        };

        Ok(Self {
            supervisor,
            worker,
            step_delay,
            recursion_limit,
        })
    }
}

fn credential<G, P>(key: &str, get: &G, prompt: &mut P) -> Result<String, SettingsError>
where
    G: Fn(&str) -> Option<String>,
    P: FnMut(&str) -> std::io::Result<String>,
{
    if let Some(value) = get(key) {
        return Ok(value);
    }
    let entered = prompt(key).map_err(|source| SettingsError::Prompt {
        key: key.to_string(),
        source,
    })?;
    let entered = entered.trim();
    if entered.is_empty() {
        return Err(SettingsError::Missing(key.to_string()));
    }
    Ok(entered.to_string())
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, SettingsError>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|e: T::Err| SettingsError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
        reason: e.to_string(),
    })
}
