//! Roster: the fixed, ordered set of worker names a supervisor may route to.
//!
//! The reasoning component returns an open string; [`Roster::resolve`] turns it into a
//! closed [`Route`] or rejects it as a routing contract violation. A [`WorkerId`] can only
//! be obtained from a roster, so every `Route::Worker` names a real member.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::error::AgentError;

/// Decision token meaning "terminate this team graph".
pub const FINISH: &str = "FINISH";

/// Node id of the supervisor inside every team graph.
pub const SUPERVISOR: &str = "supervisor";

/// Error when constructing a roster.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RosterError {
    #[error("roster must contain at least one worker")]
    Empty,

    #[error("roster contains an empty worker name")]
    EmptyName,

    #[error("duplicate worker in roster: {0}")]
    Duplicate(String),

    /// `supervisor` and `FINISH` cannot be worker names.
    #[error("reserved name used as worker: {0}")]
    Reserved(String),
}

/// Name of a roster member. Only produced by [`Roster`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkerId(Arc<str>);

impl WorkerId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Validated supervisor decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Worker(WorkerId),
    Terminate,
}

impl Route {
    /// Token recorded in `TeamState::next`: the worker name, or `FINISH`.
    pub fn as_str(&self) -> &str {
        match self {
            Route::Worker(id) => id.as_str(),
            Route::Terminate => FINISH,
        }
    }
}

/// Fixed, ordered set of worker names known to one supervisor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    members: Vec<WorkerId>,
}

impl Roster {
    /// Builds a roster; names must be non-empty, unique and not reserved.
    pub fn new<I, N>(names: I) -> Result<Self, RosterError>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let mut members: Vec<WorkerId> = Vec::new();
        for name in names {
            let name: String = name.into();
            if name.trim().is_empty() {
                return Err(RosterError::EmptyName);
            }
            if name == SUPERVISOR || name.eq_ignore_ascii_case(FINISH) {
                return Err(RosterError::Reserved(name));
            }
            if members.iter().any(|m| m.as_str() == name) {
                return Err(RosterError::Duplicate(name));
            }
            members.push(WorkerId(Arc::from(name)));
        }
        if members.is_empty() {
            return Err(RosterError::Empty);
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.as_str() == name)
    }

    /// Member ids in roster order.
    pub fn members(&self) -> &[WorkerId] {
        &self.members
    }

    /// Member names in roster order.
    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.to_string()).collect()
    }

    /// Legal decision tokens: `FINISH` followed by the members.
    pub fn options(&self) -> Vec<String> {
        std::iter::once(FINISH.to_string())
            .chain(self.members.iter().map(|m| m.to_string()))
            .collect()
    }

    /// Id for a member name, if it belongs to this roster.
    pub fn worker_id(&self, name: &str) -> Option<WorkerId> {
        self.members.iter().find(|m| m.as_str() == name).cloned()
    }

    /// Resolves a raw decision into a [`Route`].
    ///
    /// Surrounding whitespace and quotes are ignored. `FINISH` matches case-insensitively;
    /// a member must match exactly. Any other value is a
    /// [`AgentError::RoutingContractViolation`]; it is never coerced.
    pub fn resolve(&self, raw: &str) -> Result<Route, AgentError> {
        let name = raw
            .trim()
            .trim_matches(|c: char| c == '"' || c == '\'' || c == '`')
            .trim();
        if name.eq_ignore_ascii_case(FINISH) {
            return Ok(Route::Terminate);
        }
        self.worker_id(name)
            .map(Route::Worker)
            .ok_or_else(|| AgentError::RoutingContractViolation {
                name: name.to_string(),
                roster: self.names(),
            })
    }
}
