//! Routing command: the (next target, state update) pair every node returns.
//!
//! The supervisor returns `Goto::Worker` or `Goto::End`; workers always return
//! `Goto::Supervisor`. The runner rejects every other combination.

use std::fmt;

use crate::message::Message;
use crate::state::StateUpdate;

use super::roster::{Route, WorkerId, FINISH};

/// Where control goes after the current node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Goto {
    /// Hand control back to the team's supervisor.
    Supervisor,
    /// Run the given roster member next.
    Worker(WorkerId),
    /// Terminate the team graph.
    End,
}

impl From<Route> for Goto {
    fn from(route: Route) -> Self {
        match route {
            Route::Worker(id) => Goto::Worker(id),
            Route::Terminate => Goto::End,
        }
    }
}

impl fmt::Display for Goto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Goto::Supervisor => f.write_str("supervisor"),
            Goto::Worker(id) => write!(f, "worker {}", id),
            Goto::End => f.write_str("end"),
        }
    }
}

/// Result of one node run: next target plus messages (and decision) to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub goto: Goto,
    pub update: StateUpdate,
}

impl Command {
    /// Supervisor command: records the decision in `next` and appends `messages`.
    pub fn route(route: Route, messages: Vec<Message>) -> Self {
        let next = match &route {
            Route::Worker(id) => id.to_string(),
            Route::Terminate => FINISH.to_string(),
        };
        Self {
            goto: route.into(),
            update: StateUpdate {
                messages,
                next: Some(next),
            },
        }
    }

    /// Worker command: appends one message and returns to the supervisor.
    pub fn to_supervisor(message: Message) -> Self {
        Self {
            goto: Goto::Supervisor,
            update: StateUpdate::message(message),
        }
    }
}
