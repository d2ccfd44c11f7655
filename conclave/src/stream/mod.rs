//! Streaming types for team graph runs.
//!
//! `CompiledTeamGraph::stream` yields one [`StepSnapshot`] per executed node: which node
//! just ran and the state update it produced. The stream is lazy (a node only runs when
//! the consumer polls), finite, and cannot be restarted.
//!
//! ```rust,ignore
//! use futures::StreamExt;
//!
//! let mut steps = graph.stream(TeamState::from_user("hi"), RunConfig::default());
//! while let Some(step) = steps.next().await {
//!     println!("{}", step?);
//! }
//! ```

use std::fmt;
use std::pin::Pin;

use futures::Stream;
use serde_json::{Map, Value};

use crate::error::AgentError;
use crate::state::StateUpdate;

/// Stream returned by `CompiledTeamGraph::stream`.
pub type GraphStream = Pin<Box<dyn Stream<Item = Result<StepSnapshot, AgentError>> + Send>>;

/// Incremental snapshot of one cycle: the node that ran and its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepSnapshot {
    /// 1-based cycle number within the invocation.
    pub step: usize,
    /// Node id: `supervisor`, a worker role, or a team name.
    pub node: String,
    /// Update the node produced (already applied to the running state).
    pub update: StateUpdate,
}

impl StepSnapshot {
    /// `{"<node>": {<update>}}`, the shape the chat trace shows.
    pub fn to_value(&self) -> Value {
        let update = serde_json::to_value(&self.update).unwrap_or(Value::Null);
        let mut map = Map::new();
        map.insert(self.node.clone(), update);
        Value::Object(map)
    }

    /// Single-line JSON rendering of [`to_value`](Self::to_value).
    pub fn to_trace_line(&self) -> String {
        self.to_value().to_string()
    }

    /// Last message of the update, if the node produced any.
    pub fn last_message(&self) -> Option<&crate::message::Message> {
        self.update.messages.last()
    }
}

impl fmt::Display for StepSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_trace_line())
    }
}
