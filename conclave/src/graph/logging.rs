//! Logging utilities for team graph execution.
//!
//! Structured `tracing` events for graph runs, node cycles and routing decisions.

use crate::error::AgentError;

use super::Goto;

/// Log node execution start.
pub fn log_node_start(node_id: &str, step: usize) {
    tracing::debug!(node_id = node_id, step, "Starting node execution");
}

/// Log node execution completion with the transition it requested.
pub fn log_node_complete(node_id: &str, goto: &Goto) {
    tracing::debug!(node_id = node_id, goto = %goto, "Node execution complete");
}

/// Log the state update applied after a node ran.
pub fn log_state_update(node_id: &str, appended: usize, next: Option<&str>) {
    tracing::debug!(node_id = node_id, appended, next = ?next, "State updated");
}

/// Log graph execution start.
pub fn log_graph_start(team: &str, limit: usize) {
    tracing::info!(team = team, recursion_limit = limit, "Starting graph execution");
}

/// Log graph execution completion.
pub fn log_graph_complete(team: &str, steps: usize) {
    tracing::info!(team = team, steps, "Graph execution complete");
}

/// Log graph execution error.
pub fn log_graph_error(team: &str, error: &AgentError) {
    tracing::error!(team = team, ?error, "Graph execution error");
}
