//! Team graph: a supervisor routing loop over a roster of worker nodes.
//!
//! `TeamGraph`: register the supervisor and one worker per roster member, compile,
//! then invoke or stream with a `TeamState`.

mod command;
mod compile_error;
mod compiled;
mod logging;
mod node;
mod retry;
mod roster;
mod run_config;
mod team_graph;

pub use command::{Command, Goto};
pub use compile_error::CompilationError;
pub use compiled::CompiledTeamGraph;
pub use logging::{
    log_graph_complete, log_graph_error, log_graph_start, log_node_complete, log_node_start,
    log_state_update,
};
pub use node::Node;
pub use retry::{Backoff, RetryPolicy};
pub use roster::{Roster, RosterError, Route, WorkerId, FINISH, SUPERVISOR};
pub use run_config::{RunConfig, DEFAULT_RECURSION_LIMIT};
pub use team_graph::TeamGraph;
