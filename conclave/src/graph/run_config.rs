//! Invoke config: recursion limit and run id.
//!
//! Passed to `CompiledTeamGraph::invoke` and `CompiledTeamGraph::stream`.

/// Default cap on cycles (node executions) per team graph invocation.
pub const DEFAULT_RECURSION_LIMIT: usize = 150;

/// Config for a single invocation.
#[derive(Debug, Clone, Default)]
pub struct RunConfig {
    /// Cycle cap; when `None` the graph's own limit applies.
    pub recursion_limit: Option<usize>,
    /// Id used in log spans; a fresh one is generated when unset.
    pub run_id: Option<String>,
}

impl RunConfig {
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = Some(run_id.into());
        self
    }

    pub(crate) fn run_id_or_new(&self) -> String {
        self.run_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}
