//! Reasoning component behind a supervisor.
//!
//! A [`Router`] reads the team conversation and names the next worker (or `FINISH`).
//! Its answer is raw and unvalidated; `SupervisorNode` checks it against the roster.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::graph::Roster;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::state::TeamState;

use super::prompt::supervisor_system_prompt;

/// Raw routing decision from the reasoning component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    /// Worker name or `FINISH`, not yet validated.
    pub next: String,
    /// Messages the supervisor appends along with its decision; usually empty.
    pub messages: Vec<Message>,
}

impl Decision {
    pub fn new(next: impl Into<String>) -> Self {
        Self {
            next: next.into(),
            messages: Vec::new(),
        }
    }
}

/// External reasoning component that picks the next worker.
#[async_trait]
pub trait Router: Send + Sync {
    async fn decide(&self, state: &TeamState, roster: &Roster) -> Result<Decision, AgentError>;
}

/// Router backed by an LLM: system prompt with the roster, then the conversation.
pub struct LlmRouter {
    llm: Arc<dyn LlmClient>,
}

impl LlmRouter {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    fn build_messages(state: &TeamState, roster: &Roster) -> Vec<Message> {
        let prompt = supervisor_system_prompt(&roster.names(), &roster.options());
        std::iter::once(Message::system(prompt))
            .chain(state.messages.iter().cloned())
            .collect()
    }
}

#[async_trait]
impl Router for LlmRouter {
    async fn decide(&self, state: &TeamState, roster: &Roster) -> Result<Decision, AgentError> {
        let messages = Self::build_messages(state, roster);
        let response = self.llm.invoke(&messages).await?;
        let raw = response.content.to_text();
        let next = parse_next(&raw);
        tracing::debug!(raw = %raw, next = %next, "Supervisor reply parsed");
        Ok(Decision::new(next))
    }
}

/// Extracts the decision token from a model reply.
///
/// Accepts a JSON object with `next` (or `route`), a JSON string, or a bare token,
/// optionally wrapped in a code fence. Falls back to the trimmed reply.
pub fn parse_next(reply: &str) -> String {
    let body = strip_code_fence(reply.trim());
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        match value {
            Value::String(s) => return s,
            Value::Object(map) => {
                if let Some(Value::String(s)) = map.get("next").or_else(|| map.get("route")) {
                    return s.clone();
                }
            }
            _ => {}
        }
    }
    if let (Some(start), Some(end)) = (body.find('{'), body.rfind('}')) {
        if start < end {
            if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(&body[start..=end]) {
                if let Some(Value::String(s)) = map.get("next") {
                    return s.clone();
                }
            }
        }
    }
    body.to_string()
}

fn strip_code_fence(s: &str) -> &str {
    let Some(rest) = s.strip_prefix("```") else {
        return s;
    };
    let rest = rest.strip_suffix("```").unwrap_or(rest);
    // drop the language tag line, if any
    match rest.find('\n') {
        Some(i) if !rest[..i].trim_start().starts_with('{') => rest[i + 1..].trim(),
        _ => rest.trim(),
    }
}
