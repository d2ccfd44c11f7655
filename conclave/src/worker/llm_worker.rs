//! Role worker backed by an LLM.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::message::{Message, MessageContent};
use crate::state::TeamState;

use super::prompt::role_prompt;
use super::Worker;

/// Worker that answers with one LLM call: role prompt, then the team conversation.
pub struct LlmWorker {
    name: String,
    system_prompt: String,
    llm: Arc<dyn LlmClient>,
}

impl LlmWorker {
    pub fn new(
        name: impl Into<String>,
        system_prompt: impl Into<String>,
        llm: Arc<dyn LlmClient>,
    ) -> Self {
        Self {
            name: name.into(),
            system_prompt: system_prompt.into(),
            llm,
        }
    }

    /// Worker for one of the built-in roles; `None` for an unknown role.
    pub fn for_role(role: &str, llm: Arc<dyn LlmClient>) -> Option<Self> {
        role_prompt(role).map(|prompt| Self::new(role, prompt, llm))
    }
}

#[async_trait]
impl Worker for LlmWorker {
    fn name(&self) -> &str {
        &self.name
    }

    async fn act(&self, state: &TeamState) -> Result<MessageContent, AgentError> {
        let mut messages = Vec::with_capacity(state.messages.len() + 1);
        messages.push(Message::system(self.system_prompt.clone()));
        messages.extend(state.messages.iter().cloned());
        let response = self.llm.invoke(&messages).await?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                worker = %self.name,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Worker LLM usage"
            );
        }
        Ok(response.content)
    }
}
