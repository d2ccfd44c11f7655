//! LLM client abstraction for supervisors and role workers.
//!
//! `LlmRouter` asks a client which worker acts next; `LlmWorker` asks a client to
//! perform its role. Implementations: `MockLlm` (scripted replies, for tests and
//! offline runs) and `ChatOpenAI` (any OpenAI-compatible chat completions endpoint).

mod mock;
mod openai;

pub use mock::MockLlm;
pub use openai::ChatOpenAI;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::message::{Message, MessageContent};

/// Token usage for one LLM call (prompt + completion).
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LlmUsage {
    /// Tokens in the prompt (input).
    pub prompt_tokens: u32,
    /// Tokens in the completion (output).
    pub completion_tokens: u32,
    /// Total tokens (prompt + completion).
    pub total_tokens: u32,
}

/// Response from an LLM completion.
///
/// `content` is plain text for most providers; some return a list of content
/// blocks, which is kept as is and unwrapped by the consumer.
#[derive(Clone, Debug, PartialEq)]
pub struct LlmResponse {
    pub content: MessageContent,
    /// Token usage for this call, when the provider reports it.
    pub usage: Option<LlmUsage>,
}

impl LlmResponse {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: MessageContent::Text(content.into()),
            usage: None,
        }
    }
}

/// LLM client: given messages, returns the assistant reply.
///
/// **Interaction**: used by `LlmRouter` (supervisor decisions) and `LlmWorker`
/// (role output). Errors are reported as `AgentError::ExecutionFailed`.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Invoke one turn: read messages (system prompt first), return the reply.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError>;
}
