//! OpenAI-compatible Chat Completions client implementing `LlmClient` (ChatOpenAI).
//!
//! Works with any endpoint speaking the Chat Completions protocol: OpenAI, Mistral,
//! and Gemini's OpenAI-compatible API. Base URL, API key, model and temperature are
//! configurable; the hierarchy uses one client for supervisors and one for workers.
//!
//! Worker and team reports carry a `name`. By default the name is rendered into the
//! text (`"search: ..."`) since several compatible providers reject or ignore the
//! `name` field; `with_send_names(true)` sends it as the field instead.

use async_trait::async_trait;
use tracing::{debug, trace};

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse, LlmUsage};
use crate::message::{Message, MessageContent, Role};

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestAssistantMessage, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
    Client,
};

/// OpenAI-compatible chat client.
///
/// **Interaction**: Implements `LlmClient`; used by `LlmRouter` and `LlmWorker`.
pub struct ChatOpenAI {
    client: Client<OpenAIConfig>,
    base_url: Option<String>,
    model: String,
    temperature: Option<f32>,
    send_names: bool,
}

impl ChatOpenAI {
    /// Build client with default config (API key from `OPENAI_API_KEY` env).
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_config(OpenAIConfig::new(), None, model)
    }

    /// Build client for an explicit endpoint and key.
    pub fn for_endpoint(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into();
        let config = OpenAIConfig::new()
            .with_api_base(base_url.trim_end_matches('/'))
            .with_api_key(api_key);
        Self::with_config(config, Some(base_url), model)
    }

    fn with_config(config: OpenAIConfig, base_url: Option<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(config),
            base_url,
            model: model.into(),
            temperature: None,
            send_names: false,
        }
    }

    /// Set temperature (0–2). Lower values are more deterministic.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Send message names as the `name` field instead of a text prefix.
    pub fn with_send_names(mut self, send_names: bool) -> Self {
        self.send_names = send_names;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Chat completions URL used for logging.
    fn chat_completions_url(&self) -> String {
        let base = self
            .base_url
            .as_deref()
            .unwrap_or("https://api.openai.com/v1")
            .trim_end_matches('/');
        format!("{}/chat/completions", base)
    }

    /// Text sent for one message: content unwrapped to text, prefixed with the name
    /// unless names are sent as a field.
    fn render_text(&self, m: &Message) -> String {
        let text = m.content.to_text();
        match (&m.name, self.send_names) {
            (Some(name), false) => format!("{}: {}", name, text),
            _ => text,
        }
    }

    /// Convert our `Message` list to request messages (text only).
    fn messages_to_request(&self, messages: &[Message]) -> Vec<ChatCompletionRequestMessage> {
        messages
            .iter()
            .map(|m| {
                let text = self.render_text(m);
                let name = if self.send_names { m.name.clone() } else { None };
                match m.role {
                    Role::System => ChatCompletionRequestMessage::System(
                        ChatCompletionRequestSystemMessage::from(text.as_str()),
                    ),
                    Role::User => {
                        let mut user = ChatCompletionRequestUserMessage::from(text.as_str());
                        user.name = name;
                        ChatCompletionRequestMessage::User(user)
                    }
                    Role::Assistant => {
                        let mut assistant =
                            ChatCompletionRequestAssistantMessage::from(text.as_str());
                        assistant.name = name;
                        ChatCompletionRequestMessage::Assistant(assistant)
                    }
                }
            })
            .collect()
    }
}

#[async_trait]
impl LlmClient for ChatOpenAI {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        let trace_id = uuid::Uuid::new_v4().to_string();
        let mut args = CreateChatCompletionRequestArgs::default();
        args.model(self.model.clone());
        args.messages(self.messages_to_request(messages));
        if let Some(t) = self.temperature {
            args.temperature(t);
        }
        let request = args.build().map_err(|e| {
            AgentError::ExecutionFailed(format!("chat request build failed: {}", e))
        })?;

        let url = self.chat_completions_url();
        debug!(
            trace_id = %trace_id,
            url = %url,
            model = %self.model,
            message_count = messages.len(),
            temperature = ?self.temperature,
            "Chat completion create"
        );
        if let Ok(js) = serde_json::to_string_pretty(&request) {
            trace!(trace_id = %trace_id, request = %js, "Chat completion request body");
        }

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| AgentError::ExecutionFailed(format!("chat API error: {}", e)))?;

        if let Ok(js) = serde_json::to_string_pretty(&response) {
            trace!(trace_id = %trace_id, response = %js, "Chat completion response body");
        }

        let choice = response.choices.into_iter().next().ok_or_else(|| {
            AgentError::ExecutionFailed("chat API returned no choices".to_string())
        })?;
        let usage = response.usage.map(|u| LlmUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });
        Ok(LlmResponse {
            content: MessageContent::Text(choice.message.content.unwrap_or_default()),
            usage,
        })
    }
}
