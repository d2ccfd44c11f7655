//! Mock LLM for tests and offline runs.
//!
//! Returns a fixed reply, or a scripted sequence of replies (the last one repeats once
//! the script is exhausted). Scripted entries may be errors. Every call is recorded so
//! tests can assert on call count and on the messages a component sent.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::{LlmClient, LlmResponse};
use crate::message::{Message, MessageContent};

/// One scripted reply.
#[derive(Clone, Debug)]
enum Reply {
    Content(MessageContent),
    Error(String),
}

/// Mock LLM: fixed or scripted replies.
///
/// **Interaction**: Implements `LlmClient`; used by router, worker and driver tests.
pub struct MockLlm {
    script: Mutex<VecDeque<Reply>>,
    last: Mutex<Reply>,
    calls: AtomicUsize,
    requests: Mutex<Vec<Vec<Message>>>,
}

impl MockLlm {
    /// Mock that always replies with `content`.
    pub fn with_reply(content: impl Into<MessageContent>) -> Self {
        Self::from_replies(Vec::new(), Reply::Content(content.into()))
    }

    /// Mock that replies with each entry in turn, then repeats the last one.
    /// An empty script replies with an empty string.
    pub fn scripted<I, C>(replies: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<MessageContent>,
    {
        let mut script: VecDeque<Reply> = replies
            .into_iter()
            .map(|c| Reply::Content(c.into()))
            .collect();
        let last = script
            .pop_back()
            .unwrap_or_else(|| Reply::Content(MessageContent::Text(String::new())));
        Self::from_replies(script.into(), last)
    }

    /// Mock that fails every call with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::from_replies(Vec::new(), Reply::Error(message.into()))
    }

    /// Prepends `count` failing calls before the configured replies.
    pub fn with_failures(self, count: usize, message: impl Into<String>) -> Self {
        let message = message.into();
        if let Ok(mut script) = self.script.lock() {
            for _ in 0..count {
                script.push_front(Reply::Error(message.clone()));
            }
        }
        self
    }

    fn from_replies(script: Vec<Reply>, last: Reply) -> Self {
        Self {
            script: Mutex::new(script.into()),
            last: Mutex::new(last),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Number of `invoke` calls so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Messages sent on each call, in call order.
    pub fn requests(&self) -> Vec<Vec<Message>> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }

    fn next_reply(&self) -> Reply {
        let scripted = self.script.lock().ok().and_then(|mut s| s.pop_front());
        match scripted {
            Some(reply) => reply,
            None => self
                .last
                .lock()
                .map(|r| r.clone())
                .unwrap_or_else(|_| Reply::Error("mock poisoned".into())),
        }
    }
}

#[async_trait]
impl LlmClient for MockLlm {
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut r) = self.requests.lock() {
            r.push(messages.to_vec());
        }
        match self.next_reply() {
            Reply::Content(content) => Ok(LlmResponse {
                content,
                usage: None,
            }),
            Reply::Error(message) => Err(AgentError::ExecutionFailed(message)),
        }
    }
}
