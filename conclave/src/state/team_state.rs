//! Team state and state updates.

use serde::{Deserialize, Serialize};

use crate::message::Message;

/// Conversation state shared by the supervisor and workers of one team graph invocation.
///
/// `messages` is append-only: message order is production order and the last message is
/// always the most recently produced one. `next` holds the supervisor's latest decision
/// (a roster name or `FINISH`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamState {
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl TeamState {
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            next: None,
        }
    }

    /// State holding a single user message; the entry state of a driver run.
    pub fn from_user(request: impl Into<String>) -> Self {
        Self::new(vec![Message::user(request.into())])
    }

    /// Most recently produced message, if any.
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Applies an update: appends its messages in order, and replaces `next` when the
    /// update carries one. Prior messages are never removed or modified.
    pub fn apply(&mut self, update: &StateUpdate) {
        self.messages.extend(update.messages.iter().cloned());
        if let Some(ref next) = update.next {
            self.next = Some(next.clone());
        }
    }
}

/// State half of a routing command: what one cycle appends.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateUpdate {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

impl StateUpdate {
    /// Update that only appends messages.
    pub fn messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            next: None,
        }
    }

    /// Update that appends one message.
    pub fn message(message: Message) -> Self {
        Self::messages(vec![message])
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.next.is_none()
    }
}
