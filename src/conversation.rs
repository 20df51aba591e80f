//! Conversation sessions for plain chat and grounded search.
//!
//! A session is `Idle → Submitting → Idle`. The user's message is appended
//! as soon as it is submitted; the assistant reply is appended when the
//! request for that same session completes.

use std::sync::Arc;

use chrono::{DateTime, Local};
use uuid::Uuid;

use crate::gemini::{ChatReply, GroundedReply, Source, StudioBackend, StudioError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatMode {
    Chat,
    Grounded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Local>,
    /// Empty unless the reply came from grounded search.
    pub grounding_sources: Vec<Source>,
}

/// Normalized reply for either chat mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub sources: Vec<Source>,
}

impl From<ChatReply> for AssistantReply {
    fn from(reply: ChatReply) -> Self {
        AssistantReply { text: reply.text, sources: Vec::new() }
    }
}

impl From<GroundedReply> for AssistantReply {
    fn from(reply: GroundedReply) -> Self {
        AssistantReply { text: reply.text, sources: reply.sources }
    }
}

/// A submission accepted by a session, ready to be dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub session_id: Uuid,
    pub mode: ChatMode,
    pub text: String,
}

/// Result of a dispatched request, tagged with the session that issued it.
#[derive(Debug, Clone)]
pub struct ChatCompletion {
    pub session_id: Uuid,
    pub result: Result<AssistantReply, StudioError>,
}

#[derive(Debug)]
pub struct Conversation {
    session_id: Uuid,
    mode: ChatMode,
    messages: Vec<ChatMessage>,
    input: String,
    submitting: bool,
    error: Option<StudioError>,
    next_id: u64,
}

impl Conversation {
    pub fn new(mode: ChatMode) -> Self {
        let session_id = Uuid::new_v4();
        tracing::debug!(%session_id, ?mode, "new conversation session");
        Conversation {
            session_id,
            mode,
            messages: Vec::new(),
            input: String::new(),
            submitting: false,
            error: None,
            next_id: 0,
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn message(&self, id: u64) -> Option<&ChatMessage> {
        self.messages.iter().find(|m| m.id == id)
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&StudioError> {
        self.error.as_ref()
    }

    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.input.trim().is_empty()
    }

    pub fn set_input(&mut self, value: String) {
        self.input = value;
    }

    pub fn dismiss_error(&mut self) {
        self.error = None;
    }

    /// Accept the current input, or return `None` when it is blank or a
    /// request is already in flight.
    pub fn submit(&mut self) -> Option<ChatRequest> {
        if !self.can_submit() {
            return None;
        }

        let text = std::mem::take(&mut self.input);
        self.push(Role::User, text.clone(), Vec::new());
        self.submitting = true;
        self.error = None;

        Some(ChatRequest { session_id: self.session_id, mode: self.mode, text })
    }

    /// Apply a completion. Returns `false` when it belongs to another session.
    pub fn complete(&mut self, completion: ChatCompletion) -> bool {
        if completion.session_id != self.session_id {
            tracing::debug!(
                stale = %completion.session_id,
                current = %self.session_id,
                "dropping reply for retired session"
            );
            return false;
        }

        self.submitting = false;
        match completion.result {
            Ok(reply) => {
                self.push(Role::Assistant, reply.text, reply.sources);
            }
            Err(err) => {
                tracing::warn!(session_id = %self.session_id, error = %err, "chat request failed");
                self.error = Some(err);
            }
        }
        true
    }

    fn push(&mut self, role: Role, content: String, grounding_sources: Vec<Source>) {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(ChatMessage {
            id,
            role,
            content,
            timestamp: Local::now(),
            grounding_sources,
        });
    }
}

/// Run an accepted request against the backend.
pub async fn dispatch(backend: Arc<dyn StudioBackend>, request: ChatRequest) -> ChatCompletion {
    let result = match request.mode {
        ChatMode::Chat => backend.send_chat(&request.text).await.map(AssistantReply::from),
        ChatMode::Grounded => backend
            .send_grounded_query(&request.text)
            .await
            .map(AssistantReply::from),
    };
    ChatCompletion { session_id: request.session_id, result }
}

#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;
