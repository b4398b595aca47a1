//! Chat session: a transcript of free-text questions and referee answers.

use serde::Serialize;

use crate::config::CHAT_SUGGESTION_LIMIT;
use crate::types::{ComparisonResponse, Suggestion};

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in the transcript.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_time: Option<f64>,
    pub is_error: bool,
}

impl ChatMessage {
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            query: None,
            execution_time: None,
            is_error: false,
        }
    }

    #[must_use]
    pub fn assistant(response: ComparisonResponse) -> Self {
        Self {
            role: Role::Assistant,
            content: response.comparison,
            query: Some(response.query),
            execution_time: response.execution_time,
            is_error: false,
        }
    }

    #[must_use]
    pub fn error(message: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: format!("⚠️ Error: {message}"),
            query: None,
            execution_time: None,
            is_error: true,
        }
    }
}

/// Events that drive a [`ChatSession`].
#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    /// Replace the pending input.
    Input(String),
    /// Send the pending input.
    Submit,
    /// The API answered.
    Reply(ComparisonResponse),
    /// The request failed.
    Failed(String),
    /// Load a suggestion's query into the input.
    PickSuggestion(Suggestion),
    /// Empty the transcript.
    Clear,
}

/// Chat transcript plus input and loading flags.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatSession {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    pub loading: bool,
    submission: Option<String>,
}

impl ChatSession {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event and return the next session.
    #[must_use]
    pub fn apply(mut self, event: ChatEvent) -> Self {
        match event {
            ChatEvent::Input(text) => self.input = text,
            ChatEvent::Submit => {
                if self.input.trim().is_empty() || self.loading {
                    return self;
                }
                let query = std::mem::take(&mut self.input);
                self.messages.push(ChatMessage::user(query.clone()));
                self.submission = Some(query);
                self.loading = true;
            }
            ChatEvent::Reply(response) => {
                self.messages.push(ChatMessage::assistant(response));
                self.loading = false;
            }
            ChatEvent::Failed(message) => {
                self.messages.push(ChatMessage::error(&message));
                self.loading = false;
            }
            ChatEvent::PickSuggestion(suggestion) => self.input = suggestion.query,
            ChatEvent::Clear => {
                self.messages.clear();
                self.submission = None;
            }
        }
        self
    }

    /// Take the query queued by the last accepted `Submit`, if any.
    pub fn take_submission(&mut self) -> Option<String> {
        self.submission.take()
    }

    /// Suggestions to offer: the first few, and only while the chat is empty.
    #[must_use]
    pub fn visible_suggestions<'a>(&self, suggestions: &'a [Suggestion]) -> &'a [Suggestion] {
        if self.messages.is_empty() {
            &suggestions[..suggestions.len().min(CHAT_SUGGESTION_LIMIT)]
        } else {
            &[]
        }
    }
}
