//! Conversational math tutor
//!
//! Asks the chat model first. Any error, or a reply too short to be useful,
//! is answered by the fallback dialogue engine instead.

use crate::config::TutorConfig;
use crate::dialogue::{self, Message, Sender};
use crate::llm_client::{ChatMessage, ChatRole, InferenceClient};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

pub const TUTOR_SYSTEM_PROMPT: &str = "You are MathPulse AI, a friendly and encouraging math tutor for high school students.
Your role is to:
- Help students understand mathematical concepts step by step
- Provide clear explanations using simple language
- Give examples when helpful
- Encourage students and praise their efforts
- Focus on building intuition, not just memorization
- If a student is struggling, break problems into smaller steps

Current topic focus: Calculus and Derivatives
Keep responses concise but helpful (2-3 paragraphs max).";

/// Where a tutor reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorReply {
    pub message: String,
    pub source: ReplySource,
}

pub struct TutorService {
    client: Arc<dyn InferenceClient>,
    model: String,
    config: TutorConfig,
}

impl TutorService {
    pub fn new(client: Arc<dyn InferenceClient>, model: impl Into<String>, config: TutorConfig) -> Self {
        Self {
            client,
            model: model.into(),
            config,
        }
    }

    /// System prompt, the recent history window, then the new message
    pub fn build_messages(&self, user_message: &str, history: &[Message]) -> Vec<ChatMessage> {
        let start = history.len().saturating_sub(self.config.history_window);

        let mut messages = Vec::with_capacity(history.len() - start + 2);
        messages.push(ChatMessage::new(ChatRole::System, TUTOR_SYSTEM_PROMPT));
        messages.extend(history[start..].iter().map(|m| {
            let role = match m.sender {
                Sender::User => ChatRole::User,
                Sender::Assistant => ChatRole::Assistant,
            };
            ChatMessage::new(role, m.text.clone())
        }));
        messages.push(ChatMessage::new(ChatRole::User, user_message));
        messages
    }

    pub fn respond(&self, user_message: &str, history: &[Message]) -> TutorReply {
        self.respond_with_rng(user_message, history, &mut rand::thread_rng())
    }

    /// Same as [`respond`](Self::respond) with an injected random source for the fallback
    pub fn respond_with_rng<R: Rng + ?Sized>(
        &self,
        user_message: &str,
        history: &[Message],
        rng: &mut R,
    ) -> TutorReply {
        let messages = self.build_messages(user_message, history);

        match self.client.chat(&self.model, &messages, self.config.max_tokens) {
            Ok(text) if self.is_useful(&text) => {
                debug!("Tutor reply from model ({} chars)", text.len());
                return TutorReply {
                    message: text,
                    source: ReplySource::Model,
                };
            }
            Ok(text) => warn!(
                "Model reply too short ({} chars), using fallback",
                text.trim().chars().count()
            ),
            Err(e) => warn!("Chat model unavailable, using fallback: {}", e),
        }

        TutorReply {
            message: dialogue::fallback_response_with_rng(user_message, history, rng),
            source: ReplySource::Fallback,
        }
    }

    fn is_useful(&self, text: &str) -> bool {
        let len = text.trim().chars().count();
        len > 0 && len >= self.config.min_reply_chars
    }
}
