//! Conversation context snapshot for one fallback decision.

use super::offers::{scan_offers, OfferKind};
use super::topics::{detect_topics, Topic};
use super::{mentions_any, Message};
use serde::Serialize;
use std::collections::BTreeSet;

/// Words that mark a user message as a question even without "?"
const INTERROGATIVES: &[&str] = &[
    "what", "how", "why", "when", "where", "which", "who", "can you", "could you",
];

/// Derived view of the conversation. Rebuilt on every call, never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversationContext {
    pub current_topic: Option<Topic>,
    pub last_ai_offer: Option<OfferKind>,
    pub last_user_question: Option<String>,
    pub topics_discussed: BTreeSet<Topic>,
    pub examples_given: bool,
    pub practice_offered: bool,
}

impl ConversationContext {
    /// Build the context from history plus the message being answered.
    ///
    /// The current message is scanned after the history, so a topic named
    /// in it becomes the current topic.
    pub fn build(history: &[Message], user_message: &str) -> Self {
        let texts = history
            .iter()
            .map(|m| m.text.as_str())
            .chain(std::iter::once(user_message));
        let topics = detect_topics(texts);

        let offers = scan_offers(history);

        let last_user_question = history
            .iter()
            .filter(|m| !m.is_assistant())
            .map(|m| m.text.as_str())
            .chain(std::iter::once(user_message))
            .filter(|text| is_question(text))
            .last()
            .map(|text| text.trim().to_string());

        Self {
            current_topic: topics.current,
            last_ai_offer: offers.last_offer,
            last_user_question,
            topics_discussed: topics.discussed,
            examples_given: offers.examples_given,
            practice_offered: offers.practice_offered,
        }
    }

    /// Current topic, or derivatives when nothing was detected
    pub fn topic_or_default(&self) -> Topic {
        self.current_topic.unwrap_or(Topic::Derivatives)
    }
}

/// True when the text contains "?" or an interrogative
pub fn is_question(text: &str) -> bool {
    let lower = text.to_lowercase();
    lower.contains('?') || mentions_any(&lower, INTERROGATIVES)
}
