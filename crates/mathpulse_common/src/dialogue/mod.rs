//! Context-aware fallback dialogue engine.
//!
//! Produces a canned tutoring reply from the latest user message and the
//! conversation history, without any model call. Used whenever the remote
//! chat model fails or returns something unusable.
//!
//! Pipeline: context (topics + offers + last question) -> intent -> responder -> content.

pub mod content;
pub mod context;
pub mod intent;
pub mod offers;
pub mod responder;
pub mod topics;

pub use content::ContentKind;
pub use context::ConversationContext;
pub use intent::Intent;
pub use offers::OfferKind;
pub use responder::{decide, fallback_response, fallback_response_with_rng, FallbackDecision};
pub use topics::Topic;

use serde::{Deserialize, Serialize};

/// Who authored a history message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    /// The tutor. The web client labels these messages "ai".
    #[serde(alias = "ai")]
    Assistant,
}

/// One message of chat history, oldest first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    #[serde(rename = "message", alias = "text")]
    pub text: String,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }

    pub fn is_assistant(&self) -> bool {
        self.sender == Sender::Assistant
    }
}

/// Plain substring test on already lowercased text
///
/// Keywords match anywhere, inside longer words too ("try" is found in
/// "retry" and "geometry").
pub(crate) fn mentions(haystack: &str, needle: &str) -> bool {
    haystack.contains(needle)
}

pub(crate) fn mentions_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| mentions(haystack, needle))
}
