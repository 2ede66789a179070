//! Intent classification for the latest user message.
//!
//! Rules are checked in a fixed order and the first match wins:
//! affirmative (only with an open offer), examples, practice,
//! clarification, gratitude, new question, unknown.

use super::context::ConversationContext;
use super::mentions_any;
use serde::{Deserialize, Serialize};

/// What the student wants from the next reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Affirmative,
    WantExamples,
    WantPractice,
    NeedClarification,
    Gratitude,
    NewQuestion,
    Unknown,
}

const AFFIRMATIVE_PHRASES: &[&str] = &[
    "yes",
    "yeah",
    "yep",
    "yup",
    "sure",
    "ok",
    "okay",
    "please",
    "go ahead",
    "of course",
    "definitely",
    "absolutely",
    "alright",
    "sounds good",
    "let's do it",
    "why not",
];

const EXAMPLE_PHRASES: &[&str] = &[
    "example",
    "show me",
    "demonstrate",
    "like what",
    "such as",
    "for instance",
    "can you show",
];

const PRACTICE_PHRASES: &[&str] = &[
    "practice",
    "try",
    "exercise",
    "problem",
    "quiz",
    "test me",
    "let me try",
];

const CONFUSION_PHRASES: &[&str] = &[
    "don't understand",
    "dont understand",
    "do not understand",
    "don't get",
    "dont get",
    "confused",
    "confusing",
    "what do you mean",
    "lost",
    "not sure",
    "unclear",
    "makes no sense",
    "doesn't make sense",
    "explain again",
    "huh",
];

const GRATITUDE_PHRASES: &[&str] = &[
    "thank",
    "thx",
    "appreciate",
    "got it",
    "i see",
    "makes sense",
    "that helps",
    "that helped",
    "awesome",
];

const QUESTION_WORDS: &[&str] = &[
    "what",
    "how",
    "why",
    "when",
    "where",
    "which",
    "who",
    "explain",
    "solve",
    "find",
    "calculate",
    "help",
    "tell me",
    "define",
    "describe",
];

/// Messages longer than this are treated as new questions
const NEW_QUESTION_MIN_CHARS: usize = 30;

/// Trim and lowercase a raw user message
pub fn normalize(message: &str) -> String {
    message.trim().to_lowercase()
}

/// True when the message is, or opens with, an agreement phrase
pub fn is_affirmative(normalized: &str) -> bool {
    AFFIRMATIVE_PHRASES
        .iter()
        .any(|phrase| normalized.starts_with(phrase))
}

/// Classify a normalized message. Order of the checks is part of the contract.
pub fn classify(normalized: &str, ctx: &ConversationContext) -> Intent {
    if is_affirmative(normalized) && ctx.last_ai_offer.is_some() {
        return Intent::Affirmative;
    }

    if mentions_any(normalized, EXAMPLE_PHRASES) {
        return Intent::WantExamples;
    }

    if mentions_any(normalized, PRACTICE_PHRASES) {
        return Intent::WantPractice;
    }

    if mentions_any(normalized, CONFUSION_PHRASES) {
        return Intent::NeedClarification;
    }

    if mentions_any(normalized, GRATITUDE_PHRASES) {
        return Intent::Gratitude;
    }

    if normalized.chars().count() > NEW_QUESTION_MIN_CHARS
        || normalized.contains('?')
        || mentions_any(normalized, QUESTION_WORDS)
    {
        return Intent::NewQuestion;
    }

    Intent::Unknown
}
