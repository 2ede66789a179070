//! Response selection: (intent, context) -> reply text.
//!
//! Never calls the network. The only non-determinism is the gratitude
//! phrasing, drawn from a caller-supplied random source.

use super::content::{self, ContentKind};
use super::context::ConversationContext;
use super::intent::{self, Intent};
use super::offers::OfferKind;
use super::topics::Topic;
use super::{mentions_any, Message};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

/// Gratitude replies, `{topic}` is replaced by the topic name or "math"
const GRATITUDE_TEMPLATES: [&str; 3] = [
    "You're welcome! I'm glad I could help with {topic}. Is there anything else you'd like to explore?",
    "Happy to help! Keep up the great work with {topic}. Let me know if you have more questions.",
    "Anytime! You're making real progress with {topic}. Ready to keep going, or is there something new on your mind?",
];

const GENERIC_QUESTION_REPLY: &str = "That's a great question! I'm here to help you understand math concepts better. Could you tell me more about what specific part you're finding challenging? Breaking it down into smaller steps often helps.";

const TOPIC_MENU_REPLY: &str = "I'm here to help with math! Tell me what you're studying, whether that's calculus, equations, or something else, and ask me anything. I can explain concepts, show worked examples, or give you practice problems.";

/// New-question routing, checked in order against the user's message
const QUESTION_ROUTES: [(&[&str], Topic); 5] = [
    (&["derivative", "differentiate"], Topic::Derivatives),
    (&["chain rule"], Topic::ChainRule),
    (&["integral", "integrate"], Topic::Integrals),
    (&["limit"], Topic::Limits),
    (&["quadratic"], Topic::Quadratic),
];

/// Everything that went into one fallback reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FallbackDecision {
    pub context: ConversationContext,
    pub intent: Intent,
    pub response: String,
}

/// Produce the reply for an already classified intent
pub fn respond<R: Rng + ?Sized>(
    intent: Intent,
    ctx: &ConversationContext,
    user_message: &str,
    rng: &mut R,
) -> String {
    let topic = ctx.topic_or_default();

    match intent {
        Intent::Affirmative => match ctx.last_ai_offer {
            Some(OfferKind::Practice) => content::body(topic, ContentKind::Practice).to_string(),
            Some(OfferKind::Explanation) | Some(OfferKind::Steps) => {
                content::body(topic, ContentKind::Explanation).to_string()
            }
            Some(OfferKind::Examples) | Some(OfferKind::Continue) | None => {
                content::body(topic, ContentKind::Examples).to_string()
            }
        },
        Intent::WantExamples => content::body(topic, ContentKind::Examples).to_string(),
        Intent::WantPractice => content::body(topic, ContentKind::Practice).to_string(),
        Intent::NeedClarification => clarification(topic, user_message),
        Intent::Gratitude => gratitude(ctx.current_topic, rng),
        Intent::NewQuestion => new_question(&intent::normalize(user_message)),
        Intent::Unknown => nudge(ctx.current_topic),
    }
}

/// Full fallback pipeline: context, intent, reply
pub fn decide<R: Rng + ?Sized>(
    user_message: &str,
    history: &[Message],
    rng: &mut R,
) -> FallbackDecision {
    let context = ConversationContext::build(history, user_message);
    let intent = intent::classify(&intent::normalize(user_message), &context);
    let response = respond(intent, &context, user_message, rng);

    debug!(
        "Fallback reply: intent={:?} topic={:?} offer={:?}",
        intent, context.current_topic, context.last_ai_offer
    );

    FallbackDecision {
        context,
        intent,
        response,
    }
}

/// Fallback reply using the thread-local random source
pub fn fallback_response(user_message: &str, history: &[Message]) -> String {
    fallback_response_with_rng(user_message, history, &mut rand::thread_rng())
}

/// Fallback reply with an injected random source
pub fn fallback_response_with_rng<R: Rng + ?Sized>(
    user_message: &str,
    history: &[Message],
    rng: &mut R,
) -> String {
    decide(user_message, history, rng).response
}

/// The three possible gratitude replies for a topic
pub fn gratitude_replies(topic: Option<Topic>) -> [String; 3] {
    let name = topic.map(|t| t.display_name()).unwrap_or("math");
    GRATITUDE_TEMPLATES.map(|template| template.replace("{topic}", name))
}

fn gratitude<R: Rng + ?Sized>(topic: Option<Topic>, rng: &mut R) -> String {
    let mut replies = gratitude_replies(topic);
    let idx = rng.gen_range(0..replies.len());
    std::mem::take(&mut replies[idx])
}

fn clarification(topic: Topic, user_message: &str) -> String {
    if let Some(body) = content::lookup(topic, ContentKind::Clarification) {
        return body.to_string();
    }

    format!(
        "No worries, {} can feel tricky at first! You said: \"{}\". Could you tell me more specifically which part is confusing? Is it a definition, a particular step, or a problem you're working on? The more specific you are, the better I can help.",
        topic.display_name(),
        user_message.trim()
    )
}

fn new_question(normalized: &str) -> String {
    QUESTION_ROUTES
        .iter()
        .find(|(keywords, _)| mentions_any(normalized, keywords))
        .and_then(|(_, topic)| content::lookup(*topic, ContentKind::Introduction))
        .unwrap_or(GENERIC_QUESTION_REPLY)
        .to_string()
}

fn nudge(topic: Option<Topic>) -> String {
    match topic {
        Some(topic) => format!(
            "We've been working on {}. Would you like to see some examples, try a practice problem, or go over the explanation again?",
            topic.display_name()
        ),
        None => TOPIC_MENU_REPLY.to_string(),
    }
}
