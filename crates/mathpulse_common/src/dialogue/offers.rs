//! Offer tracking: what did the tutor last propose?
//!
//! An assistant message containing an offer marker ("would you like",
//! "want me to") leaves an offer open. A later "yes" from the student
//! resolves it.

use super::{mentions, mentions_any, Message};
use serde::{Deserialize, Serialize};

/// Kind of next step the tutor offered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferKind {
    Examples,
    Practice,
    Explanation,
    Steps,
    /// Offer without a recognizable kind ("would you like to keep going?")
    Continue,
}

const OFFER_MARKERS: &[&str] = &["would you like", "want me to"];

/// Secondary keywords, checked in order. First row that matches decides.
const OFFER_KIND_KEYWORDS: [(OfferKind, &[&str]); 4] = [
    (OfferKind::Examples, &["example"]),
    (OfferKind::Practice, &["practice", "try"]),
    (OfferKind::Explanation, &["explain"]),
    (OfferKind::Steps, &["step"]),
];

/// Classify the offer in one lowercase assistant message, if any
pub fn classify_offer(text_lower: &str) -> Option<OfferKind> {
    if !mentions_any(text_lower, OFFER_MARKERS) {
        return None;
    }

    let kind = OFFER_KIND_KEYWORDS
        .iter()
        .find(|(_, keywords)| mentions_any(text_lower, keywords))
        .map(|(kind, _)| *kind)
        .unwrap_or(OfferKind::Continue);

    Some(kind)
}

/// True when the message looks like delivered example content
/// (mentions examples and carries list structure)
pub fn delivers_examples(text_lower: &str) -> bool {
    mentions(text_lower, "example") && (text_lower.contains(':') || text_lower.contains('•'))
}

/// Outcome of scanning assistant messages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OfferScan {
    pub last_offer: Option<OfferKind>,
    pub examples_given: bool,
    pub practice_offered: bool,
}

/// Scan assistant messages oldest to newest; the last open offer wins
pub fn scan_offers<'a, I>(history: I) -> OfferScan
where
    I: IntoIterator<Item = &'a Message>,
{
    let mut scan = OfferScan::default();

    for message in history.into_iter().filter(|m| m.is_assistant()) {
        let lower = message.text.to_lowercase();

        if let Some(kind) = classify_offer(&lower) {
            scan.last_offer = Some(kind);
            if kind == OfferKind::Practice {
                scan.practice_offered = true;
            }
        }

        if delivers_examples(&lower) {
            scan.examples_given = true;
        }
    }

    scan
}
