//! Topic detection over conversation history.
//!
//! Every message is tested against each topic's keyword list in the fixed
//! order of [`Topic::ALL`]. The last match wins, both across messages and
//! within a single message, so a message mentioning "derivative" and
//! "chain rule" resolves to [`Topic::ChainRule`].

use super::mentions_any;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Math subject areas the tutor recognizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    Derivatives,
    ChainRule,
    Integrals,
    Limits,
    Quadratic,
    Trigonometry,
    Algebra,
    Logarithms,
}

/// Keyword table in detection order. Later rows beat earlier rows when one
/// message matches several topics.
///
/// | # | Topic        | Keywords                                                          |
/// |---|--------------|-------------------------------------------------------------------|
/// | 1 | derivatives  | derivative, differentiate, differentiation, d/dx, rate of change  |
/// | 2 | chain_rule   | chain rule, composite function, function inside another           |
/// | 3 | integrals    | integral, integrate, integration, antiderivative, area under      |
/// | 4 | limits       | limit, lim(, approaches                                           |
/// | 5 | quadratic    | quadratic, parabola, completing the square, discriminant          |
/// | 6 | trigonometry | trig, unit circle, sine, cosine, sohcahtoa, radian                |
/// | 7 | algebra      | algebra, linear equation, solve for x, system of equations        |
/// | 8 | logarithms   | logarithm, log base, natural log, ln(                             |
const TOPIC_KEYWORDS: [(Topic, &[&str]); 8] = [
    (
        Topic::Derivatives,
        &["derivative", "differentiate", "differentiation", "d/dx", "rate of change"],
    ),
    (
        Topic::ChainRule,
        &["chain rule", "composite function", "function inside another"],
    ),
    (
        Topic::Integrals,
        &["integral", "integrate", "integration", "antiderivative", "area under"],
    ),
    (Topic::Limits, &["limit", "lim(", "approaches"]),
    (
        Topic::Quadratic,
        &["quadratic", "parabola", "completing the square", "discriminant"],
    ),
    (
        Topic::Trigonometry,
        &["trig", "unit circle", "sine", "cosine", "sohcahtoa", "radian"],
    ),
    (
        Topic::Algebra,
        &["algebra", "linear equation", "solve for x", "system of equations"],
    ),
    (
        Topic::Logarithms,
        &["logarithm", "log base", "natural log", "ln("],
    ),
];

impl Topic {
    /// All topics in detection order
    pub const ALL: [Topic; 8] = [
        Topic::Derivatives,
        Topic::ChainRule,
        Topic::Integrals,
        Topic::Limits,
        Topic::Quadratic,
        Topic::Trigonometry,
        Topic::Algebra,
        Topic::Logarithms,
    ];

    /// Lowercase keywords that signal this topic
    pub fn keywords(&self) -> &'static [&'static str] {
        TOPIC_KEYWORDS
            .iter()
            .find(|(topic, _)| topic == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }

    /// Stable identifier, matches the serde form
    pub fn label(&self) -> &'static str {
        match self {
            Topic::Derivatives => "derivatives",
            Topic::ChainRule => "chain_rule",
            Topic::Integrals => "integrals",
            Topic::Limits => "limits",
            Topic::Quadratic => "quadratic",
            Topic::Trigonometry => "trigonometry",
            Topic::Algebra => "algebra",
            Topic::Logarithms => "logarithms",
        }
    }

    /// Name used inside reply text ("I'm glad I could help with ...")
    pub fn display_name(&self) -> &'static str {
        match self {
            Topic::Derivatives => "derivatives",
            Topic::ChainRule => "the chain rule",
            Topic::Integrals => "integrals",
            Topic::Limits => "limits",
            Topic::Quadratic => "quadratic equations",
            Topic::Trigonometry => "trigonometry",
            Topic::Algebra => "algebra",
            Topic::Logarithms => "logarithms",
        }
    }
}

impl std::fmt::Display for Topic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Topics mentioned in one lowercase text, in detection order
pub fn topics_in(text_lower: &str) -> Vec<Topic> {
    TOPIC_KEYWORDS
        .iter()
        .filter(|(_, keywords)| mentions_any(text_lower, keywords))
        .map(|(topic, _)| *topic)
        .collect()
}

/// Outcome of scanning a conversation for topics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicScan {
    /// Most recently mentioned topic
    pub current: Option<Topic>,
    /// Every topic mentioned anywhere
    pub discussed: BTreeSet<Topic>,
}

/// Scan texts oldest to newest, last mention wins
pub fn detect_topics<'a, I>(texts: I) -> TopicScan
where
    I: IntoIterator<Item = &'a str>,
{
    let mut scan = TopicScan::default();

    for text in texts {
        let lower = text.to_lowercase();
        for topic in topics_in(&lower) {
            scan.discussed.insert(topic);
            scan.current = Some(topic);
        }
    }

    scan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_leaves_topic_unset() {
        let scan = detect_topics(["hello there", "how are you today"]);
        assert_eq!(scan.current, None);
        assert!(scan.discussed.is_empty());
    }

    #[test]
    fn test_last_mention_wins_across_messages() {
        let scan = detect_topics([
            "can you help with integrals",
            "what about limits",
            "ok, nothing else",
        ]);
        assert_eq!(scan.current, Some(Topic::Limits));
        assert_eq!(scan.discussed.len(), 2);
    }

    #[test]
    fn test_tie_within_message_follows_table_order() {
        // chain_rule is checked after derivatives
        let scan = detect_topics(["the chain rule gives the derivative of nested functions"]);
        assert_eq!(scan.current, Some(Topic::ChainRule));
        assert!(scan.discussed.contains(&Topic::Derivatives));

        // logarithms is checked last of all
        let scan = detect_topics(["natural log of a quadratic"]);
        assert_eq!(scan.current, Some(Topic::Logarithms));
    }

    #[test]
    fn test_detection_is_case_insensitive() {
        let scan = detect_topics(["QUADRATIC Formula please"]);
        assert_eq!(scan.current, Some(Topic::Quadratic));
    }

    #[test]
    fn test_keywords_table_covers_every_topic() {
        for topic in Topic::ALL {
            assert!(!topic.keywords().is_empty(), "{} has no keywords", topic);
        }
    }

    #[test]
    fn test_label_matches_serde() {
        for topic in Topic::ALL {
            let json = serde_json::to_string(&topic).unwrap();
            assert_eq!(json, format!("\"{}\"", topic.label()));
        }
    }
}
