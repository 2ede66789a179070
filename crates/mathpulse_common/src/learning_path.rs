//! Remedial learning paths
//!
//! The chat model drafts a five step plan. Replies that are too short, or
//! that parse into fewer than three steps, are replaced by curated plans.

use crate::llm_client::{ChatMessage, ChatRole, InferenceClient};
use crate::risk::format_percent;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

const MAX_TOKENS: u32 = 400;
const MAX_STEPS: u32 = 5;
const MIN_PARSED_STEPS: usize = 3;
const MIN_REPLY_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Video,
    Quiz,
    Exercise,
}

impl StepKind {
    /// Kind used for the n-th parsed step (1-based)
    fn for_step(n: u32) -> Self {
        match n {
            1 | 2 => StepKind::Video,
            3 => StepKind::Quiz,
            _ => StepKind::Exercise,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningStep {
    pub step: u32,
    pub topic: String,
    #[serde(rename = "type")]
    pub kind: StepKind,
    pub duration: String,
}

impl LearningStep {
    fn new(step: u32, topic: impl Into<String>, kind: StepKind, minutes: u32) -> Self {
        Self {
            step,
            topic: topic.into(),
            kind,
            duration: format!("{} min", minutes),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPath {
    pub generated_path: bool,
    pub steps: Vec<LearningStep>,
    pub summary: String,
}

fn default_topic() -> String {
    "Calculus - Derivatives".to_string()
}

fn default_score() -> f64 {
    50.0
}

/// What a learning path is built for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LearningPathRequest {
    #[serde(default = "default_topic")]
    pub weakest_topic: String,
    #[serde(default = "default_score")]
    pub avg_quiz_score: f64,
    #[serde(default = "default_score")]
    pub engagement_score: f64,
}

impl Default for LearningPathRequest {
    fn default() -> Self {
        Self {
            weakest_topic: default_topic(),
            avg_quiz_score: default_score(),
            engagement_score: default_score(),
        }
    }
}

pub struct LearningPathService {
    client: Arc<dyn InferenceClient>,
    model: String,
}

impl LearningPathService {
    pub fn new(client: Arc<dyn InferenceClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn generate(&self, request: &LearningPathRequest) -> LearningPath {
        let topic = &request.weakest_topic;
        let prompt = format!(
            "Create a 5-step learning path for a student struggling with {}.\nQuiz average: {}, Engagement: {}.\nList 5 steps with topic, type (video/quiz/exercise), and duration.",
            topic,
            format_percent(request.avg_quiz_score),
            format_percent(request.engagement_score)
        );
        let messages = [ChatMessage::new(ChatRole::User, prompt)];

        match self.client.chat(&self.model, &messages, MAX_TOKENS) {
            Ok(text) if text.chars().count() > MIN_REPLY_CHARS => {
                debug!("Learning path for '{}' drafted by model", topic);
                return LearningPath {
                    generated_path: true,
                    steps: parse_generated_steps(&text, topic),
                    summary: format!("Personalized path for {}", topic),
                };
            }
            Ok(_) => warn!("Learning path reply too short, using curated path"),
            Err(e) => warn!("Chat model unavailable, using curated path: {}", e),
        }

        curated_path(topic)
    }
}

/// Turn list-like lines of a model reply into steps
///
/// Lines starting with a digit, `-` or `•` count, up to five. Fewer than
/// three such lines yields the curated steps for `topic`.
pub fn parse_generated_steps(text: &str, topic: &str) -> Vec<LearningStep> {
    let steps: Vec<LearningStep> = text
        .lines()
        .map(str::trim)
        .filter(|line| {
            line.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '•')
        })
        .zip(1..=MAX_STEPS)
        .map(|(line, n)| {
            let title = line.trim_start_matches(|c: char| c.is_ascii_digit() || ".-•) ".contains(c));
            LearningStep::new(n, title, StepKind::for_step(n), 10 + 2 * n)
        })
        .collect();

    if steps.len() < MIN_PARSED_STEPS {
        debug!("Only {} steps parsed, using curated steps", steps.len());
        return curated_steps(topic);
    }

    steps
}

/// Hand-written path, chosen by keywords in the topic name
pub fn curated_path(topic: &str) -> LearningPath {
    LearningPath {
        generated_path: false,
        steps: curated_steps(topic),
        summary: format!("Remedial learning path for {}", topic),
    }
}

fn curated_steps(topic: &str) -> Vec<LearningStep> {
    use StepKind::{Exercise, Quiz, Video};

    let lower = topic.to_lowercase();
    let plan: [(String, StepKind, u32); 5] = if lower.contains("derivative") || lower.contains("calculus") {
        [
            ("Visual Introduction to Derivatives".into(), Video, 12),
            ("Understanding Rate of Change".into(), Video, 10),
            ("Basic Differentiation Rules Quiz".into(), Quiz, 15),
            ("Chain Rule Practice".into(), Exercise, 20),
            ("Comprehensive Derivatives Assessment".into(), Quiz, 25),
        ]
    } else if lower.contains("quadratic") || lower.contains("algebra") {
        [
            ("Quadratic Functions Overview".into(), Video, 10),
            ("Factoring Techniques".into(), Video, 12),
            ("Quadratic Formula Practice".into(), Exercise, 15),
            ("Graphing Parabolas".into(), Exercise, 18),
            ("Quadratic Equations Mastery Quiz".into(), Quiz, 20),
        ]
    } else if lower.contains("trig") || lower.contains("unit circle") {
        [
            ("Unit Circle Fundamentals".into(), Video, 15),
            ("Sine, Cosine, Tangent Explained".into(), Video, 12),
            ("Trig Ratios Practice".into(), Exercise, 15),
            ("Trig Identities Introduction".into(), Video, 10),
            ("Trigonometry Assessment".into(), Quiz, 20),
        ]
    } else {
        [
            (format!("Introduction to {}", topic), Video, 12),
            ("Core Concepts Review".into(), Video, 10),
            ("Fundamentals Check Quiz".into(), Quiz, 15),
            ("Guided Practice Problems".into(), Exercise, 20),
            ("Comprehensive Review".into(), Quiz, 25),
        ]
    };

    plan.into_iter()
        .zip(1..)
        .map(|((title, kind, minutes), n)| LearningStep::new(n, title, kind, minutes))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::{FakeInferenceClient, InferenceError};

    const DRAFT: &str = "Here is a plan for you:\n\
        1. Watch an intro to limits\n\
        2) Review one-sided limits\n\
        - Quick quiz on limit laws\n\
        • Practice squeeze theorem problems\n\
        5. Mixed exercises\n\
        6. Extra credit";

    #[test]
    fn test_parse_generated_steps() {
        let steps = parse_generated_steps(DRAFT, "Limits");
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0].topic, "Watch an intro to limits");
        assert_eq!(steps[1].topic, "Review one-sided limits");
        assert_eq!(steps[2].topic, "Quick quiz on limit laws");
        assert_eq!(steps[3].topic, "Practice squeeze theorem problems");
        assert_eq!(steps[0].kind, StepKind::Video);
        assert_eq!(steps[2].kind, StepKind::Quiz);
        assert_eq!(steps[4].kind, StepKind::Exercise);
        assert_eq!(steps[0].duration, "12 min");
        assert_eq!(steps[4].duration, "20 min");
    }

    #[test]
    fn test_too_few_steps_uses_curated() {
        let steps = parse_generated_steps("Study hard.\n1. Read the chapter", "Quadratic equations");
        assert_eq!(steps[0].topic, "Quadratic Functions Overview");
        assert_eq!(steps.len(), 5);
    }

    #[test]
    fn test_curated_topics() {
        assert_eq!(curated_path("Calculus - Derivatives").steps[0].topic, "Visual Introduction to Derivatives");
        assert_eq!(curated_path("Trigonometry").steps[0].topic, "Unit Circle Fundamentals");
        let path = curated_path("Probability");
        assert!(!path.generated_path);
        assert_eq!(path.steps[0].topic, "Introduction to Probability");
        assert_eq!(path.summary, "Remedial learning path for Probability");
        assert_eq!(path.steps[4].step, 5);
    }

    #[test]
    fn test_service_uses_model_draft() {
        let client = Arc::new(FakeInferenceClient::always_reply(DRAFT));
        let service = LearningPathService::new(client, "test-model");
        let request = LearningPathRequest {
            weakest_topic: "Limits".to_string(),
            ..Default::default()
        };
        let path = service.generate(&request);
        assert!(path.generated_path);
        assert_eq!(path.summary, "Personalized path for Limits");
    }

    #[test]
    fn test_service_falls_back() {
        let client = Arc::new(FakeInferenceClient::always_error(InferenceError::Disabled));
        let service = LearningPathService::new(client, "test-model");
        let path = service.generate(&LearningPathRequest::default());
        assert!(!path.generated_path);
        assert_eq!(path.summary, "Remedial learning path for Calculus - Derivatives");

        let client = Arc::new(FakeInferenceClient::always_reply("Too short."));
        let service = LearningPathService::new(client, "test-model");
        assert!(!service.generate(&LearningPathRequest::default()).generated_path);
    }

    #[test]
    fn test_step_serializes_type() {
        let json = serde_json::to_value(LearningStep::new(1, "Intro", StepKind::Video, 12)).unwrap();
        assert_eq!(json["type"], "video");
        assert_eq!(json["duration"], "12 min");
    }
}
