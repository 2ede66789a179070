//! MathPulse Common - tutoring services with deterministic fallbacks
//!
//! Every service asks the hosted model first and falls back to rule-based
//! output when the call fails or the result is unusable.

pub mod analytics;
pub mod config;
pub mod dialogue;
pub mod error;
pub mod learning_path;
pub mod llm_client;
pub mod risk;
pub mod tutor;

pub use analytics::{daily_insight, ClassMember, DailyInsight};
pub use config::MathPulseConfig;
pub use dialogue::{fallback_response, Message, Sender};
pub use error::MathPulseError;
pub use learning_path::{LearningPath, LearningPathRequest, LearningPathService};
pub use llm_client::{
    FakeInferenceClient, HttpInferenceClient, InferenceClient, InferenceConfig, InferenceError,
};
pub use risk::{
    BatchRiskEntry, RiskAssessment, RiskLevel, RiskPredictionService, StudentProfile,
};
pub use tutor::{ReplySource, TutorReply, TutorService};
