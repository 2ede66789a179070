//! Student risk prediction
//!
//! Zero-shot classification of a short performance profile, with a
//! rule-based score when the model is unavailable or its answer can't be used.

use crate::llm_client::InferenceClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Candidate labels for zero-shot classification
pub const RISK_LABELS: [&str; 3] = [
    "high risk of academic failure",
    "moderate risk needs support",
    "low risk performing well",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    /// Map a classification label to a level
    pub fn from_label(label: &str) -> Self {
        let label = label.to_lowercase();
        if label.contains("high") {
            RiskLevel::High
        } else if label.contains("moderate") {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }
}

fn default_score() -> f64 {
    50.0
}

fn default_weakest_topic() -> String {
    "Unknown".to_string()
}

/// Student metrics as sent by the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_score")]
    pub engagement_score: f64,
    #[serde(default = "default_score")]
    pub avg_quiz_score: f64,
    #[serde(default = "default_weakest_topic")]
    pub weakest_topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub factor: String,
    pub severity: Severity,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub risk_level: RiskLevel,
    /// Percent, one decimal
    pub confidence: f64,
    pub analysis: String,
    pub factors: Vec<RiskFactor>,
}

/// One entry of a batch prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchRiskEntry {
    pub student_id: String,
    pub student_name: String,
    #[serde(flatten)]
    pub assessment: RiskAssessment,
}

pub struct RiskPredictionService {
    client: Arc<dyn InferenceClient>,
    model: String,
}

impl RiskPredictionService {
    pub fn new(client: Arc<dyn InferenceClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn predict(&self, student: &StudentProfile) -> RiskAssessment {
        let description = describe(student);

        match self.client.classify(&self.model, &description, &RISK_LABELS) {
            Ok(scores) => {
                if let Some(top) = scores.first() {
                    let level = RiskLevel::from_label(&top.label);
                    debug!("Risk for '{}' from model: {:?} ({:.2})", student.name, level, top.score);
                    return RiskAssessment {
                        risk_level: level,
                        confidence: (top.score * 1000.0).round() / 10.0,
                        analysis: analysis(level, student),
                        factors: risk_factors(student.engagement_score, student.avg_quiz_score),
                    };
                }
                warn!("Classification returned no labels, using rule-based risk");
            }
            Err(e) => warn!("Classification unavailable, using rule-based risk: {}", e),
        }

        rule_based_prediction(student)
    }

    pub fn predict_batch(&self, students: &[StudentProfile]) -> Vec<BatchRiskEntry> {
        students
            .iter()
            .map(|s| BatchRiskEntry {
                student_id: s.id.clone(),
                student_name: s.name.clone(),
                assessment: self.predict(s),
            })
            .collect()
    }
}

/// Deterministic risk from the average of engagement and quiz score
pub fn rule_based_prediction(student: &StudentProfile) -> RiskAssessment {
    let combined = (student.engagement_score + student.avg_quiz_score) / 2.0;

    let (risk_level, confidence) = if combined < 55.0 {
        (RiskLevel::High, 85.0)
    } else if combined < 75.0 {
        (RiskLevel::Medium, 75.0)
    } else {
        (RiskLevel::Low, 80.0)
    };

    RiskAssessment {
        risk_level,
        confidence,
        analysis: analysis(risk_level, student),
        factors: risk_factors(student.engagement_score, student.avg_quiz_score),
    }
}

/// Risk factors from quiz performance and engagement
pub fn risk_factors(engagement: f64, quiz_score: f64) -> Vec<RiskFactor> {
    let mut factors = Vec::new();

    if quiz_score < 60.0 {
        factors.push(factor("Low quiz performance", Severity::High, quiz_score));
    } else if quiz_score < 75.0 {
        factors.push(factor("Below average quiz scores", Severity::Medium, quiz_score));
    }

    if engagement < 50.0 {
        factors.push(factor("Low engagement", Severity::High, engagement));
    } else if engagement < 70.0 {
        factors.push(factor("Moderate engagement", Severity::Medium, engagement));
    }

    factors
}

/// Render a score as a percentage, dropping a zero fraction ("72%", "72.5%")
pub fn format_percent(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}%", value as i64)
    } else {
        format!("{}%", value)
    }
}

fn factor(name: &str, severity: Severity, value: f64) -> RiskFactor {
    RiskFactor {
        factor: name.to_string(),
        severity,
        value: format_percent(value),
    }
}

fn analysis(level: RiskLevel, student: &StudentProfile) -> String {
    match level {
        RiskLevel::High => format!(
            "Student shows concerning patterns with {} quiz average and {} engagement. Priority intervention recommended for {}.",
            format_percent(student.avg_quiz_score),
            format_percent(student.engagement_score),
            student.weakest_topic
        ),
        RiskLevel::Medium => format!(
            "Student performing adequately but showing some weakness in {}. Consider targeted support to prevent further decline.",
            student.weakest_topic
        ),
        RiskLevel::Low => "Student performing well overall. Continue monitoring and encourage advancement in challenging areas.".to_string(),
    }
}

fn describe(student: &StudentProfile) -> String {
    format!(
        "Student performance profile:\n- Average quiz score: {}\n- Engagement score: {}\n- Struggling with: {}",
        format_percent(student.avg_quiz_score),
        format_percent(student.engagement_score),
        student.weakest_topic
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(engagement: f64, quiz: f64) -> StudentProfile {
        StudentProfile {
            id: "s1".to_string(),
            name: "Alex".to_string(),
            engagement_score: engagement,
            avg_quiz_score: quiz,
            weakest_topic: "Derivatives".to_string(),
            risk_level: None,
        }
    }

    #[test]
    fn test_rule_based_thresholds() {
        let high = rule_based_prediction(&student(40.0, 50.0));
        assert_eq!(high.risk_level, RiskLevel::High);
        assert_eq!(high.confidence, 85.0);

        let medium = rule_based_prediction(&student(60.0, 60.0));
        assert_eq!(medium.risk_level, RiskLevel::Medium);
        assert_eq!(medium.confidence, 75.0);

        let low = rule_based_prediction(&student(75.0, 75.0));
        assert_eq!(low.risk_level, RiskLevel::Low);
        assert_eq!(low.confidence, 80.0);
    }

    #[test]
    fn test_boundaries_are_exclusive() {
        assert_eq!(rule_based_prediction(&student(55.0, 55.0)).risk_level, RiskLevel::Medium);
        assert_eq!(rule_based_prediction(&student(74.0, 75.0)).risk_level, RiskLevel::Medium);
    }

    #[test]
    fn test_risk_factors() {
        let factors = risk_factors(45.0, 58.5);
        assert_eq!(factors.len(), 2);
        assert_eq!(factors[0].factor, "Low quiz performance");
        assert_eq!(factors[0].value, "58.5%");
        assert_eq!(factors[1].severity, Severity::High);
        assert_eq!(factors[1].value, "45%");

        let factors = risk_factors(65.0, 70.0);
        assert_eq!(factors[0].severity, Severity::Medium);
        assert_eq!(factors[1].factor, "Moderate engagement");

        assert!(risk_factors(90.0, 90.0).is_empty());
    }

    #[test]
    fn test_from_label() {
        assert_eq!(RiskLevel::from_label(RISK_LABELS[0]), RiskLevel::High);
        assert_eq!(RiskLevel::from_label(RISK_LABELS[1]), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_label(RISK_LABELS[2]), RiskLevel::Low);
    }

    #[test]
    fn test_profile_defaults() {
        let profile: StudentProfile = serde_json::from_str(r#"{"name": "Sam"}"#).unwrap();
        assert_eq!(profile.engagement_score, 50.0);
        assert_eq!(profile.avg_quiz_score, 50.0);
        assert_eq!(profile.weakest_topic, "Unknown");
    }

    #[test]
    fn test_high_analysis_mentions_scores() {
        let text = rule_based_prediction(&student(40.0, 50.0)).analysis;
        assert_eq!(
            text,
            "Student shows concerning patterns with 50% quiz average and 40% engagement. Priority intervention recommended for Derivatives."
        );
    }
}
