//! Class-wide daily insight
//!
//! Pure aggregation over student profiles. Rounded figures use
//! half-to-even rounding.

use crate::risk::{RiskLevel, StudentProfile};
use serde::{Deserialize, Serialize};

fn default_weakest_topic() -> String {
    "Unknown".to_string()
}

/// One row of the class roster.
///
/// Same wire shape as [`StudentProfile`], but a missing score counts as 0
/// here rather than the neutral 50 the risk classifier assumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassMember {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub engagement_score: f64,
    #[serde(default)]
    pub avg_quiz_score: f64,
    #[serde(default = "default_weakest_topic")]
    pub weakest_topic: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

impl From<StudentProfile> for ClassMember {
    fn from(student: StudentProfile) -> Self {
        Self {
            id: student.id,
            name: student.name,
            engagement_score: student.engagement_score,
            avg_quiz_score: student.avg_quiz_score,
            weakest_topic: student.weakest_topic,
            risk_level: student.risk_level,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trend {
    pub metric: String,
    pub value: String,
    pub trend: TrendDirection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub action: String,
    pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyInsight {
    pub insight: String,
    pub trends: Vec<Trend>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus_topic: Option<String>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

/// Summary figures the insight is built from
#[derive(Debug, Clone, PartialEq)]
pub struct ClassStats {
    pub total: usize,
    pub avg_engagement: f64,
    pub avg_quiz: f64,
    pub high_risk: usize,
    pub focus_topic: String,
    pub focus_count: usize,
}

impl ClassStats {
    pub fn from_students(students: &[ClassMember]) -> Option<Self> {
        if students.is_empty() {
            return None;
        }

        let total = students.len();
        let avg_engagement = students.iter().map(|s| s.engagement_score).sum::<f64>() / total as f64;
        let avg_quiz = students.iter().map(|s| s.avg_quiz_score).sum::<f64>() / total as f64;
        let high_risk = students
            .iter()
            .filter(|s| s.risk_level == Some(RiskLevel::High))
            .count();

        // Counted in first-seen order so the earliest topic wins a tie
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for s in students {
            match counts.iter_mut().find(|(topic, _)| *topic == s.weakest_topic) {
                Some((_, n)) => *n += 1,
                None => counts.push((&s.weakest_topic, 1)),
            }
        }
        let (focus_topic, focus_count) = counts
            .into_iter()
            .fold(("Unknown", 0), |best, cur| if cur.1 > best.1 { cur } else { best });

        Some(Self {
            total,
            avg_engagement,
            avg_quiz,
            high_risk,
            focus_topic: focus_topic.to_string(),
            focus_count,
        })
    }
}

fn round(value: f64) -> i64 {
    value.round_ties_even() as i64
}

pub fn daily_insight(students: &[ClassMember]) -> DailyInsight {
    let Some(stats) = ClassStats::from_students(students) else {
        return DailyInsight {
            insight: "No student data available.".to_string(),
            trends: Vec::new(),
            focus_topic: None,
            recommendations: Vec::new(),
        };
    };

    DailyInsight {
        insight: insight_text(&stats),
        trends: trends(&stats),
        focus_topic: Some(stats.focus_topic.clone()),
        recommendations: recommendations(&stats),
    }
}

fn insight_text(stats: &ClassStats) -> String {
    if stats.high_risk as f64 > stats.total as f64 * 0.3 {
        format!(
            "⚠️ Alert: {} students ({}%) are at high risk. Most are struggling with {}. Consider a class review session.",
            stats.high_risk,
            round(stats.high_risk as f64 / stats.total as f64 * 100.0),
            stats.focus_topic
        )
    } else if stats.avg_engagement < 60.0 {
        format!(
            "📊 Class engagement is at {}%. Consider interactive activities to boost participation.",
            round(stats.avg_engagement)
        )
    } else if stats.avg_quiz > 80.0 {
        format!(
            "🎉 Great news! Class average is {}%. Students are excelling - consider introducing advanced topics.",
            round(stats.avg_quiz)
        )
    } else {
        format!(
            "📈 Class is performing steadily with {}% average. Focus area: {} ({} students struggling).",
            round(stats.avg_quiz),
            stats.focus_topic,
            stats.focus_count
        )
    }
}

fn trends(stats: &ClassStats) -> Vec<Trend> {
    let direction = |up: bool| if up { TrendDirection::Up } else { TrendDirection::Down };

    vec![
        Trend {
            metric: "Class Average".to_string(),
            value: format!("{}%", round(stats.avg_quiz)),
            trend: direction(stats.avg_quiz > 70.0),
        },
        Trend {
            metric: "Engagement".to_string(),
            value: format!("{}%", round(stats.avg_engagement)),
            trend: direction(stats.avg_engagement > 65.0),
        },
        Trend {
            metric: "At Risk".to_string(),
            value: format!("{} students", stats.high_risk),
            trend: direction(stats.high_risk >= 3),
        },
    ]
}

fn recommendations(stats: &ClassStats) -> Vec<Recommendation> {
    let mut recs = Vec::new();

    if stats.high_risk > 2 {
        recs.push(Recommendation {
            priority: Priority::High,
            action: "Schedule one-on-one sessions with high-risk students".to_string(),
            impact: "Direct intervention for struggling students".to_string(),
        });
    }

    if stats.avg_engagement < 60.0 {
        recs.push(Recommendation {
            priority: Priority::Medium,
            action: "Introduce gamified learning activities".to_string(),
            impact: "Boost engagement through interactive content".to_string(),
        });
    }

    if stats.avg_quiz < 70.0 {
        recs.push(Recommendation {
            priority: Priority::Medium,
            action: "Review foundational concepts as a class".to_string(),
            impact: "Strengthen baseline understanding".to_string(),
        });
    }

    recs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(engagement: f64, quiz: f64, topic: &str, risk: Option<RiskLevel>) -> ClassMember {
        ClassMember {
            id: String::new(),
            name: String::new(),
            engagement_score: engagement,
            avg_quiz_score: quiz,
            weakest_topic: topic.to_string(),
            risk_level: risk,
        }
    }

    #[test]
    fn test_empty_class() {
        let insight = daily_insight(&[]);
        assert_eq!(insight.insight, "No student data available.");
        assert!(insight.trends.is_empty());
        assert!(insight.focus_topic.is_none());
    }

    #[test]
    fn test_high_risk_alert() {
        let students = vec![
            student(40.0, 45.0, "Limits", Some(RiskLevel::High)),
            student(80.0, 85.0, "Integrals", Some(RiskLevel::Low)),
            student(45.0, 50.0, "Limits", Some(RiskLevel::High)),
        ];
        let insight = daily_insight(&students);
        assert_eq!(
            insight.insight,
            "⚠️ Alert: 2 students (67%) are at high risk. Most are struggling with Limits. Consider a class review session."
        );
        assert_eq!(insight.focus_topic.as_deref(), Some("Limits"));
    }

    #[test]
    fn test_steady_class_and_trends() {
        let students = vec![
            student(70.0, 72.0, "Derivatives", None),
            student(75.0, 78.0, "Quadratics", None),
        ];
        let insight = daily_insight(&students);
        // first-seen wins the tie
        assert_eq!(
            insight.insight,
            "📈 Class is performing steadily with 75% average. Focus area: Derivatives (1 students struggling)."
        );
        assert_eq!(insight.trends[0].value, "75%");
        assert_eq!(insight.trends[0].trend, TrendDirection::Up);
        assert_eq!(insight.trends[1].trend, TrendDirection::Up);
        assert_eq!(insight.trends[2].value, "0 students");
        assert_eq!(insight.trends[2].trend, TrendDirection::Down);
        assert!(insight.recommendations.is_empty());
    }

    #[test]
    fn test_half_to_even_rounding() {
        let students = vec![student(50.0, 62.0, "Limits", None), student(51.0, 63.0, "Limits", None)];
        // engagement 50.5 rounds to 50
        assert_eq!(
            daily_insight(&students).insight,
            "📊 Class engagement is at 50%. Consider interactive activities to boost participation."
        );
    }

    #[test]
    fn test_recommendations() {
        let students: Vec<ClassMember> = (0..4)
            .map(|_| student(40.0, 50.0, "Limits", Some(RiskLevel::High)))
            .collect();
        let recs = daily_insight(&students).recommendations;
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0].priority, Priority::High);
        assert_eq!(recs[2].action, "Review foundational concepts as a class");
    }

    #[test]
    fn test_excelling_class() {
        let students = vec![student(90.0, 88.0, "Limits", Some(RiskLevel::Low))];
        let insight = daily_insight(&students);
        assert!(insight.insight.starts_with("🎉 Great news! Class average is 88%."));
        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["focusTopic"], "Limits");
        assert_eq!(json["trends"][2]["trend"], "down");
    }

    #[test]
    fn test_missing_scores_count_as_zero() {
        let students: Vec<ClassMember> = serde_json::from_str(
            r#"[{"name": "Ana", "avgQuizScore": 90}, {"name": "Ben", "avgQuizScore": 70}]"#,
        )
        .unwrap();
        assert_eq!(students[0].engagement_score, 0.0);
        assert_eq!(students[0].weakest_topic, "Unknown");

        let insight = daily_insight(&students);
        assert_eq!(
            insight.insight,
            "📊 Class engagement is at 0%. Consider interactive activities to boost participation."
        );
        assert_eq!(insight.trends[0].value, "80%");
    }

    #[test]
    fn test_profile_keeps_its_scores() {
        let profile: StudentProfile = serde_json::from_str(r#"{"name": "Ana"}"#).unwrap();
        let member = ClassMember::from(profile);
        assert_eq!(member.engagement_score, 50.0);
        assert_eq!(member.avg_quiz_score, 50.0);
    }
}
