use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::question::FollowUp;

/// Payload for submitting a practice answer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: String,
    pub answer_text: String,
    /// Seconds spent before submitting.
    pub time_spent: u32,
}

/// Receipt returned by the backend for a submitted answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAnswer {
    pub id: String,
    pub question_id: String,
    pub answer_text: String,
    pub time_spent: u32,
    pub submitted_at: DateTime<Utc>,
}

/// AI scoring result for one answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiFeedback {
    /// 0–100.
    pub score: u8,
    pub highlights: String,
    pub improvements: String,
    pub suggestions: String,
    pub follow_up_question: Option<FollowUp>,
    pub evaluated_at: DateTime<Utc>,
}

/// One row of answer history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub id: String,
    pub question_id: String,
    pub question_text: String,
    pub answer_text: String,
    pub score: u8,
    pub time_spent: u32,
    pub submitted_at: DateTime<Utc>,
    pub category: String,
}

/// Paged answer history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerHistory {
    pub answers: Vec<AnswerRecord>,
    pub total: usize,
    pub page: u32,
    pub page_size: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStats {
    pub total_answered: u32,
    pub average_score: f64,
    pub correct_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityDay {
    pub date: NaiveDate,
    pub answers_count: u32,
    pub average_score: f64,
}

/// Aggregate practice statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerStatistics {
    pub total_answered: u32,
    pub average_score: f64,
    /// Seconds across all recorded answers.
    pub total_time_spent: u64,
    pub category_stats: BTreeMap<String, CategoryStats>,
    #[serde(default)]
    pub recent_activity: Vec<ActivityDay>,
}
