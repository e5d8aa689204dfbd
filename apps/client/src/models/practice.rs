use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry in the mistake log. Keyed uniquely by `question_id`: recording
/// a mistake for an already-logged question overwrites the prior entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MistakeEntry {
    pub question_id: String,
    pub user_answer: String,
    /// 0–100.
    pub score: u8,
    pub feedback: String,
    pub timestamp: DateTime<Utc>,
    pub category: String,
}

/// A user-curated question collection. `question_ids` is ordered and
/// contains no duplicates; `updated_at` is refreshed by the backend on
/// every membership or metadata change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSet {
    pub id: String,
    pub name: String,
    pub question_ids: Vec<String>,
    pub user_id: String,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Options supplied when creating a practice set.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOptions {
    pub is_public: bool,
    pub description: String,
}

/// Partial update for practice set metadata. `None` fields are left
/// untouched by the backend.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mistake_entry_uses_camel_case_wire_names() {
        let entry = MistakeEntry {
            question_id: "net1".to_string(),
            user_answer: "it routes packets".to_string(),
            score: 40,
            feedback: "Review the transport layer.".to_string(),
            timestamp: Utc::now(),
            category: "Networking".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert!(json.get("questionId").is_some());
        assert!(json.get("userAnswer").is_some());
        assert!(json.get("question_id").is_none());
    }

    #[test]
    fn test_practice_set_update_omits_unset_fields() {
        let update = PracticeSetUpdate {
            name: Some("Renamed".to_string()),
            is_public: None,
        };
        let json = serde_json::to_value(&update).unwrap();
        assert_eq!(json.get("name").unwrap(), "Renamed");
        assert!(json.get("isPublic").is_none());
    }
}
