use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Wire form used in query strings, matching the serde representation.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        };
        f.write_str(label)
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            other => Err(format!("unknown difficulty '{other}'")),
        }
    }
}

/// A study link attached to a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub text: String,
    pub url: String,
}

/// A follow-up probe nested under a question. Has no identity outside
/// its parent question.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub id: String,
    pub text: String,
    pub reference_answer: String,
}

/// An interview question. Immutable for the duration of a session; the
/// whole collection is replaced when a new generation/list/search completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub text: String,
    pub difficulty: Difficulty,
    /// Filled in when the question is looked up through the repository;
    /// the wire shape nests questions under their category group instead.
    #[serde(default)]
    pub category: String,
    pub reference_answer: String,
    #[serde(default)]
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub follow_ups: Vec<FollowUp>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Top-level shape held by the question repository: an ordered sequence of
/// category groups, each with its questions in backend order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryGroup {
    pub category: String,
    pub questions: Vec<Question>,
}

/// Server-side filtering and paging for question list/search requests.
/// Unset parameters are omitted from the wire, never sent as null.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadCriteria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_difficulty_round_trips_as_uppercase() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"MEDIUM\"");
        let back: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Difficulty::Medium);
    }

    #[test]
    fn test_difficulty_parses_case_insensitively() {
        assert_eq!("Hard".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("impossible".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_question_tolerates_missing_optional_fields() {
        let q: Question = serde_json::from_str(
            r#"{
                "id": "net1",
                "text": "What is TCP?",
                "difficulty": "EASY",
                "referenceAnswer": "A connection-oriented transport protocol."
            }"#,
        )
        .unwrap();
        assert!(q.resources.is_empty());
        assert!(q.follow_ups.is_empty());
        assert!(q.tags.is_empty());
        assert_eq!(q.category, "");
    }
}
