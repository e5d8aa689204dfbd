//! Copy and export helpers for question lists. Pure string builders plus
//! one file writer; formatting mirrors what the product shows on screen.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::models::question::{CategoryGroup, Question};

/// Clipboard-style listing: questions numbered globally across categories.
pub fn format_questions_for_copy(groups: &[CategoryGroup]) -> String {
    let mut content = String::new();
    let mut index = 1;
    for group in groups {
        content.push_str(&format!("\n--- {} ---\n", group.category));
        for question in &group.questions {
            content.push_str(&format!(
                "{index}. {} (difficulty: {})\n",
                question.text, question.difficulty
            ));
            index += 1;
        }
    }
    content.trim().to_string()
}

/// Collects questions by id across all groups, each merged with its
/// category name. Unknown ids are skipped.
pub fn collect_by_ids(groups: &[CategoryGroup], ids: &[String]) -> Vec<Question> {
    let mut selected = Vec::new();
    for group in groups {
        for question in &group.questions {
            if ids.iter().any(|id| id == &question.id) {
                let mut question = question.clone();
                question.category = group.category.clone();
                selected.push(question);
            }
        }
    }
    selected
}

/// Plain-text export with reference answers.
pub fn export_text(questions: &[Question]) -> Result<String> {
    if questions.is_empty() {
        bail!("no data to export");
    }
    let mut content = String::new();
    for (i, question) in questions.iter().enumerate() {
        content.push_str(&format!(
            "{}. {}\n   category: {}\n   difficulty: {}\n",
            i + 1,
            question.text,
            question.category,
            question.difficulty
        ));
        if !question.reference_answer.is_empty() {
            content.push_str(&format!(
                "   reference answer: {}\n",
                question.reference_answer
            ));
        }
        content.push('\n');
    }
    Ok(content)
}

/// Pretty-printed JSON export.
pub fn export_json(questions: &[Question]) -> Result<String> {
    if questions.is_empty() {
        bail!("no data to export");
    }
    serde_json::to_string_pretty(questions).context("serializing questions")
}

pub fn write_export(path: &Path, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("writing {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;

    fn groups() -> Vec<CategoryGroup> {
        vec![
            CategoryGroup {
                category: "Networking".to_string(),
                questions: vec![
                    Question {
                        id: "net1".to_string(),
                        text: "What is TCP?".to_string(),
                        difficulty: Difficulty::Easy,
                        category: String::new(),
                        reference_answer: "A transport protocol.".to_string(),
                        resources: vec![],
                        follow_ups: vec![],
                        tags: vec![],
                    },
                    Question {
                        id: "net2".to_string(),
                        text: "What is UDP?".to_string(),
                        difficulty: Difficulty::Medium,
                        category: String::new(),
                        reference_answer: String::new(),
                        resources: vec![],
                        follow_ups: vec![],
                        tags: vec![],
                    },
                ],
            },
            CategoryGroup {
                category: "Algorithms".to_string(),
                questions: vec![Question {
                    id: "ds1".to_string(),
                    text: "Explain quicksort.".to_string(),
                    difficulty: Difficulty::Medium,
                    category: String::new(),
                    reference_answer: String::new(),
                    resources: vec![],
                    follow_ups: vec![],
                    tags: vec![],
                }],
            },
        ]
    }

    #[test]
    fn test_copy_format_numbers_globally() {
        let text = format_questions_for_copy(&groups());
        assert!(text.contains("--- Networking ---"));
        assert!(text.contains("1. What is TCP?"));
        assert!(text.contains("2. What is UDP?"));
        assert!(text.contains("3. Explain quicksort."));
    }

    #[test]
    fn test_collect_by_ids_merges_category_and_skips_unknown() {
        let selected = collect_by_ids(
            &groups(),
            &["ds1".to_string(), "ghost".to_string()],
        );
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].category, "Algorithms");
    }

    #[test]
    fn test_export_text_includes_reference_answer_when_present() {
        let selected = collect_by_ids(&groups(), &["net1".to_string(), "net2".to_string()]);
        let text = export_text(&selected).unwrap();
        assert!(text.contains("reference answer: A transport protocol."));
        assert_eq!(text.matches("reference answer").count(), 1);
    }

    #[test]
    fn test_empty_export_is_an_error() {
        assert!(export_text(&[]).is_err());
        assert!(export_json(&[]).is_err());
    }

    #[test]
    fn test_export_json_round_trips() {
        let selected = collect_by_ids(&groups(), &["net1".to_string()]);
        let json = export_json(&selected).unwrap();
        let back: Vec<Question> = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back[0].id, "net1");
    }
}
