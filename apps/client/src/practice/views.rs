//! The derived-view projection: which slice of the question repository the
//! user is currently looking at. Pure and recomputed on demand — the
//! recomputation trigger is the caller asking again, not a hidden reactive
//! graph.

use std::collections::HashSet;

use crate::models::practice::{MistakeEntry, PracticeSet};
use crate::models::question::CategoryGroup;

/// Which projection of the repository is active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewSelector {
    #[default]
    All,
    Favorites,
    Mistakes,
    Set(String),
}

/// Category/difficulty filtering, honored only under [`ViewSelector::All`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub difficulty: Option<crate::models::question::Difficulty>,
}

/// Computes the active projection. Stable: category and question relative
/// order is preserved from `groups`; membership filtering drops categories
/// left empty; ids that no longer exist in the repository are silently
/// absent from every view.
pub fn filtered_questions(
    groups: &[CategoryGroup],
    view: &ViewSelector,
    filters: &FilterCriteria,
    favorites: &HashSet<String>,
    mistakes: &[MistakeEntry],
    sets: &[PracticeSet],
) -> Vec<CategoryGroup> {
    let mut result: Vec<CategoryGroup> = match view {
        ViewSelector::All => groups.to_vec(),
        ViewSelector::Favorites => retain_members(groups, |id| favorites.contains(id)),
        ViewSelector::Mistakes => {
            retain_members(groups, |id| mistakes.iter().any(|m| m.question_id == id))
        }
        ViewSelector::Set(set_id) => match sets.iter().find(|s| &s.id == set_id) {
            Some(set) => retain_members(groups, |id| set.question_ids.iter().any(|q| q == id)),
            None => Vec::new(),
        },
    };

    if *view == ViewSelector::All {
        if let Some(category) = &filters.category {
            result.retain(|group| &group.category == category);
        }
        if let Some(difficulty) = filters.difficulty {
            for group in &mut result {
                group.questions.retain(|q| q.difficulty == difficulty);
            }
            result.retain(|group| !group.questions.is_empty());
        }
    }

    result
}

fn retain_members(groups: &[CategoryGroup], keep: impl Fn(&str) -> bool) -> Vec<CategoryGroup> {
    groups
        .iter()
        .map(|group| CategoryGroup {
            category: group.category.clone(),
            questions: group
                .questions
                .iter()
                .filter(|q| keep(&q.id))
                .cloned()
                .collect(),
        })
        .filter(|group| !group.questions.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::practice::PracticeSet;
    use crate::models::question::{Difficulty, Question};
    use chrono::Utc;

    fn question(id: &str, difficulty: Difficulty) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {id}"),
            difficulty,
            category: String::new(),
            reference_answer: String::new(),
            resources: vec![],
            follow_ups: vec![],
            tags: vec![],
        }
    }

    fn groups() -> Vec<CategoryGroup> {
        vec![
            CategoryGroup {
                category: "Networking".to_string(),
                questions: vec![
                    question("net1", Difficulty::Easy),
                    question("net2", Difficulty::Medium),
                ],
            },
            CategoryGroup {
                category: "Algorithms".to_string(),
                questions: vec![question("ds1", Difficulty::Medium)],
            },
        ]
    }

    fn mistake(id: &str) -> MistakeEntry {
        MistakeEntry {
            question_id: id.to_string(),
            user_answer: String::new(),
            score: 40,
            feedback: String::new(),
            timestamp: Utc::now(),
            category: String::new(),
        }
    }

    fn set(id: &str, question_ids: &[&str]) -> PracticeSet {
        PracticeSet {
            id: id.to_string(),
            name: format!("Set {id}"),
            question_ids: question_ids.iter().map(|s| s.to_string()).collect(),
            user_id: "u1".to_string(),
            is_public: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_all_view_without_filters_is_identity() {
        let groups = groups();
        let result = filtered_questions(
            &groups,
            &ViewSelector::All,
            &FilterCriteria::default(),
            &HashSet::new(),
            &[],
            &[],
        );
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].category, "Networking");
        assert_eq!(result[0].questions[0].id, "net1");
        assert_eq!(result[1].questions[0].id, "ds1");
    }

    #[test]
    fn test_favorites_view_drops_empty_categories() {
        let groups = groups();
        let favorites: HashSet<String> = ["net2".to_string()].into();
        let result = filtered_questions(
            &groups,
            &ViewSelector::Favorites,
            &FilterCriteria::default(),
            &favorites,
            &[],
            &[],
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Networking");
        assert_eq!(result[0].questions.len(), 1);
        assert_eq!(result[0].questions[0].id, "net2");
    }

    #[test]
    fn test_mistakes_view_keeps_only_logged_ids() {
        let groups = groups();
        let mistakes = vec![mistake("ds1")];
        let result = filtered_questions(
            &groups,
            &ViewSelector::Mistakes,
            &FilterCriteria::default(),
            &HashSet::new(),
            &mistakes,
            &[],
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Algorithms");
    }

    #[test]
    fn test_missing_set_yields_empty_sequence() {
        let groups = groups();
        let result = filtered_questions(
            &groups,
            &ViewSelector::Set("ghost".to_string()),
            &FilterCriteria::default(),
            &HashSet::new(),
            &[],
            &[],
        );
        assert!(result.is_empty());
    }

    #[test]
    fn test_set_view_projects_members_only() {
        let groups = groups();
        let sets = vec![set("s1", &["net1"])];
        let result = filtered_questions(
            &groups,
            &ViewSelector::Set("s1".to_string()),
            &FilterCriteria::default(),
            &HashSet::new(),
            &[],
            &sets,
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Networking");
        assert_eq!(result[0].questions.len(), 1);
        assert_eq!(result[0].questions[0].id, "net1");
    }

    #[test]
    fn test_dangling_ids_are_silently_excluded() {
        let groups = groups();
        let favorites: HashSet<String> = ["net1".to_string(), "gone".to_string()].into();
        let result = filtered_questions(
            &groups,
            &ViewSelector::Favorites,
            &FilterCriteria::default(),
            &favorites,
            &[],
            &[],
        );
        let ids: Vec<&str> = result
            .iter()
            .flat_map(|g| g.questions.iter().map(|q| q.id.as_str()))
            .collect();
        assert_eq!(ids, vec!["net1"]);
    }

    #[test]
    fn test_category_filter_applies_only_under_all() {
        let groups = groups();
        let filters = FilterCriteria {
            category: Some("Algorithms".to_string()),
            difficulty: None,
        };
        let all = filtered_questions(
            &groups,
            &ViewSelector::All,
            &filters,
            &HashSet::new(),
            &[],
            &[],
        );
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].category, "Algorithms");

        // Same filters under Favorites are ignored.
        let favorites: HashSet<String> = ["net1".to_string()].into();
        let favs = filtered_questions(
            &groups,
            &ViewSelector::Favorites,
            &filters,
            &favorites,
            &[],
            &[],
        );
        assert_eq!(favs.len(), 1);
        assert_eq!(favs[0].category, "Networking");
    }

    #[test]
    fn test_difficulty_filter_drops_emptied_categories() {
        let groups = groups();
        let filters = FilterCriteria {
            category: None,
            difficulty: Some(Difficulty::Easy),
        };
        let result = filtered_questions(
            &groups,
            &ViewSelector::All,
            &filters,
            &HashSet::new(),
            &[],
            &[],
        );
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].category, "Networking");
        assert_eq!(result[0].questions[0].id, "net1");
    }

    #[test]
    fn test_derivation_leaves_inputs_untouched() {
        let groups = groups();
        let favorites: HashSet<String> = ["net1".to_string()].into();
        let mistakes = vec![mistake("ds1")];
        let sets = vec![set("s1", &["net2"])];

        let _ = filtered_questions(
            &groups,
            &ViewSelector::Set("s1".to_string()),
            &FilterCriteria::default(),
            &favorites,
            &mistakes,
            &sets,
        );

        assert_eq!(groups[0].questions.len(), 2);
        assert_eq!(favorites.len(), 1);
        assert_eq!(mistakes.len(), 1);
        assert_eq!(sets[0].question_ids, vec!["net2".to_string()]);
    }
}
