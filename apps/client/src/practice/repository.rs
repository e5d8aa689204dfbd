use crate::models::question::{CategoryGroup, Question};

/// Holds the canonical in-memory question set for the session, grouped by
/// category. Content is replaced wholesale on every load/generate/search —
/// never merged — so ids referenced by favorites, the mistake log, or
/// practice sets may dangle across reloads; derived views tolerate that.
#[derive(Debug, Default)]
pub struct QuestionRepository {
    groups: Vec<CategoryGroup>,
}

impl QuestionRepository {
    pub fn replace(&mut self, groups: Vec<CategoryGroup>) {
        self.groups = groups;
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.iter().all(|g| g.questions.is_empty())
    }

    /// Linear scan in category-then-within-category order; the first match
    /// wins, which fixes the winner if an id were ever duplicated. The
    /// returned question carries its group's category name.
    pub fn find_by_id(&self, id: &str) -> Option<Question> {
        for group in &self.groups {
            if let Some(question) = group.questions.iter().find(|q| q.id == id) {
                let mut question = question.clone();
                question.category = group.category.clone();
                return Some(question);
            }
        }
        None
    }

    /// Distinct category names in first-seen order, recomputed per call.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for group in &self.groups {
            if !seen.iter().any(|c| c == &group.category) {
                seen.push(group.category.clone());
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::question::Difficulty;

    fn question(id: &str) -> Question {
        Question {
            id: id.to_string(),
            text: format!("Question {id}"),
            difficulty: Difficulty::Easy,
            category: String::new(),
            reference_answer: String::new(),
            resources: vec![],
            follow_ups: vec![],
            tags: vec![],
        }
    }

    fn group(category: &str, ids: &[&str]) -> CategoryGroup {
        CategoryGroup {
            category: category.to_string(),
            questions: ids.iter().map(|id| question(id)).collect(),
        }
    }

    #[test]
    fn test_find_by_id_merges_category_name() {
        let mut repo = QuestionRepository::default();
        repo.replace(vec![
            group("Networking", &["net1", "net2"]),
            group("Algorithms", &["ds1"]),
        ]);
        let found = repo.find_by_id("ds1").unwrap();
        assert_eq!(found.category, "Algorithms");
    }

    #[test]
    fn test_find_by_id_absence_is_none_not_error() {
        let mut repo = QuestionRepository::default();
        repo.replace(vec![group("Networking", &["net1"])]);
        assert!(repo.find_by_id("ghost").is_none());
    }

    #[test]
    fn test_find_by_id_first_match_wins_across_duplicate_ids() {
        let mut repo = QuestionRepository::default();
        repo.replace(vec![
            group("First", &["dup"]),
            group("Second", &["dup"]),
        ]);
        assert_eq!(repo.find_by_id("dup").unwrap().category, "First");
    }

    #[test]
    fn test_replace_is_wholesale_not_merge() {
        let mut repo = QuestionRepository::default();
        repo.replace(vec![group("Networking", &["net1"])]);
        repo.replace(vec![group("Algorithms", &["ds1"])]);
        assert!(repo.find_by_id("net1").is_none());
        assert_eq!(repo.categories(), vec!["Algorithms".to_string()]);
    }

    #[test]
    fn test_categories_deduplicate_in_first_seen_order() {
        let mut repo = QuestionRepository::default();
        repo.replace(vec![
            group("Networking", &["net1"]),
            group("Algorithms", &["ds1"]),
            group("Networking", &["net2"]),
        ]);
        assert_eq!(
            repo.categories(),
            vec!["Networking".to_string(), "Algorithms".to_string()]
        );
    }
}
