//! Mock gateway backend: synthesized data, simulated latency, and
//! file-backed persistence so favorites/mistakes/sets survive restarts.
//!
//! Every operation sleeps a realistic amount and returns a structurally
//! valid envelope, so the engine exercises exactly the same code paths it
//! does against the live backend.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use rand::Rng;
use tokio::time::sleep;

use crate::gateway::mock_bank::{mock_feedback, sample_question_bank};
use crate::gateway::{Envelope, ErrorCode, QuestionGateway};
use crate::models::answer::{
    ActivityDay, AiFeedback, AnswerHistory, AnswerRecord, AnswerStatistics, AnswerSubmission,
    CategoryStats, UserAnswer,
};
use crate::models::practice::{MistakeEntry, PracticeSet, PracticeSetUpdate, SetOptions};
use crate::models::question::{CategoryGroup, FollowUp, LoadCriteria, Question};
use crate::persist::KvStore;

const FAVORITES_KEY: &str = "favorites";
const MISTAKES_KEY: &str = "mistakes";
const PRACTICE_SETS_KEY: &str = "practice_sets";

const GENERATE_DELAY: Duration = Duration::from_millis(1500);
const SCORE_DELAY: Duration = Duration::from_millis(1500);
const SUBMIT_DELAY: Duration = Duration::from_millis(800);
const LIST_DELAY: Duration = Duration::from_millis(500);
const USER_DATA_DELAY: Duration = Duration::from_millis(300);
const MUTATE_DELAY: Duration = Duration::from_millis(200);

pub struct MockGateway {
    store: KvStore,
}

impl MockGateway {
    pub fn new(store: KvStore) -> Self {
        Self { store }
    }

    fn time_based_id(prefix: &str) -> String {
        format!("{prefix}_{}", Utc::now().timestamp_millis())
    }
}

#[async_trait]
impl QuestionGateway for MockGateway {
    async fn generate_questions(
        &self,
        _resume_path: &Path,
        _job_description: &str,
    ) -> Envelope<Vec<CategoryGroup>> {
        sleep(GENERATE_DELAY).await;
        Envelope::ok(sample_question_bank(), "Questions generated successfully")
    }

    async fn list_questions(&self, _criteria: &LoadCriteria) -> Envelope<Vec<CategoryGroup>> {
        sleep(LIST_DELAY).await;
        Envelope::ok(sample_question_bank(), "Question list loaded")
    }

    async fn search_questions(
        &self,
        query: &str,
        _criteria: &LoadCriteria,
    ) -> Envelope<Vec<CategoryGroup>> {
        sleep(USER_DATA_DELAY).await;
        let needle = query.to_lowercase();
        let hits: Vec<CategoryGroup> = sample_question_bank()
            .into_iter()
            .map(|mut group| {
                group.questions.retain(|q| {
                    q.text.to_lowercase().contains(&needle)
                        || group.category.to_lowercase().contains(&needle)
                });
                group
            })
            .filter(|group| !group.questions.is_empty())
            .collect();
        Envelope::ok(hits, "Search complete")
    }

    async fn question_detail(&self, question_id: &str) -> Envelope<Question> {
        sleep(MUTATE_DELAY).await;
        for group in sample_question_bank() {
            if let Some(question) = group.questions.into_iter().find(|q| q.id == question_id) {
                let mut question = question;
                question.category = group.category;
                return Envelope::ok(question, "Question detail loaded");
            }
        }
        Envelope::fail_with("Question not found", 404, ErrorCode::QuestionNotFound)
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> Envelope<UserAnswer> {
        sleep(SUBMIT_DELAY).await;
        let answer = UserAnswer {
            id: Self::time_based_id("answer"),
            question_id: submission.question_id.clone(),
            answer_text: submission.answer_text.clone(),
            time_spent: submission.time_spent,
            submitted_at: Utc::now(),
        };
        Envelope::ok(answer, "Answer submitted")
    }

    async fn score_answer(&self, _answer_id: &str, _question_id: &str) -> Envelope<AiFeedback> {
        sleep(SCORE_DELAY).await;
        let score: u8 = rand::thread_rng().gen_range(50..=100);
        let feedback = mock_feedback(score);
        let follow_up_question = (score >= 70).then(|| FollowUp {
            id: Self::time_based_id("followup"),
            text: "Can you walk through how this concept would apply in a real project?"
                .to_string(),
            reference_answer: "Look for a concrete scenario from your own experience and \
                               connect it back to the mechanism you just described."
                .to_string(),
        });
        Envelope::ok(
            AiFeedback {
                score,
                highlights: feedback.highlights,
                improvements: feedback.improvements,
                suggestions: feedback.suggestions,
                follow_up_question,
                evaluated_at: Utc::now(),
            },
            "AI scoring complete",
        )
    }

    async fn answer_history(&self, page: u32, page_size: u32) -> Envelope<AnswerHistory> {
        sleep(LIST_DELAY).await;
        let bank = sample_question_bank();
        let mut rng = rand::thread_rng();
        let answers: Vec<AnswerRecord> = (0..10)
            .map(|i| {
                let group = &bank[i % bank.len()];
                AnswerRecord {
                    id: format!("answer_{i}"),
                    question_id: format!("q_{i}"),
                    question_text: format!("Practice question #{}", i + 1),
                    answer_text: format!("Recorded answer #{}", i + 1),
                    score: rng.gen_range(60..=99),
                    time_spent: rng.gen_range(60..=360),
                    submitted_at: Utc::now() - ChronoDuration::days(i as i64),
                    category: group.category.clone(),
                }
            })
            .collect();
        let total = answers.len();
        Envelope::ok(
            AnswerHistory {
                answers,
                total,
                page,
                page_size,
            },
            "Answer history loaded",
        )
    }

    async fn answer_statistics(&self) -> Envelope<AnswerStatistics> {
        sleep(USER_DATA_DELAY).await;
        let category_stats = [
            ("Networking", 15, 82.3, 0.73),
            ("Data Structures & Algorithms", 20, 75.8, 0.65),
            ("Operating Systems", 10, 79.2, 0.70),
        ]
        .into_iter()
        .map(|(name, total_answered, average_score, correct_rate)| {
            (
                name.to_string(),
                CategoryStats {
                    total_answered,
                    average_score,
                    correct_rate,
                },
            )
        })
        .collect();
        let today = Utc::now().date_naive();
        let recent_activity = (0..3)
            .map(|i| ActivityDay {
                date: today - ChronoDuration::days(i),
                answers_count: 2 + i as u32,
                average_score: 80.0 - i as f64,
            })
            .collect();
        Envelope::ok(
            AnswerStatistics {
                total_answered: 45,
                average_score: 78.5,
                total_time_spent: 12_600,
                category_stats,
                recent_activity,
            },
            "Statistics loaded",
        )
    }

    async fn list_favorites(&self) -> Envelope<Vec<String>> {
        sleep(USER_DATA_DELAY).await;
        Envelope::ok(self.store.load(FAVORITES_KEY), "Favorites loaded")
    }

    async fn add_favorite(&self, question_id: &str) -> Envelope<()> {
        sleep(MUTATE_DELAY).await;
        let mut favorites: Vec<String> = self.store.load(FAVORITES_KEY);
        if !favorites.iter().any(|id| id == question_id) {
            favorites.push(question_id.to_string());
        }
        if let Err(e) = self.store.save(FAVORITES_KEY, &favorites) {
            return Envelope::fail(format!("Failed to persist favorites: {e}"), 500);
        }
        Envelope::ok((), "Added to favorites")
    }

    async fn remove_favorite(&self, question_id: &str) -> Envelope<()> {
        sleep(MUTATE_DELAY).await;
        let mut favorites: Vec<String> = self.store.load(FAVORITES_KEY);
        favorites.retain(|id| id != question_id);
        if let Err(e) = self.store.save(FAVORITES_KEY, &favorites) {
            return Envelope::fail(format!("Failed to persist favorites: {e}"), 500);
        }
        Envelope::ok((), "Removed from favorites")
    }

    async fn list_mistakes(&self) -> Envelope<Vec<MistakeEntry>> {
        sleep(USER_DATA_DELAY).await;
        Envelope::ok(self.store.load(MISTAKES_KEY), "Mistake log loaded")
    }

    async fn add_mistake(&self, entry: &MistakeEntry) -> Envelope<()> {
        sleep(MUTATE_DELAY).await;
        let mut mistakes: Vec<MistakeEntry> = self.store.load(MISTAKES_KEY);
        match mistakes
            .iter_mut()
            .find(|m| m.question_id == entry.question_id)
        {
            Some(existing) => *existing = entry.clone(),
            None => mistakes.push(entry.clone()),
        }
        if let Err(e) = self.store.save(MISTAKES_KEY, &mistakes) {
            return Envelope::fail(format!("Failed to persist mistake log: {e}"), 500);
        }
        Envelope::ok((), "Mistake recorded")
    }

    async fn mark_mastered(&self, question_id: &str) -> Envelope<()> {
        sleep(MUTATE_DELAY).await;
        let mut mistakes: Vec<MistakeEntry> = self.store.load(MISTAKES_KEY);
        mistakes.retain(|m| m.question_id != question_id);
        if let Err(e) = self.store.save(MISTAKES_KEY, &mistakes) {
            return Envelope::fail(format!("Failed to persist mistake log: {e}"), 500);
        }
        Envelope::ok((), "Marked as mastered")
    }

    async fn list_practice_sets(&self) -> Envelope<Vec<PracticeSet>> {
        sleep(USER_DATA_DELAY).await;
        Envelope::ok(self.store.load(PRACTICE_SETS_KEY), "Practice sets loaded")
    }

    async fn create_practice_set(
        &self,
        name: &str,
        options: &SetOptions,
    ) -> Envelope<PracticeSet> {
        sleep(USER_DATA_DELAY).await;
        let now = Utc::now();
        let set = PracticeSet {
            id: Self::time_based_id("set"),
            name: name.to_string(),
            question_ids: vec![],
            user_id: "mock_user".to_string(),
            is_public: options.is_public,
            created_at: now,
            updated_at: now,
        };
        let mut sets: Vec<PracticeSet> = self.store.load(PRACTICE_SETS_KEY);
        sets.push(set.clone());
        if let Err(e) = self.store.save(PRACTICE_SETS_KEY, &sets) {
            return Envelope::fail(format!("Failed to persist practice sets: {e}"), 500);
        }
        Envelope::ok(set, "Practice set created")
    }

    async fn update_practice_set(
        &self,
        set_id: &str,
        update: &PracticeSetUpdate,
    ) -> Envelope<PracticeSet> {
        sleep(USER_DATA_DELAY).await;
        let mut sets: Vec<PracticeSet> = self.store.load(PRACTICE_SETS_KEY);
        let Some(set) = sets.iter_mut().find(|s| s.id == set_id) else {
            return Envelope::fail_with(
                "Practice set not found",
                404,
                ErrorCode::PracticeSetNotFound,
            );
        };
        if let Some(name) = &update.name {
            set.name = name.clone();
        }
        if let Some(is_public) = update.is_public {
            set.is_public = is_public;
        }
        set.updated_at = Utc::now();
        let updated = set.clone();
        if let Err(e) = self.store.save(PRACTICE_SETS_KEY, &sets) {
            return Envelope::fail(format!("Failed to persist practice sets: {e}"), 500);
        }
        Envelope::ok(updated, "Practice set updated")
    }

    async fn delete_practice_set(&self, set_id: &str) -> Envelope<()> {
        sleep(MUTATE_DELAY).await;
        let mut sets: Vec<PracticeSet> = self.store.load(PRACTICE_SETS_KEY);
        sets.retain(|s| s.id != set_id);
        if let Err(e) = self.store.save(PRACTICE_SETS_KEY, &sets) {
            return Envelope::fail(format!("Failed to persist practice sets: {e}"), 500);
        }
        Envelope::ok((), "Practice set deleted")
    }

    async fn add_question_to_set(&self, set_id: &str, question_id: &str) -> Envelope<()> {
        sleep(MUTATE_DELAY).await;
        let mut sets: Vec<PracticeSet> = self.store.load(PRACTICE_SETS_KEY);
        let Some(set) = sets.iter_mut().find(|s| s.id == set_id) else {
            return Envelope::fail_with(
                "Practice set not found",
                404,
                ErrorCode::PracticeSetNotFound,
            );
        };
        if set.question_ids.iter().any(|id| id == question_id) {
            return Envelope::fail("Question already in this practice set", 200);
        }
        set.question_ids.push(question_id.to_string());
        set.updated_at = Utc::now();
        if let Err(e) = self.store.save(PRACTICE_SETS_KEY, &sets) {
            return Envelope::fail(format!("Failed to persist practice sets: {e}"), 500);
        }
        Envelope::ok((), "Question added to practice set")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gateway() -> (tempfile::TempDir, MockGateway) {
        let dir = tempfile::tempdir().unwrap();
        let store = KvStore::with_base_dir(dir.path()).unwrap();
        (dir, MockGateway::new(store))
    }

    #[tokio::test]
    async fn test_add_favorite_is_idempotent() {
        let (_dir, gw) = gateway();
        assert!(gw.add_favorite("net1").await.success);
        assert!(gw.add_favorite("net1").await.success);
        let favorites = gw.list_favorites().await.data.unwrap();
        assert_eq!(favorites, vec!["net1".to_string()]);
    }

    #[tokio::test]
    async fn test_remove_favorite_deletes_membership() {
        let (_dir, gw) = gateway();
        gw.add_favorite("net1").await;
        gw.add_favorite("ds1").await;
        assert!(gw.remove_favorite("net1").await.success);
        let favorites = gw.list_favorites().await.data.unwrap();
        assert_eq!(favorites, vec!["ds1".to_string()]);
    }

    #[tokio::test]
    async fn test_add_mistake_upserts_by_question_id() {
        let (_dir, gw) = gateway();
        let mut entry = MistakeEntry {
            question_id: "net1".to_string(),
            user_answer: "first try".to_string(),
            score: 40,
            feedback: "weak".to_string(),
            timestamp: Utc::now(),
            category: "Networking".to_string(),
        };
        gw.add_mistake(&entry).await;
        entry.user_answer = "second try".to_string();
        entry.score = 55;
        gw.add_mistake(&entry).await;

        let mistakes = gw.list_mistakes().await.data.unwrap();
        assert_eq!(mistakes.len(), 1);
        assert_eq!(mistakes[0].user_answer, "second try");
        assert_eq!(mistakes[0].score, 55);
    }

    #[tokio::test]
    async fn test_mark_mastered_on_absent_id_still_succeeds() {
        let (_dir, gw) = gateway();
        assert!(gw.mark_mastered("ghost").await.success);
    }

    #[tokio::test]
    async fn test_created_set_has_time_based_id_and_persists() {
        let (_dir, gw) = gateway();
        let set = gw
            .create_practice_set("Review", &SetOptions::default())
            .await
            .data
            .unwrap();
        assert!(set.id.starts_with("set_"));
        assert_eq!(set.user_id, "mock_user");

        let sets = gw.list_practice_sets().await.data.unwrap();
        assert_eq!(sets.len(), 1);
        assert_eq!(sets[0].name, "Review");
    }

    #[tokio::test]
    async fn test_duplicate_question_in_set_is_soft_failure() {
        let (_dir, gw) = gateway();
        let set = gw
            .create_practice_set("Review", &SetOptions::default())
            .await
            .data
            .unwrap();
        assert!(gw.add_question_to_set(&set.id, "net1").await.success);

        let dup = gw.add_question_to_set(&set.id, "net1").await;
        assert!(!dup.success);
        assert!(dup.error_code.is_none());
        assert!(dup.message.contains("already"));

        let sets = gw.list_practice_sets().await.data.unwrap();
        assert_eq!(sets[0].question_ids, vec!["net1".to_string()]);
    }

    #[tokio::test]
    async fn test_add_question_to_missing_set_fails_with_code() {
        let (_dir, gw) = gateway();
        let env = gw.add_question_to_set("set_missing", "net1").await;
        assert!(!env.success);
        assert_eq!(env.error_code, Some(ErrorCode::PracticeSetNotFound));
    }

    #[tokio::test]
    async fn test_update_practice_set_renames_and_bumps_updated_at() {
        let (_dir, gw) = gateway();
        let set = gw
            .create_practice_set("Old name", &SetOptions::default())
            .await
            .data
            .unwrap();
        let update = PracticeSetUpdate {
            name: Some("New name".to_string()),
            is_public: None,
        };
        let updated = gw.update_practice_set(&set.id, &update).await.data.unwrap();
        assert_eq!(updated.name, "New name");
        assert!(updated.updated_at >= set.updated_at);
    }

    #[tokio::test]
    async fn test_search_matches_question_text_and_category() {
        let (_dir, gw) = gateway();
        let hits = gw
            .search_questions("quicksort", &LoadCriteria::default())
            .await
            .data
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].category, "Data Structures & Algorithms");

        let by_category = gw
            .search_questions("networking", &LoadCriteria::default())
            .await
            .data
            .unwrap();
        assert_eq!(by_category.len(), 1);
        assert_eq!(by_category[0].questions.len(), 2);
    }

    #[tokio::test]
    async fn test_question_detail_merges_category() {
        let (_dir, gw) = gateway();
        let question = gw.question_detail("ds1").await.data.unwrap();
        assert_eq!(question.category, "Data Structures & Algorithms");

        let missing = gw.question_detail("nope").await;
        assert!(!missing.success);
        assert_eq!(missing.error_code, Some(ErrorCode::QuestionNotFound));
    }
}
