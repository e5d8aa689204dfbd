//! Practice state engine — owns favorites, the mistake log, custom practice
//! sets, the active view selector and filters, and the question repository.
//!
//! Every mutation follows the same protocol: call the gateway, and only on
//! a confirmed `success = true` envelope mutate local state and emit a
//! notification. On failure the local state is left untouched and the
//! failure message becomes an error notification. A mutation is never
//! partially applied.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use chrono::Utc;
use tracing::warn;

use crate::errors::AppError;
use crate::gateway::{Envelope, QuestionGateway};
use crate::models::answer::{
    AiFeedback, AnswerHistory, AnswerStatistics, AnswerSubmission, UserAnswer,
};
use crate::models::practice::{MistakeEntry, PracticeSet, PracticeSetUpdate, SetOptions};
use crate::models::question::{CategoryGroup, LoadCriteria, Question};
use crate::notify::{Level, Notification, Notifier};
use crate::resume::validate_resume_file;

pub mod repository;
pub mod views;

pub use views::{FilterCriteria, ViewSelector};

use repository::QuestionRepository;

pub struct PracticeEngine {
    gateway: Arc<dyn QuestionGateway>,
    repository: QuestionRepository,
    notifier: Notifier,
    favorites: HashSet<String>,
    mistakes: Vec<MistakeEntry>,
    practice_sets: Vec<PracticeSet>,
    view: ViewSelector,
    filters: FilterCriteria,
}

fn message_or(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

impl PracticeEngine {
    pub fn new(gateway: Arc<dyn QuestionGateway>) -> Self {
        Self {
            gateway,
            repository: QuestionRepository::default(),
            notifier: Notifier::new(),
            favorites: HashSet::new(),
            mistakes: Vec::new(),
            practice_sets: Vec::new(),
            view: ViewSelector::All,
            filters: FilterCriteria::default(),
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Question loading — repository content is replaced, never merged
    // ────────────────────────────────────────────────────────────────────

    pub async fn generate_questions(&mut self, resume_path: &Path, job_description: &str) -> bool {
        if let Err(e) = validate_resume_file(resume_path) {
            self.notifier.push(Level::Error, e.to_string());
            return false;
        }
        let envelope = self
            .gateway
            .generate_questions(resume_path, job_description)
            .await;
        self.replace_repository(envelope, Some("Questions generated successfully!"))
    }

    pub async fn load_questions(&mut self, criteria: &LoadCriteria) -> bool {
        let envelope = self.gateway.list_questions(criteria).await;
        self.replace_repository(envelope, None)
    }

    pub async fn search_questions(&mut self, query: &str) -> bool {
        let envelope = self
            .gateway
            .search_questions(query, &LoadCriteria::default())
            .await;
        self.replace_repository(envelope, None)
    }

    fn replace_repository(
        &mut self,
        envelope: Envelope<Vec<CategoryGroup>>,
        success_message: Option<&str>,
    ) -> bool {
        match envelope {
            Envelope {
                success: true,
                data: Some(groups),
                ..
            } => {
                self.repository.replace(groups);
                if let Some(message) = success_message {
                    self.notifier.push(Level::Success, message);
                }
                true
            }
            envelope => {
                self.notifier.push(
                    Level::Error,
                    message_or(envelope.message, "Failed to load questions, please retry"),
                );
                false
            }
        }
    }

    /// Fetches favorites, mistakes, and practice sets concurrently. Each
    /// outcome is handled on its own: a failed fetch is logged and that
    /// collection keeps its previous value; the others still apply.
    pub async fn load_user_data(&mut self) {
        let (favorites, mistakes, sets) = tokio::join!(
            self.gateway.list_favorites(),
            self.gateway.list_mistakes(),
            self.gateway.list_practice_sets(),
        );

        match favorites {
            Envelope {
                success: true,
                data: Some(ids),
                ..
            } => self.favorites = ids.into_iter().collect(),
            envelope => warn!("Failed to load favorites: {}", envelope.message),
        }
        match mistakes {
            Envelope {
                success: true,
                data: Some(entries),
                ..
            } => self.mistakes = entries,
            envelope => warn!("Failed to load mistake log: {}", envelope.message),
        }
        match sets {
            Envelope {
                success: true,
                data: Some(sets),
                ..
            } => self.practice_sets = sets,
            envelope => warn!("Failed to load practice sets: {}", envelope.message),
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Favorites
    // ────────────────────────────────────────────────────────────────────

    /// Flips membership and returns the new state. On gateway failure the
    /// prior membership is returned unchanged — favoriting is a soft,
    /// retryable action, and the error notification is the only signal.
    pub async fn toggle_favorite(&mut self, question_id: &str) -> bool {
        let was_favorite = self.favorites.contains(question_id);
        let envelope = if was_favorite {
            self.gateway.remove_favorite(question_id).await
        } else {
            self.gateway.add_favorite(question_id).await
        };

        if !envelope.success {
            self.notifier.push(
                Level::Error,
                message_or(envelope.message, "Operation failed, please retry"),
            );
            return was_favorite;
        }

        if was_favorite {
            self.favorites.remove(question_id);
            self.notifier.push(Level::Success, "Removed from favorites");
        } else {
            self.favorites.insert(question_id.to_string());
            self.notifier.push(Level::Success, "Added to favorites!");
        }
        !was_favorite
    }

    pub fn is_favorite(&self, question_id: &str) -> bool {
        self.favorites.contains(question_id)
    }

    // ────────────────────────────────────────────────────────────────────
    // Mistake log
    // ────────────────────────────────────────────────────────────────────

    /// Upserts the mistake entry for `question_id` — a second submission
    /// for the same question overwrites the first.
    pub async fn record_mistake(
        &mut self,
        question_id: &str,
        user_answer: &str,
        score: u8,
        feedback: &str,
        category: &str,
    ) {
        let entry = MistakeEntry {
            question_id: question_id.to_string(),
            user_answer: user_answer.to_string(),
            score,
            feedback: feedback.to_string(),
            timestamp: Utc::now(),
            category: category.to_string(),
        };
        let envelope = self.gateway.add_mistake(&entry).await;
        if !envelope.success {
            self.notifier.push(
                Level::Error,
                message_or(envelope.message, "Failed to record the mistake"),
            );
            return;
        }
        match self
            .mistakes
            .iter_mut()
            .find(|m| m.question_id == entry.question_id)
        {
            Some(existing) => *existing = entry,
            None => self.mistakes.push(entry),
        }
        self.notifier.push(Level::Warning, "Added to the mistake log");
    }

    /// Marks the question mastered: the entry is deleted entirely, not
    /// hidden. An absent entry is a no-op, not an error.
    pub async fn clear_mistake(&mut self, question_id: &str) {
        let envelope = self.gateway.mark_mastered(question_id).await;
        if !envelope.success {
            self.notifier.push(
                Level::Error,
                message_or(envelope.message, "Operation failed, please retry"),
            );
            return;
        }
        self.mistakes.retain(|m| m.question_id != question_id);
        self.notifier.push(Level::Success, "Marked as mastered!");
    }

    // ────────────────────────────────────────────────────────────────────
    // Practice sets
    // ────────────────────────────────────────────────────────────────────

    /// Appends the gateway-returned canonical set — the id is always
    /// backend-assigned, never synthesized here.
    pub async fn create_practice_set(
        &mut self,
        name: &str,
        options: SetOptions,
    ) -> Option<PracticeSet> {
        let envelope = self.gateway.create_practice_set(name, &options).await;
        match envelope {
            Envelope {
                success: true,
                data: Some(set),
                ..
            } => {
                self.practice_sets.push(set.clone());
                self.notifier
                    .push(Level::Success, format!("Practice set \"{name}\" created!"));
                Some(set)
            }
            envelope => {
                self.notifier.push(
                    Level::Error,
                    message_or(envelope.message, "Failed to create practice set"),
                );
                None
            }
        }
    }

    pub async fn update_practice_set(
        &mut self,
        set_id: &str,
        update: PracticeSetUpdate,
    ) -> bool {
        let envelope = self.gateway.update_practice_set(set_id, &update).await;
        match envelope {
            Envelope {
                success: true,
                data: Some(canonical),
                ..
            } => {
                if let Some(slot) = self.practice_sets.iter_mut().find(|s| s.id == set_id) {
                    *slot = canonical;
                }
                self.notifier.push(Level::Success, "Practice set updated");
                true
            }
            envelope => {
                self.notifier.push(
                    Level::Error,
                    message_or(envelope.message, "Failed to update practice set"),
                );
                false
            }
        }
    }

    pub async fn delete_practice_set(&mut self, set_id: &str) -> bool {
        let envelope = self.gateway.delete_practice_set(set_id).await;
        if !envelope.success {
            self.notifier.push(
                Level::Error,
                message_or(envelope.message, "Failed to delete practice set"),
            );
            return false;
        }
        self.practice_sets.retain(|s| s.id != set_id);
        if self.view == ViewSelector::Set(set_id.to_string()) {
            self.view = ViewSelector::All;
        }
        self.notifier.push(Level::Success, "Practice set deleted");
        true
    }

    /// `Ok(true)` on success, `Ok(false)` for the soft "already a member"
    /// outcome, `Err(PracticeSetNotFound)` when the referenced set does not
    /// exist locally — the one condition fatal to this operation.
    pub async fn add_question_to_set(
        &mut self,
        set_id: &str,
        question_id: &str,
    ) -> Result<bool, AppError> {
        if !self.practice_sets.iter().any(|s| s.id == set_id) {
            return Err(AppError::PracticeSetNotFound(set_id.to_string()));
        }
        let envelope = self.gateway.add_question_to_set(set_id, question_id).await;
        if !envelope.success {
            self.notifier.push(
                Level::Warning,
                message_or(envelope.message, "Question is already in this practice set"),
            );
            return Ok(false);
        }
        if let Some(set) = self.practice_sets.iter_mut().find(|s| s.id == set_id) {
            if !set.question_ids.iter().any(|id| id == question_id) {
                set.question_ids.push(question_id.to_string());
            }
        }
        self.notifier
            .push(Level::Success, "Question added to practice set");
        Ok(true)
    }

    // ────────────────────────────────────────────────────────────────────
    // Answers — pass-through gateway calls, no local state involved
    // ────────────────────────────────────────────────────────────────────

    pub async fn submit_answer(
        &mut self,
        question_id: &str,
        answer_text: &str,
        time_spent: u32,
    ) -> Option<UserAnswer> {
        let submission = AnswerSubmission {
            question_id: question_id.to_string(),
            answer_text: answer_text.to_string(),
            time_spent,
        };
        let envelope = self.gateway.submit_answer(&submission).await;
        self.take_data(envelope, "Failed to submit the answer")
    }

    pub async fn score_answer(
        &mut self,
        answer_id: &str,
        question_id: &str,
    ) -> Option<AiFeedback> {
        let envelope = self.gateway.score_answer(answer_id, question_id).await;
        self.take_data(envelope, "AI scoring failed, please retry")
    }

    pub async fn answer_history(&mut self, page: u32, page_size: u32) -> Option<AnswerHistory> {
        let envelope = self.gateway.answer_history(page, page_size).await;
        self.take_data(envelope, "Failed to load answer history")
    }

    pub async fn answer_statistics(&mut self) -> Option<AnswerStatistics> {
        let envelope = self.gateway.answer_statistics().await;
        self.take_data(envelope, "Failed to load statistics")
    }

    fn take_data<T>(&mut self, envelope: Envelope<T>, fallback: &str) -> Option<T> {
        match envelope {
            Envelope {
                success: true,
                data: Some(data),
                ..
            } => Some(data),
            envelope => {
                self.notifier
                    .push(Level::Error, message_or(envelope.message, fallback));
                None
            }
        }
    }

    // ────────────────────────────────────────────────────────────────────
    // Local view state — no gateway interaction, always succeeds
    // ────────────────────────────────────────────────────────────────────

    pub fn set_view(&mut self, view: ViewSelector) {
        self.view = view;
    }

    pub fn set_filters(&mut self, filters: FilterCriteria) {
        self.filters = filters;
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterCriteria::default();
    }

    pub fn view(&self) -> &ViewSelector {
        &self.view
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    /// The active derived projection — recomputed on every call from the
    /// repository and the engine's collections.
    pub fn filtered_questions(&self) -> Vec<CategoryGroup> {
        views::filtered_questions(
            self.repository.groups(),
            &self.view,
            &self.filters,
            &self.favorites,
            &self.mistakes,
            &self.practice_sets,
        )
    }

    pub fn question_by_id(&self, id: &str) -> Option<Question> {
        self.repository.find_by_id(id)
    }

    /// Repository lookup first; falls back to the gateway for questions the
    /// current bank no longer holds (e.g. an old favorite after a reload).
    pub async fn question_detail(&mut self, question_id: &str) -> Option<Question> {
        if let Some(question) = self.repository.find_by_id(question_id) {
            return Some(question);
        }
        let envelope = self.gateway.question_detail(question_id).await;
        self.take_data(envelope, "Question not found")
    }

    pub fn categories(&self) -> Vec<String> {
        self.repository.categories()
    }

    pub fn has_questions(&self) -> bool {
        !self.repository.is_empty()
    }

    pub fn favorites_count(&self) -> usize {
        self.favorites.len()
    }

    pub fn mistakes(&self) -> &[MistakeEntry] {
        &self.mistakes
    }

    pub fn practice_sets(&self) -> &[PracticeSet] {
        &self.practice_sets
    }

    /// Pending notifications, handed over exactly once.
    pub fn notifications(&mut self) -> Vec<Notification> {
        self.notifier.drain()
    }
}
