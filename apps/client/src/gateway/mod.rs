//! Remote data gateway — the single seam between the practice engine and
//! whatever backs it.
//!
//! Every logical operation returns an [`Envelope`]; transport failures and
//! business rejections both arrive as `success = false` with a displayable
//! message, never as a distinguished error type callers could branch on.
//! Two backends implement the trait: `MockGateway` (synthesized data,
//! simulated latency, local persistence) and `HttpGateway` (the real API).
//! The backend is chosen once at startup via config and carried as
//! `Arc<dyn QuestionGateway>`.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::answer::{
    AiFeedback, AnswerHistory, AnswerStatistics, AnswerSubmission, UserAnswer,
};
use crate::models::practice::{MistakeEntry, PracticeSet, PracticeSetUpdate, SetOptions};
use crate::models::question::{CategoryGroup, LoadCriteria, Question};

pub mod live;
pub mod mock;
pub mod mock_bank;

/// Fixed vocabulary of machine-readable failure codes carried alongside the
/// human-readable message. The engine never branches on these; they exist
/// for logs and for parity with the backend contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    InvalidRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    NetworkError,
    HttpError,
    InvalidFileFormat,
    FileTooLarge,
    QuestionNotFound,
    AlreadyFavorited,
    AiServiceError,
    PracticeSetNotFound,
    #[serde(other)]
    UnknownError,
}

/// Uniform response wrapper for every gateway operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: String,
    pub code: i32,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<ErrorCode>,
}

impl<T> Envelope<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Envelope {
            success: true,
            data: Some(data),
            message: message.into(),
            code: 200,
            timestamp: Utc::now(),
            error_code: None,
        }
    }

    /// Soft failure: no machine-readable code, just a displayable message.
    pub fn fail(message: impl Into<String>, code: i32) -> Self {
        Envelope {
            success: false,
            data: None,
            message: message.into(),
            code,
            timestamp: Utc::now(),
            error_code: None,
        }
    }

    pub fn fail_with(message: impl Into<String>, code: i32, error_code: ErrorCode) -> Self {
        Envelope {
            error_code: Some(error_code),
            ..Envelope::fail(message, code)
        }
    }
}

/// One method per logical backend operation. All methods are infallible at
/// the Rust level: failures come back inside the envelope.
#[async_trait]
pub trait QuestionGateway: Send + Sync {
    // Questions
    async fn generate_questions(
        &self,
        resume_path: &Path,
        job_description: &str,
    ) -> Envelope<Vec<CategoryGroup>>;
    async fn list_questions(&self, criteria: &LoadCriteria) -> Envelope<Vec<CategoryGroup>>;
    async fn search_questions(
        &self,
        query: &str,
        criteria: &LoadCriteria,
    ) -> Envelope<Vec<CategoryGroup>>;
    async fn question_detail(&self, question_id: &str) -> Envelope<Question>;

    // Answers
    async fn submit_answer(&self, submission: &AnswerSubmission) -> Envelope<UserAnswer>;
    async fn score_answer(&self, answer_id: &str, question_id: &str) -> Envelope<AiFeedback>;
    async fn answer_history(&self, page: u32, page_size: u32) -> Envelope<AnswerHistory>;
    async fn answer_statistics(&self) -> Envelope<AnswerStatistics>;

    // Favorites
    async fn list_favorites(&self) -> Envelope<Vec<String>>;
    async fn add_favorite(&self, question_id: &str) -> Envelope<()>;
    async fn remove_favorite(&self, question_id: &str) -> Envelope<()>;

    // Mistake log
    async fn list_mistakes(&self) -> Envelope<Vec<MistakeEntry>>;
    async fn add_mistake(&self, entry: &MistakeEntry) -> Envelope<()>;
    async fn mark_mastered(&self, question_id: &str) -> Envelope<()>;

    // Practice sets
    async fn list_practice_sets(&self) -> Envelope<Vec<PracticeSet>>;
    async fn create_practice_set(&self, name: &str, options: &SetOptions)
        -> Envelope<PracticeSet>;
    async fn update_practice_set(
        &self,
        set_id: &str,
        update: &PracticeSetUpdate,
    ) -> Envelope<PracticeSet>;
    async fn delete_practice_set(&self, set_id: &str) -> Envelope<()>;
    async fn add_question_to_set(&self, set_id: &str, question_id: &str) -> Envelope<()>;
}
