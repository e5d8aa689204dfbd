//! Live gateway backend: every logical operation mapped onto the question
//! API over [`ApiClient`]. Transport failures never escape as errors; they
//! are folded into `success = false` envelopes so the engine sees the same
//! contract the mock backend provides.

use std::path::Path;

use async_trait::async_trait;
use serde_json::json;
use tracing::warn;

use crate::gateway::{Envelope, ErrorCode, QuestionGateway};
use crate::http::{endpoints, ApiClient, NormalizedError};
use crate::models::answer::{
    AiFeedback, AnswerHistory, AnswerStatistics, AnswerSubmission, UserAnswer,
};
use crate::models::practice::{MistakeEntry, PracticeSet, PracticeSetUpdate, SetOptions};
use crate::models::question::{CategoryGroup, LoadCriteria, Question};

pub struct HttpGateway {
    client: ApiClient,
}

impl HttpGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

fn flatten<T>(result: Result<Envelope<T>, NormalizedError>) -> Envelope<T> {
    match result {
        Ok(envelope) => envelope,
        Err(e) => Envelope::fail_with(e.message, e.code, e.error_code),
    }
}

/// For acknowledgment-only operations: the backend may put anything in
/// `data` (e.g. the echoed ids); callers only care about the outcome, so
/// the payload is parsed loosely and discarded.
fn acknowledge(result: Result<Envelope<serde_json::Value>, NormalizedError>) -> Envelope<()> {
    match result {
        Ok(envelope) => Envelope {
            success: envelope.success,
            data: envelope.success.then_some(()),
            message: envelope.message,
            code: envelope.code,
            timestamp: envelope.timestamp,
            error_code: envelope.error_code,
        },
        Err(e) => Envelope::fail_with(e.message, e.code, e.error_code),
    }
}

fn criteria_query(criteria: &LoadCriteria) -> Vec<(&'static str, Option<String>)> {
    vec![
        ("category", criteria.category.clone()),
        (
            "difficulty",
            criteria.difficulty.map(|d| d.as_wire().to_string()),
        ),
        ("page", criteria.page.map(|p| p.to_string())),
        ("pageSize", criteria.page_size.map(|p| p.to_string())),
    ]
}

#[async_trait]
impl QuestionGateway for HttpGateway {
    async fn generate_questions(
        &self,
        resume_path: &Path,
        job_description: &str,
    ) -> Envelope<Vec<CategoryGroup>> {
        let bytes = match tokio::fs::read(resume_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!("Failed to read resume file {}: {e}", resume_path.display());
                return Envelope::fail_with(
                    format!("Failed to read resume file: {e}"),
                    0,
                    ErrorCode::InvalidFileFormat,
                );
            }
        };
        let file_name = resume_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "resume.pdf".to_string());
        let fields = [
            ("jobDescription", job_description.to_string()),
            ("questionCount", "10".to_string()),
            ("includeFollowUps", "true".to_string()),
        ];
        flatten(
            self.client
                .upload(endpoints::QUESTIONS_GENERATE, file_name, bytes, &fields)
                .await,
        )
    }

    async fn list_questions(&self, criteria: &LoadCriteria) -> Envelope<Vec<CategoryGroup>> {
        flatten(
            self.client
                .get(endpoints::QUESTIONS_LIST, &[], &criteria_query(criteria))
                .await,
        )
    }

    async fn search_questions(
        &self,
        query: &str,
        criteria: &LoadCriteria,
    ) -> Envelope<Vec<CategoryGroup>> {
        let body = json!({ "query": query, "filters": criteria });
        flatten(
            self.client
                .post(endpoints::QUESTIONS_SEARCH, &[], &body)
                .await,
        )
    }

    async fn question_detail(&self, question_id: &str) -> Envelope<Question> {
        flatten(
            self.client
                .get(endpoints::QUESTIONS_DETAIL, &[("id", question_id)], &[])
                .await,
        )
    }

    async fn submit_answer(&self, submission: &AnswerSubmission) -> Envelope<UserAnswer> {
        flatten(
            self.client
                .post(endpoints::ANSWERS_SUBMIT, &[], submission)
                .await,
        )
    }

    async fn score_answer(&self, answer_id: &str, _question_id: &str) -> Envelope<AiFeedback> {
        flatten(
            self.client
                .post(
                    endpoints::ANSWERS_AI_SCORE,
                    &[("id", answer_id)],
                    &json!({}),
                )
                .await,
        )
    }

    async fn answer_history(&self, page: u32, page_size: u32) -> Envelope<AnswerHistory> {
        let query = [
            ("page", Some(page.to_string())),
            ("pageSize", Some(page_size.to_string())),
        ];
        flatten(
            self.client
                .get(endpoints::ANSWERS_HISTORY, &[], &query)
                .await,
        )
    }

    async fn answer_statistics(&self) -> Envelope<AnswerStatistics> {
        flatten(
            self.client
                .get(endpoints::ANSWERS_STATISTICS, &[], &[])
                .await,
        )
    }

    async fn list_favorites(&self) -> Envelope<Vec<String>> {
        flatten(self.client.get(endpoints::FAVORITES, &[], &[]).await)
    }

    async fn add_favorite(&self, question_id: &str) -> Envelope<()> {
        let body = json!({ "questionId": question_id });
        acknowledge(
            self.client
                .post::<serde_json::Value, _>(endpoints::FAVORITES, &[], &body)
                .await,
        )
    }

    async fn remove_favorite(&self, question_id: &str) -> Envelope<()> {
        acknowledge(
            self.client
                .delete::<serde_json::Value>(
                    endpoints::FAVORITES_REMOVE,
                    &[("questionId", question_id)],
                )
                .await,
        )
    }

    async fn list_mistakes(&self) -> Envelope<Vec<MistakeEntry>> {
        flatten(self.client.get(endpoints::MISTAKES, &[], &[]).await)
    }

    async fn add_mistake(&self, entry: &MistakeEntry) -> Envelope<()> {
        acknowledge(
            self.client
                .post::<serde_json::Value, _>(endpoints::MISTAKES, &[], entry)
                .await,
        )
    }

    async fn mark_mastered(&self, question_id: &str) -> Envelope<()> {
        acknowledge(
            self.client
                .delete::<serde_json::Value>(
                    endpoints::MISTAKES_MARK_MASTERED,
                    &[("questionId", question_id)],
                )
                .await,
        )
    }

    async fn list_practice_sets(&self) -> Envelope<Vec<PracticeSet>> {
        flatten(self.client.get(endpoints::PRACTICE_SETS, &[], &[]).await)
    }

    async fn create_practice_set(
        &self,
        name: &str,
        options: &SetOptions,
    ) -> Envelope<PracticeSet> {
        let body = json!({
            "name": name,
            "isPublic": options.is_public,
            "description": options.description,
        });
        flatten(self.client.post(endpoints::PRACTICE_SETS, &[], &body).await)
    }

    async fn update_practice_set(
        &self,
        set_id: &str,
        update: &PracticeSetUpdate,
    ) -> Envelope<PracticeSet> {
        flatten(
            self.client
                .put(endpoints::PRACTICE_SETS_ITEM, &[("id", set_id)], update)
                .await,
        )
    }

    async fn delete_practice_set(&self, set_id: &str) -> Envelope<()> {
        acknowledge(
            self.client
                .delete::<serde_json::Value>(endpoints::PRACTICE_SETS_ITEM, &[("id", set_id)])
                .await,
        )
    }

    async fn add_question_to_set(&self, set_id: &str, question_id: &str) -> Envelope<()> {
        let body = json!({ "questionId": question_id });
        acknowledge(
            self.client
                .post::<serde_json::Value, _>(
                    endpoints::PRACTICE_SETS_QUESTIONS,
                    &[("id", set_id)],
                    &body,
                )
                .await,
        )
    }
}
