//! HTTP transport wrapper. The single point of entry for all backend calls
//! in live mode: path-parameter substitution, query handling, the bearer
//! header, and normalization of every transport failure into one error
//! shape the gateway can fold into an envelope.

use std::time::Duration;

use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::gateway::{Envelope, ErrorCode};

pub mod endpoints;

/// Uniform shape every transport-level failure collapses into before it
/// reaches the gateway layer.
#[derive(Debug, Clone)]
pub struct NormalizedError {
    pub message: String,
    pub code: i32,
    pub error_code: ErrorCode,
}

/// Error body the backend returns on non-2xx responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ErrorBody {
    message: Option<String>,
    error_code: Option<ErrorCode>,
}

pub struct ApiClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.into(),
            auth_token,
        }
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path_params: &[(&str, &str)],
        query: &[(&str, Option<String>)],
    ) -> Result<Envelope<T>, NormalizedError> {
        let url = self.url_for(endpoint, path_params);
        let present: Vec<(&str, String)> = query
            .iter()
            .filter_map(|(k, v)| v.as_ref().map(|v| (*k, v.clone())))
            .collect();
        let request = self.builder(Method::GET, &url).query(&present);
        self.execute(request).await
    }

    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        path_params: &[(&str, &str)],
        body: &B,
    ) -> Result<Envelope<T>, NormalizedError> {
        let url = self.url_for(endpoint, path_params);
        let request = self.builder(Method::POST, &url).json(body);
        self.execute(request).await
    }

    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        path_params: &[(&str, &str)],
        body: &B,
    ) -> Result<Envelope<T>, NormalizedError> {
        let url = self.url_for(endpoint, path_params);
        let request = self.builder(Method::PUT, &url).json(body);
        self.execute(request).await
    }

    pub async fn delete<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path_params: &[(&str, &str)],
    ) -> Result<Envelope<T>, NormalizedError> {
        let url = self.url_for(endpoint, path_params);
        self.execute(self.builder(Method::DELETE, &url)).await
    }

    /// Multipart upload: the binary payload under `file` plus auxiliary
    /// text fields. Content type is left to the multipart encoder.
    pub async fn upload<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        file_name: String,
        bytes: Vec<u8>,
        fields: &[(&str, String)],
    ) -> Result<Envelope<T>, NormalizedError> {
        let url = self.url_for(endpoint, &[]);
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")
            .map_err(|e| NormalizedError {
                message: format!("Invalid upload payload: {e}"),
                code: 0,
                error_code: ErrorCode::UnknownError,
            })?;
        let mut form = Form::new().part("file", part);
        for (key, value) in fields {
            form = form.text(key.to_string(), value.clone());
        }
        let request = self.builder(Method::POST, &url).multipart(form);
        self.execute(request).await
    }

    fn url_for(&self, endpoint: &str, path_params: &[(&str, &str)]) -> String {
        format!(
            "{}{}",
            self.base_url,
            substitute_path_params(endpoint, path_params)
        )
    }

    fn builder(&self, method: Method, url: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, url)
            .header("Accept", "application/json");
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }
        request
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, NormalizedError> {
        let response = request.send().await.map_err(|e| {
            warn!("Network request failed: {e}");
            NormalizedError {
                message: format!("Network request failed: {e}"),
                code: 0,
                error_code: ErrorCode::NetworkError,
            }
        })?;

        let status = response.status();
        if status.is_success() {
            response.json::<Envelope<T>>().await.map_err(|e| {
                warn!("Malformed response body: {e}");
                NormalizedError {
                    message: format!("Malformed response from server: {e}"),
                    code: status.as_u16() as i32,
                    error_code: ErrorCode::UnknownError,
                }
            })
        } else {
            Err(normalize_failure(response, status).await)
        }
    }
}

/// Replaces `:name` tokens in an endpoint template with provided values.
pub fn substitute_path_params(endpoint: &str, params: &[(&str, &str)]) -> String {
    let mut path = endpoint.to_string();
    for (key, value) in params {
        path = path.replace(&format!(":{key}"), value);
    }
    path
}

async fn normalize_failure(response: Response, status: StatusCode) -> NormalizedError {
    let body = response.text().await.unwrap_or_default();
    let parsed: Option<ErrorBody> = serde_json::from_str(&body).ok();
    let message = parsed
        .as_ref()
        .and_then(|b| b.message.clone())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        });
    let error_code = parsed
        .and_then(|b| b.error_code)
        .unwrap_or(ErrorCode::HttpError);
    warn!("API returned {status}: {message}");
    NormalizedError {
        message,
        code: status.as_u16() as i32,
        error_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substitute_single_path_param() {
        assert_eq!(
            substitute_path_params(endpoints::QUESTIONS_DETAIL, &[("id", "net1")]),
            "/questions/net1"
        );
    }

    #[test]
    fn test_substitute_param_in_the_middle() {
        assert_eq!(
            substitute_path_params(endpoints::ANSWERS_AI_SCORE, &[("id", "answer_42")]),
            "/answers/answer_42/ai-score"
        );
    }

    #[test]
    fn test_substitute_leaves_unknown_tokens() {
        assert_eq!(
            substitute_path_params("/practice-sets/:id/questions", &[]),
            "/practice-sets/:id/questions"
        );
    }

    #[test]
    fn test_error_body_parses_backend_error_code() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"message":"gone","errorCode":"NOT_FOUND"}"#).unwrap();
        assert_eq!(body.error_code, Some(ErrorCode::NotFound));
        assert_eq!(body.message.as_deref(), Some("gone"));
    }
}
