use thiserror::Error;

/// Application-level error type. Gateway failures never surface here — they
/// travel inside envelopes and become notifications. `AppError` is reserved
/// for conditions that abort a single operation outright.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Practice set not found: {0}")]
    PracticeSetNotFound(String),
}
