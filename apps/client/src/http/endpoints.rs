//! Endpoint templates for the question API. `:name` tokens are substituted
//! with path parameters before dispatch; the base URL carries `/api/v1`.

pub const QUESTIONS_GENERATE: &str = "/questions/generate";
pub const QUESTIONS_LIST: &str = "/questions";
pub const QUESTIONS_DETAIL: &str = "/questions/:id";
pub const QUESTIONS_SEARCH: &str = "/questions/search";

pub const ANSWERS_SUBMIT: &str = "/answers";
pub const ANSWERS_AI_SCORE: &str = "/answers/:id/ai-score";
pub const ANSWERS_HISTORY: &str = "/answers/history";
pub const ANSWERS_STATISTICS: &str = "/answers/statistics";

pub const FAVORITES: &str = "/favorites";
pub const FAVORITES_REMOVE: &str = "/favorites/:questionId";

pub const MISTAKES: &str = "/mistakes";
pub const MISTAKES_MARK_MASTERED: &str = "/mistakes/:questionId";

pub const PRACTICE_SETS: &str = "/practice-sets";
pub const PRACTICE_SETS_ITEM: &str = "/practice-sets/:id";
pub const PRACTICE_SETS_QUESTIONS: &str = "/practice-sets/:id/questions";
