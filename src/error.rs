use uuid::Uuid;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed answer for question {question_id}: {reason}")]
    MalformedAnswer { question_id: Uuid, reason: String },

    #[error("Invalid population: cannot scale against zero comparison scores")]
    InvalidPopulation,

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn malformed(question_id: Uuid, reason: impl Into<String>) -> Self {
        Error::MalformedAnswer {
            question_id,
            reason: reason.into(),
        }
    }

    /// Errors scoped to one submission; the rest of the attempt can still be graded.
    pub fn is_per_question(&self) -> bool {
        matches!(self, Error::MalformedAnswer { .. })
    }
}
