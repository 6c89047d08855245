use scorer_domain::ScoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ScoreError> for AppError {
    fn from(value: ScoreError) -> Self {
        match value {
            ScoreError::PlayerNotFound(wallet) => AppError::NotFound(format!("player '{}'", wallet)),
            ScoreError::UpstreamUnavailable(msg) => AppError::DataUnavailable(msg),
            other => AppError::BadRequest(other.to_string()),
        }
    }
}
