use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),
    #[error("invalid risk level '{0}'")]
    InvalidRiskLevel(String),
    #[error("invalid scoring config: {0}")]
    InvalidConfig(String),
    #[error("player '{0}' not found")]
    PlayerNotFound(String),
    #[error("data unavailable: {0}")]
    UpstreamUnavailable(String),
}
