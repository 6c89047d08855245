use tracing::error;

use crate::dtos::ScoreListQuery;
use crate::{AppError, AppState};
use scorer_domain::{ActivityScore, RiskSummary, WalletAddress};

const DEFAULT_LIST_LIMIT: usize = 100;
const MAX_LIST_LIMIT: usize = 1000;

pub async fn get_score(state: &AppState, wallet: &str) -> Result<ActivityScore, AppError> {
    let wallet = WalletAddress::parse(wallet)?;
    let score = state.score_repo.fetch_score(&wallet).await.map_err(|err| {
        error!("failed to fetch score for {}: {}", wallet, err);
        AppError::DataUnavailable(err.to_string())
    })?;
    score.ok_or_else(|| AppError::NotFound(format!("no score stored for '{}'", wallet)))
}

pub async fn list_scores(
    state: &AppState,
    query: ScoreListQuery,
) -> Result<Vec<ActivityScore>, AppError> {
    let risk = query.risk_level()?;
    let limit = query
        .limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT);
    state
        .score_repo
        .fetch_scores(risk, limit)
        .await
        .map_err(|err| {
            error!("failed to list scores: {}", err);
            AppError::DataUnavailable(err.to_string())
        })
}

pub async fn risk_summary(state: &AppState) -> Result<RiskSummary, AppError> {
    state.score_repo.fetch_summary().await.map_err(|err| {
        error!("failed to fetch risk summary: {}", err);
        AppError::DataUnavailable(err.to_string())
    })
}
