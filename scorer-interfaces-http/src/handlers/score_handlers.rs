use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;

use scorer_application::commands::score_commands;
use scorer_application::dtos::{BatchOutcome, BatchRequest, ScoreListQuery};
use scorer_application::queries::score_queries;
use scorer_application::AppState;
use scorer_domain::{ActivityScore, RiskSummary};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn list_scores(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ScoreListQuery>,
) -> Result<Json<Vec<ActivityScore>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let scores = score_queries::list_scores(&state, query).await?;
    Ok(Json(scores))
}

pub async fn risk_summary(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RiskSummary>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let summary = score_queries::risk_summary(&state).await?;
    Ok(Json(summary))
}

pub async fn get_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(wallet): Path<String>,
) -> Result<Json<ActivityScore>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let score = score_queries::get_score(&state, &wallet).await?;
    Ok(Json(score))
}

pub async fn recompute_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(wallet): Path<String>,
) -> Result<Json<ActivityScore>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let score = score_commands::recompute_score(&state, &wallet).await?;
    Ok(Json(score))
}

pub async fn recompute_batch(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<BatchRequest>,
) -> Result<Json<BatchOutcome>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    if payload.wallets.len() > state.config.batch_limit {
        return Err(HttpError::BadRequest(format!(
            "at most {} wallets per batch, got {}",
            state.config.batch_limit,
            payload.wallets.len()
        )));
    }
    let outcome = score_commands::recompute_batch(&state, payload.wallets).await?;
    Ok(Json(outcome))
}
