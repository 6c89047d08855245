use axum::routing::{get, post};
use axum::Router;

use scorer_application::AppState;

use crate::handlers::{ops_handlers, score_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/scores", get(score_handlers::list_scores))
        .route("/v1/scores/summary", get(score_handlers::risk_summary))
        .route("/v1/scores/batch", post(score_handlers::recompute_batch))
        .route("/v1/scores/:wallet", get(score_handlers::get_score))
        .route(
            "/v1/scores/:wallet/recompute",
            post(score_handlers::recompute_score),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route("/v1/ops/health/ready", get(ops_handlers::health_ready))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
