use std::sync::Arc;

use scorer_domain::ports::{
    HealthCheckService, PlayerRepository, ScoreRepository, TransactionRepository,
};
use scorer_domain::{ActivityScorer, RuntimeConfig};

use crate::Metrics;

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub player_repo: Arc<dyn PlayerRepository>,
    pub transaction_repo: Arc<dyn TransactionRepository>,
    pub score_repo: Arc<dyn ScoreRepository>,
    pub health: Arc<dyn HealthCheckService>,
    pub scorer: Arc<ActivityScorer>,
    pub metrics: Arc<Metrics>,
}
