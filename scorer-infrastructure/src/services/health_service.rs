use std::sync::Arc;

use async_trait::async_trait;
use scorer_domain::ports::{HealthCheckService, PlayerRepository};

pub struct DefaultHealthService {
    player_repo: Arc<dyn PlayerRepository>,
}

impl DefaultHealthService {
    pub fn new(player_repo: Arc<dyn PlayerRepository>) -> Self {
        Self { player_repo }
    }
}

#[async_trait]
impl HealthCheckService for DefaultHealthService {
    async fn check_database(&self) -> anyhow::Result<bool> {
        self.player_repo.ping().await.map(|_| true)
    }
}
