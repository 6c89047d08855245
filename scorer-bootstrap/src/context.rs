use std::sync::Arc;

use anyhow::Result;
use clickhouse::Client;
use tracing::info;

use scorer_application::{AppState, Metrics};
use scorer_domain::ports::PlayerRepository;
use scorer_domain::ActivityScorer;
use scorer_infrastructure::{AppConfig, ClickhouseRepo, DefaultHealthService};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();
        let scorer = ActivityScorer::new(config.scoring.clone())?;

        let mut clickhouse = Client::default()
            .with_url(&db_config.clickhouse_url)
            .with_database(&db_config.clickhouse_database);
        if let Some(user) = &db_config.clickhouse_user {
            clickhouse = clickhouse.with_user(user);
        }
        if let Some(password) = &db_config.clickhouse_password {
            clickhouse = clickhouse.with_password(password);
        }

        let repo = Arc::new(ClickhouseRepo::new(
            clickhouse,
            db_config.clickhouse_database.clone(),
        ));
        repo.ensure_schema().await?;
        info!(
            database = %db_config.clickhouse_database,
            "clickhouse schema ready"
        );

        let state = AppState {
            config: runtime_config,
            player_repo: repo.clone(),
            transaction_repo: repo.clone(),
            score_repo: repo.clone(),
            health: Arc::new(DefaultHealthService::new(repo)),
            scorer: Arc::new(scorer),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}
