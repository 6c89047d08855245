use anyhow::Result;
use async_trait::async_trait;
use clickhouse::Client;
use tracing::debug;

use scorer_domain::ports::{PlayerRepository, ScoreRepository, TransactionRepository};
use scorer_domain::{ActivityScore, Player, RiskLevel, RiskSummary, Transaction, WalletAddress};

use super::rows::{PlayerRow, ScoreRow, TransactionRow};

const SCORE_COLUMNS: &str = "wallet_address, transaction_score, volume_score, frequency_score, \
     age_score, level_score, pattern_score, total_score, risk_level, risk_factors, \
     human_probability, unique_interactions_count, circular_transactions_count, active_days, \
     first_tx_date, last_tx_date, calculated_at";

#[derive(Clone)]
pub struct ClickhouseRepo {
    client: Client,
    database: String,
}

impl ClickhouseRepo {
    pub fn new(client: Client, database: String) -> Self {
        Self { client, database }
    }
}

#[async_trait]
impl PlayerRepository for ClickhouseRepo {
    async fn ensure_schema(&self) -> Result<()> {
        let create_db = format!("CREATE DATABASE IF NOT EXISTS {}", self.database);
        self.client.query(&create_db).execute().await?;

        let create_players = r#"
CREATE TABLE IF NOT EXISTS players (
    wallet_address String,
    username Nullable(String),
    created_at DateTime64(3),
    level Int32,
    experience_points Int64,
    total_transactions Int64
) ENGINE = ReplacingMergeTree
ORDER BY wallet_address
"#;
        self.client.query(create_players).execute().await?;

        let create_transactions = r#"
CREATE TABLE IF NOT EXISTS transactions (
    id String,
    from_address String,
    to_address String,
    amount Float64,
    transaction_type LowCardinality(String),
    timestamp DateTime64(3)
) ENGINE = MergeTree
PARTITION BY toYYYYMM(timestamp)
ORDER BY (timestamp, from_address, to_address)
"#;
        self.client.query(create_transactions).execute().await?;

        let create_scores = r#"
CREATE TABLE IF NOT EXISTS activity_scores (
    wallet_address String,
    transaction_score Float64,
    volume_score Float64,
    frequency_score Float64,
    age_score Float64,
    level_score Float64,
    pattern_score Float64,
    total_score Float64,
    risk_level LowCardinality(String),
    risk_factors Array(String),
    human_probability Float64,
    unique_interactions_count UInt32,
    circular_transactions_count UInt32,
    active_days UInt32,
    first_tx_date Nullable(DateTime64(3)),
    last_tx_date Nullable(DateTime64(3)),
    calculated_at DateTime64(3)
) ENGINE = ReplacingMergeTree(calculated_at)
ORDER BY wallet_address
"#;
        self.client.query(create_scores).execute().await?;
        Ok(())
    }

    async fn fetch_player(&self, wallet: &WalletAddress) -> Result<Option<Player>> {
        let row = self
            .client
            .query(
                "SELECT wallet_address, username, created_at, level, experience_points, total_transactions \
                 FROM players FINAL WHERE wallet_address = ? LIMIT 1",
            )
            .bind(wallet.as_str())
            .fetch_optional::<PlayerRow>()
            .await?;
        row.map(Player::try_from).transpose()
    }

    async fn list_wallets(&self, limit: usize) -> Result<Vec<WalletAddress>> {
        let rows = self
            .client
            .query("SELECT wallet_address FROM players FINAL ORDER BY wallet_address LIMIT ?")
            .bind(limit as u64)
            .fetch_all::<String>()
            .await?;
        let mut wallets = Vec::with_capacity(rows.len());
        for raw in rows {
            match WalletAddress::parse(&raw) {
                Ok(wallet) => wallets.push(wallet),
                Err(err) => debug!("skipping stored wallet {:?}: {}", raw, err),
            }
        }
        Ok(wallets)
    }

    async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for ClickhouseRepo {
    async fn fetch_wallet_transactions(&self, wallet: &WalletAddress) -> Result<Vec<Transaction>> {
        let rows = self
            .client
            .query(
                "SELECT id, from_address, to_address, amount, transaction_type, timestamp \
                 FROM transactions WHERE from_address = ? OR to_address = ? ORDER BY timestamp",
            )
            .bind(wallet.as_str())
            .bind(wallet.as_str())
            .fetch_all::<TransactionRow>()
            .await?;
        rows.into_iter().map(Transaction::try_from).collect()
    }
}

#[async_trait]
impl ScoreRepository for ClickhouseRepo {
    async fn upsert_scores(&self, scores: &[ActivityScore]) -> Result<()> {
        if scores.is_empty() {
            return Ok(());
        }
        let mut insert = self.client.insert("activity_scores")?;
        for score in scores {
            insert.write(&ScoreRow::from_score(score)?).await?;
        }
        insert.end().await?;
        Ok(())
    }

    async fn fetch_score(&self, wallet: &WalletAddress) -> Result<Option<ActivityScore>> {
        let query = format!(
            "SELECT {} FROM activity_scores FINAL WHERE wallet_address = ? LIMIT 1",
            SCORE_COLUMNS
        );
        let row = self
            .client
            .query(&query)
            .bind(wallet.as_str())
            .fetch_optional::<ScoreRow>()
            .await?;
        row.map(ActivityScore::try_from).transpose()
    }

    async fn fetch_scores(&self, risk: Option<RiskLevel>, limit: usize) -> Result<Vec<ActivityScore>> {
        let mut query = format!("SELECT {} FROM activity_scores FINAL", SCORE_COLUMNS);
        if risk.is_some() {
            query.push_str(" WHERE risk_level = ?");
        }
        query.push_str(" ORDER BY total_score ASC, wallet_address ASC LIMIT ?");

        let mut statement = self.client.query(&query);
        if let Some(level) = risk {
            statement = statement.bind(level.as_str());
        }
        let rows = statement.bind(limit as u64).fetch_all::<ScoreRow>().await?;
        rows.into_iter().map(ActivityScore::try_from).collect()
    }

    async fn fetch_summary(&self) -> Result<RiskSummary> {
        let rows = self
            .client
            .query("SELECT risk_level, count() AS cnt FROM activity_scores FINAL GROUP BY risk_level")
            .fetch_all::<(String, u64)>()
            .await?;
        let mut summary = RiskSummary::default();
        for (risk, count) in rows {
            match risk.parse::<RiskLevel>() {
                Ok(RiskLevel::HIGH) => summary.high = count,
                Ok(RiskLevel::MEDIUM) => summary.medium = count,
                Ok(RiskLevel::LOW) => summary.low = count,
                Err(_) => debug!("ignoring unknown risk level {:?}", risk),
            }
        }
        Ok(summary)
    }
}
