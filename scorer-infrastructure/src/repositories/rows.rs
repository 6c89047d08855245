use anyhow::Result;
use clickhouse::Row;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use scorer_domain::{ActivityScore, Player, RiskLevel, Transaction, TransactionType, WalletAddress};

use crate::utils::{chrono_to_offset, offset_to_chrono};

#[derive(Debug, Clone, Serialize, Deserialize, Row)]
pub struct PlayerRow {
    pub wallet_address: String,
    pub username: Option<String>,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub created_at: OffsetDateTime,
    pub level: i32,
    pub experience_points: i64,
    pub total_transactions: i64,
}

impl TryFrom<PlayerRow> for Player {
    type Error = anyhow::Error;

    fn try_from(row: PlayerRow) -> Result<Self> {
        Ok(Player {
            wallet_address: WalletAddress::parse(&row.wallet_address)?,
            username: row.username.filter(|name| !name.is_empty()),
            created_at: offset_to_chrono(row.created_at)?,
            level: row.level,
            experience_points: row.experience_points,
            total_transactions: row.total_transactions,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Row)]
pub struct TransactionRow {
    pub id: String,
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub transaction_type: String,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub timestamp: OffsetDateTime,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = anyhow::Error;

    fn try_from(row: TransactionRow) -> Result<Self> {
        let transaction_type: TransactionType = row.transaction_type.parse()?;
        Ok(Transaction {
            id: Some(row.id).filter(|id| !id.is_empty()),
            from_address: row.from_address,
            to_address: row.to_address,
            amount: row.amount,
            transaction_type,
            timestamp: offset_to_chrono(row.timestamp)?,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Row)]
pub struct ScoreRow {
    pub wallet_address: String,
    pub transaction_score: f64,
    pub volume_score: f64,
    pub frequency_score: f64,
    pub age_score: f64,
    pub level_score: f64,
    pub pattern_score: f64,
    pub total_score: f64,
    pub risk_level: String,
    pub risk_factors: Vec<String>,
    pub human_probability: f64,
    pub unique_interactions_count: u32,
    pub circular_transactions_count: u32,
    pub active_days: u32,
    #[serde(with = "clickhouse::serde::time::datetime64::millis::option")]
    pub first_tx_date: Option<OffsetDateTime>,
    #[serde(with = "clickhouse::serde::time::datetime64::millis::option")]
    pub last_tx_date: Option<OffsetDateTime>,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub calculated_at: OffsetDateTime,
}

impl ScoreRow {
    pub fn from_score(score: &ActivityScore) -> Result<Self> {
        Ok(ScoreRow {
            wallet_address: score.wallet_address.to_string(),
            transaction_score: score.transaction_score,
            volume_score: score.volume_score,
            frequency_score: score.frequency_score,
            age_score: score.age_score,
            level_score: score.level_score,
            pattern_score: score.pattern_score,
            total_score: score.total_score,
            risk_level: score.risk_level.as_str().to_string(),
            risk_factors: score.risk_factors.clone(),
            human_probability: score.human_probability,
            unique_interactions_count: score.unique_interactions_count,
            circular_transactions_count: score.circular_transactions_count,
            active_days: score.active_days,
            first_tx_date: score.first_tx_date.map(chrono_to_offset).transpose()?,
            last_tx_date: score.last_tx_date.map(chrono_to_offset).transpose()?,
            calculated_at: chrono_to_offset(score.calculated_at)?,
        })
    }
}

impl TryFrom<ScoreRow> for ActivityScore {
    type Error = anyhow::Error;

    fn try_from(row: ScoreRow) -> Result<Self> {
        let risk_level: RiskLevel = row.risk_level.parse()?;
        Ok(ActivityScore {
            wallet_address: WalletAddress::parse(&row.wallet_address)?,
            transaction_score: row.transaction_score,
            volume_score: row.volume_score,
            frequency_score: row.frequency_score,
            age_score: row.age_score,
            level_score: row.level_score,
            pattern_score: row.pattern_score,
            total_score: row.total_score,
            risk_level,
            risk_factors: row.risk_factors,
            human_probability: row.human_probability,
            unique_interactions_count: row.unique_interactions_count,
            circular_transactions_count: row.circular_transactions_count,
            active_days: row.active_days,
            first_tx_date: row.first_tx_date.map(offset_to_chrono).transpose()?,
            last_tx_date: row.last_tx_date.map(offset_to_chrono).transpose()?,
            calculated_at: offset_to_chrono(row.calculated_at)?,
        })
    }
}
