// Activity score entity
// The scoring engine's only output; replaced wholesale on each recompute

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{RiskLevel, WalletAddress};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityScore {
    pub wallet_address: WalletAddress,
    pub transaction_score: f64,
    pub volume_score: f64,
    pub frequency_score: f64,
    pub age_score: f64,
    pub level_score: f64,
    pub pattern_score: f64,
    pub total_score: f64,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<String>,
    pub human_probability: f64,
    pub unique_interactions_count: u32,
    pub circular_transactions_count: u32,
    pub active_days: u32,
    pub first_tx_date: Option<DateTime<Utc>>,
    pub last_tx_date: Option<DateTime<Utc>>,
    pub calculated_at: DateTime<Utc>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskSummary {
    pub high: u64,
    pub medium: u64,
    pub low: u64,
}
