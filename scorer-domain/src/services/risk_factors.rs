use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::entities::{Player, ScoringConfig, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskFactor {
    RapidTransactions,
    CircularPatterns,
    LevelActivityMismatch,
}

impl RiskFactor {
    pub fn description(&self) -> &'static str {
        match self {
            RiskFactor::RapidTransactions => "Unusual number of rapid transactions detected",
            RiskFactor::CircularPatterns => "Circular transaction patterns detected",
            RiskFactor::LevelActivityMismatch => {
                "Unusual level progression relative to transaction count"
            }
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    /// Triggered factors in evaluation order.
    pub factors: Vec<RiskFactor>,
    pub rapid_count: usize,
    pub circular_count: usize,
}

/// Runs the three heuristics over a wallet's transactions, which must already
/// be in chronological order. An empty set raises no factors.
pub fn detect_risk_factors(
    player: &Player,
    transactions: &[&Transaction],
    config: &ScoringConfig,
) -> RiskAssessment {
    let mut assessment = RiskAssessment::default();
    if transactions.is_empty() {
        return assessment;
    }
    let total = transactions.len() as f64;

    assessment.rapid_count = count_rapid_gaps(transactions, config.rapid_gap_seconds);
    if assessment.rapid_count as f64 > config.rapid_ratio * total {
        assessment.factors.push(RiskFactor::RapidTransactions);
    }

    assessment.circular_count = count_circular(transactions);
    if assessment.circular_count as f64 > config.circular_ratio * total {
        assessment.factors.push(RiskFactor::CircularPatterns);
    }

    if player.level > config.mismatch_min_level
        && player.total_transactions
            < i64::from(player.level).saturating_mul(config.mismatch_tx_per_level)
    {
        assessment.factors.push(RiskFactor::LevelActivityMismatch);
    }

    assessment
}

fn count_rapid_gaps(transactions: &[&Transaction], gap_seconds: i64) -> usize {
    let limit_ms = gap_seconds.saturating_mul(1000);
    transactions
        .windows(2)
        .filter(|pair| (pair[1].timestamp - pair[0].timestamp).num_milliseconds() < limit_ms)
        .count()
}

fn count_circular(transactions: &[&Transaction]) -> usize {
    let mut seen: HashSet<(&str, &str)> = HashSet::new();
    let mut circular = 0;
    for tx in transactions {
        let pair = (tx.from_address.as_str(), tx.to_address.as_str());
        if seen.contains(&(pair.1, pair.0)) {
            circular += 1;
        }
        seen.insert(pair);
    }
    circular
}
