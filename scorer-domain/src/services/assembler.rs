use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{ActivityScore, Player, Transaction};
use crate::services::aggregator::AggregateScore;
use crate::services::metrics::MetricScores;
use crate::services::risk_factors::RiskAssessment;

pub fn assemble_score(
    player: &Player,
    transactions: &[&Transaction],
    metrics: &MetricScores,
    assessment: &RiskAssessment,
    aggregate: &AggregateScore,
    now: DateTime<Utc>,
) -> ActivityScore {
    let wallet = player.wallet_address.as_str();
    let counterparties: HashSet<&str> = transactions
        .iter()
        .map(|tx| tx.counterparty(wallet))
        .collect();
    let days: HashSet<NaiveDate> = transactions
        .iter()
        .map(|tx| tx.timestamp.date_naive())
        .collect();

    ActivityScore {
        wallet_address: player.wallet_address.clone(),
        transaction_score: metrics.pattern,
        volume_score: metrics.volume,
        frequency_score: metrics.frequency,
        age_score: metrics.account_age,
        level_score: metrics.level_progress,
        pattern_score: metrics.pattern,
        total_score: aggregate.total_score,
        risk_level: aggregate.risk_level,
        risk_factors: assessment
            .factors
            .iter()
            .map(|factor| factor.description().to_string())
            .collect(),
        human_probability: aggregate.human_probability,
        unique_interactions_count: saturating_u32(counterparties.len()),
        circular_transactions_count: saturating_u32(assessment.circular_count),
        active_days: saturating_u32(days.len()),
        first_tx_date: transactions.iter().map(|tx| tx.timestamp).min(),
        last_tx_date: transactions.iter().map(|tx| tx.timestamp).max(),
        calculated_at: now,
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
