use chrono::{DateTime, Utc};

use crate::entities::{ActivityScore, Player, ScoringConfig, Transaction};
use crate::error::ScoreError;
use crate::services::aggregator::ScoreAggregator;
use crate::services::assembler::assemble_score;
use crate::services::metrics::MetricScores;
use crate::services::risk_factors::detect_risk_factors;

/// Deterministic wallet scorer. Holds only its validated configuration, so one
/// instance can be shared across any number of concurrent scoring tasks.
#[derive(Debug, Clone)]
pub struct ActivityScorer {
    config: ScoringConfig,
    aggregator: ScoreAggregator,
}

impl ActivityScorer {
    pub fn new(config: ScoringConfig) -> Result<Self, ScoreError> {
        config.validate()?;
        let aggregator = ScoreAggregator::new(config.weights, config.bands);
        Ok(Self { config, aggregator })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores `player` against the transactions that involve its wallet.
    /// `transactions` may contain unrelated rows and may be in any order.
    pub fn score(
        &self,
        player: &Player,
        transactions: &[Transaction],
        now: DateTime<Utc>,
    ) -> Result<ActivityScore, ScoreError> {
        player.validate()?;
        let mut own = filter_wallet_transactions(player.wallet_address.as_str(), transactions);
        for tx in &own {
            tx.validate()?;
        }
        sort_chronologically(&mut own);

        let metrics = MetricScores::compute(player, &own, now, &self.config);
        let assessment = detect_risk_factors(player, &own, &self.config);
        let aggregate = self.aggregator.aggregate(&metrics, assessment.factors.len());
        Ok(assemble_score(player, &own, &metrics, &assessment, &aggregate, now))
    }
}

/// Order-preserving selection of the transactions sent or received by `wallet`.
pub fn filter_wallet_transactions<'a>(wallet: &str, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
    transactions.iter().filter(|tx| tx.involves(wallet)).collect()
}

// Full tie-break so equal timestamps cannot make results depend on input order.
fn sort_chronologically(transactions: &mut [&Transaction]) {
    transactions.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.from_address.cmp(&b.from_address))
            .then_with(|| a.to_address.cmp(&b.to_address))
            .then_with(|| a.amount.total_cmp(&b.amount))
            .then_with(|| a.transaction_type.cmp(&b.transaction_type))
    });
}
