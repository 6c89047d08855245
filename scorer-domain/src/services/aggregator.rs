use crate::entities::{RiskBands, ScoreWeights};
use crate::services::metrics::{clamp_score, MetricScores};
use crate::value_objects::RiskLevel;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateScore {
    pub total_score: f64,
    pub risk_level: RiskLevel,
    pub human_probability: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct ScoreAggregator {
    weights: ScoreWeights,
    bands: RiskBands,
}

impl ScoreAggregator {
    pub fn new(weights: ScoreWeights, bands: RiskBands) -> Self {
        Self { weights, bands }
    }

    pub fn aggregate(&self, metrics: &MetricScores, risk_factor_count: usize) -> AggregateScore {
        let total_score = round_cents(self.weighted_sum(metrics));
        AggregateScore {
            total_score,
            risk_level: self.risk_level(total_score, risk_factor_count),
            human_probability: self.human_probability(total_score, risk_factor_count),
        }
    }

    fn weighted_sum(&self, metrics: &MetricScores) -> f64 {
        metrics.volume * self.weights.volume
            + metrics.account_age * self.weights.account_age
            + metrics.level_progress * self.weights.level_progress
            + metrics.frequency * self.weights.frequency
            + metrics.pattern * self.weights.pattern
    }

    fn risk_level(&self, total_score: f64, risk_factor_count: usize) -> RiskLevel {
        if total_score < self.bands.high_below || risk_factor_count >= self.bands.high_factor_count {
            RiskLevel::HIGH
        } else if total_score < self.bands.medium_below || risk_factor_count >= 1 {
            RiskLevel::MEDIUM
        } else {
            RiskLevel::LOW
        }
    }

    fn human_probability(&self, total_score: f64, risk_factor_count: usize) -> f64 {
        let penalty = self.bands.human_penalty_per_factor * risk_factor_count as f64;
        round_cents(clamp_score(total_score - penalty))
    }
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
