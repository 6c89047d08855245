// Scoring configuration
// Weights, time windows and thresholds handed to the scorer at construction

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;
const MAX_FREQUENCY_WINDOW_DAYS: i64 = 36_500;
const MAX_MISMATCH_TX_PER_LEVEL: i64 = 1_000_000;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub volume: f64,
    pub account_age: f64,
    pub level_progress: f64,
    pub frequency: f64,
    pub pattern: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            volume: 0.25,
            account_age: 0.15,
            level_progress: 0.20,
            frequency: 0.25,
            pattern: 0.15,
        }
    }
}

impl ScoreWeights {
    pub fn total(&self) -> f64 {
        self.volume + self.account_age + self.level_progress + self.frequency + self.pattern
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        let all = [
            self.volume,
            self.account_age,
            self.level_progress,
            self.frequency,
            self.pattern,
        ];
        if all.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return Err(ScoreError::InvalidConfig(
                "all weights must be non-negative".to_string(),
            ));
        }
        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoreError::InvalidConfig(format!(
                "weights must sum to 1.0, got {}",
                total
            )));
        }
        Ok(())
    }
}

/// Cutoffs that turn a total score and a risk factor count into a risk level
/// and a human probability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskBands {
    pub high_below: f64,
    pub medium_below: f64,
    pub high_factor_count: usize,
    pub human_penalty_per_factor: f64,
}

impl Default for RiskBands {
    fn default() -> Self {
        Self {
            high_below: 40.0,
            medium_below: 65.0,
            high_factor_count: 2,
            human_penalty_per_factor: 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub bands: RiskBands,
    pub volume_multiplier: f64,
    pub age_plateau_days: f64,
    pub max_level: f64,
    pub xp_for_full_bonus: f64,
    pub xp_bonus_cap: f64,
    pub frequency_window_days: i64,
    pub frequency_saturation_per_day: f64,
    pub rapid_gap_seconds: i64,
    pub rapid_ratio: f64,
    pub circular_ratio: f64,
    pub mismatch_min_level: i32,
    pub mismatch_tx_per_level: i64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            bands: RiskBands::default(),
            volume_multiplier: 20.0,
            age_plateau_days: 180.0,
            max_level: 50.0,
            xp_for_full_bonus: 10_000.0,
            xp_bonus_cap: 20.0,
            frequency_window_days: 30,
            frequency_saturation_per_day: 5.0,
            rapid_gap_seconds: 60 * 60,
            rapid_ratio: 0.30,
            circular_ratio: 0.10,
            mismatch_min_level: 10,
            mismatch_tx_per_level: 2,
        }
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoreError> {
        self.weights.validate()?;
        if !(self.bands.high_below <= self.bands.medium_below) {
            return Err(ScoreError::InvalidConfig(format!(
                "bands.high_below ({}) must not exceed bands.medium_below ({})",
                self.bands.high_below, self.bands.medium_below
            )));
        }
        if self.bands.high_factor_count == 0 {
            return Err(ScoreError::InvalidConfig(
                "bands.high_factor_count must be greater than 0".to_string(),
            ));
        }
        if !(self.bands.human_penalty_per_factor >= 0.0) {
            return Err(ScoreError::InvalidConfig(
                "bands.human_penalty_per_factor must be non-negative".to_string(),
            ));
        }
        let positive = [
            ("volume_multiplier", self.volume_multiplier),
            ("age_plateau_days", self.age_plateau_days),
            ("max_level", self.max_level),
            ("xp_for_full_bonus", self.xp_for_full_bonus),
            ("frequency_saturation_per_day", self.frequency_saturation_per_day),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScoreError::InvalidConfig(format!(
                    "{} must be greater than 0",
                    name
                )));
            }
        }
        if !(self.xp_bonus_cap >= 0.0) {
            return Err(ScoreError::InvalidConfig(
                "xp_bonus_cap must be non-negative".to_string(),
            ));
        }
        if !(1..=MAX_FREQUENCY_WINDOW_DAYS).contains(&self.frequency_window_days) {
            return Err(ScoreError::InvalidConfig(format!(
                "frequency_window_days must be within [1, {}], got {}",
                MAX_FREQUENCY_WINDOW_DAYS, self.frequency_window_days
            )));
        }
        if self.rapid_gap_seconds <= 0 {
            return Err(ScoreError::InvalidConfig(
                "rapid_gap_seconds must be greater than 0".to_string(),
            ));
        }
        if self.mismatch_min_level < 0 {
            return Err(ScoreError::InvalidConfig(format!(
                "mismatch_min_level must be non-negative, got {}",
                self.mismatch_min_level
            )));
        }
        if !(0..=MAX_MISMATCH_TX_PER_LEVEL).contains(&self.mismatch_tx_per_level) {
            return Err(ScoreError::InvalidConfig(format!(
                "mismatch_tx_per_level must be within [0, {}], got {}",
                MAX_MISMATCH_TX_PER_LEVEL, self.mismatch_tx_per_level
            )));
        }
        for (name, value) in [("rapid_ratio", self.rapid_ratio), ("circular_ratio", self.circular_ratio)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ScoreError::InvalidConfig(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        ScoringConfig::default().validate().expect("default config");
        assert!((ScoreWeights::default().total() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn weights_must_sum_to_one() {
        let mut config = ScoringConfig::default();
        config.weights.volume = 0.5;
        let err = config.validate().expect_err("reject");
        assert!(matches!(err, ScoreError::InvalidConfig(msg) if msg.contains("sum to 1.0")));
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut config = ScoringConfig::default();
        config.weights.volume = -0.25;
        config.weights.frequency = 0.75;
        assert!(config.validate().is_err());
    }

    #[test]
    fn inverted_bands_are_rejected() {
        let mut config = ScoringConfig::default();
        config.bands.high_below = 70.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn frequency_window_is_bounded() {
        let mut config = ScoringConfig::default();
        config.frequency_window_days = 200_000_000;
        assert!(config.validate().is_err());
        config.frequency_window_days = MAX_FREQUENCY_WINDOW_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn mismatch_thresholds_are_bounded() {
        let mut config = ScoringConfig::default();
        config.mismatch_tx_per_level = i64::MAX;
        assert!(config.validate().is_err());
        config.mismatch_tx_per_level = -1;
        assert!(config.validate().is_err());

        let mut config = ScoringConfig::default();
        config.mismatch_min_level = -5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_table_keeps_defaults() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"rapid_ratio":0.5,"bands":{"high_below":30.0}}"#)
                .expect("parse");
        assert_eq!(config.rapid_ratio, 0.5);
        assert_eq!(config.bands.high_below, 30.0);
        assert_eq!(config.bands.medium_below, 65.0);
        assert_eq!(config.weights, ScoreWeights::default());
    }
}
