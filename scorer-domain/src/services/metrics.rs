// Component metric calculators
// Each returns a score in [0, 100]; empty input falls back to a baseline.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Player, ScoringConfig, Transaction};

const MILLIS_PER_DAY: f64 = 86_400_000.0;
const PATTERN_BASELINE: f64 = 50.0;
const PATTERN_MAX_BONUS: f64 = 50.0;
const PATTERN_MIN_TRANSACTIONS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricScores {
    pub volume: f64,
    pub account_age: f64,
    pub level_progress: f64,
    pub frequency: f64,
    pub pattern: f64,
}

impl MetricScores {
    pub fn compute(
        player: &Player,
        transactions: &[&Transaction],
        now: DateTime<Utc>,
        config: &ScoringConfig,
    ) -> Self {
        Self {
            volume: volume_score(transactions, config),
            account_age: account_age_score(player.created_at, now, config),
            level_progress: level_progress_score(player.level, player.experience_points, config),
            frequency: frequency_score(transactions, now, config),
            pattern: pattern_score(transactions),
        }
    }
}

pub fn volume_score(transactions: &[&Transaction], config: &ScoringConfig) -> f64 {
    if transactions.is_empty() {
        return 0.0;
    }
    let total: f64 = transactions.iter().map(|tx| tx.amount).sum();
    let average = total / transactions.len() as f64;
    clamp_score((1.0 + average).log10() * config.volume_multiplier)
}

pub fn account_age_score(created_at: DateTime<Utc>, now: DateTime<Utc>, config: &ScoringConfig) -> f64 {
    let age_days = (now - created_at).num_milliseconds() as f64 / MILLIS_PER_DAY;
    clamp_score(age_days / config.age_plateau_days * 100.0)
}

pub fn level_progress_score(level: i32, experience_points: i64, config: &ScoringConfig) -> f64 {
    let base = clamp_score(f64::from(level) / config.max_level * 100.0);
    let bonus = (experience_points as f64 / config.xp_for_full_bonus * config.xp_bonus_cap)
        .min(config.xp_bonus_cap)
        .max(0.0);
    clamp_score(base + bonus)
}

pub fn frequency_score(transactions: &[&Transaction], now: DateTime<Utc>, config: &ScoringConfig) -> f64 {
    if transactions.is_empty() {
        return 0.0;
    }
    let window_start = Duration::try_days(config.frequency_window_days)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let recent = transactions
        .iter()
        .filter(|tx| tx.timestamp > window_start)
        .count();
    let per_day = recent as f64 / config.frequency_window_days as f64;
    clamp_score(per_day * (100.0 / config.frequency_saturation_per_day))
}

/// Rewards irregular spacing between transactions. Never scores below the
/// neutral baseline, so perfectly regular timing is not penalized.
pub fn pattern_score(transactions: &[&Transaction]) -> f64 {
    if transactions.len() < PATTERN_MIN_TRANSACTIONS {
        return PATTERN_BASELINE;
    }
    let mut timestamps: Vec<i64> = transactions
        .iter()
        .map(|tx| tx.timestamp.timestamp_millis())
        .collect();
    timestamps.sort_unstable();

    let intervals: Vec<f64> = timestamps
        .windows(2)
        .map(|pair| (pair[1] - pair[0]) as f64)
        .collect();
    let mean = intervals.iter().sum::<f64>() / intervals.len() as f64;
    if mean <= 0.0 {
        return PATTERN_BASELINE;
    }
    let variance = intervals
        .iter()
        .map(|interval| (interval - mean).powi(2))
        .sum::<f64>()
        / intervals.len() as f64;
    let variance_score = (variance.sqrt() / mean * 100.0).min(PATTERN_MAX_BONUS);
    clamp_score(PATTERN_BASELINE + variance_score)
}

pub(crate) fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{player, tx_at};
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn empty_set_uses_baselines() {
        let config = ScoringConfig::default();
        assert_eq!(volume_score(&[], &config), 0.0);
        assert_eq!(frequency_score(&[], now(), &config), 0.0);
        assert_eq!(pattern_score(&[]), 50.0);
    }

    #[test]
    fn single_transaction_pattern_is_neutral() {
        let tx = tx_at("a", "b", 5.0, now());
        assert_eq!(pattern_score(&[&tx]), 50.0);
    }

    #[test]
    fn volume_is_log_compressed() {
        let config = ScoringConfig::default();
        let a = tx_at("a", "b", 9.0, now());
        let b = tx_at("a", "b", 11.0, now());
        // average 10 -> log10(11) * 20
        let expected = 11f64.log10() * 20.0;
        assert!((volume_score(&[&a, &b], &config) - expected).abs() < 1e-12);

        let whale = tx_at("a", "b", 1e12, now());
        assert_eq!(volume_score(&[&whale], &config), 100.0);
    }

    #[test]
    fn account_age_plateaus_after_six_months() {
        let config = ScoringConfig::default();
        let old = now() - Duration::days(200);
        assert_eq!(account_age_score(old, now(), &config), 100.0);

        let ninety = now() - Duration::days(90);
        assert!((account_age_score(ninety, now(), &config) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn future_creation_date_scores_zero() {
        let config = ScoringConfig::default();
        assert_eq!(account_age_score(now() + Duration::days(3), now(), &config), 0.0);
    }

    #[test]
    fn level_above_max_clamps_to_hundred() {
        let config = ScoringConfig::default();
        assert_eq!(level_progress_score(60, 0, &config), 100.0);
        assert_eq!(level_progress_score(60, 50_000, &config), 100.0);
    }

    #[test]
    fn level_bonus_is_capped() {
        let config = ScoringConfig::default();
        // base 20 + bonus 10
        assert!((level_progress_score(10, 5_000, &config) - 30.0).abs() < 1e-9);
        // base 20 + bonus capped at 20
        assert!((level_progress_score(10, 90_000, &config) - 40.0).abs() < 1e-9);
    }

    #[test]
    fn frequency_counts_only_trailing_window() {
        let config = ScoringConfig::default();
        let recent: Vec<Transaction> = (0..15)
            .map(|i| tx_at("a", "b", 1.0, now() - Duration::hours(i)))
            .collect();
        let stale = tx_at("a", "b", 1.0, now() - Duration::days(31));
        let on_edge = tx_at("a", "b", 1.0, now() - Duration::days(30));
        let mut refs: Vec<&Transaction> = recent.iter().collect();
        refs.push(&stale);
        refs.push(&on_edge);
        // 15 / 30 per day * 20
        assert!((frequency_score(&refs, now(), &config) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn oversized_window_counts_everything_instead_of_overflowing() {
        let config = ScoringConfig {
            frequency_window_days: 200_000_000,
            ..ScoringConfig::default()
        };
        let old = tx_at("a", "b", 1.0, now() - Duration::days(3_000));
        let score = frequency_score(&[&old], now(), &config);
        assert!((0.0..=100.0).contains(&score));
        assert!(score > 0.0);
    }

    #[test]
    fn frequency_saturates_at_five_per_day() {
        let config = ScoringConfig::default();
        let txs: Vec<Transaction> = (0..400)
            .map(|i| tx_at("a", "b", 1.0, now() - Duration::minutes(i)))
            .collect();
        let refs: Vec<&Transaction> = txs.iter().collect();
        assert_eq!(frequency_score(&refs, now(), &config), 100.0);
    }

    #[test]
    fn regular_intervals_stay_at_baseline() {
        let txs: Vec<Transaction> = (0..5)
            .map(|i| tx_at("a", "b", 1.0, now() - Duration::hours(i * 6)))
            .collect();
        let refs: Vec<&Transaction> = txs.iter().collect();
        assert!((pattern_score(&refs) - 50.0).abs() < 1e-9);
    }

    #[test]
    fn irregular_intervals_raise_pattern_score() {
        let offsets = [0, 1, 30, 31, 200];
        let txs: Vec<Transaction> = offsets
            .iter()
            .map(|h| tx_at("a", "b", 1.0, now() - Duration::hours(*h)))
            .collect();
        let refs: Vec<&Transaction> = txs.iter().collect();
        let score = pattern_score(&refs);
        assert!(score > 50.0 && score <= 100.0);
    }

    #[test]
    fn simultaneous_transactions_take_baseline() {
        let a = tx_at("a", "b", 1.0, now());
        let b = tx_at("b", "a", 1.0, now());
        assert_eq!(pattern_score(&[&a, &b]), 50.0);
    }

    #[test]
    fn metric_scores_follow_profile() {
        let config = ScoringConfig::default();
        let profile = player("0xabc", now() - Duration::days(200), 60, 0, 200);
        let scores = MetricScores::compute(&profile, &[], now(), &config);
        assert_eq!(scores.account_age, 100.0);
        assert_eq!(scores.level_progress, 100.0);
        assert_eq!(scores.volume, 0.0);
        assert_eq!(scores.pattern, 50.0);
    }
}
