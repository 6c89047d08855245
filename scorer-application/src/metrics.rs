use std::sync::atomic::{AtomicU64, Ordering};

use scorer_domain::{ActivityScore, RiskLevel};

#[derive(Debug, Default)]
pub struct Metrics {
    scores_computed: AtomicU64,
    scoring_failures: AtomicU64,
    batch_runs: AtomicU64,
    high_risk_scores: AtomicU64,
}

impl Metrics {
    pub fn record_scores(&self, scores: &[ActivityScore]) {
        self.scores_computed
            .fetch_add(scores.len() as u64, Ordering::Relaxed);
        let high = scores
            .iter()
            .filter(|score| score.risk_level == RiskLevel::HIGH)
            .count();
        self.high_risk_scores.fetch_add(high as u64, Ordering::Relaxed);
    }

    pub fn record_failures(&self, count: usize) {
        self.scoring_failures.fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_batch_run(&self) {
        self.batch_runs.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let computed = self.scores_computed.load(Ordering::Relaxed);
        let failures = self.scoring_failures.load(Ordering::Relaxed);
        let batches = self.batch_runs.load(Ordering::Relaxed);
        let high = self.high_risk_scores.load(Ordering::Relaxed);

        format!(
            "# TYPE scorer_scores_computed_total counter\n\
scorer_scores_computed_total {}\n\
# TYPE scorer_scoring_failures_total counter\n\
scorer_scoring_failures_total {}\n\
# TYPE scorer_batch_runs_total counter\n\
scorer_batch_runs_total {}\n\
# TYPE scorer_high_risk_scores_total counter\n\
scorer_high_risk_scores_total {}\n",
            computed, failures, batches, high
        )
    }
}
