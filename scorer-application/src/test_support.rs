use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::{AppState, Metrics};
use scorer_domain::ports::{
    HealthCheckService, PlayerRepository, ScoreRepository, TransactionRepository,
};
use scorer_domain::{
    ActivityScore, ActivityScorer, Player, RiskLevel, RiskSummary, RuntimeConfig, ScoreError,
    ScoringConfig, Transaction, TransactionType, WalletAddress,
};

#[derive(Default)]
struct Inner {
    players: HashMap<String, Player>,
    transactions: Vec<Transaction>,
    scores: Mutex<HashMap<String, ActivityScore>>,
    failing: Mutex<HashSet<String>>,
    corrupt: Mutex<HashSet<String>>,
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// alice and bob look organic; carol ping-pongs with dave in bursts.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let mut players = HashMap::new();
        let mut transactions = Vec::new();

        for (wallet, age_days, level, xp, total) in [
            ("0xalice", 300, 20, 8_000, 60),
            ("0xbob", 120, 8, 2_500, 25),
            ("0xcarol", 2, 45, 0, 3),
        ] {
            players.insert(
                wallet.to_string(),
                Player {
                    wallet_address: WalletAddress::parse(wallet).expect("wallet"),
                    username: None,
                    created_at: now - Duration::days(age_days),
                    level,
                    experience_points: xp,
                    total_transactions: total,
                },
            );
        }

        let mut hours = 0;
        for i in 0..40i64 {
            hours += 3 + (i * 7) % 23;
            transactions.push(tx(
                "0xalice",
                &format!("0xpeer{}", i % 9),
                5.0 + (i % 5) as f64 * 9.5,
                now - Duration::hours(hours),
            ));
        }
        for i in 0..12i64 {
            transactions.push(tx(
                &format!("0xshop{}", i % 3),
                "0xbob",
                2.0 + i as f64,
                now - Duration::hours(11 + i * 40),
            ));
        }
        for i in 0..6i64 {
            let (from, to) = if i % 2 == 0 {
                ("0xcarol", "0xdave")
            } else {
                ("0xdave", "0xcarol")
            };
            transactions.push(tx(from, to, 1.0, now - Duration::minutes(60 - i * 5)));
        }

        Self {
            inner: Arc::new(Inner {
                players,
                transactions,
                ..Inner::default()
            }),
        }
    }

    pub fn fail_wallet(&self, wallet: &str) {
        self.inner.failing.lock().expect("lock").insert(wallet.to_string());
    }

    pub fn corrupt_wallet(&self, wallet: &str) {
        self.inner.corrupt.lock().expect("lock").insert(wallet.to_string());
    }

    pub fn stored(&self, wallet: &str) -> Option<ActivityScore> {
        self.inner.scores.lock().expect("lock").get(wallet).cloned()
    }

    pub fn score_count(&self) -> usize {
        self.inner.scores.lock().expect("lock").len()
    }
}

fn tx(from: &str, to: &str, amount: f64, timestamp: chrono::DateTime<Utc>) -> Transaction {
    Transaction {
        id: None,
        from_address: from.to_string(),
        to_address: to.to_string(),
        amount,
        transaction_type: TransactionType::TokenTransfer,
        timestamp,
    }
}

#[async_trait]
impl PlayerRepository for MemoryStore {
    async fn ensure_schema(&self) -> anyhow::Result<()> {
        Ok(())
    }

    async fn fetch_player(&self, wallet: &WalletAddress) -> anyhow::Result<Option<Player>> {
        if self.inner.failing.lock().expect("lock").contains(wallet.as_str()) {
            return Err(anyhow!("connection refused"));
        }
        Ok(self.inner.players.get(wallet.as_str()).cloned())
    }

    async fn list_wallets(&self, limit: usize) -> anyhow::Result<Vec<WalletAddress>> {
        let mut wallets: Vec<WalletAddress> = self
            .inner
            .players
            .values()
            .map(|player| player.wallet_address.clone())
            .collect();
        wallets.sort();
        wallets.truncate(limit);
        Ok(wallets)
    }

    async fn ping(&self) -> anyhow::Result<()> {
        Ok(())
    }
}

#[async_trait]
impl TransactionRepository for MemoryStore {
    async fn fetch_wallet_transactions(
        &self,
        wallet: &WalletAddress,
    ) -> anyhow::Result<Vec<Transaction>> {
        if self.inner.corrupt.lock().expect("lock").contains(wallet.as_str()) {
            return Err(ScoreError::InvalidTransaction(
                "unknown transaction_type 'AIRDROP'".to_string(),
            )
            .into());
        }
        Ok(self
            .inner
            .transactions
            .iter()
            .filter(|tx| tx.involves(wallet.as_str()))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ScoreRepository for MemoryStore {
    async fn upsert_scores(&self, scores: &[ActivityScore]) -> anyhow::Result<()> {
        let mut stored = self.inner.scores.lock().expect("lock");
        for score in scores {
            stored.insert(score.wallet_address.to_string(), score.clone());
        }
        Ok(())
    }

    async fn fetch_score(&self, wallet: &WalletAddress) -> anyhow::Result<Option<ActivityScore>> {
        Ok(self.stored(wallet.as_str()))
    }

    async fn fetch_scores(
        &self,
        risk: Option<RiskLevel>,
        limit: usize,
    ) -> anyhow::Result<Vec<ActivityScore>> {
        let mut scores: Vec<ActivityScore> = self
            .inner
            .scores
            .lock()
            .expect("lock")
            .values()
            .filter(|score| risk.map_or(true, |level| score.risk_level == level))
            .cloned()
            .collect();
        scores.sort_by(|a, b| a.total_score.total_cmp(&b.total_score));
        scores.truncate(limit);
        Ok(scores)
    }

    async fn fetch_summary(&self) -> anyhow::Result<RiskSummary> {
        let mut summary = RiskSummary::default();
        for score in self.inner.scores.lock().expect("lock").values() {
            match score.risk_level {
                RiskLevel::HIGH => summary.high += 1,
                RiskLevel::MEDIUM => summary.medium += 1,
                RiskLevel::LOW => summary.low += 1,
            }
        }
        Ok(summary)
    }
}

#[async_trait]
impl HealthCheckService for MemoryStore {
    async fn check_database(&self) -> anyhow::Result<bool> {
        Ok(true)
    }
}

pub fn memory_state(store: MemoryStore) -> AppState {
    let store = Arc::new(store);
    AppState {
        config: RuntimeConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            api_token: None,
            recompute_enabled: false,
            recompute_interval_minutes: 60,
            batch_concurrency: 2,
            batch_limit: 100,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 5,
        },
        player_repo: store.clone(),
        transaction_repo: store.clone(),
        score_repo: store.clone(),
        health: store,
        scorer: Arc::new(ActivityScorer::new(ScoringConfig::default()).expect("scorer")),
        metrics: Arc::new(Metrics::default()),
    }
}
