use async_trait::async_trait;

use crate::entities::{ActivityScore, Player, RiskSummary, Transaction};
use crate::value_objects::{RiskLevel, WalletAddress};

#[async_trait]
pub trait PlayerRepository: Send + Sync {
    async fn ensure_schema(&self) -> anyhow::Result<()>;
    async fn fetch_player(&self, wallet: &WalletAddress) -> anyhow::Result<Option<Player>>;
    async fn list_wallets(&self, limit: usize) -> anyhow::Result<Vec<WalletAddress>>;
    async fn ping(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Every transaction where `wallet` is sender or receiver.
    async fn fetch_wallet_transactions(
        &self,
        wallet: &WalletAddress,
    ) -> anyhow::Result<Vec<Transaction>>;
}

#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Replaces any stored score for the same wallet.
    async fn upsert_scores(&self, scores: &[ActivityScore]) -> anyhow::Result<()>;
    async fn fetch_score(&self, wallet: &WalletAddress) -> anyhow::Result<Option<ActivityScore>>;
    async fn fetch_scores(
        &self,
        risk: Option<RiskLevel>,
        limit: usize,
    ) -> anyhow::Result<Vec<ActivityScore>>;
    async fn fetch_summary(&self) -> anyhow::Result<RiskSummary>;
}
