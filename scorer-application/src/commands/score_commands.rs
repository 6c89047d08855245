use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Semaphore;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::dtos::{BatchOutcome, WalletFailure};
use crate::{AppError, AppState};
use scorer_domain::ports::{PlayerRepository, TransactionRepository};
use scorer_domain::{ActivityScore, ActivityScorer, ScoreError, WalletAddress};

pub async fn recompute_score(state: &AppState, wallet: &str) -> Result<ActivityScore, AppError> {
    let wallet = WalletAddress::parse(wallet)?;
    let score = score_wallet(
        state.player_repo.clone(),
        state.transaction_repo.clone(),
        state.scorer.clone(),
        wallet.clone(),
        Utc::now(),
    )
    .await
    .map_err(|err| {
        state.metrics.record_failures(1);
        warn!(wallet = %wallet, "scoring failed: {}", err);
        AppError::from(err)
    })?;

    state
        .score_repo
        .upsert_scores(std::slice::from_ref(&score))
        .await
        .map_err(|err| {
            error!(wallet = %wallet, "failed to store score: {}", err);
            AppError::Internal(err)
        })?;
    state.metrics.record_scores(std::slice::from_ref(&score));
    Ok(score)
}

/// Scores every requested wallet independently. A wallet that cannot be
/// scored is reported in the outcome and never stops the others. An empty
/// request sweeps all known wallets up to the configured batch limit.
pub async fn recompute_batch(state: &AppState, wallets: Vec<String>) -> Result<BatchOutcome, AppError> {
    let run_id = Uuid::new_v4().to_string();
    let mut failures = Vec::new();

    let targets: BTreeSet<WalletAddress> = if wallets.is_empty() {
        state
            .player_repo
            .list_wallets(state.config.batch_limit)
            .await
            .map_err(|err| {
                error!(run_id = %run_id, "failed to list wallets: {}", err);
                AppError::DataUnavailable(err.to_string())
            })?
            .into_iter()
            .collect()
    } else {
        let mut parsed = BTreeSet::new();
        for raw in wallets {
            match WalletAddress::parse(&raw) {
                Ok(wallet) => {
                    parsed.insert(wallet);
                }
                Err(err) => failures.push(WalletFailure {
                    wallet_address: raw,
                    reason: err.to_string(),
                }),
            }
        }
        parsed
    };
    let requested = targets.len() + failures.len();
    info!(run_id = %run_id, wallets = targets.len(), "batch scoring started");

    let now = Utc::now();
    let permits = Arc::new(Semaphore::new(state.config.batch_concurrency.max(1)));
    let mut handles = Vec::with_capacity(targets.len());
    for wallet in targets {
        let permits = permits.clone();
        let player_repo = state.player_repo.clone();
        let transaction_repo = state.transaction_repo.clone();
        let scorer = state.scorer.clone();
        let task_wallet = wallet.clone();
        let handle = tokio::spawn(async move {
            let _permit = permits
                .acquire_owned()
                .await
                .map_err(|err| ScoreError::UpstreamUnavailable(err.to_string()))?;
            score_wallet(player_repo, transaction_repo, scorer, task_wallet, now).await
        });
        handles.push((wallet, handle));
    }

    let mut scores = Vec::with_capacity(handles.len());
    for (wallet, handle) in handles {
        match handle.await {
            Ok(Ok(score)) => scores.push(score),
            Ok(Err(err)) => {
                warn!(run_id = %run_id, wallet = %wallet, "scoring failed: {}", err);
                failures.push(WalletFailure {
                    wallet_address: wallet.to_string(),
                    reason: err.to_string(),
                });
            }
            Err(err) => {
                error!(run_id = %run_id, wallet = %wallet, "scoring task aborted: {}", err);
                failures.push(WalletFailure {
                    wallet_address: wallet.to_string(),
                    reason: format!("scoring task aborted: {}", err),
                });
            }
        }
    }

    if !scores.is_empty() {
        state.score_repo.upsert_scores(&scores).await.map_err(|err| {
            error!(run_id = %run_id, "failed to store batch scores: {}", err);
            AppError::Internal(err)
        })?;
    }

    state.metrics.record_batch_run();
    state.metrics.record_scores(&scores);
    state.metrics.record_failures(failures.len());
    info!(
        run_id = %run_id,
        scored = scores.len(),
        failed = failures.len(),
        "batch scoring finished"
    );

    Ok(BatchOutcome {
        run_id,
        requested,
        scored: scores.len(),
        failures,
    })
}

async fn score_wallet(
    player_repo: Arc<dyn PlayerRepository>,
    transaction_repo: Arc<dyn TransactionRepository>,
    scorer: Arc<ActivityScorer>,
    wallet: WalletAddress,
    now: DateTime<Utc>,
) -> Result<ActivityScore, ScoreError> {
    let player = player_repo
        .fetch_player(&wallet)
        .await
        .map_err(|err| upstream_error(err, "player", &wallet))?
        .ok_or_else(|| ScoreError::PlayerNotFound(wallet.to_string()))?;
    let transactions = transaction_repo
        .fetch_wallet_transactions(&wallet)
        .await
        .map_err(|err| upstream_error(err, "transactions", &wallet))?;
    scorer.score(&player, &transactions, now)
}

// Validation failures raised while decoding rows keep their own kind.
fn upstream_error(err: anyhow::Error, what: &str, wallet: &WalletAddress) -> ScoreError {
    match err.downcast::<ScoreError>() {
        Ok(score_err) => score_err,
        Err(err) => ScoreError::UpstreamUnavailable(format!("{} for '{}': {}", what, wallet, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{memory_state, MemoryStore};
    use scorer_domain::RiskLevel;

    #[tokio::test]
    async fn recompute_stores_fresh_score() {
        let store = MemoryStore::seeded();
        let state = memory_state(store.clone());

        let score = recompute_score(&state, "0xalice").await.expect("score");
        assert_eq!(score.wallet_address.as_str(), "0xalice");
        assert_eq!(store.stored("0xalice"), Some(score));
    }

    #[tokio::test]
    async fn unknown_wallet_is_not_found() {
        let state = memory_state(MemoryStore::seeded());
        let err = recompute_score(&state, "0xnobody").await.expect_err("missing");
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn store_outage_is_data_unavailable() {
        let store = MemoryStore::seeded();
        store.fail_wallet("0xalice");
        let state = memory_state(store.clone());
        let err = recompute_score(&state, "0xalice").await.expect_err("outage");
        assert!(matches!(err, AppError::DataUnavailable(_)));
        assert_eq!(store.stored("0xalice"), None);
    }

    #[tokio::test]
    async fn bad_rows_keep_their_error_kind() {
        let store = MemoryStore::seeded();
        store.corrupt_wallet("0xalice");
        let state = memory_state(store);
        let err = recompute_score(&state, "0xalice").await.expect_err("corrupt");
        assert!(matches!(err, AppError::BadRequest(msg) if msg.contains("transaction_type")));
    }

    #[tokio::test]
    async fn batch_survives_individual_failures() {
        let store = MemoryStore::seeded();
        store.fail_wallet("0xbob");
        let state = memory_state(store.clone());

        let outcome = recompute_batch(
            &state,
            vec![
                "0xalice".to_string(),
                "0xbob".to_string(),
                "0xcarol".to_string(),
                "0xalice".to_string(),
                "   ".to_string(),
            ],
        )
        .await
        .expect("batch");

        assert_eq!(outcome.requested, 4);
        assert_eq!(outcome.scored, 2);
        let failed: Vec<&str> = outcome
            .failures
            .iter()
            .map(|failure| failure.wallet_address.as_str())
            .collect();
        assert!(failed.contains(&"0xbob"));
        assert!(failed.contains(&"   "));
        assert!(store.stored("0xalice").is_some());
        assert!(store.stored("0xcarol").is_some());
        assert!(store.stored("0xbob").is_none());
    }

    #[tokio::test]
    async fn empty_batch_sweeps_known_wallets() {
        let store = MemoryStore::seeded();
        let state = memory_state(store.clone());
        let outcome = recompute_batch(&state, Vec::new()).await.expect("batch");
        assert_eq!(outcome.scored, 3);
        assert!(outcome.failures.is_empty());
        assert_eq!(
            store.stored("0xcarol").map(|score| score.risk_level),
            Some(RiskLevel::HIGH)
        );
    }

    #[tokio::test]
    async fn recompute_replaces_previous_score() {
        let store = MemoryStore::seeded();
        let state = memory_state(store.clone());
        let first = recompute_score(&state, "0xalice").await.expect("first");
        let second = recompute_score(&state, "0xalice").await.expect("second");
        assert!(second.calculated_at >= first.calculated_at);
        assert_eq!(store.stored("0xalice"), Some(second));
        assert_eq!(store.score_count(), 1);
    }
}
