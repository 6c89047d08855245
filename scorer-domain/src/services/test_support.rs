use chrono::{DateTime, Utc};

use crate::entities::{Player, Transaction};
use crate::value_objects::{TransactionType, WalletAddress};

pub fn player(
    wallet: &str,
    created_at: DateTime<Utc>,
    level: i32,
    experience_points: i64,
    total_transactions: i64,
) -> Player {
    Player {
        wallet_address: WalletAddress::parse(wallet).expect("wallet"),
        username: None,
        created_at,
        level,
        experience_points,
        total_transactions,
    }
}

pub fn tx_at(from: &str, to: &str, amount: f64, timestamp: DateTime<Utc>) -> Transaction {
    Transaction {
        id: None,
        from_address: from.to_string(),
        to_address: to.to_string(),
        amount,
        transaction_type: TransactionType::TokenTransfer,
        timestamp,
    }
}
