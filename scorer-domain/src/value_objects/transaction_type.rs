// Transaction type value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    ItemPurchase,
    RewardClaim,
    TokenTransfer,
    NftTrade,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::ItemPurchase => "ITEM_PURCHASE",
            TransactionType::RewardClaim => "REWARD_CLAIM",
            TransactionType::TokenTransfer => "TOKEN_TRANSFER",
            TransactionType::NftTrade => "NFT_TRADE",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ITEM_PURCHASE" => Ok(TransactionType::ItemPurchase),
            "REWARD_CLAIM" => Ok(TransactionType::RewardClaim),
            "TOKEN_TRANSFER" => Ok(TransactionType::TokenTransfer),
            "NFT_TRADE" => Ok(TransactionType::NftTrade),
            _ => Err(ScoreError::InvalidTransaction(format!(
                "unknown transaction_type '{}'",
                s
            ))),
        }
    }
}
