// Transaction entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::value_objects::TransactionType;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub from_address: String,
    pub to_address: String,
    pub amount: f64,
    pub transaction_type: TransactionType,
    pub timestamp: DateTime<Utc>,
}

impl Transaction {
    pub fn involves(&self, wallet: &str) -> bool {
        self.from_address == wallet || self.to_address == wallet
    }

    /// The other endpoint of the transfer as seen from `wallet`.
    pub fn counterparty<'a>(&'a self, wallet: &str) -> &'a str {
        if self.from_address == wallet {
            &self.to_address
        } else {
            &self.from_address
        }
    }

    pub fn validate(&self) -> Result<(), ScoreError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ScoreError::InvalidTransaction(format!(
                "amount must be a non-negative number, got {}",
                self.amount
            )));
        }
        if self.from_address.trim().is_empty() || self.to_address.trim().is_empty() {
            return Err(ScoreError::InvalidTransaction(
                "from_address and to_address are required".to_string(),
            ));
        }
        Ok(())
    }
}
