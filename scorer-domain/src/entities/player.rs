// Player entity
// Immutable profile snapshot as read from the player store

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ScoreError;
use crate::value_objects::WalletAddress;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub wallet_address: WalletAddress,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub level: i32,
    pub experience_points: i64,
    pub total_transactions: i64,
}

impl Player {
    /// Rejects profiles that would corrupt the age and level metrics.
    pub fn validate(&self) -> Result<(), ScoreError> {
        WalletAddress::parse(self.wallet_address.as_str())?;
        if self.level < 1 {
            return Err(ScoreError::InvalidProfile(format!(
                "level must be >= 1 for '{}', got {}",
                self.wallet_address, self.level
            )));
        }
        if self.experience_points < 0 {
            return Err(ScoreError::InvalidProfile(format!(
                "experience_points must be >= 0 for '{}', got {}",
                self.wallet_address, self.experience_points
            )));
        }
        if self.total_transactions < 0 {
            return Err(ScoreError::InvalidProfile(format!(
                "total_transactions must be >= 0 for '{}', got {}",
                self.wallet_address, self.total_transactions
            )));
        }
        Ok(())
    }
}
