use serde::{Deserialize, Serialize};

use scorer_domain::RiskLevel;

#[derive(Debug, Default, Deserialize)]
pub struct BatchRequest {
    #[serde(default)]
    pub wallets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletFailure {
    pub wallet_address: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub run_id: String,
    pub requested: usize,
    pub scored: usize,
    pub failures: Vec<WalletFailure>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ScoreListQuery {
    pub risk: Option<String>,
    pub limit: Option<usize>,
}

impl ScoreListQuery {
    pub fn risk_level(&self) -> Result<Option<RiskLevel>, scorer_domain::ScoreError> {
        self.risk
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(str::parse)
            .transpose()
    }
}
