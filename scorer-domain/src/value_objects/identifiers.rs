// Identifier value objects

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

const MAX_WALLET_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct WalletAddress(String);

impl WalletAddress {
    pub fn parse(value: &str) -> Result<Self, ScoreError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ScoreError::InvalidProfile("wallet_address is empty".to_string()));
        }
        if trimmed.len() > MAX_WALLET_LEN {
            return Err(ScoreError::InvalidProfile(format!(
                "wallet_address longer than {} characters",
                MAX_WALLET_LEN
            )));
        }
        if trimmed.chars().any(char::is_whitespace) {
            return Err(ScoreError::InvalidProfile(format!(
                "wallet_address '{}' contains whitespace",
                trimmed
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for WalletAddress {
    type Error = ScoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<WalletAddress> for String {
    fn from(value: WalletAddress) -> Self {
        value.0
    }
}

impl fmt::Display for WalletAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for WalletAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_trims_surrounding_space() {
        let wallet = WalletAddress::parse("  0xabc  ").expect("wallet");
        assert_eq!(wallet.as_str(), "0xabc");
    }

    #[test]
    fn parse_rejects_blank_and_inner_whitespace() {
        assert!(WalletAddress::parse("   ").is_err());
        assert!(WalletAddress::parse("0x ab").is_err());
    }

    #[test]
    fn deserialize_goes_through_parse() {
        let wallet: WalletAddress = serde_json::from_str("\" 0xabc \"").expect("wallet");
        assert_eq!(wallet.as_str(), "0xabc");
        assert_eq!(serde_json::to_string(&wallet).expect("json"), "\"0xabc\"");
        assert!(serde_json::from_str::<WalletAddress>("\"\"").is_err());
    }
}
