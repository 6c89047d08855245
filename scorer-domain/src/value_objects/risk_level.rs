// Risk level value object

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ScoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    LOW,
    MEDIUM,
    HIGH,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::LOW => "LOW",
            RiskLevel::MEDIUM => "MEDIUM",
            RiskLevel::HIGH => "HIGH",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RiskLevel {
    type Err = ScoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(RiskLevel::LOW),
            "MEDIUM" => Ok(RiskLevel::MEDIUM),
            "HIGH" => Ok(RiskLevel::HIGH),
            other => Err(ScoreError::InvalidRiskLevel(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!(" high ".parse::<RiskLevel>().expect("parse"), RiskLevel::HIGH);
        assert_eq!("Medium".parse::<RiskLevel>().expect("parse"), RiskLevel::MEDIUM);
    }

    #[test]
    fn parse_rejects_unknown_levels() {
        let err = "CRITICAL".parse::<RiskLevel>().expect_err("reject");
        assert!(matches!(err, ScoreError::InvalidRiskLevel(level) if level == "CRITICAL"));
    }

    #[test]
    fn levels_order_by_severity() {
        assert!(RiskLevel::LOW < RiskLevel::MEDIUM);
        assert!(RiskLevel::MEDIUM < RiskLevel::HIGH);
    }
}
