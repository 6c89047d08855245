// Scoring engine
pub mod aggregator;
pub mod assembler;
pub mod metrics;
pub mod risk_factors;
pub mod scorer;

#[cfg(test)]
pub(crate) mod test_support;

pub use aggregator::*;
pub use assembler::*;
pub use metrics::*;
pub use risk_factors::*;
pub use scorer::*;
