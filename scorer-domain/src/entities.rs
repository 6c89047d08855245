// Domain entities
pub mod activity_score;
pub mod player;
pub mod runtime_config;
pub mod scoring_config;
pub mod transaction;

pub use activity_score::*;
pub use player::*;
pub use runtime_config::*;
pub use scoring_config::*;
pub use transaction::*;
