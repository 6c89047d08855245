// Domain value objects
pub mod identifiers;
pub mod risk_level;
pub mod transaction_type;

pub use identifiers::*;
pub use risk_level::*;
pub use transaction_type::*;
