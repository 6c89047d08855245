pub mod ops_handlers;
pub mod score_handlers;

pub use ops_handlers::*;
pub use score_handlers::*;
