pub mod health_service;
pub mod recompute_service;

pub use health_service::*;
pub use recompute_service::*;
