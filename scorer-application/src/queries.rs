pub mod score_queries;

pub use score_queries::*;
