pub mod context;
pub mod lifecycle;

pub use lifecycle::{run_recompute_once, run_standalone};
