pub mod score_commands;

pub use score_commands::*;
