pub mod clickhouse_repo;
pub mod rows;

pub use clickhouse_repo::*;
pub use rows::*;
