use anyhow::{anyhow, Result};

pub fn validate_clickhouse_url(value: &str) -> Result<()> {
    let trimmed = value.trim();
    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(anyhow!("clickhouse_url must start with http:// or https://"));
    }
    Ok(())
}

/// The database name is interpolated into DDL, so only plain identifiers pass.
pub fn validate_database_name(value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(anyhow!("clickhouse_database is empty"));
    }
    if !value.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_') {
        return Err(anyhow!(
            "clickhouse_database '{}' must contain only letters, digits and '_'",
            value
        ));
    }
    Ok(())
}
