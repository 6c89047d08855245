use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

pub fn millis_to_utc(ms: i64) -> Result<OffsetDateTime> {
    let nanos = i128::from(ms).saturating_mul(1_000_000);
    OffsetDateTime::from_unix_timestamp_nanos(nanos)
        .map_err(|err| anyhow!("timestamp {} out of range: {}", ms, err))
}

pub fn offset_to_chrono(value: OffsetDateTime) -> Result<DateTime<Utc>> {
    let ms = i64::try_from(value.unix_timestamp_nanos() / 1_000_000)
        .map_err(|_| anyhow!("timestamp {} out of range", value))?;
    chrono_from_millis(ms)
}

pub fn chrono_from_millis(ms: i64) -> Result<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp_millis(ms).ok_or_else(|| anyhow!("timestamp {} out of range", ms))
}

pub fn chrono_to_offset(value: DateTime<Utc>) -> Result<OffsetDateTime> {
    millis_to_utc(value.timestamp_millis())
}
