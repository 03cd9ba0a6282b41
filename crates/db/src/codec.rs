//! Scalar field codecs for TEXT-encoded columns.
//!
//! Pure functions for converting between SQLite TEXT values and domain
//! types. These are testable in isolation without database access.

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

/// Encode a decimal for storage. Round-trips exactly, unlike REAL columns.
pub fn encode_decimal(value: &Decimal) -> String {
    value.to_string()
}

/// Decode a decimal column.
pub fn parse_decimal(raw: &str) -> anyhow::Result<Decimal> {
    raw.parse::<Decimal>()
        .map_err(|e| anyhow!("invalid decimal '{}': {}", raw, e))
}

/// Decode an optional decimal column.
pub fn parse_decimal_opt(raw: Option<&str>) -> anyhow::Result<Option<Decimal>> {
    raw.map(parse_decimal).transpose()
}

/// Encode a timestamp as RFC 3339.
pub fn encode_datetime(value: &DateTime<Utc>) -> String {
    value.to_rfc3339()
}

/// Decode an RFC 3339 timestamp column.
pub fn parse_datetime(raw: &str) -> anyhow::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("invalid timestamp '{}': {}", raw, e))
}

/// Decode a UUID column.
pub fn parse_uuid(raw: &str) -> anyhow::Result<Uuid> {
    Uuid::parse_str(raw).map_err(|e| anyhow!("invalid uuid '{}': {}", raw, e))
}

/// Encode a nested list as a JSON column.
pub fn encode_json<T: serde::Serialize>(value: &T) -> anyhow::Result<String> {
    serde_json::to_string(value).with_context(|| "failed to encode JSON column")
}

/// Decode a JSON column.
pub fn parse_json<T: serde::de::DeserializeOwned>(raw: &str) -> anyhow::Result<T> {
    serde_json::from_str(raw).with_context(|| format!("invalid JSON column '{}'", raw))
}
