//! Serde helpers for backend timestamps.
//!
//! The backend emits ISO-8601 datetimes with or without an offset. Values
//! without an offset are taken as UTC.

use crate::Timestamp;
use chrono::{NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serializer};

pub fn parse(raw: &str) -> Option<Timestamp> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
}

/// `MM/DD/YYYY`, the date format used in list rows.
pub fn format_date(value: &Timestamp) -> String {
    value.format("%m/%d/%Y").to_string()
}

pub fn format_date_time(value: &Timestamp) -> String {
    value.format("%m/%d/%Y %H:%M").to_string()
}
