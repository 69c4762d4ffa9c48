//! Column encodings shared by the repositories.
//!
//! Timestamps are RFC 3339 text with microseconds and a `Z` suffix so that
//! lexical order matches chronological order. Money is decimal text. Times of
//! day are `HH:MM`.

use std::str::FromStr;

use chrono::{DateTime, NaiveTime, SecondsFormat};
use rust_decimal::Decimal;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use servicecore_domain::time::Timestamp;

const CLOCK_FORMAT: &str = "%H:%M";

fn decode_error(err: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::Decode(Box::new(err))
}

pub(crate) fn encode_timestamp(value: Timestamp) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn timestamp(row: &SqliteRow, column: &str) -> Result<Timestamp, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    DateTime::parse_from_rfc3339(&raw)
        .map(|value| value.to_utc())
        .map_err(decode_error)
}

pub(crate) fn encode_clock(value: NaiveTime) -> String {
    value.format(CLOCK_FORMAT).to_string()
}

pub(crate) fn clock(row: &SqliteRow, column: &str) -> Result<NaiveTime, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    NaiveTime::parse_from_str(&raw, CLOCK_FORMAT).map_err(decode_error)
}

pub(crate) fn decimal(row: &SqliteRow, column: &str) -> Result<Decimal, sqlx::Error> {
    let raw: String = row.try_get(column)?;
    Decimal::from_str(&raw).map_err(decode_error)
}

pub(crate) fn optional_decimal(
    row: &SqliteRow,
    column: &str,
) -> Result<Option<Decimal>, sqlx::Error> {
    let raw: Option<String> = row.try_get(column)?;
    raw.as_deref()
        .map(Decimal::from_str)
        .transpose()
        .map_err(decode_error)
}

/// Parse a text column through [`FromStr`], for stored enums.
pub(crate) fn parsed<T>(row: &SqliteRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(decode_error)
}

pub(crate) fn day_of_week(row: &SqliteRow, column: &str) -> Result<u8, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;
    u8::try_from(raw).map_err(decode_error)
}
