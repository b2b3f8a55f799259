//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.
//! These are testable in isolation without database access.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

use roster_core::employee::Employee;

/// Convert a SQLite row to an Employee.
///
/// Expected columns: id, name, position, salary, hired_date, created_at, updated_at
pub fn row_to_employee(row: &Row) -> rusqlite::Result<Employee> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let position: String = row.get(2)?;
    let salary: i64 = row.get(3)?;
    let hired_date: String = row.get(4)?;
    let created_at: String = row.get(5)?;
    let updated_at: Option<String> = row.get(6)?;

    Ok(Employee {
        id: parse_uuid(&id)?,
        name,
        position,
        salary,
        hired_date: parse_date(&hired_date)?,
        created_at: parse_datetime(&created_at)?,
        updated_at: updated_at.as_deref().map(parse_datetime).transpose()?,
    })
}

/// Parse a UUID from string.
fn parse_uuid(s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a date from ISO 8601 string (YYYY-MM-DD).
fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Parse a datetime from RFC 3339 string.
fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })
}

/// Format a DateTime<Utc> for SQLite storage.
///
/// Always nanosecond precision with a `Z` suffix, so values are fixed-width
/// and sort lexicographically in time order.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Format a NaiveDate for SQLite storage (YYYY-MM-DD).
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
