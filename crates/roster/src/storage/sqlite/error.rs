//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `StoreError` from `roster_core::storage`.

use roster_core::storage::StoreError;

/// Maps a rusqlite error raised while working on employee `id`.
///
/// # Error Mapping
///
/// - `QueryReturnedNoRows` → `StoreError::NotFound`
/// - Conversion failures → `StoreError::InvalidData`
/// - Open failures → `StoreError::ConnectionFailed`
/// - All other errors → `StoreError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, id: Option<&str>) -> StoreError {
    match err {
        rusqlite::Error::QueryReturnedNoRows => {
            StoreError::employee_not_found(id.unwrap_or("unknown"))
        }

        rusqlite::Error::FromSqlConversionFailure(..)
        | rusqlite::Error::IntegralValueOutOfRange(..) => StoreError::InvalidData(err.to_string()),

        rusqlite::Error::SqliteFailure(sqlite_err, _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            StoreError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        _ => StoreError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error to a StoreError.
///
/// This is the main entry point for error mapping in async code.
pub fn map_tokio_rusqlite_error(err: tokio_rusqlite::Error) -> StoreError {
    map_with_id(err, None)
}

/// Maps a tokio_rusqlite error with a known employee ID to a StoreError.
///
/// Use this variant when the ID is known at the call site, so a missing row
/// reports which employee was missing.
pub fn map_tokio_rusqlite_error_with_id(
    err: tokio_rusqlite::Error,
    id: impl Into<String>,
) -> StoreError {
    let id = id.into();
    map_with_id(err, Some(&id))
}

fn map_with_id(err: tokio_rusqlite::Error, id: Option<&str>) -> StoreError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, id),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            StoreError::ConnectionFailed("Connection closed".to_string())
        }
        _ => StoreError::QueryFailed(err.to_string()),
    }
}
