use thiserror::Error;

/// Errors that can occur during durable store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl StoreError {
    /// Creates a `NotFound` error for an employee id.
    pub fn employee_not_found(id: impl ToString) -> Self {
        StoreError::NotFound {
            entity_type: "Employee",
            id: id.to_string(),
        }
    }

    /// Returns true if this error reports a missing row.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_not_found_display() {
        let error = StoreError::employee_not_found("abc-123");
        assert_eq!(error.to_string(), "Employee not found: abc-123");
        assert!(error.is_not_found());
    }

    #[test]
    fn test_store_error_connection_failed_display() {
        let error = StoreError::ConnectionFailed("timeout after 30s".to_string());
        assert_eq!(error.to_string(), "Connection failed: timeout after 30s");
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_store_error_query_failed_display() {
        let error = StoreError::QueryFailed("no such table: employees".to_string());
        assert_eq!(error.to_string(), "Query failed: no such table: employees");
    }

    #[test]
    fn test_store_error_invalid_data_display() {
        let error = StoreError::InvalidData("date out of range".to_string());
        assert_eq!(error.to_string(), "Invalid data: date out of range");
    }
}
