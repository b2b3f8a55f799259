//! Pure functions for serializing/deserializing employees to/from cache bytes.
//!
//! Cache values are JSON: field-named, human-readable and tolerant of schema
//! additions in either direction.

use crate::employee::Employee;
use thiserror::Error;

/// Errors that can occur during cache serialization/deserialization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SerializationError {
    /// Failed to serialize a value to bytes.
    #[error("Failed to serialize: {0}")]
    SerializeFailed(String),
    /// Failed to deserialize bytes to a value.
    #[error("Failed to deserialize: {0}")]
    DeserializeFailed(String),
}

/// Result type for serialization operations.
pub type Result<T> = std::result::Result<T, SerializationError>;

/// Serializes an employee to JSON bytes.
pub fn serialize_employee(employee: &Employee) -> Result<Vec<u8>> {
    serde_json::to_vec(employee).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to an employee.
pub fn deserialize_employee(bytes: &[u8]) -> Result<Employee> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}

/// Serializes a slice of employees to JSON bytes.
pub fn serialize_employees(employees: &[Employee]) -> Result<Vec<u8>> {
    serde_json::to_vec(employees).map_err(|e| SerializationError::SerializeFailed(e.to_string()))
}

/// Deserializes JSON bytes to a vector of employees.
pub fn deserialize_employees(bytes: &[u8]) -> Result<Vec<Employee>> {
    serde_json::from_slice(bytes).map_err(|e| SerializationError::DeserializeFailed(e.to_string()))
}
