use async_trait::async_trait;
use uuid::Uuid;

use crate::employee::{Employee, EmployeeFields};

use super::Result;

/// Durable store of employee records.
///
/// The store is the single source of truth. It assigns ids, stamps
/// `created_at` on create and `updated_at` on update, and returns the
/// record exactly as persisted.
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Persists a new employee and returns the stored record.
    async fn create(&self, fields: &EmployeeFields) -> Result<Employee>;

    /// Gets an employee by its ID.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>>;

    /// Replaces the editable fields of an employee and returns the stored
    /// record. Fails with `StoreError::NotFound` if the id does not exist.
    async fn update(&self, id: Uuid, fields: &EmployeeFields) -> Result<Employee>;

    /// Deletes an employee. Fails with `StoreError::NotFound` if the id does
    /// not exist.
    async fn delete(&self, id: Uuid) -> Result<()>;

    /// Lists every employee, oldest first.
    async fn list_all(&self) -> Result<Vec<Employee>>;

    /// Releases the underlying connection. Called once at shutdown.
    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
