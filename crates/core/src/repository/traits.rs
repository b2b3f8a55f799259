use async_trait::async_trait;
use uuid::Uuid;

use crate::employee::{Employee, EmployeeFields};

use super::{OpContext, Outcome, Result};

/// Employee operations exposed to callers.
///
/// Every operation either fails with a [`RepositoryError`](super::RepositoryError)
/// or succeeds with an [`Outcome`] whose warnings report cache problems that
/// did not affect the result.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Creates an employee and returns the id assigned by the store.
    async fn create_employee(&self, ctx: &OpContext, fields: &EmployeeFields)
        -> Result<Outcome<Uuid>>;

    /// Gets an employee by its ID.
    async fn get_employee(&self, ctx: &OpContext, id: Uuid) -> Result<Outcome<Employee>>;

    /// Replaces the editable fields of an employee and returns the stored
    /// record.
    async fn update_employee(
        &self,
        ctx: &OpContext,
        id: Uuid,
        fields: &EmployeeFields,
    ) -> Result<Outcome<Employee>>;

    /// Deletes an employee.
    async fn delete_employee(&self, ctx: &OpContext, id: Uuid) -> Result<Outcome<()>>;

    /// Lists all employees.
    async fn list_employees(&self, ctx: &OpContext) -> Result<Outcome<Vec<Employee>>>;
}
