//! In-memory store implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use roster_core::employee::{Employee, EmployeeFields};
use roster_core::storage::{EmployeeStore, Result, StoreError};

/// In-memory employee store.
///
/// Uses a HashMap wrapped in `Arc<RwLock<_>>` for thread-safe access.
/// Clones share the same data.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    employees: Arc<RwLock<HashMap<Uuid, Employee>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn create(&self, fields: &EmployeeFields) -> Result<Employee> {
        let employee = Employee::from_fields(Uuid::new_v4(), fields.clone(), Utc::now());

        let mut employees = self.employees.write().await;
        employees.insert(employee.id, employee.clone());
        Ok(employee)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let employees = self.employees.read().await;
        Ok(employees.get(&id).cloned())
    }

    async fn update(&self, id: Uuid, fields: &EmployeeFields) -> Result<Employee> {
        let mut employees = self.employees.write().await;
        let employee = employees
            .get_mut(&id)
            .ok_or_else(|| StoreError::employee_not_found(id))?;

        employee.apply_update(fields.clone(), Utc::now());
        Ok(employee.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut employees = self.employees.write().await;
        if employees.remove(&id).is_none() {
            return Err(StoreError::employee_not_found(id));
        }
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        let employees = self.employees.read().await;
        let mut all: Vec<Employee> = employees.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(all)
    }
}
