//! SQLite store implementation.
//!
//! Implements `EmployeeStore` from `roster_core::storage` using SQLite.

use async_trait::async_trait;
use chrono::Utc;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use roster_core::employee::{Employee, EmployeeFields};
use roster_core::storage::{EmployeeStore, Result, StoreError};

use super::conversions::{format_date, format_datetime, row_to_employee};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based employee store.
///
/// All statements run on the single background thread owned by the
/// `tokio_rusqlite::Connection`, so each call is serialized with respect to
/// the others.
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens a file-based database.
    ///
    /// The database file will be created if it doesn't exist.
    /// Schema tables are created automatically.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| StoreError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Initialize the database schema.
    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_tokio_rusqlite_error)
    }
}

#[async_trait]
impl EmployeeStore for SqliteStore {
    async fn create(&self, fields: &EmployeeFields) -> Result<Employee> {
        let employee = Employee::from_fields(Uuid::new_v4(), fields.clone(), Utc::now());

        let id = employee.id.to_string();
        let name = employee.name.clone();
        let position = employee.position.clone();
        let salary = employee.salary;
        let hired_date = format_date(&employee.hired_date);
        let created_at = format_datetime(&employee.created_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_EMPLOYEE,
                    rusqlite::params![id, name, position, salary, hired_date, created_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, employee.id.to_string()))?;

        Ok(employee)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Employee>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_EMPLOYEE_BY_ID)
                    .map_err(wrap_err)?;
                match stmt.query_row([&id_str], row_to_employee) {
                    Ok(employee) => Ok(Some(employee)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id.to_string()))
    }

    async fn update(&self, id: Uuid, fields: &EmployeeFields) -> Result<Employee> {
        let id_str = id.to_string();
        let name = fields.name.clone();
        let position = fields.position.clone();
        let salary = fields.salary;
        let hired_date = format_date(&fields.hired_date);
        let updated_at = format_datetime(&Utc::now());

        // Update and re-read in one call so the returned record is exactly
        // the stored row.
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_EMPLOYEE,
                        rusqlite::params![id_str, name, position, salary, hired_date, updated_at],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }

                let mut stmt = conn
                    .prepare(schema::SELECT_EMPLOYEE_BY_ID)
                    .map_err(wrap_err)?;
                stmt.query_row([&id_str], row_to_employee).map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id.to_string()))
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_EMPLOYEE, [&id_str])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    Err(wrap_err(rusqlite::Error::QueryReturnedNoRows))
                } else {
                    Ok(())
                }
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, id.to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Employee>> {
        self.conn
            .call(|conn| {
                let mut stmt = conn
                    .prepare(schema::SELECT_ALL_EMPLOYEES)
                    .map_err(wrap_err)?;
                let rows = stmt.query_map([], row_to_employee).map_err(wrap_err)?;

                let mut employees = Vec::new();
                for row_result in rows {
                    employees.push(row_result.map_err(wrap_err)?);
                }
                Ok(employees)
            })
            .await
            .map_err(map_tokio_rusqlite_error)
    }

    async fn close(&self) -> Result<()> {
        self.conn
            .clone()
            .close()
            .await
            .map_err(map_tokio_rusqlite_error)
    }
}
