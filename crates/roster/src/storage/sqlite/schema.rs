//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create the employees table.
///
/// Timestamps are stored as fixed-width RFC 3339 text, so ordering by the
/// column is chronological.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    position TEXT NOT NULL,
    salary INTEGER NOT NULL,
    hired_date TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_employees_created_at ON employees(created_at);
"#;

pub const INSERT_EMPLOYEE: &str = r#"
INSERT INTO employees (id, name, position, salary, hired_date, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, NULL)
"#;

pub const SELECT_EMPLOYEE_BY_ID: &str = r#"
SELECT id, name, position, salary, hired_date, created_at, updated_at
FROM employees
WHERE id = ?1
"#;

pub const SELECT_ALL_EMPLOYEES: &str = r#"
SELECT id, name, position, salary, hired_date, created_at, updated_at
FROM employees
ORDER BY created_at, id
"#;

pub const UPDATE_EMPLOYEE: &str = r#"
UPDATE employees
SET name = ?2, position = ?3, salary = ?4, hired_date = ?5, updated_at = ?6
WHERE id = ?1
"#;

pub const DELETE_EMPLOYEE: &str = r#"
DELETE FROM employees WHERE id = ?1
"#;
