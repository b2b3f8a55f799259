//! Request payloads for employee operations.
//!
//! Pure data types with no I/O, shared between callers of the repository.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::EmployeeFields;

/// Partial edit of an employee.
///
/// The repository only performs full-record updates; callers read the
/// current record, apply this patch to its fields and send the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEmployeeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hired_date: Option<NaiveDate>,
}

impl UpdateEmployeeRequest {
    /// Create an empty update request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the employee name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the employee position.
    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    /// Set the employee salary.
    pub fn with_salary(mut self, salary: i64) -> Self {
        self.salary = Some(salary);
        self
    }

    /// Set the hire date.
    pub fn with_hired_date(mut self, hired_date: NaiveDate) -> Self {
        self.hired_date = Some(hired_date);
        self
    }

    /// Returns true if the request changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.position.is_none()
            && self.salary.is_none()
            && self.hired_date.is_none()
    }

    /// Apply updates to an existing set of fields.
    pub fn apply_to(self, fields: &mut EmployeeFields) {
        if let Some(name) = self.name {
            fields.name = name;
        }
        if let Some(position) = self.position {
            fields.position = position;
        }
        if let Some(salary) = self.salary {
            fields.salary = salary;
        }
        if let Some(hired_date) = self.hired_date {
            fields.hired_date = hired_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_fields() -> EmployeeFields {
        EmployeeFields::new(
            "A",
            "B",
            100,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        )
    }

    #[test]
    fn test_apply_salary_only() {
        let mut fields = base_fields();
        UpdateEmployeeRequest::new()
            .with_salary(150)
            .apply_to(&mut fields);

        assert_eq!(fields.salary, 150);
        assert_eq!(fields.name, "A");
        assert_eq!(fields.position, "B");
    }

    #[test]
    fn test_apply_all_fields() {
        let mut fields = base_fields();
        let date = NaiveDate::from_ymd_opt(2023, 12, 31).unwrap();
        UpdateEmployeeRequest::new()
            .with_name("C")
            .with_position("D")
            .with_salary(1)
            .with_hired_date(date)
            .apply_to(&mut fields);

        assert_eq!(fields, EmployeeFields::new("C", "D", 1, date));
    }

    #[test]
    fn test_empty_request_is_noop() {
        let request = UpdateEmployeeRequest::new();
        assert!(request.is_empty());

        let mut fields = base_fields();
        request.apply_to(&mut fields);
        assert_eq!(fields, base_fields());
    }

    #[test]
    fn test_deserialize_partial_json() {
        let request: UpdateEmployeeRequest = serde_json::from_str(r#"{"salary":150}"#).unwrap();
        assert_eq!(request, UpdateEmployeeRequest::new().with_salary(150));
    }
}
