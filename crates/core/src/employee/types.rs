use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The caller-supplied part of an employee record.
///
/// This is the payload for both create and full-record update. The store
/// owns everything else (`id`, `created_at`, `updated_at`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFields {
    pub name: String,
    pub position: String,
    /// Salary in whole currency units.
    pub salary: i64,
    pub hired_date: NaiveDate,
}

impl EmployeeFields {
    /// Creates a new set of employee fields.
    pub fn new(
        name: impl Into<String>,
        position: impl Into<String>,
        salary: i64,
        hired_date: NaiveDate,
    ) -> Self {
        Self {
            name: name.into(),
            position: position.into(),
            salary,
            hired_date,
        }
    }
}

/// A stored employee record.
///
/// Cache payloads are this struct encoded as JSON. Unknown fields are
/// ignored and `updated_at` defaults to `None`, so entries written by an
/// older or newer schema still decode as long as the required fields exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: Uuid,
    pub name: String,
    pub position: String,
    pub salary: i64,
    pub hired_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    /// `None` until the first successful update.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// Builds a freshly created record from its fields.
    ///
    /// Only store adapters should call this: they own id assignment and
    /// timestamp stamping.
    pub fn from_fields(id: Uuid, fields: EmployeeFields, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: fields.name,
            position: fields.position,
            salary: fields.salary,
            hired_date: fields.hired_date,
            created_at,
            updated_at: None,
        }
    }

    /// Returns the caller-editable part of this record.
    pub fn fields(&self) -> EmployeeFields {
        EmployeeFields {
            name: self.name.clone(),
            position: self.position.clone(),
            salary: self.salary,
            hired_date: self.hired_date,
        }
    }

    /// Overwrites the editable fields and stamps `updated_at`.
    pub fn apply_update(&mut self, fields: EmployeeFields, updated_at: DateTime<Utc>) {
        self.name = fields.name;
        self.position = fields.position;
        self.salary = fields.salary;
        self.hired_date = fields.hired_date;
        self.updated_at = Some(updated_at);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_timestamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 10, 30, 0).unwrap()
    }

    fn test_fields() -> EmployeeFields {
        EmployeeFields::new(
            "Ada",
            "Engineer",
            100,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
        )
    }

    #[test]
    fn test_from_fields_has_no_updated_at() {
        let id = Uuid::new_v4();
        let employee = Employee::from_fields(id, test_fields(), fixed_timestamp());

        assert_eq!(employee.id, id);
        assert_eq!(employee.name, "Ada");
        assert_eq!(employee.created_at, fixed_timestamp());
        assert!(employee.updated_at.is_none());
    }

    #[test]
    fn test_fields_round_trip() {
        let employee = Employee::from_fields(Uuid::new_v4(), test_fields(), fixed_timestamp());
        assert_eq!(employee.fields(), test_fields());
    }

    #[test]
    fn test_apply_update_keeps_identity_and_created_at() {
        let id = Uuid::new_v4();
        let mut employee = Employee::from_fields(id, test_fields(), fixed_timestamp());
        let later = fixed_timestamp() + chrono::Duration::hours(1);

        let mut fields = test_fields();
        fields.salary = 150;
        employee.apply_update(fields, later);

        assert_eq!(employee.id, id);
        assert_eq!(employee.salary, 150);
        assert_eq!(employee.created_at, fixed_timestamp());
        assert_eq!(employee.updated_at, Some(later));
    }

    #[test]
    fn test_json_field_names() {
        let employee = Employee::from_fields(Uuid::nil(), test_fields(), fixed_timestamp());
        let value = serde_json::to_value(&employee).unwrap();

        assert_eq!(value["name"], "Ada");
        assert_eq!(value["position"], "Engineer");
        assert_eq!(value["salary"], 100);
        assert_eq!(value["hired_date"], "2024-01-02");
        assert!(value["updated_at"].is_null());
    }
}
