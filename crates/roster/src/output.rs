//! Output formatting functions.

use roster_core::employee::Employee;

use crate::cli::OutputFormat;

/// Format a value for output.
pub fn format_output<T: serde::Serialize>(value: &T, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => serde_json::to_string_pretty(value).unwrap_or_default(),
    }
}

/// Format an employee for display.
pub fn format_employee(employee: &Employee) -> String {
    let mut output = format!(
        "{} ({})\n  ID: {}\n  Salary: {}\n  Hired: {}\n  Created: {}",
        employee.name,
        employee.position,
        employee.id,
        employee.salary,
        employee.hired_date,
        employee.created_at.to_rfc3339(),
    );
    if let Some(updated_at) = employee.updated_at {
        output.push_str(&format!("\n  Updated: {}", updated_at.to_rfc3339()));
    }
    output
}

/// Format employees for display.
pub fn format_employees(employees: &[Employee]) -> String {
    if employees.is_empty() {
        return "No employees found.".to_string();
    }
    let mut output = format!("EMPLOYEES ({})\n", employees.len());
    output.push_str(&"-".repeat(40));
    for employee in employees {
        output.push_str(&format!("\n{}", format_employee(employee)));
        output.push('\n');
    }
    output
}

/// Print an employee in the requested format.
pub fn print_employee(employee: &Employee, format: OutputFormat, heading: Option<&str>) {
    match format {
        OutputFormat::Json => println!("{}", format_output(employee, format)),
        OutputFormat::Pretty => match heading {
            Some(heading) => println!("{heading}:\n{}", format_employee(employee)),
            None => println!("{}", format_employee(employee)),
        },
    }
}
