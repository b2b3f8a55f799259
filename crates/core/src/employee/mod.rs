mod requests;
mod types;

pub use requests::UpdateEmployeeRequest;
pub use types::{Employee, EmployeeFields};
