//! Employee step of the wizard.
//!
//! - `employee`: one employee's record, the editable fields and the CV reference
//! - `store`: the per-slot record map plus its field-scoped error map

pub mod employee;
pub mod store;

pub use employee::{CvFile, EmployeeEdit, EmployeeField, EmployeeRecord, JobTitle};
pub use store::{EmployeePanel, EmployeeRecords, EmployeeStore};
