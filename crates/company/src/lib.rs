//! Company step of the wizard: the company record, its form, and the
//! holder that keeps the declared employee count.

pub mod company;

pub use company::{
    validate_employee_count, CompanyField, CompanyForm, CompanyFormErrors, CompanyHolder,
    CompanyRecord, DEFAULT_EMPLOYEE_COUNT,
};
