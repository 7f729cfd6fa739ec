//! `roster-core`: validation and error primitives shared by every step of
//! the onboarding wizard.
//!
//! This crate contains **pure** building blocks (no IO, no async): the field
//! validators and the error values they produce.

pub mod error;
pub mod validation;

pub use error::{DomainError, ErrorKind, FieldError};
pub use validation::{validate_age, validate_email, validate_required_text, MIN_EMPLOYEE_AGE};
