use serde::{Deserialize, Serialize};

use roster_core::{validate_email, validate_required_text, FieldError};

/// Declared employee count before any company has been submitted.
pub const DEFAULT_EMPLOYEE_COUNT: usize = 1;

const COUNT_REQUIRED: &str = "Number of employees is required";
const COUNT_RANGE: &str = "Number of employees must be at least 1";

/// The company entered on the first step.
///
/// `employee_count` is the single source of truth for how many employee
/// slots exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    pub name: String,
    pub email: String,
    #[serde(rename = "employees")]
    pub employee_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CompanyRecord {
    pub fn slot_count(&self) -> usize {
        self.employee_count as usize
    }
}

/// Company form fields, as named by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanyField {
    Name,
    Email,
    Employees,
    Description,
}

/// Raw company form input, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyForm {
    pub name: String,
    pub email: String,
    pub employees: String,
    pub description: String,
}

/// Per-field errors of one company form submission.
///
/// Description is optional and never carries an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompanyFormErrors {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub employees: Option<FieldError>,
}

impl CompanyFormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.employees.is_none()
    }

    pub fn get(&self, field: CompanyField) -> Option<&FieldError> {
        match field {
            CompanyField::Name => self.name.as_ref(),
            CompanyField::Email => self.email.as_ref(),
            CompanyField::Employees => self.employees.as_ref(),
            CompanyField::Description => None,
        }
    }
}

/// Parses the declared employee count: required, then an integer ≥ 1.
pub fn validate_employee_count(value: &str) -> Result<u32, FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::required(COUNT_REQUIRED));
    }
    match value.parse::<u32>() {
        Ok(count) if count >= 1 => Ok(count),
        _ => Err(FieldError::range(COUNT_RANGE)),
    }
}

impl CompanyForm {
    pub fn set(&mut self, field: CompanyField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CompanyField::Name => self.name = value,
            CompanyField::Email => self.email = value,
            CompanyField::Employees => self.employees = value,
            CompanyField::Description => self.description = value,
        }
    }

    /// Validate every field at once and build the record when all pass.
    ///
    /// Stored text is trimmed; an empty description becomes `None`.
    pub fn validate(&self) -> Result<CompanyRecord, CompanyFormErrors> {
        let count = validate_employee_count(&self.employees);
        let mut errors = CompanyFormErrors {
            name: validate_required_text("Name", &self.name),
            email: validate_email(&self.email),
            employees: None,
        };

        let employee_count = match count {
            Ok(count) => count,
            Err(err) => {
                errors.employees = Some(err);
                0
            }
        };

        if !errors.is_empty() {
            tracing::debug!(?errors, "company form rejected");
            return Err(errors);
        }

        let description = self.description.trim();
        Ok(CompanyRecord {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            employee_count,
            description: (!description.is_empty()).then(|| description.to_string()),
        })
    }
}

impl From<&CompanyRecord> for CompanyForm {
    /// Pre-populate the form from a stored record.
    fn from(record: &CompanyRecord) -> Self {
        Self {
            name: record.name.clone(),
            email: record.email.clone(),
            employees: record.employee_count.to_string(),
            description: record.description.clone().unwrap_or_default(),
        }
    }
}

/// Holds the submitted company and the declared employee count.
///
/// Only a successful company submission (or a restore from storage) changes
/// what it holds; nothing removes the record within a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyHolder {
    record: Option<CompanyRecord>,
    employee_count: usize,
}

impl Default for CompanyHolder {
    fn default() -> Self {
        Self {
            record: None,
            employee_count: DEFAULT_EMPLOYEE_COUNT,
        }
    }
}

impl CompanyHolder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self) -> Option<&CompanyRecord> {
        self.record.as_ref()
    }

    /// Number of employee slots currently declared.
    pub fn employee_count(&self) -> usize {
        self.employee_count
    }

    /// Whether `candidate` differs from the declared count.
    pub fn count_changes(&self, candidate: &CompanyRecord) -> bool {
        candidate.slot_count() != self.employee_count
    }

    /// Replace the held company; the declared count follows the record.
    pub fn replace(&mut self, record: CompanyRecord) {
        self.employee_count = record.slot_count();
        self.record = Some(record);
    }

    /// Form values for the presentation layer, pre-populated when a company
    /// is held.
    pub fn form(&self) -> CompanyForm {
        match &self.record {
            Some(record) => CompanyForm::from(record),
            None => CompanyForm {
                employees: self.employee_count.to_string(),
                ..CompanyForm::default()
            },
        }
    }
}
