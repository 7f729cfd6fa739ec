//! Application state owned by the wizard controller.

use serde::{Deserialize, Serialize};

use roster_company::{CompanyFormErrors, CompanyHolder};
use roster_employees::EmployeeStore;

/// Step of the wizard currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    #[default]
    Company,
    Employees,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::Company => "company",
            WizardStep::Employees => "employees",
        }
    }

    /// Two-digit step number shown in the header.
    pub fn ordinal(&self) -> &'static str {
        match self {
            WizardStep::Company => "01",
            WizardStep::Employees => "02",
        }
    }
}

impl core::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub step: WizardStep,
    pub company: CompanyHolder,
    pub employees: EmployeeStore,
    /// Errors of the last rejected company submission.
    pub company_errors: CompanyFormErrors,
}

impl Default for AppState {
    fn default() -> Self {
        let company = CompanyHolder::new();
        let employees = EmployeeStore::new(company.employee_count());
        Self {
            step: WizardStep::Company,
            company,
            employees,
            company_errors: CompanyFormErrors::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_company_step_with_one_slot() {
        let state = AppState::default();
        assert_eq!(state.step, WizardStep::Company);
        assert_eq!(state.employees.slot_count(), 1);
        assert!(state.company.record().is_none());
        assert!(state.company_errors.is_empty());
    }

    #[test]
    fn step_labels() {
        assert_eq!(WizardStep::Employees.to_string(), "employees");
        assert_eq!(WizardStep::Company.ordinal(), "01");
        assert_eq!(serde_json::to_string(&WizardStep::Employees).unwrap(), "\"employees\"");
    }
}
