//! Reconciliation of a newly declared employee count with existing
//! employee data.
//!
//! The policy is blunt: any change of count while employee records exist
//! discards *all* of them (not only the slots beyond the new count), after
//! the user agrees.

use roster_company::{CompanyHolder, CompanyRecord};
use roster_employees::EmployeeStore;

pub const DISCARD_PROMPT: &str = "Changing the number of employees will remove existing \
    employee data. Do you want to proceed?";

/// Blocking yes/no question put to the user.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

/// Outcome of reconciling one company submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciliation {
    /// Nothing to reconcile; no question was asked.
    Proceed,
    /// The user agreed; employee data must be discarded before proceeding.
    DiscardAndProceed,
    /// The user declined; the submission is abandoned.
    Abandon,
}

/// Whether submitting `candidate` needs the user's confirmation.
pub fn needs_confirmation(
    company: &CompanyHolder,
    employees: &EmployeeStore,
    candidate: &CompanyRecord,
) -> bool {
    company.count_changes(candidate) && !employees.is_empty()
}

pub fn reconcile(
    company: &CompanyHolder,
    employees: &EmployeeStore,
    candidate: &CompanyRecord,
    prompt: &dyn ConfirmPrompt,
) -> Reconciliation {
    if !needs_confirmation(company, employees, candidate) {
        return Reconciliation::Proceed;
    }

    if prompt.confirm(DISCARD_PROMPT) {
        tracing::info!(
            from = company.employee_count(),
            to = candidate.employee_count,
            "employee count changed; discard confirmed"
        );
        Reconciliation::DiscardAndProceed
    } else {
        tracing::info!(
            from = company.employee_count(),
            to = candidate.employee_count,
            "employee count change declined"
        );
        Reconciliation::Abandon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use roster_employees::EmployeeEdit;

    fn company(count: u32) -> CompanyRecord {
        CompanyRecord {
            name: "Acme".to_string(),
            email: "a@acme.com".to_string(),
            employee_count: count,
            description: None,
        }
    }

    fn holder(count: u32) -> CompanyHolder {
        let mut holder = CompanyHolder::new();
        holder.replace(company(count));
        holder
    }

    fn store_with_record(slots: usize) -> EmployeeStore {
        let mut store = EmployeeStore::new(slots);
        store.set_field(0, EmployeeEdit::Name("Alice".to_string())).unwrap();
        store
    }

    #[test]
    fn count_change_over_existing_records_asks_and_discards_on_yes() {
        let asked = Cell::new(None::<String>);
        let prompt = |msg: &str| {
            asked.set(Some(msg.to_string()));
            true
        };

        let outcome = reconcile(&holder(3), &store_with_record(3), &company(5), &prompt);

        assert_eq!(outcome, Reconciliation::DiscardAndProceed);
        assert_eq!(asked.take().as_deref(), Some(DISCARD_PROMPT));
    }

    #[test]
    fn declining_abandons() {
        let outcome = reconcile(&holder(3), &store_with_record(3), &company(5), &|_: &str| false);
        assert_eq!(outcome, Reconciliation::Abandon);
    }

    #[test]
    fn no_records_proceeds_without_asking() {
        let asked = Cell::new(false);
        let prompt = |_: &str| {
            asked.set(true);
            false
        };

        let outcome = reconcile(&holder(1), &EmployeeStore::new(1), &company(10), &prompt);

        assert_eq!(outcome, Reconciliation::Proceed);
        assert!(!asked.get());
    }

    #[test]
    fn unchanged_count_proceeds_without_asking() {
        let asked = Cell::new(false);
        let prompt = |_: &str| {
            asked.set(true);
            false
        };

        let outcome = reconcile(&holder(3), &store_with_record(3), &company(3), &prompt);

        assert_eq!(outcome, Reconciliation::Proceed);
        assert!(!asked.get());
    }
}
