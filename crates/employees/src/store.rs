//! In-memory employee record store.
//!
//! Records live in a map keyed by slot index (`0..slot_count`). Errors live
//! in a parallel map keyed by `(field, index)`, so an edit only ever touches
//! its own entry.

use std::collections::BTreeMap;

use roster_core::{validate_age, validate_email, validate_required_text, DomainError, FieldError};

use crate::employee::{CvFile, EmployeeEdit, EmployeeField, EmployeeRecord};

/// Employee records keyed by slot index. Serializes as a JSON object keyed
/// by the stringified index.
pub type EmployeeRecords = BTreeMap<usize, EmployeeRecord>;

type ErrorKey = (EmployeeField, usize);

/// Record and error map for the employee step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeStore {
    records: EmployeeRecords,
    errors: BTreeMap<ErrorKey, FieldError>,
    slot_count: usize,
}

/// What the presentation layer renders for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeePanel<'a> {
    pub index: usize,
    pub record: Option<&'a EmployeeRecord>,
    pub errors: Vec<(EmployeeField, &'a FieldError)>,
}

impl EmployeePanel<'_> {
    /// 1-based number shown in the panel heading.
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn error(&self, field: EmployeeField) -> Option<&FieldError> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, err)| *err)
    }
}

impl EmployeeStore {
    pub fn new(slot_count: usize) -> Self {
        Self {
            slot_count,
            ..Self::default()
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slot_count
    }

    /// Follow a newly declared count.
    ///
    /// Records are never trimmed here: a count change over existing records
    /// goes through [`EmployeeStore::discard_all`] first.
    pub fn set_slot_count(&mut self, slot_count: usize) {
        self.slot_count = slot_count;
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &EmployeeRecords {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&EmployeeRecord> {
        self.records.get(&index)
    }

    pub fn error(&self, field: EmployeeField, index: usize) -> Option<&FieldError> {
        self.errors.get(&(field, index))
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Apply one field edit to slot `index`.
    ///
    /// The record is created on first edit. Name, email and age are
    /// validated and their error entry is set or cleared; job title and CV
    /// have no rule. Returns the field's current error, if any.
    pub fn set_field(
        &mut self,
        index: usize,
        edit: EmployeeEdit,
    ) -> Result<Option<FieldError>, DomainError> {
        self.ensure_slot(index)?;

        let field = edit.field();
        let outcome = match &edit {
            EmployeeEdit::Name(value) => Some(validate_required_text("Name", value)),
            EmployeeEdit::Email(value) => Some(validate_email(value)),
            EmployeeEdit::Age(value) => Some(validate_age(value)),
            EmployeeEdit::JobTitle(_) | EmployeeEdit::Cv(_) => None,
        };

        self.records.entry(index).or_default().apply(edit);

        if let Some(outcome) = outcome {
            match &outcome {
                Some(err) => {
                    self.errors.insert((field, index), err.clone());
                }
                None => {
                    self.errors.remove(&(field, index));
                }
            }
            tracing::debug!(index, %field, valid = outcome.is_none(), "employee field edited");
            return Ok(outcome);
        }

        tracing::debug!(index, %field, "employee field edited");
        Ok(None)
    }

    /// Store a derived CV preview for slot `index`.
    ///
    /// Applied to whatever state exists at arrival (the record is recreated
    /// if it was discarded). Returns `false` when the slot no longer exists.
    pub fn apply_cv_preview(&mut self, index: usize, file: CvFile, pdf_url: String) -> bool {
        if index >= self.slot_count {
            tracing::debug!(index, slots = self.slot_count, "dropping cv preview for removed slot");
            return false;
        }
        let record = self.records.entry(index).or_default();
        record.cv = Some(file);
        record.pdf_url = Some(pdf_url);
        true
    }

    /// Drop every record and every error.
    pub fn discard_all(&mut self) {
        tracing::info!(records = self.records.len(), "discarding employee data");
        self.records.clear();
        self.errors.clear();
    }

    /// Replace the store's content with previously persisted records.
    ///
    /// Records outside `0..slot_count` are not retained. Errors are not
    /// persisted, so the error map starts empty.
    pub fn restore(&mut self, records: EmployeeRecords, slot_count: usize) {
        self.slot_count = slot_count;
        self.errors.clear();
        self.records = records
            .into_iter()
            .filter(|(index, _)| {
                let keep = *index < slot_count;
                if !keep {
                    tracing::warn!(
                        index,
                        slots = slot_count,
                        "dropping stored employee outside declared count"
                    );
                }
                keep
            })
            .collect();
    }

    /// One panel per declared slot, in index order.
    ///
    /// Built lazily: the declared count has no upper bound.
    pub fn panels(&self) -> impl Iterator<Item = EmployeePanel<'_>> + '_ {
        (0..self.slot_count).map(move |index| EmployeePanel {
            index,
            record: self.records.get(&index),
            errors: EmployeeField::ALL
                .into_iter()
                .filter_map(|field| self.error(field, index).map(|err| (field, err)))
                .collect(),
        })
    }

    fn ensure_slot(&self, index: usize) -> Result<(), DomainError> {
        if index >= self.slot_count {
            return Err(DomainError::invariant(format!(
                "employee index {index} outside declared count {}",
                self.slot_count
            )));
        }
        Ok(())
    }
}
