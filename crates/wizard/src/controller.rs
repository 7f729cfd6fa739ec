//! Wizard controller: owns the application state and routes user actions.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use roster_company::{CompanyForm, CompanyFormErrors};
use roster_core::{DomainError, FieldError};
use roster_employees::{CvFile, EmployeeEdit, EmployeeRecords};

use crate::config::WizardConfig;
use crate::persistence::LocalGateway;
use crate::reconcile::{reconcile, ConfirmPrompt, Reconciliation};
use crate::state::{AppState, WizardStep};
use crate::storage::StorageError;
use crate::sync::{HttpSink, RemoteSink, SavePayload};
use crate::tasks::{spawn_cv_read, spawn_push, WizardMessage};

#[derive(Debug, Error)]
pub enum WizardError {
    #[error("`{action}` is not available on the {step} step")]
    WrongStep {
        action: &'static str,
        step: WizardStep,
    },
    #[error("no company has been submitted")]
    MissingCompany,
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Result of a company form submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Saved and moved to the employee step.
    Advanced {
        /// Whether existing employee data was discarded on the way.
        discarded: bool,
    },
    /// The form has invalid fields; nothing changed.
    Rejected(CompanyFormErrors),
    /// The user declined the discard; nothing changed.
    Abandoned,
}

/// The two-step company/employees wizard.
///
/// All state changes happen through `&mut self`. Background tasks report
/// through the wizard's own channel and take effect in
/// [`Wizard::process_pending`] or [`Wizard::next_message`].
pub struct Wizard {
    state: AppState,
    local: LocalGateway,
    remote: Arc<dyn RemoteSink>,
    prompt: Box<dyn ConfirmPrompt>,
    tx: UnboundedSender<WizardMessage>,
    rx: UnboundedReceiver<WizardMessage>,
}

impl Wizard {
    pub fn new(
        local: LocalGateway,
        remote: Arc<dyn RemoteSink>,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            local,
            remote,
            prompt,
            tx,
            rx,
        }
    }

    /// Build from configuration: open storage and target the HTTP endpoint.
    pub async fn from_config(
        config: &WizardConfig,
        prompt: Box<dyn ConfirmPrompt>,
    ) -> Result<Self, WizardError> {
        let store = config.storage.open().await?;
        let remote = Arc::new(HttpSink::new(config.endpoint.clone()));
        Ok(Self::new(LocalGateway::new(store), remote, prompt))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.state.step
    }

    /// Form values for the company step, pre-populated from held data.
    pub fn company_form(&self) -> CompanyForm {
        self.state.company.form()
    }

    /// Load stored data, if both snapshots are present.
    ///
    /// The step is left untouched. Returns whether anything was restored.
    pub async fn restore(&mut self) -> Result<bool, WizardError> {
        let Some((company, employees)) = self.local.load_local().await?.complete() else {
            tracing::debug!("no stored wizard state to restore");
            return Ok(false);
        };

        let slots = company.slot_count();
        self.state.company.replace(company);
        self.state.employees.restore(employees, slots);
        tracing::info!(
            slots,
            employees = self.state.employees.records().len(),
            "restored wizard state"
        );
        Ok(true)
    }

    /// "Next" on the company step: validate, reconcile, persist, advance.
    pub async fn submit_company(
        &mut self,
        form: &CompanyForm,
    ) -> Result<SubmitOutcome, WizardError> {
        self.require_step(WizardStep::Company, "next")?;

        let candidate = match form.validate() {
            Ok(record) => record,
            Err(errors) => {
                self.state.company_errors = errors.clone();
                return Ok(SubmitOutcome::Rejected(errors));
            }
        };

        let decision = reconcile(
            &self.state.company,
            &self.state.employees,
            &candidate,
            &*self.prompt,
        );
        let discard = match decision {
            Reconciliation::Abandon => return Ok(SubmitOutcome::Abandoned),
            Reconciliation::DiscardAndProceed => true,
            Reconciliation::Proceed => false,
        };

        // Persist first so a storage failure leaves the session untouched.
        let kept = if discard {
            EmployeeRecords::new()
        } else {
            self.state.employees.records().clone()
        };
        self.local.save_local(&candidate, &kept).await?;

        self.state.company_errors = CompanyFormErrors::default();
        if discard {
            self.state.employees.discard_all();
        }
        self.state.employees.set_slot_count(candidate.slot_count());
        self.state.company.replace(candidate);
        self.state.step = WizardStep::Employees;

        tracing::info!(
            slots = self.state.company.employee_count(),
            discarded = discard,
            "company submitted; moved to employee step"
        );
        Ok(SubmitOutcome::Advanced { discarded: discard })
    }

    /// "Back" on the employee step. No data is lost.
    pub fn back(&mut self) {
        if self.state.step != WizardStep::Company {
            tracing::info!("back to company step");
        }
        self.state.step = WizardStep::Company;
    }

    /// Apply one employee field edit and return the field's current error.
    ///
    /// A CV edit also starts the background read of the file.
    pub fn edit_employee(
        &mut self,
        index: usize,
        edit: EmployeeEdit,
    ) -> Result<Option<FieldError>, WizardError> {
        match edit {
            EmployeeEdit::Cv(file) => {
                self.upload_cv(index, file)?;
                Ok(None)
            }
            edit => {
                self.require_step(WizardStep::Employees, "edit employee")?;
                Ok(self.state.employees.set_field(index, edit)?)
            }
        }
    }

    /// Store the CV reference now and derive its preview in the background.
    pub fn upload_cv(&mut self, index: usize, file: CvFile) -> Result<JoinHandle<()>, WizardError> {
        self.require_step(WizardStep::Employees, "upload cv")?;
        self.state
            .employees
            .set_field(index, EmployeeEdit::Cv(file.clone()))?;
        Ok(spawn_cv_read(self.tx.clone(), index, file))
    }

    /// "Save" on the employee step: persist locally, then push once in the
    /// background. Employee field errors do not block saving.
    ///
    /// The returned handle may be awaited; the wizard itself never waits.
    pub async fn save(&mut self) -> Result<JoinHandle<()>, WizardError> {
        self.require_step(WizardStep::Employees, "save")?;
        let company = self
            .state
            .company
            .record()
            .cloned()
            .ok_or(WizardError::MissingCompany)?;
        let employees = self.state.employees.records().clone();

        self.local.save_local(&company, &employees).await?;

        let payload = SavePayload {
            company_data: company,
            employee_data: employees,
        };
        Ok(spawn_push(self.tx.clone(), self.remote.clone(), payload))
    }

    /// Forget stored data. The in-memory session is kept.
    pub async fn clear_storage(&mut self) -> Result<(), WizardError> {
        self.local.clear().await?;
        Ok(())
    }

    /// Apply every message that has already arrived. Returns how many.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(message) = self.rx.try_recv() {
            self.apply(message);
            applied += 1;
        }
        applied
    }

    /// Wait for the next message and apply it.
    pub async fn next_message(&mut self) {
        // The wizard holds a sender, so the channel never closes.
        if let Some(message) = self.rx.recv().await {
            self.apply(message);
        }
    }

    fn apply(&mut self, message: WizardMessage) {
        match message {
            WizardMessage::CvPreviewReady {
                index,
                file,
                pdf_url,
            } => {
                if self.state.employees.apply_cv_preview(index, file, pdf_url) {
                    tracing::debug!(index, "cv preview ready");
                }
            }
            WizardMessage::CvReadFailed { index, file, error } => {
                tracing::warn!(index, file = %file.name, %error, "failed to read cv");
            }
            WizardMessage::PushFinished { push_id, result } => match result {
                Ok(response) => {
                    tracing::info!(%push_id, %response, "data successfully sent to the backend");
                }
                Err(err) => {
                    tracing::error!(%push_id, error = %err, "error sending data to the backend");
                }
            },
        }
    }

    fn require_step(&self, step: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.state.step != step {
            return Err(WizardError::WrongStep {
                action,
                step: self.state.step,
            });
        }
        Ok(())
    }
}
