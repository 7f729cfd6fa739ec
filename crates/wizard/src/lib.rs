//! `roster-wizard`
//!
//! **Responsibility:** Two-step company/employees data-entry wizard.
//!
//! This crate provides:
//! - The wizard controller and the state it owns
//! - Reconciliation of employee data with a changed employee count
//! - Local key/value persistence (SQLite or in-memory)
//! - Best-effort push of the saved data to a remote endpoint
//!
//! Validation rules live in `roster-core`; the company and employee models
//! in `roster-company` and `roster-employees`.

pub mod config;
pub mod controller;
pub mod persistence;
pub mod reconcile;
pub mod state;
pub mod storage;
pub mod sync;
pub mod tasks;

pub use config::{ConfigError, StorageConfig, WizardConfig};
pub use controller::{SubmitOutcome, Wizard, WizardError};
pub use persistence::{LoadedState, LocalGateway};
pub use reconcile::{ConfirmPrompt, Reconciliation};
pub use state::{AppState, WizardStep};
pub use storage::{KeyValueStore, MemoryStore, SqliteStore, StorageError};
pub use sync::{HttpSink, RemoteSink, SavePayload, SyncError};
pub use tasks::WizardMessage;
