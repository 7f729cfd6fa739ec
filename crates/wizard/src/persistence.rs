//! Local persistence of the combined wizard state.
//!
//! The company and the employee records are written under two independent
//! keys. A crash between the two writes can leave them out of step; loading
//! only restores when both are present.

use std::sync::Arc;

use roster_company::CompanyRecord;
use roster_employees::EmployeeRecords;
use serde::de::DeserializeOwned;

use crate::storage::{KeyValueStore, StorageError};

pub const COMPANY_KEY: &str = "companyData";
pub const EMPLOYEE_KEY: &str = "employeeData";

/// Snapshots read back from local storage. A key that is missing or does
/// not decode is `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadedState {
    pub company: Option<CompanyRecord>,
    pub employees: Option<EmployeeRecords>,
}

impl LoadedState {
    /// Both halves, when both were found.
    pub fn complete(self) -> Option<(CompanyRecord, EmployeeRecords)> {
        Some((self.company?, self.employees?))
    }
}

/// Reads and writes the two wizard keys.
#[derive(Clone)]
pub struct LocalGateway {
    store: Arc<dyn KeyValueStore>,
}

impl LocalGateway {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub async fn save_local(
        &self,
        company: &CompanyRecord,
        employees: &EmployeeRecords,
    ) -> Result<(), StorageError> {
        self.write(COMPANY_KEY, company).await?;
        self.write(EMPLOYEE_KEY, employees).await?;
        tracing::info!(employees = employees.len(), "saved wizard state locally");
        Ok(())
    }

    pub async fn load_local(&self) -> Result<LoadedState, StorageError> {
        Ok(LoadedState {
            company: self.read(COMPANY_KEY).await?,
            employees: self.read(EMPLOYEE_KEY).await?,
        })
    }

    /// Forget both snapshots.
    pub async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove_item(COMPANY_KEY).await?;
        self.store.remove_item(EMPLOYEE_KEY).await?;
        tracing::info!("cleared stored wizard state");
        Ok(())
    }

    async fn write<T: serde::Serialize>(
        &self,
        key: &'static str,
        value: &T,
    ) -> Result<(), StorageError> {
        let payload =
            serde_json::to_string(value).map_err(|source| StorageError::Encode { key, source })?;
        self.store.set_item(key, &payload).await
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.store.get_item(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                tracing::warn!(key, error = %err, "ignoring malformed stored snapshot");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use roster_employees::{CvFile, EmployeeEdit, EmployeeStore, JobTitle};

    fn company() -> CompanyRecord {
        CompanyRecord {
            name: "Acme".to_string(),
            email: "a@acme.com".to_string(),
            employee_count: 3,
            description: Some("We own a computer.".to_string()),
        }
    }

    fn employees() -> EmployeeRecords {
        let mut store = EmployeeStore::new(3);
        store.set_field(0, EmployeeEdit::Name("Alice".to_string())).unwrap();
        store.set_field(0, EmployeeEdit::Age("31".to_string())).unwrap();
        store
            .set_field(2, EmployeeEdit::JobTitle(JobTitle::SoftwareDeveloper))
            .unwrap();
        store.apply_cv_preview(
            2,
            CvFile::new("cv.pdf"),
            "data:application/pdf;base64,JVBERg==".to_string(),
        );
        store.records().clone()
    }

    fn gateway() -> (Arc<MemoryStore>, LocalGateway) {
        let store = Arc::new(MemoryStore::new());
        let gateway = LocalGateway::new(store.clone());
        (store, gateway)
    }

    #[tokio::test]
    async fn load_after_save_round_trips() {
        let (_, gateway) = gateway();
        gateway.save_local(&company(), &employees()).await.unwrap();

        let loaded = gateway.load_local().await.unwrap();
        assert_eq!(loaded.company, Some(company()));
        assert_eq!(loaded.employees, Some(employees()));
    }

    #[tokio::test]
    async fn writes_wire_layout_under_both_keys() {
        let (store, gateway) = gateway();
        gateway.save_local(&company(), &employees()).await.unwrap();

        let raw = store.get_item(EMPLOYEE_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["0"]["name"], "Alice");
        assert_eq!(json["2"]["jobTitle"], "software-developer");
        assert_eq!(json["2"]["pdfUrl"], "data:application/pdf;base64,JVBERg==");

        let raw = store.get_item(COMPANY_KEY).await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["employees"], 3);
    }

    #[tokio::test]
    async fn empty_storage_loads_nothing() {
        let (_, gateway) = gateway();
        let loaded = gateway.load_local().await.unwrap();
        assert_eq!(loaded, LoadedState::default());
        assert_eq!(loaded.complete(), None);
    }

    #[tokio::test]
    async fn malformed_snapshot_counts_as_missing() {
        let (store, gateway) = gateway();
        gateway.save_local(&company(), &employees()).await.unwrap();
        store.set_item(COMPANY_KEY, "{not json").await.unwrap();

        let loaded = gateway.load_local().await.unwrap();
        assert_eq!(loaded.company, None);
        assert!(loaded.employees.is_some());
        assert_eq!(loaded.complete(), None);
    }

    #[tokio::test]
    async fn clear_removes_both_keys() {
        let (store, gateway) = gateway();
        gateway.save_local(&company(), &employees()).await.unwrap();
        gateway.clear().await.unwrap();

        assert_eq!(store.get_item(COMPANY_KEY).await.unwrap(), None);
        assert_eq!(store.get_item(EMPLOYEE_KEY).await.unwrap(), None);
    }
}
