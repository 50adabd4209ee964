use std::sync::Arc;

use platform_db::DbPool;
use tracing::{info, instrument, warn};

use crate::{
    error::{HrError, HrResult},
    model::{Employee, EmployeeChanges, NewEmployee},
    store::{EmployeeStore, SeaOrmEmployeeStore},
};

/// Create/read/update/delete semantics for employees, including the email uniqueness rule.
#[derive(Clone)]
pub struct EmployeeService {
    store: Arc<dyn EmployeeStore>,
}

impl EmployeeService {
    pub fn new(store: Arc<dyn EmployeeStore>) -> Self {
        Self { store }
    }

    pub fn from_pool(db: DbPool) -> Self {
        Self::new(Arc::new(SeaOrmEmployeeStore::new(db)))
    }

    /// Persist a new employee. Fails with [`HrError::DuplicateEmail`] without writing
    /// when the email is already in use.
    #[instrument(skip_all, fields(email = %employee.email))]
    pub async fn create(&self, employee: NewEmployee) -> HrResult<Employee> {
        let employee = employee.validated()?;
        if self.store.find_by_email(&employee.email).await?.is_some() {
            warn!("rejected duplicate email");
            return Err(HrError::DuplicateEmail(employee.email));
        }
        // A concurrent create can still win; the store reports that as EmailTaken.
        let saved = self.store.insert(employee).await?;
        info!(id = saved.id, "employee created");
        Ok(saved)
    }

    pub async fn list(&self) -> HrResult<Vec<Employee>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, id: i64) -> HrResult<Option<Employee>> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn find_by_email(&self, email: &str) -> HrResult<Option<Employee>> {
        Ok(self.store.find_by_email(email.trim()).await?)
    }

    pub async fn find_by_name(&self, first_name: &str, last_name: &str) -> HrResult<Option<Employee>> {
        Ok(self
            .store
            .find_by_name(first_name.trim(), last_name.trim())
            .await?)
    }

    /// Unconditional overwrite keyed on `employee.id`.
    #[instrument(skip_all, fields(id = employee.id))]
    pub async fn update(&self, employee: Employee) -> HrResult<Employee> {
        let employee = employee.validated()?;
        let saved = self.store.save(employee).await?;
        info!("employee saved");
        Ok(saved)
    }

    /// Replace the mutable fields of an existing employee. `None` when the id is unknown.
    #[instrument(skip(self, changes))]
    pub async fn update_if_exists(
        &self,
        id: i64,
        changes: EmployeeChanges,
    ) -> HrResult<Option<Employee>> {
        let changes = changes.validated()?;
        let updated = self.store.update_existing(changes.with_id(id)).await?;
        match &updated {
            Some(_) => info!("employee updated"),
            None => info!("employee not found, nothing updated"),
        }
        Ok(updated)
    }

    /// Idempotent: removing an unknown id is not an error.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> HrResult<()> {
        let removed = self.store.delete_by_id(id).await?;
        info!(removed, "employee delete processed");
        Ok(())
    }

    pub async fn delete_all(&self) -> HrResult<u64> {
        let removed = self.store.delete_all().await?;
        warn!(removed, "all employees deleted");
        Ok(removed)
    }
}
