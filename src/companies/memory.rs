use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use super::{
    repo::{CompanyStore, RepoError},
    repo_types::{Company, CompanyFields},
};

/// In-process store with the same observable behaviour as the Postgres one.
#[derive(Default)]
pub struct MemoryCompanyStore {
    rows: Mutex<Vec<Company>>,
}

impl MemoryCompanyStore {
    fn rows(&self) -> std::sync::MutexGuard<'_, Vec<Company>> {
        self.rows.lock().expect("company store lock poisoned")
    }
}

#[async_trait]
impl CompanyStore for MemoryCompanyStore {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        Ok(())
    }

    async fn create_company(&self, company: &CompanyFields) -> Result<Uuid, RepoError> {
        let id = Uuid::new_v4();
        self.rows().push(company.clone().with_id(id));
        Ok(id)
    }

    async fn count_by_name(&self, name: &str) -> Result<i64, RepoError> {
        Ok(self.rows().iter().filter(|c| c.name == name).count() as i64)
    }

    async fn get_company(&self, id: Uuid) -> Result<Company, RepoError> {
        self.rows()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(RepoError::NotFound)
    }

    async fn list_companies(&self) -> Result<Vec<Company>, RepoError> {
        Ok(self.rows().clone())
    }

    async fn patch_company(&self, id: Uuid, company: &CompanyFields) -> Result<Uuid, RepoError> {
        let mut rows = self.rows();
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(RepoError::NotFound)?;
        *row = company.clone().with_id(id);
        Ok(id)
    }

    async fn delete_company(&self, id: Uuid) -> Result<Uuid, RepoError> {
        self.rows().retain(|c| c.id != id);
        Ok(id)
    }
}
