use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::repo_types::{Company, CompanyFields, CompanyRow};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("no rows returned")]
    NotFound,

    #[error(transparent)]
    Query(#[from] sqlx::Error),
}

/// Data access for the `company` table.
#[async_trait]
pub trait CompanyStore: Send + Sync {
    async fn ensure_schema(&self) -> Result<(), RepoError>;
    /// Inserts and returns the generated id. Name uniqueness is the caller's job.
    async fn create_company(&self, company: &CompanyFields) -> Result<Uuid, RepoError>;
    /// Number of rows already using `name`.
    async fn count_by_name(&self, name: &str) -> Result<i64, RepoError>;
    async fn get_company(&self, id: Uuid) -> Result<Company, RepoError>;
    async fn list_companies(&self) -> Result<Vec<Company>, RepoError>;
    /// Overwrites every mutable field. `NotFound` when no row has `id`.
    async fn patch_company(&self, id: Uuid, company: &CompanyFields) -> Result<Uuid, RepoError>;
    async fn delete_company(&self, id: Uuid) -> Result<Uuid, RepoError>;
}

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS company (
        id          UUID PRIMARY KEY DEFAULT gen_random_uuid(),
        name        TEXT NOT NULL,
        description TEXT,
        employees   INT NOT NULL,
        registered  BOOL NOT NULL DEFAULT FALSE,
        type        TEXT NOT NULL
    )
"#;

#[derive(Clone)]
pub struct PgCompanyStore {
    db: PgPool,
}

impl PgCompanyStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

fn into_company(row: CompanyRow) -> Result<Company, RepoError> {
    Company::try_from(row).map_err(|e| RepoError::Query(sqlx::Error::Decode(Box::new(e))))
}

#[async_trait]
impl CompanyStore for PgCompanyStore {
    async fn ensure_schema(&self) -> Result<(), RepoError> {
        sqlx::query(CREATE_TABLE).execute(&self.db).await?;
        Ok(())
    }

    async fn create_company(&self, company: &CompanyFields) -> Result<Uuid, RepoError> {
        self.ensure_schema().await?;
        let id = sqlx::query_scalar::<_, Uuid>(
            r#"
            INSERT INTO company (name, description, employees, registered, type)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.employees)
        .bind(company.registered)
        .bind(company.company_type.as_str())
        .fetch_one(&self.db)
        .await?;
        info!(%id, name = %company.name, "company inserted");
        Ok(id)
    }

    async fn count_by_name(&self, name: &str) -> Result<i64, RepoError> {
        let count = sqlx::query_scalar::<_, i64>(r#"SELECT COUNT(*) FROM company WHERE name = $1"#)
            .bind(name)
            .fetch_one(&self.db)
            .await?;
        Ok(count)
    }

    async fn get_company(&self, id: Uuid) -> Result<Company, RepoError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, description, employees, registered, type
            FROM company
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| {
            debug!(%id, "no rows were returned");
            RepoError::NotFound
        })?;
        into_company(row)
    }

    async fn list_companies(&self) -> Result<Vec<Company>, RepoError> {
        let rows = sqlx::query_as::<_, CompanyRow>(
            r#"
            SELECT id, name, description, employees, registered, type
            FROM company
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        rows.into_iter().map(into_company).collect()
    }

    async fn patch_company(&self, id: Uuid, company: &CompanyFields) -> Result<Uuid, RepoError> {
        let result = sqlx::query(
            r#"
            UPDATE company
               SET name = $2, description = $3, employees = $4, registered = $5, type = $6
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&company.name)
        .bind(&company.description)
        .bind(company.employees)
        .bind(company.registered)
        .bind(company.company_type.as_str())
        .execute(&self.db)
        .await?;
        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }
        Ok(id)
    }

    async fn delete_company(&self, id: Uuid) -> Result<Uuid, RepoError> {
        sqlx::query(r#"DELETE FROM company WHERE id = $1"#)
            .bind(id)
            .execute(&self.db)
            .await?;
        Ok(id)
    }
}
