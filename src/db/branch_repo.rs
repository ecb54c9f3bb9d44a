// src/db/branch_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::branch::{
        Branch, BranchDepartment, BranchPosition, CreateBranchPayload, UpdateBranchPayload,
    },
};

#[derive(Clone)]
pub struct BranchRepository {
    pool: PgPool,
}

impl BranchRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  AGÊNCIAS
    // =========================================================================

    pub async fn create_branch<'e, E>(
        &self,
        executor: E,
        bank_id: Uuid,
        input: &CreateBranchPayload,
        actor_id: Uuid,
    ) -> Result<Branch, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Branch>(
            r#"
            INSERT INTO branches (
                bank_id, region_id, code, name, address,
                latitude, longitude, opened_at, created_by, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(input.region_id)
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.opened_at)
        .bind(actor_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe uma agência com o código '{}' neste banco.",
                        input.code
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn find_branch_by_id(&self, id: Uuid) -> Result<Option<Branch>, AppError> {
        let branch = sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(branch)
    }

    /// Busca por código dentro do banco: comparação exata, sensível a maiúsculas.
    pub async fn find_branch_by_code(
        &self,
        bank_id: Uuid,
        code: &str,
    ) -> Result<Option<Branch>, AppError> {
        let branch =
            sqlx::query_as::<_, Branch>("SELECT * FROM branches WHERE bank_id = $1 AND code = $2")
                .bind(bank_id)
                .bind(code)
                .fetch_optional(&self.pool)
                .await?;

        Ok(branch)
    }

    pub async fn list_branches(&self, bank_id: Uuid) -> Result<Vec<Branch>, AppError> {
        let branches = sqlx::query_as::<_, Branch>(
            "SELECT * FROM branches WHERE bank_id = $1 ORDER BY created_at ASC",
        )
        .bind(bank_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(branches)
    }

    pub async fn update_branch<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateBranchPayload,
        actor_id: Uuid,
    ) -> Result<Option<Branch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branches SET
                region_id = $2, name = $3, address = $4, latitude = $5,
                longitude = $6, opened_at = $7, closed_at = $8,
                updated_at = NOW(), updated_by = $9
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(input.region_id)
        .bind(&input.name)
        .bind(&input.address)
        .bind(input.latitude)
        .bind(input.longitude)
        .bind(input.opened_at)
        .bind(input.closed_at)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(branch)
    }

    pub async fn deactivate_branch<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<Branch>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let branch = sqlx::query_as::<_, Branch>(
            r#"
            UPDATE branches
            SET is_active = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(branch)
    }

    // =========================================================================
    //  SETORES
    // =========================================================================

    pub async fn create_department<'e, E>(
        &self,
        executor: E,
        branch_id: Uuid,
        name: &str,
        actor_id: Uuid,
    ) -> Result<BranchDepartment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let department = sqlx::query_as::<_, BranchDepartment>(
            r#"
            INSERT INTO branch_departments (branch_id, name, created_by, updated_by)
            VALUES ($1, $2, $3, $3)
            RETURNING *
            "#,
        )
        .bind(branch_id)
        .bind(name)
        .bind(actor_id)
        .fetch_one(executor)
        .await?;

        Ok(department)
    }

    pub async fn find_department_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<BranchDepartment>, AppError> {
        let department =
            sqlx::query_as::<_, BranchDepartment>("SELECT * FROM branch_departments WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(department)
    }

    pub async fn list_departments(
        &self,
        branch_id: Uuid,
    ) -> Result<Vec<BranchDepartment>, AppError> {
        let departments = sqlx::query_as::<_, BranchDepartment>(
            "SELECT * FROM branch_departments WHERE branch_id = $1 ORDER BY created_at ASC",
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(departments)
    }

    pub async fn update_department<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        actor_id: Uuid,
    ) -> Result<Option<BranchDepartment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let department = sqlx::query_as::<_, BranchDepartment>(
            r#"
            UPDATE branch_departments
            SET name = $2, updated_at = NOW(), updated_by = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(department)
    }

    pub async fn deactivate_department<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<BranchDepartment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let department = sqlx::query_as::<_, BranchDepartment>(
            r#"
            UPDATE branch_departments
            SET is_active = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(department)
    }

    // =========================================================================
    //  CARGOS
    // =========================================================================

    pub async fn create_position<'e, E>(
        &self,
        executor: E,
        department_id: Uuid,
        title: &str,
        actor_id: Uuid,
    ) -> Result<BranchPosition, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let position = sqlx::query_as::<_, BranchPosition>(
            r#"
            INSERT INTO branch_positions (department_id, title, created_by, updated_by)
            VALUES ($1, $2, $3, $3)
            RETURNING *
            "#,
        )
        .bind(department_id)
        .bind(title)
        .bind(actor_id)
        .fetch_one(executor)
        .await?;

        Ok(position)
    }

    pub async fn find_position_by_id(&self, id: Uuid) -> Result<Option<BranchPosition>, AppError> {
        let position =
            sqlx::query_as::<_, BranchPosition>("SELECT * FROM branch_positions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(position)
    }

    pub async fn list_positions(
        &self,
        department_id: Uuid,
    ) -> Result<Vec<BranchPosition>, AppError> {
        let positions = sqlx::query_as::<_, BranchPosition>(
            "SELECT * FROM branch_positions WHERE department_id = $1 ORDER BY created_at ASC",
        )
        .bind(department_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(positions)
    }

    pub async fn update_position<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        title: &str,
        actor_id: Uuid,
    ) -> Result<Option<BranchPosition>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let position = sqlx::query_as::<_, BranchPosition>(
            r#"
            UPDATE branch_positions
            SET title = $2, updated_at = NOW(), updated_by = $3
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(position)
    }

    pub async fn deactivate_position<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<BranchPosition>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let position = sqlx::query_as::<_, BranchPosition>(
            r#"
            UPDATE branch_positions
            SET is_active = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(position)
    }
}
