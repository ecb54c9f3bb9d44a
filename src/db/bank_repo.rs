// src/db/bank_repo.rs

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::bank::{Bank, BankDivision, BankRegion, CreateBankPayload, UpdateBankPayload},
};

#[derive(Clone)]
pub struct BankRepository {
    pool: PgPool,
}

impl BankRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  BANCOS
    // =========================================================================

    pub async fn create_bank<'e, E>(
        &self,
        executor: E,
        input: &CreateBankPayload,
        actor_id: Uuid,
    ) -> Result<Bank, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Bank>(
            r#"
            INSERT INTO banks (
                code, name, legal_name, address, logo_url, primary_color,
                country_id, time_zone_id, utc_offset_minutes, created_by, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
            RETURNING *
            "#,
        )
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.legal_name)
        .bind(&input.address)
        .bind(&input.logo_url)
        .bind(&input.primary_color)
        .bind(input.country_id)
        .bind(&input.time_zone_id)
        .bind(input.utc_offset_minutes)
        .bind(actor_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // Tratamento de erro de chave duplicada
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe um banco com o código '{}'.",
                        input.code
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn find_bank_by_id(&self, id: Uuid) -> Result<Option<Bank>, AppError> {
        let bank = sqlx::query_as::<_, Bank>("SELECT * FROM banks WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bank)
    }

    /// Busca por código: comparação exata, sensível a maiúsculas.
    pub async fn find_bank_by_code(&self, code: &str) -> Result<Option<Bank>, AppError> {
        let bank = sqlx::query_as::<_, Bank>("SELECT * FROM banks WHERE code = $1")
            .bind(code)
            .fetch_optional(&self.pool)
            .await?;

        Ok(bank)
    }

    /// Listagem em ordem de inserção
    pub async fn list_banks(&self) -> Result<Vec<Bank>, AppError> {
        let banks = sqlx::query_as::<_, Bank>("SELECT * FROM banks ORDER BY created_at ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(banks)
    }

    /// Atualização com substituição completa dos campos mutáveis
    pub async fn update_bank<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        input: &UpdateBankPayload,
        actor_id: Uuid,
    ) -> Result<Option<Bank>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bank = sqlx::query_as::<_, Bank>(
            r#"
            UPDATE banks SET
                name = $2, legal_name = $3, address = $4, logo_url = $5,
                primary_color = $6, country_id = $7, time_zone_id = $8,
                utc_offset_minutes = $9, updated_at = NOW(), updated_by = $10
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&input.name)
        .bind(&input.legal_name)
        .bind(&input.address)
        .bind(&input.logo_url)
        .bind(&input.primary_color)
        .bind(input.country_id)
        .bind(&input.time_zone_id)
        .bind(input.utc_offset_minutes)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(bank)
    }

    /// Soft-delete: apenas desliga a flag, nunca apaga a linha
    pub async fn deactivate_bank<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<Bank>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let bank = sqlx::query_as::<_, Bank>(
            r#"
            UPDATE banks
            SET is_active = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(bank)
    }

    // =========================================================================
    //  DIRETORIAS
    // =========================================================================

    pub async fn create_division<'e, E>(
        &self,
        executor: E,
        bank_id: Uuid,
        code: &str,
        name: &str,
        actor_id: Uuid,
    ) -> Result<BankDivision, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, BankDivision>(
            r#"
            INSERT INTO bank_divisions (bank_id, code, name, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(code)
        .bind(name)
        .bind(actor_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe uma diretoria com o código '{}' neste banco.",
                        code
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn find_division_by_id(&self, id: Uuid) -> Result<Option<BankDivision>, AppError> {
        let division =
            sqlx::query_as::<_, BankDivision>("SELECT * FROM bank_divisions WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(division)
    }

    pub async fn find_division_by_code(
        &self,
        bank_id: Uuid,
        code: &str,
    ) -> Result<Option<BankDivision>, AppError> {
        let division = sqlx::query_as::<_, BankDivision>(
            "SELECT * FROM bank_divisions WHERE bank_id = $1 AND code = $2",
        )
        .bind(bank_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(division)
    }

    pub async fn list_divisions(&self, bank_id: Uuid) -> Result<Vec<BankDivision>, AppError> {
        let divisions = sqlx::query_as::<_, BankDivision>(
            "SELECT * FROM bank_divisions WHERE bank_id = $1 ORDER BY created_at ASC",
        )
        .bind(bank_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(divisions)
    }

    pub async fn update_division<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        actor_id: Uuid,
    ) -> Result<Option<BankDivision>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let division = sqlx::query_as::<_, BankDivision>(
            r#"
            UPDATE bank_divisions
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

        Ok(division)
    }

    pub async fn deactivate_division<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<BankDivision>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let division = sqlx::query_as::<_, BankDivision>(
            r#"
            UPDATE bank_divisions
            SET is_active = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(division)
    }

    // =========================================================================
    //  REGIONAIS
    // =========================================================================

    pub async fn create_region<'e, E>(
        &self,
        executor: E,
        division_id: Uuid,
        code: &str,
        name: &str,
        actor_id: Uuid,
    ) -> Result<BankRegion, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, BankRegion>(
            r#"
            INSERT INTO bank_regions (division_id, code, name, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(division_id)
        .bind(code)
        .bind(name)
        .bind(actor_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(format!(
                        "Já existe uma regional com o código '{}' nesta diretoria.",
                        code
                    ));
                }
            }
            e.into()
        })
    }

    pub async fn find_region_by_id(&self, id: Uuid) -> Result<Option<BankRegion>, AppError> {
        let region = sqlx::query_as::<_, BankRegion>("SELECT * FROM bank_regions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(region)
    }

    pub async fn find_region_by_code(
        &self,
        division_id: Uuid,
        code: &str,
    ) -> Result<Option<BankRegion>, AppError> {
        let region = sqlx::query_as::<_, BankRegion>(
            "SELECT * FROM bank_regions WHERE division_id = $1 AND code = $2",
        )
        .bind(division_id)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(region)
    }

    pub async fn list_regions(&self, division_id: Uuid) -> Result<Vec<BankRegion>, AppError> {
        let regions = sqlx::query_as::<_, BankRegion>(
            "SELECT * FROM bank_regions WHERE division_id = $1 ORDER BY created_at ASC",
        )
        .bind(division_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(regions)
    }

    pub async fn update_region<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        actor_id: Uuid,
    ) -> Result<Option<BankRegion>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let region = sqlx::query_as::<_, BankRegion>(
            r#"
            UPDATE bank_regions
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

        Ok(region)
    }

    pub async fn deactivate_region<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<BankRegion>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let region = sqlx::query_as::<_, BankRegion>(
            r#"
            UPDATE bank_regions
            SET is_active = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(region)
    }
}
