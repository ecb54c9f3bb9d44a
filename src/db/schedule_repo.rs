// src/db/schedule_repo.rs

use chrono::NaiveTime;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::schedule::{BankHoliday, BranchHours, CreateHolidayPayload, WeekDay},
};

#[derive(Clone)]
pub struct ScheduleRepository {
    pool: PgPool,
}

impl ScheduleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  HORÁRIO DE FUNCIONAMENTO
    // =========================================================================

    /// UPSERT da única linha de (agência, dia da semana).
    /// Substitui, nunca acumula.
    pub async fn upsert_hours<'e, E>(
        &self,
        executor: E,
        branch_id: Uuid,
        day_of_week: WeekDay,
        open_time: Option<NaiveTime>,
        close_time: Option<NaiveTime>,
        is_closed: bool,
        actor_id: Uuid,
    ) -> Result<BranchHours, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let hours = sqlx::query_as::<_, BranchHours>(
            r#"
            INSERT INTO branch_hours (
                branch_id, day_of_week, open_time, close_time, is_closed,
                created_by, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            ON CONFLICT (branch_id, day_of_week)
            DO UPDATE SET
                open_time = EXCLUDED.open_time,
                close_time = EXCLUDED.close_time,
                is_closed = EXCLUDED.is_closed,
                updated_at = NOW(),
                updated_by = EXCLUDED.updated_by
            RETURNING *
            "#,
        )
        .bind(branch_id)
        .bind(day_of_week)
        .bind(open_time)
        .bind(close_time)
        .bind(is_closed)
        .bind(actor_id)
        .fetch_one(executor)
        .await?;

        Ok(hours)
    }

    /// A semana inteira da agência, na ordem dos dias
    pub async fn list_hours(&self, branch_id: Uuid) -> Result<Vec<BranchHours>, AppError> {
        let hours = sqlx::query_as::<_, BranchHours>(
            "SELECT * FROM branch_hours WHERE branch_id = $1 ORDER BY day_of_week ASC",
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(hours)
    }

    pub async fn find_hours_for_day(
        &self,
        branch_id: Uuid,
        day_of_week: WeekDay,
    ) -> Result<Option<BranchHours>, AppError> {
        let hours = sqlx::query_as::<_, BranchHours>(
            "SELECT * FROM branch_hours WHERE branch_id = $1 AND day_of_week = $2",
        )
        .bind(branch_id)
        .bind(day_of_week)
        .fetch_optional(&self.pool)
        .await?;

        Ok(hours)
    }

    // =========================================================================
    //  FERIADOS
    // =========================================================================

    pub async fn create_bank_holiday<'e, E>(
        &self,
        executor: E,
        bank_id: Uuid,
        input: &CreateHolidayPayload,
        actor_id: Uuid,
    ) -> Result<BankHoliday, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let holiday = sqlx::query_as::<_, BankHoliday>(
            r#"
            INSERT INTO bank_holidays (
                bank_id, country_id, holiday_date, is_recurring, name,
                created_by, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(input.country_id)
        .bind(input.holiday_date)
        .bind(input.is_recurring)
        .bind(&input.name)
        .bind(actor_id)
        .fetch_one(executor)
        .await?;

        Ok(holiday)
    }

    pub async fn create_branch_holiday<'e, E>(
        &self,
        executor: E,
        branch_id: Uuid,
        input: &CreateHolidayPayload,
        actor_id: Uuid,
    ) -> Result<BankHoliday, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let holiday = sqlx::query_as::<_, BankHoliday>(
            r#"
            INSERT INTO bank_holidays (
                branch_id, country_id, holiday_date, is_recurring, name,
                created_by, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING *
            "#,
        )
        .bind(branch_id)
        .bind(input.country_id)
        .bind(input.holiday_date)
        .bind(input.is_recurring)
        .bind(&input.name)
        .bind(actor_id)
        .fetch_one(executor)
        .await?;

        Ok(holiday)
    }

    pub async fn find_holiday_by_id(&self, id: Uuid) -> Result<Option<BankHoliday>, AppError> {
        let holiday = sqlx::query_as::<_, BankHoliday>("SELECT * FROM bank_holidays WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(holiday)
    }

    pub async fn list_bank_holidays(&self, bank_id: Uuid) -> Result<Vec<BankHoliday>, AppError> {
        let holidays = sqlx::query_as::<_, BankHoliday>(
            r#"
            SELECT * FROM bank_holidays
            WHERE bank_id = $1 AND is_active = TRUE
            ORDER BY holiday_date ASC
            "#,
        )
        .bind(bank_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(holidays)
    }

    pub async fn list_branch_holidays(
        &self,
        branch_id: Uuid,
    ) -> Result<Vec<BankHoliday>, AppError> {
        let holidays = sqlx::query_as::<_, BankHoliday>(
            r#"
            SELECT * FROM bank_holidays
            WHERE branch_id = $1 AND is_active = TRUE
            ORDER BY holiday_date ASC
            "#,
        )
        .bind(branch_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(holidays)
    }

    pub async fn deactivate_holiday<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<BankHoliday>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let holiday = sqlx::query_as::<_, BankHoliday>(
            r#"
            UPDATE bank_holidays
            SET is_active = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(holiday)
    }
}
