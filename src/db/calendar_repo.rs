// src/db/calendar_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::calendar::{CalendarAssignment, CalendarTargetType, WorkingCalendar},
};

#[derive(Clone)]
pub struct CalendarRepository {
    pool: PgPool,
}

impl CalendarRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CALENDÁRIOS
    // =========================================================================

    pub async fn create_calendar<'e, E>(
        &self,
        executor: E,
        bank_id: Uuid,
        name: &str,
        is_default: bool,
        time_zone_id: &str,
        actor_id: Uuid,
    ) -> Result<WorkingCalendar, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, WorkingCalendar>(
            r#"
            INSERT INTO working_calendars (
                bank_id, name, is_default, time_zone_id, created_by, updated_by
            )
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(name)
        .bind(is_default)
        .bind(time_zone_id)
        .bind(actor_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // O índice único parcial barra dois padrões no mesmo banco
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::Conflict(
                        "Este banco já possui um calendário padrão.".to_string(),
                    );
                }
            }
            e.into()
        })
    }

    pub async fn find_calendar_by_id(&self, id: Uuid) -> Result<Option<WorkingCalendar>, AppError> {
        let calendar =
            sqlx::query_as::<_, WorkingCalendar>("SELECT * FROM working_calendars WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(calendar)
    }

    pub async fn list_calendars(&self, bank_id: Uuid) -> Result<Vec<WorkingCalendar>, AppError> {
        let calendars = sqlx::query_as::<_, WorkingCalendar>(
            "SELECT * FROM working_calendars WHERE bank_id = $1 ORDER BY created_at ASC",
        )
        .bind(bank_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(calendars)
    }

    /// O calendário padrão ativo do banco, se houver (zero ou um por banco)
    pub async fn find_default_calendar(
        &self,
        bank_id: Uuid,
    ) -> Result<Option<WorkingCalendar>, AppError> {
        let calendar = sqlx::query_as::<_, WorkingCalendar>(
            r#"
            SELECT * FROM working_calendars
            WHERE bank_id = $1 AND is_default = TRUE AND is_active = TRUE
            "#,
        )
        .bind(bank_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(calendar)
    }

    /// Derruba a flag de padrão do banco (passo 1 da troca de padrão)
    pub async fn clear_default<'e, E>(&self, executor: E, bank_id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE working_calendars SET is_default = FALSE WHERE bank_id = $1 AND is_default = TRUE",
        )
        .bind(bank_id)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn set_default_flag<'e, E>(
        &self,
        executor: E,
        calendar_id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<WorkingCalendar>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let calendar = sqlx::query_as::<_, WorkingCalendar>(
            r#"
            UPDATE working_calendars
            SET is_default = TRUE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(calendar_id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(calendar)
    }

    pub async fn deactivate_calendar<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<WorkingCalendar>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let calendar = sqlx::query_as::<_, WorkingCalendar>(
            r#"
            UPDATE working_calendars
            SET is_active = FALSE, is_default = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(calendar)
    }

    // =========================================================================
    //  ATRIBUIÇÕES
    // =========================================================================

    pub async fn create_assignment<'e, E>(
        &self,
        executor: E,
        calendar_id: Uuid,
        target_type: CalendarTargetType,
        target_id: Uuid,
        effective_from: DateTime<Utc>,
        effective_to: Option<DateTime<Utc>>,
        actor_id: Uuid,
    ) -> Result<CalendarAssignment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        // Exatamente uma das três colunas de alvo é preenchida
        let sql = match target_type {
            CalendarTargetType::Branch => {
                r#"
                INSERT INTO calendar_assignments (
                    calendar_id, branch_id, effective_from, effective_to, created_by, updated_by
                )
                VALUES ($1, $2, $3, $4, $5, $5)
                RETURNING *
                "#
            }
            CalendarTargetType::Department => {
                r#"
                INSERT INTO calendar_assignments (
                    calendar_id, department_id, effective_from, effective_to, created_by, updated_by
                )
                VALUES ($1, $2, $3, $4, $5, $5)
                RETURNING *
                "#
            }
            CalendarTargetType::Position => {
                r#"
                INSERT INTO calendar_assignments (
                    calendar_id, position_id, effective_from, effective_to, created_by, updated_by
                )
                VALUES ($1, $2, $3, $4, $5, $5)
                RETURNING *
                "#
            }
        };

        let assignment = sqlx::query_as::<_, CalendarAssignment>(sql)
            .bind(calendar_id)
            .bind(target_id)
            .bind(effective_from)
            .bind(effective_to)
            .bind(actor_id)
            .fetch_one(executor)
            .await?;

        Ok(assignment)
    }

    /// Todas as atribuições ativas de um alvo. Aceita executor para que o
    /// guard de sobreposição rode dentro da mesma transação do INSERT.
    pub async fn find_active_assignments<'e, E>(
        &self,
        executor: E,
        target_type: CalendarTargetType,
        target_id: Uuid,
    ) -> Result<Vec<CalendarAssignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = match target_type {
            CalendarTargetType::Branch => {
                "SELECT * FROM calendar_assignments WHERE branch_id = $1 AND is_active = TRUE"
            }
            CalendarTargetType::Department => {
                "SELECT * FROM calendar_assignments WHERE department_id = $1 AND is_active = TRUE"
            }
            CalendarTargetType::Position => {
                "SELECT * FROM calendar_assignments WHERE position_id = $1 AND is_active = TRUE"
            }
        };

        let assignments = sqlx::query_as::<_, CalendarAssignment>(sql)
            .bind(target_id)
            .fetch_all(executor)
            .await?;

        Ok(assignments)
    }

    pub async fn find_assignment_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<CalendarAssignment>, AppError> {
        let assignment = sqlx::query_as::<_, CalendarAssignment>(
            "SELECT * FROM calendar_assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(assignment)
    }

    pub async fn list_assignments_by_calendar(
        &self,
        calendar_id: Uuid,
    ) -> Result<Vec<CalendarAssignment>, AppError> {
        let assignments = sqlx::query_as::<_, CalendarAssignment>(
            "SELECT * FROM calendar_assignments WHERE calendar_id = $1 ORDER BY created_at ASC",
        )
        .bind(calendar_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(assignments)
    }

    pub async fn deactivate_assignment<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<CalendarAssignment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let assignment = sqlx::query_as::<_, CalendarAssignment>(
            r#"
            UPDATE calendar_assignments
            SET is_active = FALSE, updated_at = NOW(), updated_by = $2
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(actor_id)
        .fetch_optional(executor)
        .await?;

        Ok(assignment)
    }
}
