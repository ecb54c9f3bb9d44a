// src/db/audit_repo.rs

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::audit::{AuditAction, BankAuditLog, BranchAuditLog},
};

// Somente INSERT e SELECT: a trilha é imutável por construção,
// não existe método de UPDATE ou DELETE aqui.
#[derive(Clone)]
pub struct AuditRepository {
    pool: PgPool,
}

impl AuditRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn record_bank<'e, E>(
        &self,
        executor: E,
        bank_id: Uuid,
        action: AuditAction,
        entity_name: &str,
        entity_id: Uuid,
        metadata: Option<&Value>,
        ip_address: Option<&str>,
        user_id: Uuid,
    ) -> Result<BankAuditLog, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, BankAuditLog>(
            r#"
            INSERT INTO bank_audit_logs (
                bank_id, action, entity_name, entity_id, metadata, ip_address, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(bank_id)
        .bind(action)
        .bind(entity_name)
        .bind(entity_id)
        .bind(metadata)
        .bind(ip_address)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn record_branch<'e, E>(
        &self,
        executor: E,
        branch_id: Uuid,
        action: AuditAction,
        entity_name: &str,
        entity_id: Uuid,
        metadata: Option<&Value>,
        ip_address: Option<&str>,
        user_id: Uuid,
    ) -> Result<BranchAuditLog, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let entry = sqlx::query_as::<_, BranchAuditLog>(
            r#"
            INSERT INTO branch_audit_logs (
                branch_id, action, entity_name, entity_id, metadata, ip_address, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(branch_id)
        .bind(action)
        .bind(entity_name)
        .bind(entity_id)
        .bind(metadata)
        .bind(ip_address)
        .bind(user_id)
        .fetch_one(executor)
        .await?;

        Ok(entry)
    }

    /// Trilha de um banco, mais recentes primeiro, com período opcional
    pub async fn list_by_bank(
        &self,
        bank_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<BankAuditLog>, AppError> {
        let entries = sqlx::query_as::<_, BankAuditLog>(
            r#"
            SELECT * FROM bank_audit_logs
            WHERE bank_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at < $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(bank_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    pub async fn list_by_branch(
        &self,
        branch_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<BranchAuditLog>, AppError> {
        let entries = sqlx::query_as::<_, BranchAuditLog>(
            r#"
            SELECT * FROM branch_audit_logs
            WHERE branch_id = $1
              AND ($2::timestamptz IS NULL OR created_at >= $2)
              AND ($3::timestamptz IS NULL OR created_at < $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(branch_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}
