// src/services/audit_service.rs

use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::AuditRepository,
    middleware::actor::ActorContext,
    models::audit::{AuditAction, BankAuditLog, BranchAuditLog},
};

#[derive(Clone)]
pub struct AuditService {
    repo: AuditRepository,
    pool: PgPool,
}

impl AuditService {
    pub fn new(repo: AuditRepository, pool: PgPool) -> Self {
        Self { repo, pool }
    }

    // =========================================================================
    //  GRAVAÇÃO (append-only)
    // =========================================================================

    // Os serviços de entidade chamam estes métodos DEPOIS do commit da
    // mutação principal. Uma falha aqui vira AuditLogFailed: o chamador
    // fica sabendo que a entidade persistiu sem o registro de trilha.

    pub async fn record_bank(
        &self,
        bank_id: Uuid,
        action: AuditAction,
        entity_name: &str,
        entity_id: Uuid,
        metadata: Option<Value>,
        actor: &ActorContext,
    ) -> Result<BankAuditLog, AppError> {
        self.repo
            .record_bank(
                &self.pool,
                bank_id,
                action,
                entity_name,
                entity_id,
                metadata.as_ref(),
                actor.ip_address.as_deref(),
                actor.user_id,
            )
            .await
            .map_err(|e| AppError::AuditLogFailed(e.to_string()))
    }

    pub async fn record_branch(
        &self,
        branch_id: Uuid,
        action: AuditAction,
        entity_name: &str,
        entity_id: Uuid,
        metadata: Option<Value>,
        actor: &ActorContext,
    ) -> Result<BranchAuditLog, AppError> {
        self.repo
            .record_branch(
                &self.pool,
                branch_id,
                action,
                entity_name,
                entity_id,
                metadata.as_ref(),
                actor.ip_address.as_deref(),
                actor.user_id,
            )
            .await
            .map_err(|e| AppError::AuditLogFailed(e.to_string()))
    }

    // =========================================================================
    //  CONSULTA
    // =========================================================================

    pub async fn list_by_bank(
        &self,
        bank_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<BankAuditLog>, AppError> {
        self.repo.list_by_bank(bank_id, from, to).await
    }

    pub async fn list_by_branch(
        &self,
        branch_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<Vec<BranchAuditLog>, AppError> {
        self.repo.list_by_branch(branch_id, from, to).await
    }
}
