// src/handlers/audit.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::audit::{AuditRangeQuery, BankAuditLog, BranchAuditLog},
};

// Somente leitura: a trilha não tem rota de escrita própria.
// Quem grava são os serviços de entidade, após cada mutação.

// GET /api/banks/{bank_id}/audit-logs?from=...&to=...
#[utoipa::path(
    get,
    path = "/api/banks/{bank_id}/audit-logs",
    tag = "Audit",
    responses(
        (status = 200, description = "Trilha do banco, mais recentes primeiro", body = [BankAuditLog])
    )
)]
pub async fn list_bank_audit_logs(
    State(app_state): State<AppState>,
    Path(bank_id): Path<Uuid>,
    Query(query): Query<AuditRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .audit_service
        .list_by_bank(bank_id, query.from, query.to)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}

// GET /api/branches/{branch_id}/audit-logs?from=...&to=...
#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}/audit-logs",
    tag = "Audit",
    responses(
        (status = 200, description = "Trilha da agência, mais recentes primeiro", body = [BranchAuditLog])
    )
)]
pub async fn list_branch_audit_logs(
    State(app_state): State<AppState>,
    Path(branch_id): Path<Uuid>,
    Query(query): Query<AuditRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let entries = app_state
        .audit_service
        .list_by_branch(branch_id, query.from, query.to)
        .await?;

    Ok((StatusCode::OK, Json(entries)))
}
