// src/models/audit.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// Mapeia o CREATE TYPE audit_action do banco
#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, ToSchema)]
#[sqlx(type_name = "audit_action", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum AuditAction {
    Create,
    Update,
    Delete,
    Activate,
    Deactivate,
}

// ---
// Trilhas de auditoria
// ---
// Registros imutáveis: uma vez gravados, nunca são alterados nem apagados.
// O timestamp é atribuído pelo servidor no INSERT.

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAuditLog {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub action: AuditAction,

    // Qual entidade foi tocada (Ex: "bank", "bank_division")
    pub entity_name: String,
    pub entity_id: Uuid,

    pub metadata: Option<Value>,
    pub ip_address: Option<String>,
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchAuditLog {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub action: AuditAction,

    pub entity_name: String,
    pub entity_id: Uuid,

    pub metadata: Option<Value>,
    pub ip_address: Option<String>,
    pub user_id: Uuid,

    pub created_at: DateTime<Utc>,
}

// Filtro opcional de período para as consultas de trilha
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct AuditRangeQuery {
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}
