// src/models/branch.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Branch (A "Agência")
// ---
// O ponto físico de atendimento. Pertence a um banco e,
// opcionalmente, a uma regional.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    pub id: Uuid,
    pub bank_id: Uuid,
    pub region_id: Option<Uuid>,

    // Código único dentro do banco (Ex: "0001" da agência centro)
    pub code: String,
    pub name: String,
    pub address: Option<String>,

    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,

    pub opened_at: Option<NaiveDate>,
    pub closed_at: Option<NaiveDate>,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

// ---
// 2. BranchDepartment (O "Setor")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchDepartment {
    pub id: Uuid,
    pub branch_id: Uuid,
    pub name: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

// ---
// 3. BranchPosition (O "Cargo")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BranchPosition {
    pub id: Uuid,
    pub department_id: Uuid,
    pub title: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

// ---
// Payloads
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBranchPayload {
    pub region_id: Option<Uuid>,

    #[validate(length(min = 1, message = "O código é obrigatório."))]
    #[schema(example = "0001")]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Agência Centro")]
    pub name: String,

    pub address: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub opened_at: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBranchPayload {
    pub region_id: Option<Uuid>,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,

    pub address: Option<String>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub opened_at: Option<NaiveDate>,
    pub closed_at: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDepartmentPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Atendimento Pessoa Física")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDepartmentPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePositionPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    #[schema(example = "Gerente de Contas")]
    pub title: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePositionPayload {
    #[validate(length(min = 1, message = "O título é obrigatório."))]
    pub title: String,
}
