// src/models/bank.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// ---
// 1. Bank (A "Instituição")
// ---
// A raiz da hierarquia. Todo o resto pertence a um banco.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub id: Uuid,

    // Código único global (Ex: "237" do Bradesco)
    pub code: String,
    pub name: String,
    pub legal_name: Option<String>,
    pub address: Option<String>,

    // Identidade visual
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,

    pub country_id: Option<Uuid>,

    // Fuso horário: o identificador IANA é metadado de exibição;
    // o deslocamento fixo em minutos é o que entra na conta de hora local.
    pub time_zone_id: String,
    pub utc_offset_minutes: i32,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

// ---
// 2. BankDivision (A "Diretoria")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankDivision {
    pub id: Uuid,
    pub bank_id: Uuid,

    // Código único dentro do banco
    pub code: String,
    pub name: String,

    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
    pub updated_at: DateTime<Utc>,
    pub updated_by: Uuid,
}

// ---
// 3. BankRegion (A "Regional")
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankRegion {
    pub id: Uuid,
    pub division_id: Uuid,

    // Código único dentro da diretoria
    pub code: String,
    pub name: String,

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
pub struct CreateBankPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    #[schema(example = "001")]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Banco Nacional")]
    pub name: String,

    pub legal_name: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,

    #[schema(example = "#004a8d")]
    pub primary_color: Option<String>,

    pub country_id: Option<Uuid>,

    #[serde(default = "default_time_zone")]
    #[schema(example = "America/Sao_Paulo")]
    pub time_zone_id: String,

    // Deslocamento em relação ao UTC, em minutos (Ex: -180 para UTC-3)
    #[validate(range(min = -840, max = 840, message = "Deslocamento UTC fora do intervalo."))]
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

fn default_time_zone() -> String {
    "UTC".to_string()
}

// Atualização com semântica de substituição completa:
// todos os campos mutáveis vêm no payload.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBankPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub legal_name: Option<String>,
    pub address: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub country_id: Option<Uuid>,

    #[validate(length(min = 1, message = "O fuso horário é obrigatório."))]
    pub time_zone_id: String,

    #[validate(range(min = -840, max = 840, message = "Deslocamento UTC fora do intervalo."))]
    pub utc_offset_minutes: i32,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDivisionPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    #[schema(example = "DIR-SUL")]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Diretoria Sul")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDivisionPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRegionPayload {
    #[validate(length(min = 1, message = "O código é obrigatório."))]
    #[schema(example = "REG-POA")]
    pub code: String,

    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Regional Porto Alegre")]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegionPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
}
