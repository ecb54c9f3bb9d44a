// src/handlers/schedule.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::actor::ActorContext,
    models::schedule::{BankHoliday, BranchHours, CreateHolidayPayload, SetHoursPayload},
};

// ---
// Querystrings e respostas locais deste grupo de rotas
// ---

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AtQuery {
    // Instante da consulta; ausente = agora
    pub at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateQuery {
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IsOpenResponse {
    pub is_open: bool,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IsHolidayResponse {
    pub is_holiday: bool,
}

// =============================================================================
//  HORÁRIO DE FUNCIONAMENTO
// =============================================================================

// PUT /api/branches/{branch_id}/hours
// UPSERT da linha do dia: substitui, nunca acumula
#[utoipa::path(
    put,
    path = "/api/branches/{branch_id}/hours",
    tag = "Schedule",
    request_body = SetHoursPayload,
    responses(
        (status = 200, description = "Horário do dia gravado", body = BranchHours),
        (status = 400, description = "Dia aberto sem horários informados")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn set_hours(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(branch_id): Path<Uuid>,
    Json(payload): Json<SetHoursPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let hours = app_state
        .schedule_service
        .set_hours(branch_id, &payload, &actor)
        .await?;

    Ok((StatusCode::OK, Json(hours)))
}

// GET /api/branches/{branch_id}/hours
#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}/hours",
    tag = "Schedule",
    responses(
        (status = 200, description = "A semana da agência", body = [BranchHours])
    )
)]
pub async fn list_hours(
    State(app_state): State<AppState>,
    Path(branch_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let hours = app_state.schedule_service.list_hours(branch_id).await?;

    Ok((StatusCode::OK, Json(hours)))
}

// GET /api/branches/{branch_id}/is-open?at=2024-07-01T14:30:00Z
#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}/is-open",
    tag = "Schedule",
    responses(
        (status = 200, description = "Aberta no instante consultado?", body = IsOpenResponse)
    )
)]
pub async fn is_open(
    State(app_state): State<AppState>,
    Path(branch_id): Path<Uuid>,
    Query(query): Query<AtQuery>,
) -> Result<impl IntoResponse, AppError> {
    let instant = query.at.unwrap_or_else(Utc::now);
    let is_open = app_state
        .schedule_service
        .is_open_at(branch_id, instant)
        .await?;

    Ok((StatusCode::OK, Json(IsOpenResponse { is_open })))
}

// =============================================================================
//  FERIADOS
// =============================================================================

// POST /api/banks/{bank_id}/holidays
#[utoipa::path(
    post,
    path = "/api/banks/{bank_id}/holidays",
    tag = "Schedule",
    request_body = CreateHolidayPayload,
    responses(
        (status = 201, description = "Feriado do banco criado", body = BankHoliday)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_bank_holiday(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(bank_id): Path<Uuid>,
    Json(payload): Json<CreateHolidayPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let holiday = app_state
        .schedule_service
        .add_bank_holiday(bank_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(holiday)))
}

// GET /api/banks/{bank_id}/holidays
#[utoipa::path(
    get,
    path = "/api/banks/{bank_id}/holidays",
    tag = "Schedule",
    responses(
        (status = 200, description = "Feriados do banco", body = [BankHoliday])
    )
)]
pub async fn list_bank_holidays(
    State(app_state): State<AppState>,
    Path(bank_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let holidays = app_state
        .schedule_service
        .list_bank_holidays(bank_id)
        .await?;

    Ok((StatusCode::OK, Json(holidays)))
}

// POST /api/branches/{branch_id}/holidays
// Feriado específico da agência: tem precedência sobre os do banco
#[utoipa::path(
    post,
    path = "/api/branches/{branch_id}/holidays",
    tag = "Schedule",
    request_body = CreateHolidayPayload,
    responses(
        (status = 201, description = "Feriado da agência criado", body = BankHoliday)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_branch_holiday(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(branch_id): Path<Uuid>,
    Json(payload): Json<CreateHolidayPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let holiday = app_state
        .schedule_service
        .add_branch_holiday(branch_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(holiday)))
}

// GET /api/branches/{branch_id}/holidays
#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}/holidays",
    tag = "Schedule",
    responses(
        (status = 200, description = "Feriados da agência", body = [BankHoliday])
    )
)]
pub async fn list_branch_holidays(
    State(app_state): State<AppState>,
    Path(branch_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let holidays = app_state
        .schedule_service
        .list_branch_holidays(branch_id)
        .await?;

    Ok((StatusCode::OK, Json(holidays)))
}

// DELETE /api/holidays/{holiday_id}
#[utoipa::path(
    delete,
    path = "/api/holidays/{holiday_id}",
    tag = "Schedule",
    responses(
        (status = 200, description = "Feriado desativado", body = BankHoliday),
        (status = 404, description = "Feriado não encontrado")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn remove_holiday(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let holiday = app_state
        .schedule_service
        .remove_holiday(id, &actor)
        .await?;

    Ok((StatusCode::OK, Json(holiday)))
}

// GET /api/branches/{branch_id}/is-holiday?date=2024-12-25
#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}/is-holiday",
    tag = "Schedule",
    responses(
        (status = 200, description = "A data é feriado para a agência?", body = IsHolidayResponse)
    )
)]
pub async fn is_holiday(
    State(app_state): State<AppState>,
    Path(branch_id): Path<Uuid>,
    Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, AppError> {
    let is_holiday = app_state
        .schedule_service
        .is_holiday(branch_id, query.date)
        .await?;

    Ok((StatusCode::OK, Json(IsHolidayResponse { is_holiday })))
}
