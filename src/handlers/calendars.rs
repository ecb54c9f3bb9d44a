// src/handlers/calendars.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::actor::ActorContext,
    models::calendar::{
        AssignCalendarPayload, CalendarAssignment, CreateCalendarPayload, OperatingStatus,
        ResolveQuery, ResolvedCalendar, WorkingCalendar,
    },
};

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AtQuery {
    pub at: Option<DateTime<Utc>>,
}

// =============================================================================
//  CALENDÁRIOS
// =============================================================================

// POST /api/banks/{bank_id}/calendars
#[utoipa::path(
    post,
    path = "/api/banks/{bank_id}/calendars",
    tag = "Calendars",
    request_body = CreateCalendarPayload,
    responses(
        (status = 201, description = "Calendário criado", body = WorkingCalendar)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_calendar(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(bank_id): Path<Uuid>,
    Json(payload): Json<CreateCalendarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let calendar = app_state
        .calendar_service
        .create_calendar(bank_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(calendar)))
}

// GET /api/banks/{bank_id}/calendars
#[utoipa::path(
    get,
    path = "/api/banks/{bank_id}/calendars",
    tag = "Calendars",
    responses(
        (status = 200, description = "Calendários do banco", body = [WorkingCalendar])
    )
)]
pub async fn list_calendars(
    State(app_state): State<AppState>,
    Path(bank_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let calendars = app_state.calendar_service.list_calendars(bank_id).await?;

    Ok((StatusCode::OK, Json(calendars)))
}

// GET /api/calendars/{calendar_id}
#[utoipa::path(
    get,
    path = "/api/calendars/{calendar_id}",
    tag = "Calendars",
    responses(
        (status = 200, description = "O calendário", body = WorkingCalendar),
        (status = 404, description = "Calendário não encontrado")
    )
)]
pub async fn get_calendar(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let calendar = app_state.calendar_service.get_calendar(id).await?;

    Ok((StatusCode::OK, Json(calendar)))
}

// PUT /api/calendars/{calendar_id}/default
// Troca atômica: derruba o padrão anterior do banco e marca este
#[utoipa::path(
    put,
    path = "/api/calendars/{calendar_id}/default",
    tag = "Calendars",
    responses(
        (status = 200, description = "Calendário agora é o padrão do banco", body = WorkingCalendar)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn set_default_calendar(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let calendar = app_state.calendar_service.set_default(id, &actor).await?;

    Ok((StatusCode::OK, Json(calendar)))
}

// DELETE /api/calendars/{calendar_id}
#[utoipa::path(
    delete,
    path = "/api/calendars/{calendar_id}",
    tag = "Calendars",
    responses(
        (status = 200, description = "Calendário desativado", body = WorkingCalendar)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn deactivate_calendar(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let calendar = app_state
        .calendar_service
        .deactivate_calendar(id, &actor)
        .await?;

    Ok((StatusCode::OK, Json(calendar)))
}

// =============================================================================
//  ATRIBUIÇÕES
// =============================================================================

// POST /api/calendars/{calendar_id}/assignments
#[utoipa::path(
    post,
    path = "/api/calendars/{calendar_id}/assignments",
    tag = "Calendars",
    request_body = AssignCalendarPayload,
    responses(
        (status = 201, description = "Atribuição criada", body = CalendarAssignment),
        (status = 409, description = "Vigência sobreposta para o mesmo alvo")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn assign_calendar(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(calendar_id): Path<Uuid>,
    Json(payload): Json<AssignCalendarPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let assignment = app_state
        .calendar_service
        .assign(calendar_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(assignment)))
}

// GET /api/calendars/{calendar_id}/assignments
#[utoipa::path(
    get,
    path = "/api/calendars/{calendar_id}/assignments",
    tag = "Calendars",
    responses(
        (status = 200, description = "Atribuições do calendário", body = [CalendarAssignment])
    )
)]
pub async fn list_assignments(
    State(app_state): State<AppState>,
    Path(calendar_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let assignments = app_state
        .calendar_service
        .list_assignments(calendar_id)
        .await?;

    Ok((StatusCode::OK, Json(assignments)))
}

// DELETE /api/assignments/{assignment_id}
#[utoipa::path(
    delete,
    path = "/api/assignments/{assignment_id}",
    tag = "Calendars",
    responses(
        (status = 200, description = "Atribuição desativada", body = CalendarAssignment)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn deactivate_assignment(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let assignment = app_state
        .calendar_service
        .deactivate_assignment(id, &actor)
        .await?;

    Ok((StatusCode::OK, Json(assignment)))
}

// =============================================================================
//  RESOLUÇÃO
// =============================================================================

// GET /api/calendars/resolve?targetType=POSITION&targetId=...&at=...
// O núcleo da consulta: qual calendário governa o nó neste instante?
#[utoipa::path(
    get,
    path = "/api/calendars/resolve",
    tag = "Calendars",
    responses(
        (status = 200, description = "Calendário governante e o nível em que foi resolvido", body = ResolvedCalendar),
        (status = 404, description = "Cadeia de fallback esgotada (NO_CALENDAR_RESOLVED)")
    )
)]
pub async fn resolve_calendar(
    State(app_state): State<AppState>,
    Query(query): Query<ResolveQuery>,
) -> Result<impl IntoResponse, AppError> {
    let resolved = app_state
        .calendar_service
        .resolve(query.target_type, query.target_id, query.at)
        .await?;

    Ok((StatusCode::OK, Json(resolved)))
}

// GET /api/branches/{branch_id}/operating-status?at=...
// Composição: feriados + grade de horários + calendário como metadado
#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}/operating-status",
    tag = "Calendars",
    responses(
        (status = 200, description = "Status operacional da agência", body = OperatingStatus)
    )
)]
pub async fn operating_status(
    State(app_state): State<AppState>,
    Path(branch_id): Path<Uuid>,
    Query(query): Query<AtQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = app_state
        .calendar_service
        .operating_status(branch_id, query.at)
        .await?;

    Ok((StatusCode::OK, Json(status)))
}
