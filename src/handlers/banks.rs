// src/handlers/banks.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::actor::ActorContext,
    models::bank::{
        Bank, BankDivision, BankRegion, CreateBankPayload, CreateDivisionPayload,
        CreateRegionPayload, UpdateBankPayload, UpdateDivisionPayload, UpdateRegionPayload,
    },
};

// =============================================================================
//  BANCOS
// =============================================================================

// POST /api/banks
#[utoipa::path(
    post,
    path = "/api/banks",
    tag = "Banks",
    request_body = CreateBankPayload,
    responses(
        (status = 201, description = "Banco criado", body = Bank),
        (status = 409, description = "Código já em uso")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_bank(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Json(payload): Json<CreateBankPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let bank = app_state.bank_service.create_bank(&payload, &actor).await?;

    Ok((StatusCode::CREATED, Json(bank)))
}

// GET /api/banks
#[utoipa::path(
    get,
    path = "/api/banks",
    tag = "Banks",
    responses(
        (status = 200, description = "Todos os bancos, em ordem de criação", body = [Bank])
    )
)]
pub async fn list_banks(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let banks = app_state.bank_service.list_banks().await?;

    Ok((StatusCode::OK, Json(banks)))
}

// GET /api/banks/{bank_id}
#[utoipa::path(
    get,
    path = "/api/banks/{bank_id}",
    tag = "Banks",
    responses(
        (status = 200, description = "O banco", body = Bank),
        (status = 404, description = "Banco não encontrado")
    )
)]
pub async fn get_bank(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bank = app_state.bank_service.get_bank(id).await?;

    Ok((StatusCode::OK, Json(bank)))
}

// GET /api/banks/by-code/{code}
// Busca exata, sensível a maiúsculas
#[utoipa::path(
    get,
    path = "/api/banks/by-code/{code}",
    tag = "Banks",
    responses(
        (status = 200, description = "O banco", body = Bank),
        (status = 404, description = "Banco não encontrado")
    )
)]
pub async fn get_bank_by_code(
    State(app_state): State<AppState>,
    Path(code): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bank = app_state.bank_service.get_bank_by_code(&code).await?;

    Ok((StatusCode::OK, Json(bank)))
}

// PUT /api/banks/{bank_id}
#[utoipa::path(
    put,
    path = "/api/banks/{bank_id}",
    tag = "Banks",
    request_body = UpdateBankPayload,
    responses(
        (status = 200, description = "Banco atualizado", body = Bank),
        (status = 404, description = "Banco não encontrado")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn update_bank(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBankPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let bank = app_state
        .bank_service
        .update_bank(id, &payload, &actor)
        .await?;

    Ok((StatusCode::OK, Json(bank)))
}

// DELETE /api/banks/{bank_id}
// Soft-delete: desativa, nunca apaga
#[utoipa::path(
    delete,
    path = "/api/banks/{bank_id}",
    tag = "Banks",
    responses(
        (status = 200, description = "Banco desativado", body = Bank),
        (status = 404, description = "Banco não encontrado")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn deactivate_bank(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let bank = app_state.bank_service.deactivate_bank(id, &actor).await?;

    Ok((StatusCode::OK, Json(bank)))
}

// =============================================================================
//  DIRETORIAS
// =============================================================================

// POST /api/banks/{bank_id}/divisions
#[utoipa::path(
    post,
    path = "/api/banks/{bank_id}/divisions",
    tag = "Banks",
    request_body = CreateDivisionPayload,
    responses(
        (status = 201, description = "Diretoria criada", body = BankDivision),
        (status = 409, description = "Código já em uso neste banco")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_division(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(bank_id): Path<Uuid>,
    Json(payload): Json<CreateDivisionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let division = app_state
        .bank_service
        .create_division(bank_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(division)))
}

// GET /api/banks/{bank_id}/divisions
#[utoipa::path(
    get,
    path = "/api/banks/{bank_id}/divisions",
    tag = "Banks",
    responses(
        (status = 200, description = "Diretorias do banco", body = [BankDivision])
    )
)]
pub async fn list_divisions(
    State(app_state): State<AppState>,
    Path(bank_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let divisions = app_state.bank_service.list_divisions(bank_id).await?;

    Ok((StatusCode::OK, Json(divisions)))
}

// GET /api/banks/{bank_id}/divisions/by-code/{code}
#[utoipa::path(
    get,
    path = "/api/banks/{bank_id}/divisions/by-code/{code}",
    tag = "Banks",
    responses(
        (status = 200, description = "A diretoria", body = BankDivision),
        (status = 404, description = "Diretoria não encontrada")
    )
)]
pub async fn get_division_by_code(
    State(app_state): State<AppState>,
    Path((bank_id, code)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    let division = app_state
        .bank_service
        .get_division_by_code(bank_id, &code)
        .await?;

    Ok((StatusCode::OK, Json(division)))
}

// GET /api/divisions/{division_id}
#[utoipa::path(
    get,
    path = "/api/divisions/{division_id}",
    tag = "Banks",
    responses(
        (status = 200, description = "A diretoria", body = BankDivision),
        (status = 404, description = "Diretoria não encontrada")
    )
)]
pub async fn get_division(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let division = app_state.bank_service.get_division(id).await?;

    Ok((StatusCode::OK, Json(division)))
}

// PUT /api/divisions/{division_id}
#[utoipa::path(
    put,
    path = "/api/divisions/{division_id}",
    tag = "Banks",
    request_body = UpdateDivisionPayload,
    responses(
        (status = 200, description = "Diretoria atualizada", body = BankDivision)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn update_division(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDivisionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let division = app_state
        .bank_service
        .update_division(id, &payload, &actor)
        .await?;

    Ok((StatusCode::OK, Json(division)))
}

// DELETE /api/divisions/{division_id}
#[utoipa::path(
    delete,
    path = "/api/divisions/{division_id}",
    tag = "Banks",
    responses(
        (status = 200, description = "Diretoria desativada", body = BankDivision)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn deactivate_division(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let division = app_state
        .bank_service
        .deactivate_division(id, &actor)
        .await?;

    Ok((StatusCode::OK, Json(division)))
}

// =============================================================================
//  REGIONAIS
// =============================================================================

// POST /api/divisions/{division_id}/regions
#[utoipa::path(
    post,
    path = "/api/divisions/{division_id}/regions",
    tag = "Banks",
    request_body = CreateRegionPayload,
    responses(
        (status = 201, description = "Regional criada", body = BankRegion),
        (status = 409, description = "Código já em uso nesta diretoria")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_region(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(division_id): Path<Uuid>,
    Json(payload): Json<CreateRegionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let region = app_state
        .bank_service
        .create_region(division_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(region)))
}

// GET /api/divisions/{division_id}/regions
#[utoipa::path(
    get,
    path = "/api/divisions/{division_id}/regions",
    tag = "Banks",
    responses(
        (status = 200, description = "Regionais da diretoria", body = [BankRegion])
    )
)]
pub async fn list_regions(
    State(app_state): State<AppState>,
    Path(division_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let regions = app_state.bank_service.list_regions(division_id).await?;

    Ok((StatusCode::OK, Json(regions)))
}

// GET /api/divisions/{division_id}/regions/by-code/{code}
#[utoipa::path(
    get,
    path = "/api/divisions/{division_id}/regions/by-code/{code}",
    tag = "Banks",
    responses(
        (status = 200, description = "A regional", body = BankRegion),
        (status = 404, description = "Regional não encontrada")
    )
)]
pub async fn get_region_by_code(
    State(app_state): State<AppState>,
    Path((division_id, code)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    let region = app_state
        .bank_service
        .get_region_by_code(division_id, &code)
        .await?;

    Ok((StatusCode::OK, Json(region)))
}

// GET /api/regions/{region_id}
#[utoipa::path(
    get,
    path = "/api/regions/{region_id}",
    tag = "Banks",
    responses(
        (status = 200, description = "A regional", body = BankRegion),
        (status = 404, description = "Regional não encontrada")
    )
)]
pub async fn get_region(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let region = app_state.bank_service.get_region(id).await?;

    Ok((StatusCode::OK, Json(region)))
}

// PUT /api/regions/{region_id}
#[utoipa::path(
    put,
    path = "/api/regions/{region_id}",
    tag = "Banks",
    request_body = UpdateRegionPayload,
    responses(
        (status = 200, description = "Regional atualizada", body = BankRegion)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn update_region(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRegionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let region = app_state
        .bank_service
        .update_region(id, &payload, &actor)
        .await?;

    Ok((StatusCode::OK, Json(region)))
}

// DELETE /api/regions/{region_id}
#[utoipa::path(
    delete,
    path = "/api/regions/{region_id}",
    tag = "Banks",
    responses(
        (status = 200, description = "Regional desativada", body = BankRegion)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn deactivate_region(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let region = app_state.bank_service.deactivate_region(id, &actor).await?;

    Ok((StatusCode::OK, Json(region)))
}
