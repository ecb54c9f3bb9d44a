// src/handlers/branches.rs

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
    models::branch::{
        Branch, BranchDepartment, BranchPosition, CreateBranchPayload, CreateDepartmentPayload,
        CreatePositionPayload, UpdateBranchPayload, UpdateDepartmentPayload, UpdatePositionPayload,
    },
};

// =============================================================================
//  AGÊNCIAS
// =============================================================================

// POST /api/banks/{bank_id}/branches
#[utoipa::path(
    post,
    path = "/api/banks/{bank_id}/branches",
    tag = "Branches",
    request_body = CreateBranchPayload,
    responses(
        (status = 201, description = "Agência criada", body = Branch),
        (status = 409, description = "Código já em uso neste banco")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_branch(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(bank_id): Path<Uuid>,
    Json(payload): Json<CreateBranchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let branch = app_state
        .branch_service
        .create_branch(bank_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(branch)))
}

// GET /api/banks/{bank_id}/branches
#[utoipa::path(
    get,
    path = "/api/banks/{bank_id}/branches",
    tag = "Branches",
    responses(
        (status = 200, description = "Agências do banco", body = [Branch])
    )
)]
pub async fn list_branches(
    State(app_state): State<AppState>,
    Path(bank_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let branches = app_state.branch_service.list_branches(bank_id).await?;

    Ok((StatusCode::OK, Json(branches)))
}

// GET /api/banks/{bank_id}/branches/by-code/{code}
#[utoipa::path(
    get,
    path = "/api/banks/{bank_id}/branches/by-code/{code}",
    tag = "Branches",
    responses(
        (status = 200, description = "A agência", body = Branch),
        (status = 404, description = "Agência não encontrada")
    )
)]
pub async fn get_branch_by_code(
    State(app_state): State<AppState>,
    Path((bank_id, code)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse, AppError> {
    let branch = app_state
        .branch_service
        .get_branch_by_code(bank_id, &code)
        .await?;

    Ok((StatusCode::OK, Json(branch)))
}

// GET /api/branches/{branch_id}
#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}",
    tag = "Branches",
    responses(
        (status = 200, description = "A agência", body = Branch),
        (status = 404, description = "Agência não encontrada")
    )
)]
pub async fn get_branch(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let branch = app_state.branch_service.get_branch(id).await?;

    Ok((StatusCode::OK, Json(branch)))
}

// PUT /api/branches/{branch_id}
#[utoipa::path(
    put,
    path = "/api/branches/{branch_id}",
    tag = "Branches",
    request_body = UpdateBranchPayload,
    responses(
        (status = 200, description = "Agência atualizada", body = Branch),
        (status = 404, description = "Agência não encontrada")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn update_branch(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBranchPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let branch = app_state
        .branch_service
        .update_branch(id, &payload, &actor)
        .await?;

    Ok((StatusCode::OK, Json(branch)))
}

// DELETE /api/branches/{branch_id}
#[utoipa::path(
    delete,
    path = "/api/branches/{branch_id}",
    tag = "Branches",
    responses(
        (status = 200, description = "Agência desativada", body = Branch),
        (status = 404, description = "Agência não encontrada")
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn deactivate_branch(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let branch = app_state.branch_service.deactivate_branch(id, &actor).await?;

    Ok((StatusCode::OK, Json(branch)))
}

// =============================================================================
//  SETORES
// =============================================================================

// POST /api/branches/{branch_id}/departments
#[utoipa::path(
    post,
    path = "/api/branches/{branch_id}/departments",
    tag = "Branches",
    request_body = CreateDepartmentPayload,
    responses(
        (status = 201, description = "Setor criado", body = BranchDepartment)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_department(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(branch_id): Path<Uuid>,
    Json(payload): Json<CreateDepartmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let department = app_state
        .branch_service
        .create_department(branch_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(department)))
}

// GET /api/branches/{branch_id}/departments
#[utoipa::path(
    get,
    path = "/api/branches/{branch_id}/departments",
    tag = "Branches",
    responses(
        (status = 200, description = "Setores da agência", body = [BranchDepartment])
    )
)]
pub async fn list_departments(
    State(app_state): State<AppState>,
    Path(branch_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let departments = app_state.branch_service.list_departments(branch_id).await?;

    Ok((StatusCode::OK, Json(departments)))
}

// GET /api/departments/{department_id}
#[utoipa::path(
    get,
    path = "/api/departments/{department_id}",
    tag = "Branches",
    responses(
        (status = 200, description = "O setor", body = BranchDepartment),
        (status = 404, description = "Setor não encontrado")
    )
)]
pub async fn get_department(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let department = app_state.branch_service.get_department(id).await?;

    Ok((StatusCode::OK, Json(department)))
}

// PUT /api/departments/{department_id}
#[utoipa::path(
    put,
    path = "/api/departments/{department_id}",
    tag = "Branches",
    request_body = UpdateDepartmentPayload,
    responses(
        (status = 200, description = "Setor atualizado", body = BranchDepartment)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn update_department(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateDepartmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let department = app_state
        .branch_service
        .update_department(id, &payload, &actor)
        .await?;

    Ok((StatusCode::OK, Json(department)))
}

// DELETE /api/departments/{department_id}
#[utoipa::path(
    delete,
    path = "/api/departments/{department_id}",
    tag = "Branches",
    responses(
        (status = 200, description = "Setor desativado", body = BranchDepartment)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn deactivate_department(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let department = app_state
        .branch_service
        .deactivate_department(id, &actor)
        .await?;

    Ok((StatusCode::OK, Json(department)))
}

// =============================================================================
//  CARGOS
// =============================================================================

// POST /api/departments/{department_id}/positions
#[utoipa::path(
    post,
    path = "/api/departments/{department_id}/positions",
    tag = "Branches",
    request_body = CreatePositionPayload,
    responses(
        (status = 201, description = "Cargo criado", body = BranchPosition)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn create_position(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(department_id): Path<Uuid>,
    Json(payload): Json<CreatePositionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let position = app_state
        .branch_service
        .create_position(department_id, &payload, &actor)
        .await?;

    Ok((StatusCode::CREATED, Json(position)))
}

// GET /api/departments/{department_id}/positions
#[utoipa::path(
    get,
    path = "/api/departments/{department_id}/positions",
    tag = "Branches",
    responses(
        (status = 200, description = "Cargos do setor", body = [BranchPosition])
    )
)]
pub async fn list_positions(
    State(app_state): State<AppState>,
    Path(department_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let positions = app_state
        .branch_service
        .list_positions(department_id)
        .await?;

    Ok((StatusCode::OK, Json(positions)))
}

// GET /api/positions/{position_id}
#[utoipa::path(
    get,
    path = "/api/positions/{position_id}",
    tag = "Branches",
    responses(
        (status = 200, description = "O cargo", body = BranchPosition),
        (status = 404, description = "Cargo não encontrado")
    )
)]
pub async fn get_position(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let position = app_state.branch_service.get_position(id).await?;

    Ok((StatusCode::OK, Json(position)))
}

// PUT /api/positions/{position_id}
#[utoipa::path(
    put,
    path = "/api/positions/{position_id}",
    tag = "Branches",
    request_body = UpdatePositionPayload,
    responses(
        (status = 200, description = "Cargo atualizado", body = BranchPosition)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn update_position(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePositionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let position = app_state
        .branch_service
        .update_position(id, &payload, &actor)
        .await?;

    Ok((StatusCode::OK, Json(position)))
}

// DELETE /api/positions/{position_id}
#[utoipa::path(
    delete,
    path = "/api/positions/{position_id}",
    tag = "Branches",
    responses(
        (status = 200, description = "Cargo desativado", body = BranchPosition)
    ),
    params(
        ("x-user-id" = Uuid, Header, description = "ID do operador")
    )
)]
pub async fn deactivate_position(
    State(app_state): State<AppState>,
    actor: ActorContext,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let position = app_state
        .branch_service
        .deactivate_position(id, &actor)
        .await?;

    Ok((StatusCode::OK, Json(position)))
}
