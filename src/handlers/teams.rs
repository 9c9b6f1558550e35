// src/handlers/teams.rs

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
    models::team::{AddTeamMemberPayload, CreateTeamPayload, MaintenanceTeam, TeamDetail, TeamWithCount},
};

// POST /api/teams
#[utoipa::path(
    post,
    path = "/api/teams",
    tag = "Teams",
    request_body = CreateTeamPayload,
    responses(
        (status = 201, description = "Equipe criada", body = MaintenanceTeam)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_team(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTeamPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let team = app_state.team_service.create_team(&payload).await?;

    Ok((StatusCode::CREATED, Json(team)))
}

// GET /api/teams
#[utoipa::path(
    get,
    path = "/api/teams",
    tag = "Teams",
    responses(
        (status = 200, description = "Equipes com a contagem de membros", body = [TeamWithCount])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_teams(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let teams = app_state.team_service.list_teams().await?;
    Ok(Json(teams))
}

// GET /api/teams/{id}
#[utoipa::path(
    get,
    path = "/api/teams/{id}",
    tag = "Teams",
    params(("id" = Uuid, Path, description = "ID da equipe")),
    responses(
        (status = 200, description = "Equipe com os membros", body = TeamDetail),
        (status = 404, description = "Equipe não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_team(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.team_service.get_detail(id).await?;
    Ok(Json(detail))
}

// POST /api/teams/{id}/members
#[utoipa::path(
    post,
    path = "/api/teams/{id}/members",
    tag = "Teams",
    request_body = AddTeamMemberPayload,
    params(("id" = Uuid, Path, description = "ID da equipe")),
    responses(
        (status = 200, description = "Equipe com os membros atualizados", body = TeamDetail),
        (status = 404, description = "Equipe ou perfil não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_member(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddTeamMemberPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let detail = app_state.team_service.add_member(id, &payload).await?;

    Ok(Json(detail))
}
