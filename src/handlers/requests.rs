// src/handlers/requests.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::comment::{CommentWithAuthor, CreateCommentPayload, MaintenanceComment},
    models::request::{
        CreateRequestPayload, MaintenanceRequest, RequestDetail, RequestSummary, Stage,
        UpdateRequestPayload, UpdateStagePayload,
    },
};

#[derive(Debug, Deserialize)]
pub struct RequestListQuery {
    pub stage: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

// POST /api/requests
#[utoipa::path(
    post,
    path = "/api/requests",
    tag = "Requests",
    request_body = CreateRequestPayload,
    responses(
        (status = 201, description = "Requisição criada no estágio 'new'", body = MaintenanceRequest)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_request(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(payload): Json<CreateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let request = app_state
        .request_service
        .create_request(&user.0.id, &payload)
        .await?;

    Ok((StatusCode::CREATED, Json(request)))
}

// GET /api/requests?stage=&search=
#[utoipa::path(
    get,
    path = "/api/requests",
    tag = "Requests",
    params(
        ("stage" = Option<String>, Query, description = "Filtra por estágio; 'all' ou ausente lista todos"),
        ("search" = Option<String>, Query, description = "Busca em assunto e descrição")
    ),
    responses(
        (status = 200, description = "Listagem mais recente primeiro", body = [RequestSummary])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_requests(
    State(app_state): State<AppState>,
    Query(query): Query<RequestListQuery>,
) -> Result<impl IntoResponse, AppError> {
    // 'all' vem do seletor da interface e significa "sem filtro"
    let stage = match query.stage.as_deref() {
        None | Some("all") | Some("") => None,
        Some(value) => {
            Some(Stage::parse(value).ok_or_else(|| AppError::InvalidStage(value.to_string()))?)
        }
    };

    let requests = app_state
        .request_service
        .list_requests(stage, query.search.as_deref())
        .await?;

    Ok(Json(requests))
}

// GET /api/requests/calendar?from=&to=
#[utoipa::path(
    get,
    path = "/api/requests/calendar",
    tag = "Requests",
    params(
        ("from" = String, Query, description = "Início da janela (RFC 3339)"),
        ("to" = String, Query, description = "Fim da janela (RFC 3339)")
    ),
    responses(
        (status = 200, description = "Requisições agendadas dentro da janela", body = [RequestSummary])
    ),
    security(("api_jwt" = []))
)]
pub async fn calendar(
    State(app_state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    let requests = app_state
        .request_service
        .list_calendar(query.from, query.to)
        .await?;

    Ok(Json(requests))
}

// GET /api/requests/{id}
#[utoipa::path(
    get,
    path = "/api/requests/{id}",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Detalhe com comentários", body = RequestDetail),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_request(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.request_service.get_detail(id).await?;
    Ok(Json(detail))
}

// PATCH /api/requests/{id}
#[utoipa::path(
    patch,
    path = "/api/requests/{id}",
    tag = "Requests",
    request_body = UpdateRequestPayload,
    params(("id" = Uuid, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Requisição atualizada", body = MaintenanceRequest),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_request(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateRequestPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let request = app_state.request_service.update_request(id, &payload).await?;

    Ok(Json(request))
}

// POST /api/requests/{id}/stage: a operação autoritativa de transição
#[utoipa::path(
    post,
    path = "/api/requests/{id}/stage",
    tag = "Requests",
    request_body = UpdateStagePayload,
    params(("id" = Uuid, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Estágio persistido (e cascata aplicada, se houver)"),
        (status = 400, description = "Status ausente"),
        (status = 422, description = "Status fora do conjunto fechado"),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_stage(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateStagePayload>,
) -> Result<impl IntoResponse, AppError> {
    let target = parse_target_stage(&payload)?;

    app_state.request_service.transition_stage(id, target).await?;

    Ok(Json(json!({ "ok": true })))
}

// Classifica o corpo da transição: ausente/vazio é 400, fora do conjunto
// fechado é 422. String vazia conta como ausente, igual a um formulário em
// branco.
fn parse_target_stage(payload: &UpdateStagePayload) -> Result<Stage, AppError> {
    let status = payload.status.as_deref().unwrap_or_default();
    if status.is_empty() {
        return Err(AppError::MissingField("status"));
    }

    Stage::parse(status).ok_or_else(|| AppError::InvalidStage(status.to_string()))
}

// POST /api/requests/{id}/comments
#[utoipa::path(
    post,
    path = "/api/requests/{id}/comments",
    tag = "Requests",
    request_body = CreateCommentPayload,
    params(("id" = Uuid, Path, description = "ID da requisição")),
    responses(
        (status = 201, description = "Comentário registrado", body = MaintenanceComment),
        (status = 404, description = "Requisição não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn add_comment(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CreateCommentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let comment = app_state
        .request_service
        .add_comment(id, &user.0.id, &payload.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

// GET /api/requests/{id}/comments
#[utoipa::path(
    get,
    path = "/api/requests/{id}/comments",
    tag = "Requests",
    params(("id" = Uuid, Path, description = "ID da requisição")),
    responses(
        (status = 200, description = "Comentários do mais antigo para o mais novo", body = [CommentWithAuthor])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_comments(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let comments = app_state.request_service.list_comments(id).await?;
    Ok(Json(comments))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(status: Option<&str>) -> UpdateStagePayload {
        UpdateStagePayload {
            status: status.map(|s| s.to_string()),
        }
    }

    #[test]
    fn a_valid_stage_is_accepted() {
        assert_eq!(
            parse_target_stage(&payload(Some("in_progress"))).unwrap(),
            Stage::InProgress
        );
        assert_eq!(
            parse_target_stage(&payload(Some("scrap"))).unwrap(),
            Stage::Scrap
        );
    }

    #[test]
    fn a_missing_status_is_a_validation_error() {
        assert!(matches!(
            parse_target_stage(&payload(None)),
            Err(AppError::MissingField("status"))
        ));
    }

    #[test]
    fn an_empty_status_counts_as_missing() {
        assert!(matches!(
            parse_target_stage(&payload(Some(""))),
            Err(AppError::MissingField("status"))
        ));
    }

    #[test]
    fn a_value_outside_the_enum_is_rejected_as_invalid() {
        assert!(matches!(
            parse_target_stage(&payload(Some("archived"))),
            Err(AppError::InvalidStage(value)) if value == "archived"
        ));
    }
}
