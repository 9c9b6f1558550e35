// src/handlers/equipment.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::equipment::{
        CreateEquipmentPayload, Equipment, EquipmentDetail, EquipmentStatus, UpdateEquipmentPayload,
    },
};

#[derive(Debug, Deserialize)]
pub struct EquipmentListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

// POST /api/equipment
#[utoipa::path(
    post,
    path = "/api/equipment",
    tag = "Equipment",
    request_body = CreateEquipmentPayload,
    responses(
        (status = 201, description = "Equipamento cadastrado", body = Equipment)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_equipment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateEquipmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let equipment = app_state.equipment_service.create_equipment(&payload).await?;

    Ok((StatusCode::CREATED, Json(equipment)))
}

// GET /api/equipment?search=&status=&category=
#[utoipa::path(
    get,
    path = "/api/equipment",
    tag = "Equipment",
    params(
        ("search" = Option<String>, Query, description = "Busca em nome e descrição"),
        ("status" = Option<String>, Query, description = "Filtra por status; 'all' ou ausente lista todos"),
        ("category" = Option<String>, Query, description = "Filtra por categoria")
    ),
    responses(
        (status = 200, description = "Listagem mais recente primeiro", body = [Equipment])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_equipment(
    State(app_state): State<AppState>,
    Query(query): Query<EquipmentListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let status = match query.status.as_deref() {
        None | Some("all") | Some("") => None,
        Some(value) => Some(
            EquipmentStatus::parse(value)
                .ok_or_else(|| AppError::InvalidFilter(value.to_string()))?,
        ),
    };
    let category = match query.category.as_deref() {
        None | Some("all") | Some("") => None,
        other => other,
    };

    let equipment = app_state
        .equipment_service
        .list_equipment(query.search.as_deref(), status, category)
        .await?;

    Ok(Json(equipment))
}

// GET /api/equipment/categories
#[utoipa::path(
    get,
    path = "/api/equipment/categories",
    tag = "Equipment",
    responses(
        (status = 200, description = "Categorias distintas para os filtros", body = [String])
    ),
    security(("api_jwt" = []))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.equipment_service.list_categories().await?;
    Ok(Json(categories))
}

// GET /api/equipment/{id}
#[utoipa::path(
    get,
    path = "/api/equipment/{id}",
    tag = "Equipment",
    params(("id" = Uuid, Path, description = "ID do equipamento")),
    responses(
        (status = 200, description = "Detalhe com o histórico de requisições", body = EquipmentDetail),
        (status = 404, description = "Equipamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_equipment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let detail = app_state.equipment_service.get_detail(id).await?;
    Ok(Json(detail))
}

// PATCH /api/equipment/{id}
#[utoipa::path(
    patch,
    path = "/api/equipment/{id}",
    tag = "Equipment",
    request_body = UpdateEquipmentPayload,
    params(("id" = Uuid, Path, description = "ID do equipamento")),
    responses(
        (status = 200, description = "Equipamento atualizado", body = Equipment),
        (status = 404, description = "Equipamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_equipment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateEquipmentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let equipment = app_state
        .equipment_service
        .update_equipment(id, &payload)
        .await?;

    Ok(Json(equipment))
}
