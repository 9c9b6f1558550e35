// src/models/equipment.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::request::MaintenanceRequest;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    Operational,
    Maintenance,
    Faulty,
    Scrap,
    Retired,
}

impl Default for EquipmentStatus {
    fn default() -> Self {
        EquipmentStatus::Operational
    }
}

impl EquipmentStatus {
    /// Para os filtros de listagem vindos da query string.
    pub fn parse(value: &str) -> Option<EquipmentStatus> {
        match value {
            "operational" => Some(EquipmentStatus::Operational),
            "maintenance" => Some(EquipmentStatus::Maintenance),
            "faulty" => Some(EquipmentStatus::Faulty),
            "scrap" => Some(EquipmentStatus::Scrap),
            "retired" => Some(EquipmentStatus::Retired),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    pub id: Uuid,
    #[schema(example = "Chiller Industrial #1")]
    pub equipment_name: String,
    pub description: Option<String>,
    #[schema(example = "HVAC")]
    pub category: String,
    pub physical_location: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_details: Option<String>,
    pub status: EquipmentStatus,
    pub health_percentage: Option<i32>,
    // Preenchidos em conjunto quando a cascata de sucateamento dispara.
    pub scrap_note: Option<String>,
    pub scrap_date: Option<DateTime<Utc>>,
    pub assigned_team_id: Option<Uuid>,
    pub default_technician_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipamento mais o histórico de requisições dele.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentDetail {
    #[serde(flatten)]
    pub equipment: Equipment,
    pub requests: Vec<MaintenanceRequest>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEquipmentPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub equipment_name: String,

    #[validate(length(min = 1, message = "A categoria é obrigatória."))]
    pub category: String,

    pub description: Option<String>,
    pub physical_location: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_details: Option<String>,

    #[serde(default)]
    pub status: EquipmentStatus,

    #[validate(range(min = 0, max = 100, message = "A saúde deve estar entre 0 e 100."))]
    pub health_percentage: Option<i32>,

    pub assigned_team_id: Option<Uuid>,
    pub default_technician_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEquipmentPayload {
    #[validate(length(min = 1, message = "O nome não pode ficar vazio."))]
    pub equipment_name: Option<String>,
    #[validate(length(min = 1, message = "A categoria não pode ficar vazia."))]
    pub category: Option<String>,
    pub description: Option<String>,
    pub physical_location: Option<String>,
    pub serial_number: Option<String>,
    pub purchase_date: Option<NaiveDate>,
    pub warranty_details: Option<String>,
    pub status: Option<EquipmentStatus>,
    #[validate(range(min = 0, max = 100, message = "A saúde deve estar entre 0 e 100."))]
    pub health_percentage: Option<i32>,
    pub assigned_team_id: Option<Uuid>,
    pub default_technician_id: Option<String>,
}
