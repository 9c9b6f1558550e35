// src/models/request.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

/// Ciclo de vida de uma requisição de manutenção.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    New,
    InProgress,
    Repaired,
    Scrap,
}

impl Stage {
    /// Todos os estágios, na ordem das colunas do quadro.
    pub const ALL: [Stage; 4] = [Stage::New, Stage::InProgress, Stage::Repaired, Stage::Scrap];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::New => "new",
            Stage::InProgress => "in_progress",
            Stage::Repaired => "repaired",
            Stage::Scrap => "scrap",
        }
    }

    /// Aceita somente os quatro valores do conjunto fechado.
    pub fn parse(value: &str) -> Option<Stage> {
        match value {
            "new" => Some(Stage::New),
            "in_progress" => Some(Stage::InProgress),
            "repaired" => Some(Stage::Repaired),
            "scrap" => Some(Stage::Scrap),
            _ => None,
        }
    }

    /// Posição da coluna correspondente no quadro.
    pub fn index(&self) -> usize {
        match self {
            Stage::New => 0,
            Stage::InProgress => 1,
            Stage::Repaired => 2,
            Stage::Scrap => 3,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema,
)]
#[sqlx(rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Corrective,
    Preventive,
}

impl Default for RequestType {
    fn default() -> Self {
        RequestType::Corrective
    }
}

// --- Registros ---

/// Requisição de manutenção como vem do banco de dados.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    pub id: Uuid,
    pub subject: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub stage: Stage,
    pub request_type: RequestType,
    pub equipment_id: Option<Uuid>,
    pub created_by_id: Option<String>,
    pub assigned_technician_id: Option<String>,
    pub maintenance_team_id: Option<Uuid>,
    pub scheduled_date: Option<DateTime<Utc>>,
    #[schema(example = "2.5")]
    pub duration_hours: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Linha de listagem com os nomes de exibição já resolvidos (quadro, lista e calendário).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestSummary {
    pub id: Uuid,
    pub subject: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub stage: Stage,
    pub request_type: RequestType,
    pub equipment_id: Option<Uuid>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<Decimal>,
    pub created_at: DateTime<Utc>,
    pub equipment_name: Option<String>,
    pub requested_by_name: Option<String>,
    pub assigned_to_name: Option<String>,
    pub team_name: Option<String>,
}

/// Detalhe completo: a requisição com nomes resolvidos mais os comentários.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestDetail {
    #[serde(flatten)]
    pub request: RequestSummary,
    pub comments: Vec<crate::models::comment::CommentWithAuthor>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequestPayload {
    #[validate(length(min = 1, message = "O assunto é obrigatório."))]
    #[schema(example = "Compressor fazendo barulho anormal")]
    pub subject: String,

    pub description: Option<String>,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub request_type: RequestType,

    pub equipment_id: Option<Uuid>,
    pub assigned_technician_id: Option<String>,
    pub maintenance_team_id: Option<Uuid>,
    pub scheduled_date: Option<DateTime<Utc>>,

    #[schema(example = "4.0")]
    pub duration_hours: Option<Decimal>,
}

/// Atualização parcial: campos ausentes ficam como estão.
/// O estágio só muda pelo endpoint de transição.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestPayload {
    #[validate(length(min = 1, message = "O assunto não pode ficar vazio."))]
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub request_type: Option<RequestType>,
    pub equipment_id: Option<Uuid>,
    pub assigned_technician_id: Option<String>,
    pub maintenance_team_id: Option<Uuid>,
    pub scheduled_date: Option<DateTime<Utc>>,
    pub duration_hours: Option<Decimal>,
}

/// Corpo do endpoint de transição: `{ "status": "<new|in_progress|repaired|scrap>" }`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStagePayload {
    #[schema(example = "in_progress")]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_the_closed_enum() {
        assert_eq!(Stage::parse("new"), Some(Stage::New));
        assert_eq!(Stage::parse("in_progress"), Some(Stage::InProgress));
        assert_eq!(Stage::parse("repaired"), Some(Stage::Repaired));
        assert_eq!(Stage::parse("scrap"), Some(Stage::Scrap));

        assert_eq!(Stage::parse("archived"), None);
        assert_eq!(Stage::parse(""), None);
        assert_eq!(Stage::parse("New"), None);
        assert_eq!(Stage::parse("in progress"), None);
    }

    #[test]
    fn stage_round_trips_through_as_str() {
        for stage in Stage::ALL {
            assert_eq!(Stage::parse(stage.as_str()), Some(stage));
        }
    }

    #[test]
    fn stage_serializes_in_wire_casing() {
        let json = serde_json::to_string(&Stage::InProgress).unwrap();
        assert_eq!(json, "\"in_progress\"");
    }
}
