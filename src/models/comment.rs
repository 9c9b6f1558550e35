// src/models/comment.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceComment {
    pub id: Uuid,
    pub request_id: Uuid,
    pub user_id: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

/// Comentário com o nome de quem escreveu, para a linha do tempo do detalhe.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    pub id: Uuid,
    pub request_id: Uuid,
    pub user_id: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub author_name: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentPayload {
    #[validate(length(min = 1, message = "O comentário não pode ficar vazio."))]
    pub comment: String,
}
