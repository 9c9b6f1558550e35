// src/models/profile.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Perfil local de um usuário do provedor de identidade externo.
/// O `id` é o identificador estável emitido pelo provedor, não um UUID nosso.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[schema(example = "user_2b8XkQ4mPzT")]
    pub id: String,
    pub email: Option<String>,
    pub full_name: Option<String>,
    // Rótulo informativo; nenhuma decisão de autorização depende dele.
    #[schema(example = "technician")]
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Claims que consumimos do JWT do provedor de identidade.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub exp: usize,
    pub iat: usize,
}
