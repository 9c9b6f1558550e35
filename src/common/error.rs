// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::models::request::Stage;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Campo obrigatório ausente: {0}")]
    MissingField(&'static str),

    #[error("Valor de estágio inválido: {0}")]
    InvalidStage(String),

    #[error("Valor de filtro inválido: {0}")]
    InvalidFilter(String),

    #[error("Transição não permitida: {from} -> {to}")]
    TransitionNotAllowed { from: Stage, to: Stage },

    #[error("Recurso não encontrado: {0}")]
    ResourceNotFound(String),

    #[error("Token inválido")]
    InvalidToken,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::MissingField(field) => (
                StatusCode::BAD_REQUEST,
                format!("O campo '{}' é obrigatório.", field),
            ),
            AppError::InvalidStage(value) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!(
                    "Estágio inválido: '{}'. Valores aceitos: new, in_progress, repaired, scrap.",
                    value
                ),
            ),
            AppError::InvalidFilter(value) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Valor de filtro inválido: '{}'.", value),
            ),
            AppError::TransitionNotAllowed { from, to } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("A transição de '{}' para '{}' não é permitida.", from, to),
            ),
            AppError::ResourceNotFound(resource) => (
                StatusCode::NOT_FOUND,
                format!("{} não encontrado(a).", resource),
            ),
            AppError::InvalidToken | AppError::JwtError(_) => (
                StatusCode::UNAUTHORIZED,
                "Token de autenticação inválido ou ausente.".to_string(),
            ),
            // A mensagem crua do banco é devolvida ao chamador: quem dispara a
            // transição precisa saber por que a escrita falhou.
            AppError::DatabaseError(e) => {
                tracing::error!("Erro de banco de dados: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_field_maps_to_400() {
        let response = AppError::MissingField("status").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn invalid_stage_maps_to_422() {
        let response = AppError::InvalidStage("archived".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn transition_not_allowed_maps_to_422() {
        let response = AppError::TransitionNotAllowed {
            from: Stage::Repaired,
            to: Stage::New,
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn not_found_maps_to_404() {
        let response = AppError::ResourceNotFound("Requisição".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
