// src/db/comment_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::comment::{CommentWithAuthor, MaintenanceComment},
};

#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert(
        &self,
        request_id: Uuid,
        user_id: &str,
        comment: &str,
    ) -> Result<MaintenanceComment, AppError> {
        let comment = sqlx::query_as::<_, MaintenanceComment>(
            r#"
            INSERT INTO maintenance_comments (request_id, user_id, comment)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(request_id)
        .bind(user_id)
        .bind(comment)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    // Linha do tempo do detalhe da requisição, do mais antigo para o mais novo
    pub async fn list_for_request(
        &self,
        request_id: Uuid,
    ) -> Result<Vec<CommentWithAuthor>, AppError> {
        let comments = sqlx::query_as::<_, CommentWithAuthor>(
            r#"
            SELECT c.id, c.request_id, c.user_id, c.comment, c.created_at,
                   p.full_name AS author_name
              FROM maintenance_comments c
              LEFT JOIN profiles p ON p.id = c.user_id
             WHERE c.request_id = $1
             ORDER BY c.created_at ASC
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
