// src/services/request_service.rs

use std::sync::Arc;

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{CommentRepository, EquipmentRepository, RequestRepository},
    models::{
        comment::{CommentWithAuthor, MaintenanceComment},
        request::{
            CreateRequestPayload, MaintenanceRequest, RequestDetail, RequestSummary, Stage,
            UpdateRequestPayload,
        },
    },
    services::stage_rules::{scrap_note_for, stage_effects, StageEffect, TransitionPolicy},
};

#[derive(Clone)]
pub struct RequestService {
    request_repo: RequestRepository,
    equipment_repo: EquipmentRepository,
    comment_repo: CommentRepository,
    policy: Arc<dyn TransitionPolicy>,
    pool: PgPool,
}

impl RequestService {
    pub fn new(
        request_repo: RequestRepository,
        equipment_repo: EquipmentRepository,
        comment_repo: CommentRepository,
        policy: Arc<dyn TransitionPolicy>,
        pool: PgPool,
    ) -> Self {
        Self {
            request_repo,
            equipment_repo,
            comment_repo,
            policy,
            pool,
        }
    }

    pub async fn create_request(
        &self,
        created_by: &str,
        payload: &CreateRequestPayload,
    ) -> Result<MaintenanceRequest, AppError> {
        self.request_repo.create(payload, created_by).await
    }

    pub async fn list_requests(
        &self,
        stage: Option<Stage>,
        search: Option<&str>,
    ) -> Result<Vec<RequestSummary>, AppError> {
        self.request_repo.list(stage, search).await
    }

    pub async fn get_detail(&self, id: Uuid) -> Result<RequestDetail, AppError> {
        let request = self
            .request_repo
            .find_summary_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Requisição {}", id)))?;

        let comments = self.comment_repo.list_for_request(id).await?;

        Ok(RequestDetail { request, comments })
    }

    pub async fn update_request(
        &self,
        id: Uuid,
        payload: &UpdateRequestPayload,
    ) -> Result<MaintenanceRequest, AppError> {
        self.request_repo
            .update_fields(id, payload)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Requisição {}", id)))
    }

    /// A operação autoritativa de mudança de estágio.
    ///
    /// A escrita primária e a cascata de efeitos rodam na mesma transação:
    /// ou o chamador vê a requisição sucateada junto com o equipamento, ou
    /// vê o erro e nada mudou.
    pub async fn transition_stage(&self, request_id: Uuid, target: Stage) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let current = self
            .request_repo
            .find_stage(&mut *tx, request_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Requisição {}", request_id)))?;

        if !self.policy.allows(current, target) {
            return Err(AppError::TransitionNotAllowed {
                from: current,
                to: target,
            });
        }

        let equipment_id = self
            .request_repo
            .update_stage(&mut *tx, request_id, target)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Requisição {}", request_id)))?;

        for effect in stage_effects(target) {
            match effect {
                StageEffect::ScrapEquipment => {
                    // Só há o que sucatear quando a requisição aponta um equipamento
                    if let Some(equipment_id) = equipment_id {
                        self.equipment_repo
                            .mark_scrapped(&mut *tx, equipment_id, &scrap_note_for(request_id))
                            .await?;
                        tracing::info!(
                            "🔩 Equipamento {} sucateado pela requisição {}",
                            equipment_id,
                            request_id
                        );
                    }
                }
            }
        }

        tx.commit().await?;

        Ok(())
    }

    pub async fn list_calendar(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<RequestSummary>, AppError> {
        self.request_repo.list_scheduled_between(from, to).await
    }

    pub async fn add_comment(
        &self,
        request_id: Uuid,
        user_id: &str,
        comment: &str,
    ) -> Result<MaintenanceComment, AppError> {
        // Garante o 404 antes de violar a chave estrangeira
        self.request_repo
            .find_by_id(request_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Requisição {}", request_id)))?;

        self.comment_repo.insert(request_id, user_id, comment).await
    }

    pub async fn list_comments(&self, request_id: Uuid) -> Result<Vec<CommentWithAuthor>, AppError> {
        self.comment_repo.list_for_request(request_id).await
    }
}
