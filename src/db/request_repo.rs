// src/db/request_repo.rs

use chrono::{DateTime, Utc};
use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::request::{CreateRequestPayload, MaintenanceRequest, RequestSummary, Stage, UpdateRequestPayload},
};

// Colunas da listagem com os nomes de exibição resolvidos por LEFT JOIN.
const SUMMARY_SELECT: &str = r#"
    SELECT r.id, r.subject, r.description, r.priority, r.stage, r.request_type,
           r.equipment_id, r.scheduled_date, r.duration_hours, r.created_at,
           e.equipment_name AS equipment_name,
           creator.full_name AS requested_by_name,
           tech.full_name AS assigned_to_name,
           t.name AS team_name
      FROM maintenance_requests r
      LEFT JOIN equipment e ON e.id = r.equipment_id
      LEFT JOIN profiles creator ON creator.id = r.created_by_id
      LEFT JOIN profiles tech ON tech.id = r.assigned_technician_id
      LEFT JOIN maintenance_teams t ON t.id = r.maintenance_team_id
"#;

// O repositório de requisições, responsável pela tabela 'maintenance_requests'
#[derive(Clone)]
pub struct RequestRepository {
    pool: PgPool,
}

impl RequestRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Cria uma requisição; o estágio inicial é sempre 'new'
    pub async fn create(
        &self,
        payload: &CreateRequestPayload,
        created_by: &str,
    ) -> Result<MaintenanceRequest, AppError> {
        let request = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            INSERT INTO maintenance_requests
                (subject, description, priority, stage, request_type, equipment_id,
                 created_by_id, assigned_technician_id, maintenance_team_id,
                 scheduled_date, duration_hours)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&payload.subject)
        .bind(payload.description.as_deref())
        .bind(payload.priority)
        .bind(Stage::New)
        .bind(payload.request_type)
        .bind(payload.equipment_id)
        .bind(created_by)
        .bind(payload.assigned_technician_id.as_deref())
        .bind(payload.maintenance_team_id)
        .bind(payload.scheduled_date)
        .bind(payload.duration_hours)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }

    // Lista filtrada por estágio e/ou texto de busca, mais recente primeiro
    pub async fn list(
        &self,
        stage: Option<Stage>,
        search: Option<&str>,
    ) -> Result<Vec<RequestSummary>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(SUMMARY_SELECT);
        builder.push(" WHERE 1 = 1");

        if let Some(stage) = stage {
            builder.push(" AND r.stage = ").push_bind(stage);
        }
        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            builder
                .push(" AND (r.subject ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR r.description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }

        builder.push(" ORDER BY r.created_at DESC");

        let requests = builder
            .build_query_as::<RequestSummary>()
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceRequest>, AppError> {
        let request = sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    pub async fn find_summary_by_id(&self, id: Uuid) -> Result<Option<RequestSummary>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(SUMMARY_SELECT);
        builder.push(" WHERE r.id = ").push_bind(id);

        let request = builder
            .build_query_as::<RequestSummary>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(request)
    }

    // Atualização parcial: campos não enviados preservam o valor atual
    pub async fn update_fields(
        &self,
        id: Uuid,
        payload: &UpdateRequestPayload,
    ) -> Result<Option<MaintenanceRequest>, AppError> {
        let request = sqlx::query_as::<_, MaintenanceRequest>(
            r#"
            UPDATE maintenance_requests SET
                subject = COALESCE($2, subject),
                description = COALESCE($3, description),
                priority = COALESCE($4, priority),
                request_type = COALESCE($5, request_type),
                equipment_id = COALESCE($6, equipment_id),
                assigned_technician_id = COALESCE($7, assigned_technician_id),
                maintenance_team_id = COALESCE($8, maintenance_team_id),
                scheduled_date = COALESCE($9, scheduled_date),
                duration_hours = COALESCE($10, duration_hours),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.subject.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.priority)
        .bind(payload.request_type)
        .bind(payload.equipment_id)
        .bind(payload.assigned_technician_id.as_deref())
        .bind(payload.maintenance_team_id)
        .bind(payload.scheduled_date)
        .bind(payload.duration_hours)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    /// Estágio atual da requisição, para a checagem de política dentro da transação.
    pub async fn find_stage<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Stage>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let stage = sqlx::query_scalar::<_, Stage>(
            "SELECT stage FROM maintenance_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(executor)
        .await?;

        Ok(stage)
    }

    /// Persiste o novo estágio e devolve o equipamento vinculado (se houver).
    /// `None` externo significa que a requisição não existe.
    pub async fn update_stage<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        stage: Stage,
    ) -> Result<Option<Option<Uuid>>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let equipment_id = sqlx::query_scalar::<_, Option<Uuid>>(
            r#"
            UPDATE maintenance_requests
               SET stage = $2, updated_at = NOW()
             WHERE id = $1
            RETURNING equipment_id
            "#,
        )
        .bind(id)
        .bind(stage)
        .fetch_optional(executor)
        .await?;

        Ok(equipment_id)
    }

    // Requisições agendadas dentro da janela do calendário
    pub async fn list_scheduled_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<RequestSummary>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new(SUMMARY_SELECT);
        builder
            .push(" WHERE r.scheduled_date >= ")
            .push_bind(from)
            .push(" AND r.scheduled_date <= ")
            .push_bind(to)
            .push(" ORDER BY r.scheduled_date ASC");

        let requests = builder
            .build_query_as::<RequestSummary>()
            .fetch_all(&self.pool)
            .await?;

        Ok(requests)
    }

    // Histórico de manutenção de um equipamento
    pub async fn list_for_equipment(
        &self,
        equipment_id: Uuid,
    ) -> Result<Vec<MaintenanceRequest>, AppError> {
        let requests = sqlx::query_as::<_, MaintenanceRequest>(
            "SELECT * FROM maintenance_requests WHERE equipment_id = $1 ORDER BY created_at DESC",
        )
        .bind(equipment_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(requests)
    }
}
