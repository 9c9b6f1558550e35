// src/db/equipment_repo.rs

use sqlx::{Executor, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::equipment::{CreateEquipmentPayload, Equipment, EquipmentStatus, UpdateEquipmentPayload},
};

#[derive(Clone)]
pub struct EquipmentRepository {
    pool: PgPool,
}

impl EquipmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: &CreateEquipmentPayload) -> Result<Equipment, AppError> {
        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            INSERT INTO equipment
                (equipment_name, description, category, physical_location, serial_number,
                 purchase_date, warranty_details, status, health_percentage,
                 assigned_team_id, default_technician_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&payload.equipment_name)
        .bind(payload.description.as_deref())
        .bind(&payload.category)
        .bind(payload.physical_location.as_deref())
        .bind(payload.serial_number.as_deref())
        .bind(payload.purchase_date)
        .bind(payload.warranty_details.as_deref())
        .bind(payload.status)
        .bind(payload.health_percentage)
        .bind(payload.assigned_team_id)
        .bind(payload.default_technician_id.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(equipment)
    }

    // Lista filtrada por busca, status e categoria, mais recente primeiro
    pub async fn list(
        &self,
        search: Option<&str>,
        status: Option<EquipmentStatus>,
        category: Option<&str>,
    ) -> Result<Vec<Equipment>, AppError> {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM equipment WHERE 1 = 1");

        if let Some(search) = search {
            let pattern = format!("%{}%", search);
            builder
                .push(" AND (equipment_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR description ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        if let Some(status) = status {
            builder.push(" AND status = ").push_bind(status);
        }
        if let Some(category) = category {
            builder.push(" AND category = ").push_bind(category.to_string());
        }

        builder.push(" ORDER BY created_at DESC");

        let equipment = builder
            .build_query_as::<Equipment>()
            .fetch_all(&self.pool)
            .await?;

        Ok(equipment)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Equipment>, AppError> {
        let equipment = sqlx::query_as::<_, Equipment>("SELECT * FROM equipment WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(equipment)
    }

    pub async fn update_fields(
        &self,
        id: Uuid,
        payload: &UpdateEquipmentPayload,
    ) -> Result<Option<Equipment>, AppError> {
        let equipment = sqlx::query_as::<_, Equipment>(
            r#"
            UPDATE equipment SET
                equipment_name = COALESCE($2, equipment_name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                physical_location = COALESCE($5, physical_location),
                serial_number = COALESCE($6, serial_number),
                purchase_date = COALESCE($7, purchase_date),
                warranty_details = COALESCE($8, warranty_details),
                status = COALESCE($9, status),
                health_percentage = COALESCE($10, health_percentage),
                assigned_team_id = COALESCE($11, assigned_team_id),
                default_technician_id = COALESCE($12, default_technician_id),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(payload.equipment_name.as_deref())
        .bind(payload.description.as_deref())
        .bind(payload.category.as_deref())
        .bind(payload.physical_location.as_deref())
        .bind(payload.serial_number.as_deref())
        .bind(payload.purchase_date)
        .bind(payload.warranty_details.as_deref())
        .bind(payload.status)
        .bind(payload.health_percentage)
        .bind(payload.assigned_team_id)
        .bind(payload.default_technician_id.as_deref())
        .fetch_optional(&self.pool)
        .await?;

        Ok(equipment)
    }

    // Categorias distintas para os filtros da listagem
    pub async fn list_categories(&self) -> Result<Vec<String>, AppError> {
        let categories = sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT category FROM equipment ORDER BY category",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    /// Cascata de sucateamento: status, nota e data saem na mesma escrita.
    /// Roda dentro da transação da transição de estágio.
    pub async fn mark_scrapped<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        scrap_note: &str,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            r#"
            UPDATE equipment
               SET status = $2, scrap_note = $3, scrap_date = NOW(), updated_at = NOW()
             WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(EquipmentStatus::Scrap)
        .bind(scrap_note)
        .execute(executor)
        .await?;

        Ok(())
    }
}
