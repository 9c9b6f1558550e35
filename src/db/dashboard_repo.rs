// src/db/dashboard_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{common::error::AppError, models::dashboard::DashboardCounts};

#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Todas as contagens saem da mesma transação (snapshot consistente)
    pub async fn get_counts(&self) -> Result<DashboardCounts, AppError> {
        let mut tx = self.pool.begin().await?;

        // A. Equipamentos críticos: com falha ou saúde abaixo de 50%
        let critical_equipment = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM equipment
             WHERE status = 'faulty'
                OR (health_percentage IS NOT NULL AND health_percentage < 50)
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // B. Técnicos cadastrados
        let technicians = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
            .fetch_one(&mut *tx)
            .await?;

        // C. Requisições abertas
        let open_requests = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM maintenance_requests WHERE stage IN ('new', 'in_progress')",
        )
        .fetch_one(&mut *tx)
        .await?;

        // D. Atrasadas: agendadas no passado e ainda não encerradas
        let overdue_requests = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM maintenance_requests
             WHERE scheduled_date IS NOT NULL
               AND scheduled_date < NOW()
               AND stage NOT IN ('repaired', 'scrap')
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        // E. Horas agendadas nas requisições abertas, para a carga dos técnicos
        let scheduled_hours = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT COALESCE(SUM(duration_hours), 0) FROM maintenance_requests
             WHERE stage IN ('new', 'in_progress')
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(DashboardCounts {
            critical_equipment,
            technicians,
            open_requests,
            overdue_requests,
            scheduled_hours,
        })
    }
}
