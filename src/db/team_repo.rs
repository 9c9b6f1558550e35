// src/db/team_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::team::{CreateTeamPayload, MaintenanceTeam, TeamMemberInfo, TeamWithCount},
};

#[derive(Clone)]
pub struct TeamRepository {
    pool: PgPool,
}

impl TeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, payload: &CreateTeamPayload) -> Result<MaintenanceTeam, AppError> {
        let team = sqlx::query_as::<_, MaintenanceTeam>(
            "INSERT INTO maintenance_teams (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(&payload.name)
        .bind(payload.description.as_deref())
        .fetch_one(&self.pool)
        .await?;

        Ok(team)
    }

    // Listagem com a contagem de membros em uma única consulta
    pub async fn list_with_counts(&self) -> Result<Vec<TeamWithCount>, AppError> {
        let teams = sqlx::query_as::<_, TeamWithCount>(
            r#"
            SELECT t.id, t.name, t.description, t.created_at,
                   COUNT(m.profile_id) AS member_count
              FROM maintenance_teams t
              LEFT JOIN team_members m ON m.team_id = t.id
             GROUP BY t.id, t.name, t.description, t.created_at
             ORDER BY t.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(teams)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<MaintenanceTeam>, AppError> {
        let team = sqlx::query_as::<_, MaintenanceTeam>(
            "SELECT * FROM maintenance_teams WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(team)
    }

    pub async fn list_members(&self, team_id: Uuid) -> Result<Vec<TeamMemberInfo>, AppError> {
        let members = sqlx::query_as::<_, TeamMemberInfo>(
            r#"
            SELECT m.profile_id, p.full_name, p.email, m.joined_at
              FROM team_members m
              JOIN profiles p ON p.id = m.profile_id
             WHERE m.team_id = $1
             ORDER BY m.joined_at ASC
            "#,
        )
        .bind(team_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    // Adição idempotente: repetir o mesmo membro não é erro
    pub async fn add_member(&self, team_id: Uuid, profile_id: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO team_members (team_id, profile_id)
            VALUES ($1, $2)
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(team_id)
        .bind(profile_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
