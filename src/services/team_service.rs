// src/services/team_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{ProfileRepository, TeamRepository},
    models::team::{AddTeamMemberPayload, CreateTeamPayload, MaintenanceTeam, TeamDetail, TeamWithCount},
};

#[derive(Clone)]
pub struct TeamService {
    team_repo: TeamRepository,
    profile_repo: ProfileRepository,
}

impl TeamService {
    pub fn new(team_repo: TeamRepository, profile_repo: ProfileRepository) -> Self {
        Self {
            team_repo,
            profile_repo,
        }
    }

    pub async fn create_team(&self, payload: &CreateTeamPayload) -> Result<MaintenanceTeam, AppError> {
        self.team_repo.create(payload).await
    }

    pub async fn list_teams(&self) -> Result<Vec<TeamWithCount>, AppError> {
        self.team_repo.list_with_counts().await
    }

    pub async fn get_detail(&self, id: Uuid) -> Result<TeamDetail, AppError> {
        let team = self
            .team_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Equipe {}", id)))?;

        let members = self.team_repo.list_members(id).await?;

        Ok(TeamDetail { team, members })
    }

    pub async fn add_member(
        &self,
        team_id: Uuid,
        payload: &AddTeamMemberPayload,
    ) -> Result<TeamDetail, AppError> {
        self.team_repo
            .find_by_id(team_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Equipe {}", team_id)))?;

        self.profile_repo
            .find_by_id(&payload.profile_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Perfil {}", payload.profile_id)))?;

        self.team_repo.add_member(team_id, &payload.profile_id).await?;

        self.get_detail(team_id).await
    }
}
