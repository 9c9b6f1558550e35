// src/config.rs

use std::sync::Arc;
use std::{env, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::db::{
    CommentRepository, DashboardRepository, EquipmentRepository, ProfileRepository,
    RequestRepository, TeamRepository,
};
use crate::services::{
    dashboard_service::DashboardService, equipment_service::EquipmentService,
    identity_service::IdentityService, request_service::RequestService,
    stage_rules::PermissiveTransitions, team_service::TeamService,
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub request_service: RequestService,
    pub equipment_service: EquipmentService,
    pub team_service: TeamService,
    pub dashboard_service: DashboardService,
    pub identity_service: IdentityService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("IDP_JWT_SECRET").expect("IDP_JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let request_repo = RequestRepository::new(db_pool.clone());
        let equipment_repo = EquipmentRepository::new(db_pool.clone());
        let profile_repo = ProfileRepository::new(db_pool.clone());
        let team_repo = TeamRepository::new(db_pool.clone());
        let comment_repo = CommentRepository::new(db_pool.clone());
        let dashboard_repo = DashboardRepository::new(db_pool.clone());

        // A política permissiva é a do produto; trocar aqui muda a regra
        // de transição do quadro inteiro.
        let request_service = RequestService::new(
            request_repo.clone(),
            equipment_repo.clone(),
            comment_repo,
            Arc::new(PermissiveTransitions),
            db_pool.clone(),
        );
        let equipment_service = EquipmentService::new(equipment_repo, request_repo);
        let team_service = TeamService::new(team_repo, profile_repo.clone());
        let dashboard_service = DashboardService::new(dashboard_repo);
        let identity_service = IdentityService::new(profile_repo, jwt_secret);

        Ok(Self {
            db_pool,
            request_service,
            equipment_service,
            team_service,
            dashboard_service,
            identity_service,
        })
    }
}
