// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Requests ---
        handlers::requests::create_request,
        handlers::requests::list_requests,
        handlers::requests::calendar,
        handlers::requests::get_request,
        handlers::requests::update_request,
        handlers::requests::update_stage,
        handlers::requests::add_comment,
        handlers::requests::list_comments,

        // --- Equipment ---
        handlers::equipment::create_equipment,
        handlers::equipment::list_equipment,
        handlers::equipment::list_categories,
        handlers::equipment::get_equipment,
        handlers::equipment::update_equipment,

        // --- Teams ---
        handlers::teams::create_team,
        handlers::teams::list_teams,
        handlers::teams::get_team,
        handlers::teams::add_member,

        // --- Dashboard ---
        handlers::dashboard::get_summary,

        // --- Users ---
        handlers::profiles::get_me,
        handlers::profiles::list_users,
    ),
    components(
        schemas(
            // --- Requests ---
            models::request::Stage,
            models::request::Priority,
            models::request::RequestType,
            models::request::MaintenanceRequest,
            models::request::RequestSummary,
            models::request::RequestDetail,
            models::request::CreateRequestPayload,
            models::request::UpdateRequestPayload,
            models::request::UpdateStagePayload,

            // --- Equipment ---
            models::equipment::EquipmentStatus,
            models::equipment::Equipment,
            models::equipment::EquipmentDetail,
            models::equipment::CreateEquipmentPayload,
            models::equipment::UpdateEquipmentPayload,

            // --- Teams ---
            models::team::MaintenanceTeam,
            models::team::TeamWithCount,
            models::team::TeamMemberInfo,
            models::team::TeamDetail,
            models::team::CreateTeamPayload,
            models::team::AddTeamMemberPayload,

            // --- Comments ---
            models::comment::MaintenanceComment,
            models::comment::CommentWithAuthor,
            models::comment::CreateCommentPayload,

            // --- Dashboard ---
            models::dashboard::DashboardSummary,

            // --- Users ---
            models::profile::Profile,
        )
    ),
    tags(
        (name = "Requests", description = "Requisições de manutenção e o ciclo de vida delas"),
        (name = "Equipment", description = "Inventário de equipamentos"),
        (name = "Teams", description = "Equipes de manutenção e membros"),
        (name = "Dashboard", description = "Indicadores do painel inicial"),
        (name = "Users", description = "Perfis sincronizados do provedor de identidade")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
