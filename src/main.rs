// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use gearguard::config::AppState;
use gearguard::docs::ApiDoc;
use gearguard::handlers;
use gearguard::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Requisições de manutenção: CRUD, calendário, comentários e a
    // transição de estágio usada pelo quadro kanban
    let request_routes = Router::new()
        .route(
            "/",
            post(handlers::requests::create_request).get(handlers::requests::list_requests),
        )
        .route("/calendar", get(handlers::requests::calendar))
        .route(
            "/{id}",
            get(handlers::requests::get_request).patch(handlers::requests::update_request),
        )
        .route("/{id}/stage", post(handlers::requests::update_stage))
        .route(
            "/{id}/comments",
            post(handlers::requests::add_comment).get(handlers::requests::list_comments),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let equipment_routes = Router::new()
        .route(
            "/",
            post(handlers::equipment::create_equipment).get(handlers::equipment::list_equipment),
        )
        .route("/categories", get(handlers::equipment::list_categories))
        .route(
            "/{id}",
            get(handlers::equipment::get_equipment).patch(handlers::equipment::update_equipment),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let team_routes = Router::new()
        .route(
            "/",
            post(handlers::teams::create_team).get(handlers::teams::list_teams),
        )
        .route("/{id}", get(handlers::teams::get_team))
        .route("/{id}/members", post(handlers::teams::add_member))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let user_routes = Router::new()
        .route("/me", get(handlers::profiles::get_me))
        .route("/", get(handlers::profiles::list_users))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/requests", request_routes)
        .nest("/api/equipment", equipment_routes)
        .nest("/api/teams", team_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/users", user_routes)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
