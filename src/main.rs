//src/main.rs

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

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

    // Hierarquia: bancos, diretorias e regionais
    let bank_routes = Router::new()
        .route(
            "/api/banks",
            post(handlers::banks::create_bank).get(handlers::banks::list_banks),
        )
        .route("/api/banks/by-code/{code}", get(handlers::banks::get_bank_by_code))
        .route(
            "/api/banks/{bank_id}",
            get(handlers::banks::get_bank)
                .put(handlers::banks::update_bank)
                .delete(handlers::banks::deactivate_bank),
        )
        .route(
            "/api/banks/{bank_id}/divisions",
            post(handlers::banks::create_division).get(handlers::banks::list_divisions),
        )
        .route(
            "/api/banks/{bank_id}/divisions/by-code/{code}",
            get(handlers::banks::get_division_by_code),
        )
        .route(
            "/api/divisions/{division_id}",
            get(handlers::banks::get_division)
                .put(handlers::banks::update_division)
                .delete(handlers::banks::deactivate_division),
        )
        .route(
            "/api/divisions/{division_id}/regions",
            post(handlers::banks::create_region).get(handlers::banks::list_regions),
        )
        .route(
            "/api/divisions/{division_id}/regions/by-code/{code}",
            get(handlers::banks::get_region_by_code),
        )
        .route(
            "/api/regions/{region_id}",
            get(handlers::banks::get_region)
                .put(handlers::banks::update_region)
                .delete(handlers::banks::deactivate_region),
        );

    // Hierarquia: agências, setores e cargos
    let branch_routes = Router::new()
        .route(
            "/api/banks/{bank_id}/branches",
            post(handlers::branches::create_branch).get(handlers::branches::list_branches),
        )
        .route(
            "/api/banks/{bank_id}/branches/by-code/{code}",
            get(handlers::branches::get_branch_by_code),
        )
        .route(
            "/api/branches/{branch_id}",
            get(handlers::branches::get_branch)
                .put(handlers::branches::update_branch)
                .delete(handlers::branches::deactivate_branch),
        )
        .route(
            "/api/branches/{branch_id}/departments",
            post(handlers::branches::create_department).get(handlers::branches::list_departments),
        )
        .route(
            "/api/departments/{department_id}",
            get(handlers::branches::get_department)
                .put(handlers::branches::update_department)
                .delete(handlers::branches::deactivate_department),
        )
        .route(
            "/api/departments/{department_id}/positions",
            post(handlers::branches::create_position).get(handlers::branches::list_positions),
        )
        .route(
            "/api/positions/{position_id}",
            get(handlers::branches::get_position)
                .put(handlers::branches::update_position)
                .delete(handlers::branches::deactivate_position),
        );

    // Horário de funcionamento e feriados
    let schedule_routes = Router::new()
        .route(
            "/api/branches/{branch_id}/hours",
            put(handlers::schedule::set_hours).get(handlers::schedule::list_hours),
        )
        .route("/api/branches/{branch_id}/is-open", get(handlers::schedule::is_open))
        .route(
            "/api/branches/{branch_id}/is-holiday",
            get(handlers::schedule::is_holiday),
        )
        .route(
            "/api/banks/{bank_id}/holidays",
            post(handlers::schedule::create_bank_holiday)
                .get(handlers::schedule::list_bank_holidays),
        )
        .route(
            "/api/branches/{branch_id}/holidays",
            post(handlers::schedule::create_branch_holiday)
                .get(handlers::schedule::list_branch_holidays),
        )
        .route("/api/holidays/{holiday_id}", delete(handlers::schedule::remove_holiday));

    // Calendários de trabalho, atribuições e resolução
    let calendar_routes = Router::new()
        .route(
            "/api/banks/{bank_id}/calendars",
            post(handlers::calendars::create_calendar).get(handlers::calendars::list_calendars),
        )
        // A rota estática vem antes da paramétrica
        .route("/api/calendars/resolve", get(handlers::calendars::resolve_calendar))
        .route(
            "/api/calendars/{calendar_id}",
            get(handlers::calendars::get_calendar)
                .delete(handlers::calendars::deactivate_calendar),
        )
        .route(
            "/api/calendars/{calendar_id}/default",
            put(handlers::calendars::set_default_calendar),
        )
        .route(
            "/api/calendars/{calendar_id}/assignments",
            post(handlers::calendars::assign_calendar).get(handlers::calendars::list_assignments),
        )
        .route(
            "/api/assignments/{assignment_id}",
            delete(handlers::calendars::deactivate_assignment),
        )
        .route(
            "/api/branches/{branch_id}/operating-status",
            get(handlers::calendars::operating_status),
        );

    // Trilhas de auditoria (somente leitura)
    let audit_routes = Router::new()
        .route(
            "/api/banks/{bank_id}/audit-logs",
            get(handlers::audit::list_bank_audit_logs),
        )
        .route(
            "/api/branches/{branch_id}/audit-logs",
            get(handlers::audit::list_branch_audit_logs),
        );

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(bank_routes)
        .merge(branch_routes)
        .merge(schedule_routes)
        .merge(calendar_routes)
        .merge(audit_routes)
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
