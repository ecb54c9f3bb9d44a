// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{AuditRepository, BankRepository, BranchRepository, CalendarRepository, ScheduleRepository},
    services::{AuditService, BankService, BranchService, CalendarService, ScheduleService},
};

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub bank_service: BankService,
    pub branch_service: BranchService,
    pub schedule_service: ScheduleService,
    pub calendar_service: CalendarService,
    pub audit_service: AuditService,
}

impl AppState {
    // Carrega as configurações e monta o gráfico de dependências
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let bank_repo = BankRepository::new(db_pool.clone());
        let branch_repo = BranchRepository::new(db_pool.clone());
        let schedule_repo = ScheduleRepository::new(db_pool.clone());
        let calendar_repo = CalendarRepository::new(db_pool.clone());
        let audit_repo = AuditRepository::new(db_pool.clone());

        let audit_service = AuditService::new(audit_repo, db_pool.clone());
        let bank_service = BankService::new(
            bank_repo.clone(),
            audit_service.clone(),
            db_pool.clone(),
        );
        let branch_service = BranchService::new(
            branch_repo.clone(),
            bank_repo.clone(),
            audit_service.clone(),
            db_pool.clone(),
        );
        let schedule_service = ScheduleService::new(
            schedule_repo,
            branch_repo.clone(),
            bank_repo.clone(),
            audit_service.clone(),
            db_pool.clone(),
        );
        let calendar_service = CalendarService::new(
            calendar_repo,
            branch_repo,
            bank_repo,
            schedule_service.clone(),
            audit_service.clone(),
            db_pool.clone(),
        );

        Ok(Self {
            db_pool,
            bank_service,
            branch_service,
            schedule_service,
            calendar_service,
            audit_service,
        })
    }
}
