// src/services/schedule_service.rs

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BankRepository, BranchRepository, ScheduleRepository},
    middleware::actor::ActorContext,
    models::{
        audit::AuditAction,
        branch::Branch,
        schedule::{BankHoliday, BranchHours, CreateHolidayPayload, SetHoursPayload, WeekDay},
    },
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct ScheduleService {
    repo: ScheduleRepository,
    branch_repo: BranchRepository,
    bank_repo: BankRepository,
    audit: AuditService,
    pool: PgPool,
}

impl ScheduleService {
    pub fn new(
        repo: ScheduleRepository,
        branch_repo: BranchRepository,
        bank_repo: BankRepository,
        audit: AuditService,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            branch_repo,
            bank_repo,
            audit,
            pool,
        }
    }

    async fn active_branch(&self, branch_id: Uuid) -> Result<Branch, AppError> {
        match self.branch_repo.find_branch_by_id(branch_id).await? {
            Some(branch) if branch.is_active => Ok(branch),
            Some(_) => Err(AppError::InvalidInput(
                "Agência inexistente ou inativa.".to_string(),
            )),
            None => Err(AppError::NotFound("Agência não encontrada.".to_string())),
        }
    }

    // =========================================================================
    //  HORÁRIO DE FUNCIONAMENTO
    // =========================================================================

    /// Substitui a única linha de (agência, dia). `is_closed` ignora os
    /// horários; dia aberto exige abertura E fechamento.
    pub async fn set_hours(
        &self,
        branch_id: Uuid,
        input: &SetHoursPayload,
        actor: &ActorContext,
    ) -> Result<BranchHours, AppError> {
        self.active_branch(branch_id).await?;

        let (open_time, close_time) = if input.is_closed {
            (None, None)
        } else {
            match (input.open_time, input.close_time) {
                (Some(open), Some(close)) => (Some(open), Some(close)),
                _ => {
                    return Err(AppError::InvalidInput(
                        "Horários de abertura e fechamento são obrigatórios quando o dia não está marcado como fechado.".to_string(),
                    ));
                }
            }
        };

        let hours = self
            .repo
            .upsert_hours(
                &self.pool,
                branch_id,
                input.day_of_week,
                open_time,
                close_time,
                input.is_closed,
                actor.user_id,
            )
            .await?;

        self.audit
            .record_branch(
                branch_id,
                AuditAction::Update,
                "branch_hours",
                hours.id,
                None,
                actor,
            )
            .await?;

        Ok(hours)
    }

    pub async fn list_hours(&self, branch_id: Uuid) -> Result<Vec<BranchHours>, AppError> {
        // NotFound para agência inexistente, em vez de lista vazia silenciosa
        self.branch_repo
            .find_branch_by_id(branch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agência não encontrada.".to_string()))?;

        self.repo.list_hours(branch_id).await
    }

    // =========================================================================
    //  FERIADOS
    // =========================================================================

    pub async fn add_bank_holiday(
        &self,
        bank_id: Uuid,
        input: &CreateHolidayPayload,
        actor: &ActorContext,
    ) -> Result<BankHoliday, AppError> {
        match self.bank_repo.find_bank_by_id(bank_id).await? {
            Some(bank) if bank.is_active => {}
            _ => {
                return Err(AppError::InvalidInput(
                    "Banco inexistente ou inativo.".to_string(),
                ));
            }
        }

        let holiday = self
            .repo
            .create_bank_holiday(&self.pool, bank_id, input, actor.user_id)
            .await?;

        self.audit
            .record_bank(
                bank_id,
                AuditAction::Create,
                "bank_holiday",
                holiday.id,
                None,
                actor,
            )
            .await?;

        Ok(holiday)
    }

    pub async fn add_branch_holiday(
        &self,
        branch_id: Uuid,
        input: &CreateHolidayPayload,
        actor: &ActorContext,
    ) -> Result<BankHoliday, AppError> {
        self.active_branch(branch_id).await?;

        let holiday = self
            .repo
            .create_branch_holiday(&self.pool, branch_id, input, actor.user_id)
            .await?;

        self.audit
            .record_branch(
                branch_id,
                AuditAction::Create,
                "bank_holiday",
                holiday.id,
                None,
                actor,
            )
            .await?;

        Ok(holiday)
    }

    pub async fn list_bank_holidays(&self, bank_id: Uuid) -> Result<Vec<BankHoliday>, AppError> {
        self.repo.list_bank_holidays(bank_id).await
    }

    pub async fn list_branch_holidays(
        &self,
        branch_id: Uuid,
    ) -> Result<Vec<BankHoliday>, AppError> {
        self.repo.list_branch_holidays(branch_id).await
    }

    pub async fn remove_holiday(
        &self,
        id: Uuid,
        actor: &ActorContext,
    ) -> Result<BankHoliday, AppError> {
        let holiday = self
            .repo
            .deactivate_holiday(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Feriado não encontrado.".to_string()))?;

        // A trilha segue o escopo do feriado
        if let Some(bank_id) = holiday.bank_id {
            self.audit
                .record_bank(
                    bank_id,
                    AuditAction::Deactivate,
                    "bank_holiday",
                    holiday.id,
                    None,
                    actor,
                )
                .await?;
        } else if let Some(branch_id) = holiday.branch_id {
            self.audit
                .record_branch(
                    branch_id,
                    AuditAction::Deactivate,
                    "bank_holiday",
                    holiday.id,
                    None,
                    actor,
                )
                .await?;
        }

        Ok(holiday)
    }

    /// Feriado vale para a agência? Os da própria agência têm precedência
    /// sobre os do banco (são mais específicos); como ambos respondem "sim",
    /// a precedência aqui é a ordem de consulta.
    pub async fn is_holiday(&self, branch_id: Uuid, date: NaiveDate) -> Result<bool, AppError> {
        let branch = self
            .branch_repo
            .find_branch_by_id(branch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agência não encontrada.".to_string()))?;

        self.holiday_applies(&branch, date).await
    }

    async fn holiday_applies(&self, branch: &Branch, date: NaiveDate) -> Result<bool, AppError> {
        let branch_holidays = self.repo.list_branch_holidays(branch.id).await?;
        if branch_holidays.iter().any(|h| h.matches_date(date)) {
            return Ok(true);
        }

        let bank_holidays = self.repo.list_bank_holidays(branch.bank_id).await?;
        Ok(bank_holidays.iter().any(|h| h.matches_date(date)))
    }

    // =========================================================================
    //  CONSULTA COMPOSTA
    // =========================================================================

    /// A agência está aberta no instante dado?
    /// Converte o instante para o horário local da agência (fuso do banco),
    /// aplica feriados e depois a janela do dia da semana.
    pub async fn is_open_at(
        &self,
        branch_id: Uuid,
        instant: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let branch = self
            .branch_repo
            .find_branch_by_id(branch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agência não encontrada.".to_string()))?;

        let bank = self
            .bank_repo
            .find_bank_by_id(branch.bank_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Banco não encontrado.".to_string()))?;

        let offset = FixedOffset::east_opt(bank.utc_offset_minutes * 60)
            .ok_or_else(|| anyhow::anyhow!("Deslocamento UTC inválido: {}", bank.utc_offset_minutes))?;

        let local = instant.with_timezone(&offset);
        let local_date = local.date_naive();
        let local_time = local.time();

        // Feriado fecha a agência independentemente da grade de horários
        if self.holiday_applies(&branch, local_date).await? {
            return Ok(false);
        }

        let day = WeekDay::from_chrono(local_date.weekday());
        let hours = self.repo.find_hours_for_day(branch_id, day).await?;

        // Dia sem linha cadastrada é tratado como fechado
        Ok(hours.map(|h| h.covers(local_time)).unwrap_or(false))
    }
}
