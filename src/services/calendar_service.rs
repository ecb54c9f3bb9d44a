// src/services/calendar_service.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BankRepository, BranchRepository, CalendarRepository},
    middleware::actor::ActorContext,
    models::{
        audit::AuditAction,
        calendar::{
            pick_governing, windows_overlap, AssignCalendarPayload, CalendarAssignment,
            CalendarTargetType, CreateCalendarPayload, OperatingStatus, ResolutionLevel,
            ResolvedCalendar, WorkingCalendar,
        },
    },
    services::{audit_service::AuditService, schedule_service::ScheduleService},
};

#[derive(Clone)]
pub struct CalendarService {
    repo: CalendarRepository,
    branch_repo: BranchRepository,
    bank_repo: BankRepository,
    schedule: ScheduleService,
    audit: AuditService,
    pool: PgPool,
}

impl CalendarService {
    pub fn new(
        repo: CalendarRepository,
        branch_repo: BranchRepository,
        bank_repo: BankRepository,
        schedule: ScheduleService,
        audit: AuditService,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            branch_repo,
            bank_repo,
            schedule,
            audit,
            pool,
        }
    }

    // =========================================================================
    //  CALENDÁRIOS
    // =========================================================================

    pub async fn create_calendar(
        &self,
        bank_id: Uuid,
        input: &CreateCalendarPayload,
        actor: &ActorContext,
    ) -> Result<WorkingCalendar, AppError> {
        match self.bank_repo.find_bank_by_id(bank_id).await? {
            Some(bank) if bank.is_active => {}
            _ => {
                return Err(AppError::InvalidInput(
                    "Banco inexistente ou inativo.".to_string(),
                ));
            }
        }

        // Troca de padrão dentro da mesma transação: o índice único parcial
        // garante zero ou um padrão por banco, nós garantimos a transição.
        let mut tx = self.pool.begin().await?;

        if input.is_default {
            self.repo.clear_default(&mut *tx, bank_id).await?;
        }

        let calendar = self
            .repo
            .create_calendar(
                &mut *tx,
                bank_id,
                &input.name,
                input.is_default,
                &input.time_zone_id,
                actor.user_id,
            )
            .await?;

        tx.commit().await?;

        self.audit
            .record_bank(
                bank_id,
                AuditAction::Create,
                "working_calendar",
                calendar.id,
                None,
                actor,
            )
            .await?;

        Ok(calendar)
    }

    pub async fn get_calendar(&self, id: Uuid) -> Result<WorkingCalendar, AppError> {
        self.repo
            .find_calendar_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Calendário não encontrado.".to_string()))
    }

    pub async fn list_calendars(&self, bank_id: Uuid) -> Result<Vec<WorkingCalendar>, AppError> {
        self.repo.list_calendars(bank_id).await
    }

    pub async fn set_default(
        &self,
        calendar_id: Uuid,
        actor: &ActorContext,
    ) -> Result<WorkingCalendar, AppError> {
        let calendar = self.get_calendar(calendar_id).await?;
        if !calendar.is_active {
            return Err(AppError::InvalidInput(
                "Calendário inativo não pode ser o padrão do banco.".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;
        self.repo.clear_default(&mut *tx, calendar.bank_id).await?;
        let updated = self
            .repo
            .set_default_flag(&mut *tx, calendar_id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Calendário não encontrado.".to_string()))?;
        tx.commit().await?;

        self.audit
            .record_bank(
                updated.bank_id,
                AuditAction::Update,
                "working_calendar",
                updated.id,
                None,
                actor,
            )
            .await?;

        Ok(updated)
    }

    pub async fn deactivate_calendar(
        &self,
        id: Uuid,
        actor: &ActorContext,
    ) -> Result<WorkingCalendar, AppError> {
        let calendar = self
            .repo
            .deactivate_calendar(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Calendário não encontrado.".to_string()))?;

        self.audit
            .record_bank(
                calendar.bank_id,
                AuditAction::Deactivate,
                "working_calendar",
                calendar.id,
                None,
                actor,
            )
            .await?;

        Ok(calendar)
    }

    // =========================================================================
    //  ATRIBUIÇÕES
    // =========================================================================

    /// Vincula um calendário a um nó da hierarquia por uma janela de vigência.
    /// O guard de sobreposição roda em transação SERIALIZABLE: duas chamadas
    /// concorrentes não conseguem gravar janelas que se intersectam.
    pub async fn assign(
        &self,
        calendar_id: Uuid,
        input: &AssignCalendarPayload,
        actor: &ActorContext,
    ) -> Result<CalendarAssignment, AppError> {
        if let Some(to) = input.effective_to {
            if to <= input.effective_from {
                return Err(AppError::InvalidInput(
                    "A vigência final deve ser posterior à inicial.".to_string(),
                ));
            }
        }

        let calendar = self.get_calendar(calendar_id).await?;
        if !calendar.is_active {
            return Err(AppError::InvalidInput(
                "Calendário inativo não pode receber atribuições.".to_string(),
            ));
        }

        self.ensure_target_exists(input.target_type, input.target_id)
            .await?;

        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *tx)
            .await?;

        let existing = self
            .repo
            .find_active_assignments(&mut *tx, input.target_type, input.target_id)
            .await?;

        let overlaps = existing.iter().any(|a| {
            windows_overlap(
                a.effective_from,
                a.effective_to,
                input.effective_from,
                input.effective_to,
            )
        });
        if overlaps {
            return Err(AppError::Conflict(
                "Já existe uma atribuição de calendário vigente que se sobrepõe ao período informado.".to_string(),
            ));
        }

        let assignment = self
            .repo
            .create_assignment(
                &mut *tx,
                calendar_id,
                input.target_type,
                input.target_id,
                input.effective_from,
                input.effective_to,
                actor.user_id,
            )
            .await?;

        tx.commit().await?;

        self.audit
            .record_bank(
                calendar.bank_id,
                AuditAction::Create,
                "calendar_assignment",
                assignment.id,
                None,
                actor,
            )
            .await?;

        Ok(assignment)
    }

    pub async fn list_assignments(
        &self,
        calendar_id: Uuid,
    ) -> Result<Vec<CalendarAssignment>, AppError> {
        self.repo.list_assignments_by_calendar(calendar_id).await
    }

    pub async fn deactivate_assignment(
        &self,
        id: Uuid,
        actor: &ActorContext,
    ) -> Result<CalendarAssignment, AppError> {
        let assignment = self
            .repo
            .deactivate_assignment(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Atribuição não encontrada.".to_string()))?;

        let calendar = self.get_calendar(assignment.calendar_id).await?;
        self.audit
            .record_bank(
                calendar.bank_id,
                AuditAction::Deactivate,
                "calendar_assignment",
                assignment.id,
                None,
                actor,
            )
            .await?;

        Ok(assignment)
    }

    async fn ensure_target_exists(
        &self,
        target_type: CalendarTargetType,
        target_id: Uuid,
    ) -> Result<(), AppError> {
        let ok = match target_type {
            CalendarTargetType::Branch => self
                .branch_repo
                .find_branch_by_id(target_id)
                .await?
                .map(|b| b.is_active),
            CalendarTargetType::Department => self
                .branch_repo
                .find_department_by_id(target_id)
                .await?
                .map(|d| d.is_active),
            CalendarTargetType::Position => self
                .branch_repo
                .find_position_by_id(target_id)
                .await?
                .map(|p| p.is_active),
        };

        match ok {
            Some(true) => Ok(()),
            _ => Err(AppError::InvalidInput(
                "Alvo da atribuição inexistente ou inativo.".to_string(),
            )),
        }
    }

    // =========================================================================
    //  RESOLUÇÃO (o núcleo)
    // =========================================================================

    /// Qual calendário governa o nó no instante dado?
    /// Ordem: atribuição no próprio nível; Cargo sobe para Setor, Setor sobe
    /// para Agência; por fim o calendário padrão do banco. Esgotou, é
    /// NoCalendarResolved — indeterminado, não "fechado".
    pub async fn resolve(
        &self,
        target_type: CalendarTargetType,
        target_id: Uuid,
        at: Option<DateTime<Utc>>,
    ) -> Result<ResolvedCalendar, AppError> {
        let instant = at.unwrap_or_else(Utc::now);

        match target_type {
            CalendarTargetType::Position => {
                if let Some(hit) = self
                    .governing_at(CalendarTargetType::Position, target_id, instant, ResolutionLevel::Position)
                    .await?
                {
                    return Ok(hit);
                }

                let position = self
                    .branch_repo
                    .find_position_by_id(target_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Cargo não encontrado.".to_string()))?;

                if let Some(hit) = self
                    .governing_at(
                        CalendarTargetType::Department,
                        position.department_id,
                        instant,
                        ResolutionLevel::Department,
                    )
                    .await?
                {
                    return Ok(hit);
                }

                let department = self
                    .branch_repo
                    .find_department_by_id(position.department_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Setor não encontrado.".to_string()))?;

                if let Some(hit) = self
                    .governing_at(
                        CalendarTargetType::Branch,
                        department.branch_id,
                        instant,
                        ResolutionLevel::Branch,
                    )
                    .await?
                {
                    return Ok(hit);
                }

                self.bank_default_for_branch(department.branch_id).await
            }

            CalendarTargetType::Department => {
                if let Some(hit) = self
                    .governing_at(CalendarTargetType::Department, target_id, instant, ResolutionLevel::Department)
                    .await?
                {
                    return Ok(hit);
                }

                let department = self
                    .branch_repo
                    .find_department_by_id(target_id)
                    .await?
                    .ok_or_else(|| AppError::NotFound("Setor não encontrado.".to_string()))?;

                if let Some(hit) = self
                    .governing_at(
                        CalendarTargetType::Branch,
                        department.branch_id,
                        instant,
                        ResolutionLevel::Branch,
                    )
                    .await?
                {
                    return Ok(hit);
                }

                self.bank_default_for_branch(department.branch_id).await
            }

            CalendarTargetType::Branch => {
                if let Some(hit) = self
                    .governing_at(CalendarTargetType::Branch, target_id, instant, ResolutionLevel::Branch)
                    .await?
                {
                    return Ok(hit);
                }

                self.bank_default_for_branch(target_id).await
            }
        }
    }

    /// A atribuição que governa um nível, se houver candidata vigente.
    /// Sobreposição que a escrita não barrou se decide aqui pela regra
    /// determinística de `pick_governing`.
    async fn governing_at(
        &self,
        target_type: CalendarTargetType,
        target_id: Uuid,
        instant: DateTime<Utc>,
        level: ResolutionLevel,
    ) -> Result<Option<ResolvedCalendar>, AppError> {
        let assignments = self
            .repo
            .find_active_assignments(&self.pool, target_type, target_id)
            .await?;

        let candidates: Vec<CalendarAssignment> = assignments
            .into_iter()
            .filter(|a| a.in_effect_at(instant))
            .collect();

        let Some(winner) = pick_governing(&candidates) else {
            return Ok(None);
        };

        // Calendário desativado depois da atribuição: o degrau não resolve
        // e a cadeia continua descendo o fallback.
        match self.repo.find_calendar_by_id(winner.calendar_id).await? {
            Some(calendar) if calendar.is_active => Ok(Some(ResolvedCalendar {
                calendar,
                level,
                assignment_id: Some(winner.id),
            })),
            _ => Ok(None),
        }
    }

    async fn bank_default_for_branch(
        &self,
        branch_id: Uuid,
    ) -> Result<ResolvedCalendar, AppError> {
        let branch = self
            .branch_repo
            .find_branch_by_id(branch_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agência não encontrada.".to_string()))?;

        match self.repo.find_default_calendar(branch.bank_id).await? {
            Some(calendar) => Ok(ResolvedCalendar {
                calendar,
                level: ResolutionLevel::BankDefault,
                assignment_id: None,
            }),
            None => Err(AppError::NoCalendarResolved),
        }
    }

    // =========================================================================
    //  CONSULTA COMPOSTA
    // =========================================================================

    /// Status operacional da agência: aberto/fechado vem da grade de horários
    /// e dos feriados; o calendário resolvido acompanha como metadado.
    pub async fn operating_status(
        &self,
        branch_id: Uuid,
        at: Option<DateTime<Utc>>,
    ) -> Result<OperatingStatus, AppError> {
        let instant = at.unwrap_or_else(Utc::now);

        let calendar = match self
            .resolve(CalendarTargetType::Branch, branch_id, Some(instant))
            .await
        {
            Ok(resolved) => Some(resolved),
            Err(AppError::NoCalendarResolved) => None,
            Err(e) => return Err(e),
        };

        let operating = self.schedule.is_open_at(branch_id, instant).await?;

        Ok(OperatingStatus {
            operating,
            calendar,
        })
    }
}
