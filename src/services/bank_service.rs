// src/services/bank_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BankRepository,
    middleware::actor::ActorContext,
    models::{
        audit::AuditAction,
        bank::{
            Bank, BankDivision, BankRegion, CreateBankPayload, CreateDivisionPayload,
            CreateRegionPayload, UpdateBankPayload, UpdateDivisionPayload, UpdateRegionPayload,
        },
    },
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct BankService {
    repo: BankRepository,
    audit: AuditService,
    pool: PgPool,
}

impl BankService {
    pub fn new(repo: BankRepository, audit: AuditService, pool: PgPool) -> Self {
        Self { repo, audit, pool }
    }

    // =========================================================================
    //  BANCOS
    // =========================================================================

    pub async fn create_bank(
        &self,
        input: &CreateBankPayload,
        actor: &ActorContext,
    ) -> Result<Bank, AppError> {
        let bank = self.repo.create_bank(&self.pool, input, actor.user_id).await?;

        // Auditoria após o commit: nunca desfaz a mutação principal
        self.audit
            .record_bank(bank.id, AuditAction::Create, "bank", bank.id, None, actor)
            .await?;

        Ok(bank)
    }

    pub async fn get_bank(&self, id: Uuid) -> Result<Bank, AppError> {
        self.repo
            .find_bank_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Banco não encontrado.".to_string()))
    }

    pub async fn get_bank_by_code(&self, code: &str) -> Result<Bank, AppError> {
        self.repo
            .find_bank_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound("Banco não encontrado.".to_string()))
    }

    pub async fn list_banks(&self) -> Result<Vec<Bank>, AppError> {
        self.repo.list_banks().await
    }

    pub async fn update_bank(
        &self,
        id: Uuid,
        input: &UpdateBankPayload,
        actor: &ActorContext,
    ) -> Result<Bank, AppError> {
        let bank = self
            .repo
            .update_bank(&self.pool, id, input, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Banco não encontrado.".to_string()))?;

        self.audit
            .record_bank(bank.id, AuditAction::Update, "bank", bank.id, None, actor)
            .await?;

        Ok(bank)
    }

    pub async fn deactivate_bank(&self, id: Uuid, actor: &ActorContext) -> Result<Bank, AppError> {
        let bank = self
            .repo
            .deactivate_bank(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Banco não encontrado.".to_string()))?;

        self.audit
            .record_bank(bank.id, AuditAction::Deactivate, "bank", bank.id, None, actor)
            .await?;

        Ok(bank)
    }

    // =========================================================================
    //  DIRETORIAS
    // =========================================================================

    pub async fn create_division(
        &self,
        bank_id: Uuid,
        input: &CreateDivisionPayload,
        actor: &ActorContext,
    ) -> Result<BankDivision, AppError> {
        // O pai precisa existir e estar ativo
        let bank = self.repo.find_bank_by_id(bank_id).await?;
        match bank {
            Some(b) if b.is_active => {}
            _ => {
                return Err(AppError::InvalidInput(
                    "Banco inexistente ou inativo.".to_string(),
                ));
            }
        }

        let division = self
            .repo
            .create_division(&self.pool, bank_id, &input.code, &input.name, actor.user_id)
            .await?;

        self.audit
            .record_bank(
                bank_id,
                AuditAction::Create,
                "bank_division",
                division.id,
                None,
                actor,
            )
            .await?;

        Ok(division)
    }

    pub async fn get_division(&self, id: Uuid) -> Result<BankDivision, AppError> {
        self.repo
            .find_division_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Diretoria não encontrada.".to_string()))
    }

    pub async fn get_division_by_code(
        &self,
        bank_id: Uuid,
        code: &str,
    ) -> Result<BankDivision, AppError> {
        self.repo
            .find_division_by_code(bank_id, code)
            .await?
            .ok_or_else(|| AppError::NotFound("Diretoria não encontrada.".to_string()))
    }

    pub async fn list_divisions(&self, bank_id: Uuid) -> Result<Vec<BankDivision>, AppError> {
        self.repo.list_divisions(bank_id).await
    }

    pub async fn update_division(
        &self,
        id: Uuid,
        input: &UpdateDivisionPayload,
        actor: &ActorContext,
    ) -> Result<BankDivision, AppError> {
        let division = self
            .repo
            .update_division(&self.pool, id, &input.name, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Diretoria não encontrada.".to_string()))?;

        self.audit
            .record_bank(
                division.bank_id,
                AuditAction::Update,
                "bank_division",
                division.id,
                None,
                actor,
            )
            .await?;

        Ok(division)
    }

    pub async fn deactivate_division(
        &self,
        id: Uuid,
        actor: &ActorContext,
    ) -> Result<BankDivision, AppError> {
        let division = self
            .repo
            .deactivate_division(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Diretoria não encontrada.".to_string()))?;

        self.audit
            .record_bank(
                division.bank_id,
                AuditAction::Deactivate,
                "bank_division",
                division.id,
                None,
                actor,
            )
            .await?;

        Ok(division)
    }

    // =========================================================================
    //  REGIONAIS
    // =========================================================================

    pub async fn create_region(
        &self,
        division_id: Uuid,
        input: &CreateRegionPayload,
        actor: &ActorContext,
    ) -> Result<BankRegion, AppError> {
        let division = self.repo.find_division_by_id(division_id).await?;
        let division = match division {
            Some(d) if d.is_active => d,
            _ => {
                return Err(AppError::InvalidInput(
                    "Diretoria inexistente ou inativa.".to_string(),
                ));
            }
        };

        let region = self
            .repo
            .create_region(
                &self.pool,
                division_id,
                &input.code,
                &input.name,
                actor.user_id,
            )
            .await?;

        self.audit
            .record_bank(
                division.bank_id,
                AuditAction::Create,
                "bank_region",
                region.id,
                None,
                actor,
            )
            .await?;

        Ok(region)
    }

    pub async fn get_region(&self, id: Uuid) -> Result<BankRegion, AppError> {
        self.repo
            .find_region_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Regional não encontrada.".to_string()))
    }

    pub async fn get_region_by_code(
        &self,
        division_id: Uuid,
        code: &str,
    ) -> Result<BankRegion, AppError> {
        self.repo
            .find_region_by_code(division_id, code)
            .await?
            .ok_or_else(|| AppError::NotFound("Regional não encontrada.".to_string()))
    }

    pub async fn list_regions(&self, division_id: Uuid) -> Result<Vec<BankRegion>, AppError> {
        self.repo.list_regions(division_id).await
    }

    pub async fn update_region(
        &self,
        id: Uuid,
        input: &UpdateRegionPayload,
        actor: &ActorContext,
    ) -> Result<BankRegion, AppError> {
        let region = self
            .repo
            .update_region(&self.pool, id, &input.name, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Regional não encontrada.".to_string()))?;

        let division = self.get_division(region.division_id).await?;
        self.audit
            .record_bank(
                division.bank_id,
                AuditAction::Update,
                "bank_region",
                region.id,
                None,
                actor,
            )
            .await?;

        Ok(region)
    }

    pub async fn deactivate_region(
        &self,
        id: Uuid,
        actor: &ActorContext,
    ) -> Result<BankRegion, AppError> {
        let region = self
            .repo
            .deactivate_region(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Regional não encontrada.".to_string()))?;

        let division = self.get_division(region.division_id).await?;
        self.audit
            .record_bank(
                division.bank_id,
                AuditAction::Deactivate,
                "bank_region",
                region.id,
                None,
                actor,
            )
            .await?;

        Ok(region)
    }
}
