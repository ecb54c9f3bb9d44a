// src/services/branch_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BankRepository, BranchRepository},
    middleware::actor::ActorContext,
    models::{
        audit::AuditAction,
        branch::{
            Branch, BranchDepartment, BranchPosition, CreateBranchPayload,
            CreateDepartmentPayload, CreatePositionPayload, UpdateBranchPayload,
            UpdateDepartmentPayload, UpdatePositionPayload,
        },
    },
    services::audit_service::AuditService,
};

#[derive(Clone)]
pub struct BranchService {
    repo: BranchRepository,
    bank_repo: BankRepository,
    audit: AuditService,
    pool: PgPool,
}

impl BranchService {
    pub fn new(
        repo: BranchRepository,
        bank_repo: BankRepository,
        audit: AuditService,
        pool: PgPool,
    ) -> Self {
        Self {
            repo,
            bank_repo,
            audit,
            pool,
        }
    }

    // =========================================================================
    //  AGÊNCIAS
    // =========================================================================

    pub async fn create_branch(
        &self,
        bank_id: Uuid,
        input: &CreateBranchPayload,
        actor: &ActorContext,
    ) -> Result<Branch, AppError> {
        match self.bank_repo.find_bank_by_id(bank_id).await? {
            Some(bank) if bank.is_active => {}
            _ => {
                return Err(AppError::InvalidInput(
                    "Banco inexistente ou inativo.".to_string(),
                ));
            }
        }

        // A regional é opcional, mas se vier precisa ser válida
        if let Some(region_id) = input.region_id {
            match self.bank_repo.find_region_by_id(region_id).await? {
                Some(region) if region.is_active => {}
                _ => {
                    return Err(AppError::InvalidInput(
                        "Regional inexistente ou inativa.".to_string(),
                    ));
                }
            }
        }

        let branch = self
            .repo
            .create_branch(&self.pool, bank_id, input, actor.user_id)
            .await?;

        self.audit
            .record_branch(branch.id, AuditAction::Create, "branch", branch.id, None, actor)
            .await?;

        Ok(branch)
    }

    pub async fn get_branch(&self, id: Uuid) -> Result<Branch, AppError> {
        self.repo
            .find_branch_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agência não encontrada.".to_string()))
    }

    pub async fn get_branch_by_code(&self, bank_id: Uuid, code: &str) -> Result<Branch, AppError> {
        self.repo
            .find_branch_by_code(bank_id, code)
            .await?
            .ok_or_else(|| AppError::NotFound("Agência não encontrada.".to_string()))
    }

    pub async fn list_branches(&self, bank_id: Uuid) -> Result<Vec<Branch>, AppError> {
        self.repo.list_branches(bank_id).await
    }

    pub async fn update_branch(
        &self,
        id: Uuid,
        input: &UpdateBranchPayload,
        actor: &ActorContext,
    ) -> Result<Branch, AppError> {
        if let Some(region_id) = input.region_id {
            match self.bank_repo.find_region_by_id(region_id).await? {
                Some(region) if region.is_active => {}
                _ => {
                    return Err(AppError::InvalidInput(
                        "Regional inexistente ou inativa.".to_string(),
                    ));
                }
            }
        }

        let branch = self
            .repo
            .update_branch(&self.pool, id, input, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agência não encontrada.".to_string()))?;

        self.audit
            .record_branch(branch.id, AuditAction::Update, "branch", branch.id, None, actor)
            .await?;

        Ok(branch)
    }

    pub async fn deactivate_branch(
        &self,
        id: Uuid,
        actor: &ActorContext,
    ) -> Result<Branch, AppError> {
        let branch = self
            .repo
            .deactivate_branch(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Agência não encontrada.".to_string()))?;

        self.audit
            .record_branch(
                branch.id,
                AuditAction::Deactivate,
                "branch",
                branch.id,
                None,
                actor,
            )
            .await?;

        Ok(branch)
    }

    // =========================================================================
    //  SETORES
    // =========================================================================

    pub async fn create_department(
        &self,
        branch_id: Uuid,
        input: &CreateDepartmentPayload,
        actor: &ActorContext,
    ) -> Result<BranchDepartment, AppError> {
        match self.repo.find_branch_by_id(branch_id).await? {
            Some(branch) if branch.is_active => {}
            _ => {
                return Err(AppError::InvalidInput(
                    "Agência inexistente ou inativa.".to_string(),
                ));
            }
        }

        let department = self
            .repo
            .create_department(&self.pool, branch_id, &input.name, actor.user_id)
            .await?;

        self.audit
            .record_branch(
                branch_id,
                AuditAction::Create,
                "branch_department",
                department.id,
                None,
                actor,
            )
            .await?;

        Ok(department)
    }

    pub async fn get_department(&self, id: Uuid) -> Result<BranchDepartment, AppError> {
        self.repo
            .find_department_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Setor não encontrado.".to_string()))
    }

    pub async fn list_departments(
        &self,
        branch_id: Uuid,
    ) -> Result<Vec<BranchDepartment>, AppError> {
        self.repo.list_departments(branch_id).await
    }

    pub async fn update_department(
        &self,
        id: Uuid,
        input: &UpdateDepartmentPayload,
        actor: &ActorContext,
    ) -> Result<BranchDepartment, AppError> {
        let department = self
            .repo
            .update_department(&self.pool, id, &input.name, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Setor não encontrado.".to_string()))?;

        self.audit
            .record_branch(
                department.branch_id,
                AuditAction::Update,
                "branch_department",
                department.id,
                None,
                actor,
            )
            .await?;

        Ok(department)
    }

    pub async fn deactivate_department(
        &self,
        id: Uuid,
        actor: &ActorContext,
    ) -> Result<BranchDepartment, AppError> {
        let department = self
            .repo
            .deactivate_department(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Setor não encontrado.".to_string()))?;

        self.audit
            .record_branch(
                department.branch_id,
                AuditAction::Deactivate,
                "branch_department",
                department.id,
                None,
                actor,
            )
            .await?;

        Ok(department)
    }

    // =========================================================================
    //  CARGOS
    // =========================================================================

    pub async fn create_position(
        &self,
        department_id: Uuid,
        input: &CreatePositionPayload,
        actor: &ActorContext,
    ) -> Result<BranchPosition, AppError> {
        let department = match self.repo.find_department_by_id(department_id).await? {
            Some(d) if d.is_active => d,
            _ => {
                return Err(AppError::InvalidInput(
                    "Setor inexistente ou inativo.".to_string(),
                ));
            }
        };

        let position = self
            .repo
            .create_position(&self.pool, department_id, &input.title, actor.user_id)
            .await?;

        self.audit
            .record_branch(
                department.branch_id,
                AuditAction::Create,
                "branch_position",
                position.id,
                None,
                actor,
            )
            .await?;

        Ok(position)
    }

    pub async fn get_position(&self, id: Uuid) -> Result<BranchPosition, AppError> {
        self.repo
            .find_position_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cargo não encontrado.".to_string()))
    }

    pub async fn list_positions(
        &self,
        department_id: Uuid,
    ) -> Result<Vec<BranchPosition>, AppError> {
        self.repo.list_positions(department_id).await
    }

    pub async fn update_position(
        &self,
        id: Uuid,
        input: &UpdatePositionPayload,
        actor: &ActorContext,
    ) -> Result<BranchPosition, AppError> {
        let position = self
            .repo
            .update_position(&self.pool, id, &input.title, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cargo não encontrado.".to_string()))?;

        let department = self.get_department(position.department_id).await?;
        self.audit
            .record_branch(
                department.branch_id,
                AuditAction::Update,
                "branch_position",
                position.id,
                None,
                actor,
            )
            .await?;

        Ok(position)
    }

    pub async fn deactivate_position(
        &self,
        id: Uuid,
        actor: &ActorContext,
    ) -> Result<BranchPosition, AppError> {
        let position = self
            .repo
            .deactivate_position(&self.pool, id, actor.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Cargo não encontrado.".to_string()))?;

        let department = self.get_department(position.department_id).await?;
        self.audit
            .record_branch(
                department.branch_id,
                AuditAction::Deactivate,
                "branch_position",
                position.id,
                None,
                actor,
            )
            .await?;

        Ok(position)
    }
}
