// src/docs.rs

use crate::handlers;
use crate::models;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Banks ---
        handlers::banks::create_bank,
        handlers::banks::list_banks,
        handlers::banks::get_bank,
        handlers::banks::get_bank_by_code,
        handlers::banks::update_bank,
        handlers::banks::deactivate_bank,
        handlers::banks::create_division,
        handlers::banks::list_divisions,
        handlers::banks::get_division_by_code,
        handlers::banks::get_division,
        handlers::banks::update_division,
        handlers::banks::deactivate_division,
        handlers::banks::create_region,
        handlers::banks::list_regions,
        handlers::banks::get_region_by_code,
        handlers::banks::get_region,
        handlers::banks::update_region,
        handlers::banks::deactivate_region,

        // --- Branches ---
        handlers::branches::create_branch,
        handlers::branches::list_branches,
        handlers::branches::get_branch_by_code,
        handlers::branches::get_branch,
        handlers::branches::update_branch,
        handlers::branches::deactivate_branch,
        handlers::branches::create_department,
        handlers::branches::list_departments,
        handlers::branches::get_department,
        handlers::branches::update_department,
        handlers::branches::deactivate_department,
        handlers::branches::create_position,
        handlers::branches::list_positions,
        handlers::branches::get_position,
        handlers::branches::update_position,
        handlers::branches::deactivate_position,

        // --- Schedule ---
        handlers::schedule::set_hours,
        handlers::schedule::list_hours,
        handlers::schedule::is_open,
        handlers::schedule::create_bank_holiday,
        handlers::schedule::list_bank_holidays,
        handlers::schedule::create_branch_holiday,
        handlers::schedule::list_branch_holidays,
        handlers::schedule::remove_holiday,
        handlers::schedule::is_holiday,

        // --- Calendars ---
        handlers::calendars::create_calendar,
        handlers::calendars::list_calendars,
        handlers::calendars::get_calendar,
        handlers::calendars::set_default_calendar,
        handlers::calendars::deactivate_calendar,
        handlers::calendars::assign_calendar,
        handlers::calendars::list_assignments,
        handlers::calendars::deactivate_assignment,
        handlers::calendars::resolve_calendar,
        handlers::calendars::operating_status,

        // --- Audit ---
        handlers::audit::list_bank_audit_logs,
        handlers::audit::list_branch_audit_logs,
    ),
    components(
        schemas(
            // --- Hierarquia ---
            models::bank::Bank,
            models::bank::BankDivision,
            models::bank::BankRegion,
            models::bank::CreateBankPayload,
            models::bank::UpdateBankPayload,
            models::bank::CreateDivisionPayload,
            models::bank::UpdateDivisionPayload,
            models::bank::CreateRegionPayload,
            models::bank::UpdateRegionPayload,
            models::branch::Branch,
            models::branch::BranchDepartment,
            models::branch::BranchPosition,
            models::branch::CreateBranchPayload,
            models::branch::UpdateBranchPayload,
            models::branch::CreateDepartmentPayload,
            models::branch::UpdateDepartmentPayload,
            models::branch::CreatePositionPayload,
            models::branch::UpdatePositionPayload,

            // --- Horários e Feriados ---
            models::schedule::WeekDay,
            models::schedule::BranchHours,
            models::schedule::BankHoliday,
            models::schedule::SetHoursPayload,
            models::schedule::CreateHolidayPayload,
            handlers::schedule::IsOpenResponse,
            handlers::schedule::IsHolidayResponse,

            // --- Calendários ---
            models::calendar::WorkingCalendar,
            models::calendar::CalendarTargetType,
            models::calendar::CalendarAssignment,
            models::calendar::ResolutionLevel,
            models::calendar::ResolvedCalendar,
            models::calendar::OperatingStatus,
            models::calendar::CreateCalendarPayload,
            models::calendar::AssignCalendarPayload,

            // --- Auditoria ---
            models::audit::AuditAction,
            models::audit::BankAuditLog,
            models::audit::BranchAuditLog,
        )
    ),
    tags(
        (name = "Banks", description = "Bancos, Diretorias e Regionais"),
        (name = "Branches", description = "Agências, Setores e Cargos"),
        (name = "Schedule", description = "Horário de Funcionamento e Feriados"),
        (name = "Calendars", description = "Calendários de Trabalho e Resolução"),
        (name = "Audit", description = "Trilhas de Auditoria")
    )
)]
pub struct ApiDoc;
