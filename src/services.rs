pub mod audit_service;
pub use audit_service::AuditService;
pub mod bank_service;
pub use bank_service::BankService;
pub mod branch_service;
pub use branch_service::BranchService;
pub mod calendar_service;
pub use calendar_service::CalendarService;
pub mod schedule_service;
pub use schedule_service::ScheduleService;
