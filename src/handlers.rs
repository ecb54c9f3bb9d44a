pub mod audit;
pub mod banks;
pub mod branches;
pub mod calendars;
pub mod schedule;
