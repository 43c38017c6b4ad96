use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::overtime::OvertimeStatus;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum HrError {
    #[error("invalid wage profile: {0}")]
    InvalidWageProfile(String),
    #[error("overtime hours must be whole minutes, greater than 0 and at most 12, got {0}")]
    InvalidOvertimeHours(Decimal),
    #[error("overtime request already {0}")]
    AlreadyReviewed(OvertimeStatus),
    #[error("overtime request {0} cannot be reviewed by its employee or filer")]
    SelfReview(Uuid),
    #[error("invalid pay period {year}-{month:02}")]
    InvalidPeriod { year: i32, month: u32 },
    #[error("invalid schedule: {0}")]
    InvalidSchedule(String),
    #[error("invalid attendance: {0}")]
    InvalidAttendance(String),
    #[error("no salary set for employee {0}")]
    MissingSalary(Uuid),
    #[error("{0} not found")]
    NotFound(String),
    #[error("store error: {0}")]
    Store(String),
}

pub type HrResult<T> = Result<T, HrError>;
