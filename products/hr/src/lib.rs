//! HR vertical slice: wage profiles, overtime requests, shift schedules,
//! attendance and monthly payroll.
//!
//! Everything outside [`store`] and [`HrModule`] is pure and synchronous.

mod attendance;
mod employee;
mod error;
pub mod money;
mod overtime;
mod payroll;
mod period;
mod schedule;
mod service;
pub mod store;
mod wage;

pub use attendance::AttendanceRecord;
pub use employee::{Employee, NewEmployee};
pub use error::{HrError, HrResult};
pub use overtime::{
    MAX_OVERTIME_HOURS_PER_REQUEST, NewOvertimeRequest, OvertimeRequest, OvertimeStatus,
    ReviewDecision, sum_approved_overtime_hours, validate_overtime_hours,
};
pub use payroll::{
    OFF_DAY_MULTIPLIER, OVERTIME_MULTIPLIER, PayrollBreakdown, PayrollCalculator,
    compute_monthly_pay,
};
pub use period::PayPeriod;
pub use schedule::{ScheduledDay, sum_off_day_hours, week_start_for};
pub use service::{HrModule, PayrollStatement, build_wage_profile};
pub use wage::{
    DEFAULT_MONTHLY_WORK_DAYS, WageProfile, WageProfileInput, WageSettings,
    default_daily_work_hours,
};
