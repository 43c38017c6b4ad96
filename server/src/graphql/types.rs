use async_graphql::{Enum, SimpleObject};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use products_hr::{AttendanceRecord, Employee, OvertimeRequest, PayrollStatement, ScheduledDay};
use rust_decimal::Decimal;
use uuid::Uuid;

#[derive(Clone, Debug, SimpleObject)]
pub struct EmployeeNode {
    pub id: Uuid,
    pub full_name: String,
    /// Null unless the viewer may see phone numbers.
    pub phone: Option<String>,
    pub store_id: String,
    pub region: Option<String>,
    pub position: String,
    pub approved: bool,
}

impl EmployeeNode {
    pub fn new(employee: Employee, show_phone: bool) -> Self {
        Self {
            id: employee.id,
            full_name: employee.full_name,
            phone: employee.phone.filter(|_| show_phone),
            store_id: employee.store_id,
            region: employee.region,
            position: employee.position,
            approved: employee.approved,
        }
    }
}

#[derive(Enum, Copy, Clone, Debug, Eq, PartialEq)]
#[graphql(remote = "products_hr::OvertimeStatus")]
pub enum OvertimeStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct OvertimeNode {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub hours: Decimal,
    pub status: OvertimeStatus,
    pub reason: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl From<OvertimeRequest> for OvertimeNode {
    fn from(value: OvertimeRequest) -> Self {
        Self {
            id: value.id,
            employee_id: value.employee_id,
            date: value.date,
            hours: value.hours,
            status: value.status.into(),
            reason: value.reason,
            created_by: value.created_by,
            created_at: value.created_at,
            reviewed_by: value.reviewed_by,
            reviewed_at: value.reviewed_at,
        }
    }
}

/// Monthly payroll with every rate and amount rounded to two places.
#[derive(Clone, Debug, SimpleObject)]
pub struct PayrollNode {
    pub employee_id: Uuid,
    pub month: u32,
    pub year: i32,
    pub currency: String,
    pub base_salary: Decimal,
    pub monthly_work_days: u32,
    pub daily_work_hours: Decimal,
    pub approved_overtime_hours: Decimal,
    pub off_day_hours: Decimal,
    pub daily_rate: Decimal,
    pub hourly_rate: Decimal,
    pub overtime_rate: Decimal,
    pub off_day_rate: Decimal,
    pub overtime_pay: Decimal,
    pub off_day_pay: Decimal,
    pub total_pay: Decimal,
}

impl PayrollNode {
    pub fn new(statement: PayrollStatement, currency: &str) -> Self {
        let b = statement.breakdown.rounded();
        Self {
            employee_id: statement.employee_id,
            month: statement.period.month(),
            year: statement.period.year(),
            currency: currency.to_string(),
            base_salary: b.base_salary,
            monthly_work_days: b.monthly_work_days,
            daily_work_hours: b.daily_work_hours,
            approved_overtime_hours: b.approved_overtime_hours,
            off_day_hours: b.off_day_hours,
            daily_rate: b.daily_rate,
            hourly_rate: b.hourly_rate,
            overtime_rate: b.overtime_rate,
            off_day_rate: b.off_day_rate,
            overtime_pay: b.overtime_pay,
            off_day_pay: b.off_day_pay,
            total_pay: b.total_pay,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct WageSettingsNode {
    pub employee_id: Uuid,
    pub base_salary: Decimal,
    pub monthly_work_days: u32,
    pub daily_work_hours: Decimal,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ShiftDayNode {
    pub employee_id: Uuid,
    pub week_start: NaiveDate,
    pub work_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_leave: bool,
    pub off_day: bool,
    pub worked_hours: Option<Decimal>,
}

impl From<ScheduledDay> for ShiftDayNode {
    fn from(value: ScheduledDay) -> Self {
        Self {
            off_day: value.is_off_day(),
            worked_hours: value.worked_hours(),
            employee_id: value.employee_id,
            week_start: value.week_start,
            work_date: value.work_date,
            start_time: value.start_time,
            end_time: value.end_time,
            is_leave: value.is_leave,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct AttendanceNode {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,
    pub created_by: Uuid,
}

impl From<AttendanceRecord> for AttendanceNode {
    fn from(value: AttendanceRecord) -> Self {
        Self {
            id: value.id,
            employee_id: value.employee_id,
            work_date: value.work_date,
            check_in: value.check_in,
            check_out: value.check_out,
            created_by: value.created_by,
        }
    }
}

#[derive(Clone, Debug, Default, SimpleObject)]
pub struct StoreSummary {
    pub store_id: String,
    pub region: Option<String>,
    pub headcount: usize,
    pub pending_approvals: usize,
    pub pending_overtime: usize,
}
