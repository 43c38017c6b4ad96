//! Persistence seams. The HR core only ever sees the value objects these
//! traits return; implementations live in `platform-db`.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    AttendanceRecord, Employee, HrResult, NewEmployee, OvertimeRequest, OvertimeStatus, PayPeriod,
    ScheduledDay, WageSettings,
};

#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn employee(&self, id: Uuid) -> HrResult<Option<Employee>>;

    /// All employees, or only those of `store_id`.
    async fn employees(&self, store_id: Option<&str>) -> HrResult<Vec<Employee>>;

    async fn register_employee(&self, new: NewEmployee) -> HrResult<Employee>;

    /// Overwrites any previous wage settings.
    async fn save_wage_settings(&self, id: Uuid, settings: &WageSettings) -> HrResult<Employee>;

    async fn set_approved(&self, id: Uuid, approved: bool) -> HrResult<Employee>;

    async fn set_position(&self, id: Uuid, position: &str) -> HrResult<Employee>;
}

#[derive(Clone, Debug, Default)]
pub struct OvertimeFilter {
    pub employee_ids: Option<Vec<Uuid>>,
    pub status: Option<OvertimeStatus>,
    pub period: Option<PayPeriod>,
}

impl OvertimeFilter {
    pub fn approved_for(employee_id: Uuid, period: PayPeriod) -> Self {
        Self {
            employee_ids: Some(vec![employee_id]),
            status: Some(OvertimeStatus::Approved),
            period: Some(period),
        }
    }
}

#[async_trait]
pub trait OvertimeStore: Send + Sync {
    async fn overtime_request(&self, id: Uuid) -> HrResult<Option<OvertimeRequest>>;

    async fn overtime_requests(&self, filter: &OvertimeFilter) -> HrResult<Vec<OvertimeRequest>>;

    async fn insert_overtime(&self, request: &OvertimeRequest) -> HrResult<()>;

    /// Persists a reviewed request. Must fail with `AlreadyReviewed` when the
    /// stored row is no longer pending, so concurrent reviewers cannot both win.
    async fn save_review(&self, request: &OvertimeRequest) -> HrResult<()>;
}

#[async_trait]
pub trait ShiftScheduleStore: Send + Sync {
    /// Days of `employee_id`'s weekly schedules falling inside `period`.
    async fn scheduled_days(&self, employee_id: Uuid, period: PayPeriod)
    -> HrResult<Vec<ScheduledDay>>;

    /// Inserts or replaces the entry for `(employee_id, work_date)`.
    async fn upsert_scheduled_day(&self, day: &ScheduledDay) -> HrResult<()>;
}

#[async_trait]
pub trait AttendanceStore: Send + Sync {
    async fn insert_attendance(&self, record: &AttendanceRecord) -> HrResult<()>;

    async fn attendance(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> HrResult<Vec<AttendanceRecord>>;
}
