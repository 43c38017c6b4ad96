use chrono::Utc;
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::{
    AttendanceRecord, Employee, HrError, HrResult, NewOvertimeRequest, OvertimeRequest, PayPeriod,
    PayrollBreakdown, PayrollCalculator, ReviewDecision, ScheduledDay, WageProfile, WageSettings,
    overtime::sum_approved_overtime_hours,
    schedule::sum_off_day_hours,
    store::{AttendanceStore, EmployeeDirectory, OvertimeFilter, OvertimeStore, ShiftScheduleStore},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollStatement {
    pub employee_id: Uuid,
    pub period: PayPeriod,
    pub breakdown: PayrollBreakdown,
}

/// Assembles a profile from already-fetched records. Requests and schedule
/// days belonging to other employees or months are ignored.
pub fn build_wage_profile(
    employee: &Employee,
    overtime: &[OvertimeRequest],
    schedule: &[ScheduledDay],
    period: PayPeriod,
) -> HrResult<WageProfile> {
    let settings = employee.wage.ok_or(HrError::MissingSalary(employee.id))?;
    let overtime_hours = sum_approved_overtime_hours(overtime, employee.id, period);
    let off_day_hours = sum_off_day_hours(schedule, employee.id, period);
    WageProfile::from_settings(&settings, overtime_hours, off_day_hours)
}

/// HR workflows over a store implementing every repository seam.
///
/// Permission checks are the caller's job; this type only enforces domain
/// rules (validation, review transitions).
#[derive(Clone, Debug)]
pub struct HrModule<S> {
    store: S,
    calculator: PayrollCalculator,
}

impl<S> HrModule<S>
where
    S: EmployeeDirectory + OvertimeStore + ShiftScheduleStore + AttendanceStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            calculator: PayrollCalculator,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    async fn require_employee(&self, id: Uuid) -> HrResult<Employee> {
        self.store
            .employee(id)
            .await?
            .ok_or_else(|| HrError::NotFound(format!("employee {id}")))
    }

    #[instrument(name = "hr.monthly_payroll", skip(self))]
    pub async fn monthly_payroll(
        &self,
        employee_id: Uuid,
        period: PayPeriod,
    ) -> HrResult<PayrollStatement> {
        let employee = self.require_employee(employee_id).await?;
        let overtime = self
            .store
            .overtime_requests(&OvertimeFilter::approved_for(employee_id, period))
            .await?;
        let schedule = self.store.scheduled_days(employee_id, period).await?;
        let profile = build_wage_profile(&employee, &overtime, &schedule, period)?;
        Ok(PayrollStatement {
            employee_id,
            period,
            breakdown: self.calculator.compute_monthly_pay(&profile),
        })
    }

    #[instrument(name = "hr.save_wage_settings", skip(self, settings))]
    pub async fn save_wage_settings(
        &self,
        employee_id: Uuid,
        settings: WageSettings,
    ) -> HrResult<Employee> {
        self.require_employee(employee_id).await?;
        let employee = self.store.save_wage_settings(employee_id, &settings).await?;
        info!(%employee_id, "wage settings saved");
        Ok(employee)
    }

    #[instrument(name = "hr.submit_overtime", skip(self, input), fields(employee_id = %input.employee_id))]
    pub async fn submit_overtime(
        &self,
        input: NewOvertimeRequest,
        created_by: Uuid,
    ) -> HrResult<OvertimeRequest> {
        self.require_employee(input.employee_id).await?;
        let request = OvertimeRequest::submit(input, created_by, Utc::now())?;
        self.store.insert_overtime(&request).await?;
        info!(request_id = %request.id, "overtime request submitted");
        Ok(request)
    }

    #[instrument(name = "hr.review_overtime", skip(self))]
    pub async fn review_overtime(
        &self,
        request_id: Uuid,
        reviewer: Uuid,
        decision: ReviewDecision,
    ) -> HrResult<OvertimeRequest> {
        let mut request = self
            .store
            .overtime_request(request_id)
            .await?
            .ok_or_else(|| HrError::NotFound(format!("overtime request {request_id}")))?;
        request.review(reviewer, decision, Utc::now())?;
        self.store.save_review(&request).await?;
        info!(status = %request.status, "overtime request reviewed");
        Ok(request)
    }

    #[instrument(name = "hr.schedule_day", skip(self, day), fields(employee_id = %day.employee_id))]
    pub async fn schedule_day(&self, day: ScheduledDay) -> HrResult<ScheduledDay> {
        self.require_employee(day.employee_id).await?;
        self.store.upsert_scheduled_day(&day).await?;
        Ok(day)
    }

    #[instrument(name = "hr.record_attendance", skip(self, record), fields(employee_id = %record.employee_id))]
    pub async fn record_attendance(&self, record: AttendanceRecord) -> HrResult<AttendanceRecord> {
        self.require_employee(record.employee_id).await?;
        self.store.insert_attendance(&record).await?;
        Ok(record)
    }
}
