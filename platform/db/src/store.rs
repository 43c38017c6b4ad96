use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use entity::{attendance_records, employees, overtime_requests, shift_days};
use products_hr::{
    AttendanceRecord, Employee, HrError, HrResult, NewEmployee, OvertimeRequest, OvertimeStatus,
    PayPeriod, ScheduledDay, WageSettings,
    money::{cents_to_decimal, decimal_to_cents, hours_to_minutes, minutes_to_hours},
    store::{AttendanceStore, EmployeeDirectory, OvertimeFilter, OvertimeStore, ShiftScheduleStore},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, Set,
    sea_query::OnConflict,
};
use tracing::warn;
use uuid::Uuid;

use crate::DbPool;

/// HR repositories backed by the shared sea-orm connection.
#[derive(Clone, Debug)]
pub struct SeaOrmStore {
    db: DbPool,
}

impl SeaOrmStore {
    pub fn new(db: DbPool) -> Self {
        Self { db }
    }

    pub fn connection(&self) -> &DbPool {
        &self.db
    }

    async fn employee_model(&self, id: Uuid) -> HrResult<employees::Model> {
        employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_error)?
            .ok_or_else(|| HrError::NotFound(format!("employee {id}")))
    }

    async fn update_employee(
        &self,
        id: Uuid,
        apply: impl FnOnce(&mut employees::ActiveModel),
    ) -> HrResult<Employee> {
        let mut active: employees::ActiveModel = self.employee_model(id).await?.into();
        apply(&mut active);
        active.updated_at = Set(Utc::now());
        let model = active.update(&self.db).await.map_err(store_error)?;
        employee_from_model(model)
    }
}

fn store_error(err: DbErr) -> HrError {
    warn!(error = %err, "database call failed");
    HrError::Store(err.to_string())
}

fn employee_from_model(model: employees::Model) -> HrResult<Employee> {
    let wage = wage_from_model(&model)?;
    Ok(Employee {
        id: model.id,
        full_name: model.full_name,
        phone: model.phone,
        store_id: model.store_id,
        region: model.region,
        position: model.position,
        approved: model.approved,
        wage,
    })
}

fn wage_from_model(model: &employees::Model) -> HrResult<Option<WageSettings>> {
    let Some(cents) = model.base_salary_cents else {
        return Ok(None);
    };
    let corrupt = |detail: String| HrError::Store(format!("employee {}: {detail}", model.id));
    let days = model
        .monthly_work_days
        .map(u32::try_from)
        .transpose()
        .map_err(|err| corrupt(err.to_string()))?;
    let hours = model.daily_work_minutes.map(minutes_to_hours);
    WageSettings::new(cents_to_decimal(cents), days, hours)
        .map(Some)
        .map_err(|err| corrupt(err.to_string()))
}

fn status_to_model(status: OvertimeStatus) -> overtime_requests::Status {
    match status {
        OvertimeStatus::Pending => overtime_requests::Status::Pending,
        OvertimeStatus::Approved => overtime_requests::Status::Approved,
        OvertimeStatus::Rejected => overtime_requests::Status::Rejected,
    }
}

fn status_from_model(status: overtime_requests::Status) -> OvertimeStatus {
    match status {
        overtime_requests::Status::Pending => OvertimeStatus::Pending,
        overtime_requests::Status::Approved => OvertimeStatus::Approved,
        overtime_requests::Status::Rejected => OvertimeStatus::Rejected,
    }
}

fn overtime_from_model(model: overtime_requests::Model) -> OvertimeRequest {
    OvertimeRequest {
        id: model.id,
        employee_id: model.employee_id,
        date: model.work_date,
        hours: minutes_to_hours(model.minutes),
        status: status_from_model(model.status),
        reason: model.reason,
        created_by: model.created_by,
        created_at: model.created_at,
        reviewed_by: model.reviewed_by,
        reviewed_at: model.reviewed_at,
    }
}

fn scheduled_day_from_model(model: shift_days::Model) -> ScheduledDay {
    ScheduledDay {
        employee_id: model.employee_id,
        week_start: model.week_start,
        work_date: model.work_date,
        start_time: model.start_time,
        end_time: model.end_time,
        is_leave: model.is_leave,
    }
}

fn attendance_from_model(model: attendance_records::Model) -> AttendanceRecord {
    AttendanceRecord {
        id: model.id,
        employee_id: model.employee_id,
        work_date: model.work_date,
        check_in: model.check_in,
        check_out: model.check_out,
        created_by: model.created_by,
        created_at: model.created_at,
    }
}

#[async_trait]
impl EmployeeDirectory for SeaOrmStore {
    async fn employee(&self, id: Uuid) -> HrResult<Option<Employee>> {
        employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(employee_from_model)
            .transpose()
    }

    async fn employees(&self, store_id: Option<&str>) -> HrResult<Vec<Employee>> {
        let mut query = employees::Entity::find().order_by_asc(employees::Column::FullName);
        if let Some(store_id) = store_id {
            query = query.filter(employees::Column::StoreId.eq(store_id));
        }
        query
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(employee_from_model)
            .collect()
    }

    async fn register_employee(&self, new: NewEmployee) -> HrResult<Employee> {
        let now = Utc::now();
        let model = employees::ActiveModel {
            id: Set(Uuid::new_v4()),
            full_name: Set(new.full_name),
            phone: Set(new.phone),
            store_id: Set(new.store_id),
            region: Set(new.region),
            position: Set(new.position),
            approved: Set(false),
            base_salary_cents: Set(None),
            monthly_work_days: Set(None),
            daily_work_minutes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;
        employee_from_model(model)
    }

    async fn save_wage_settings(&self, id: Uuid, settings: &WageSettings) -> HrResult<Employee> {
        let cents = decimal_to_cents(settings.base_salary()).ok_or_else(|| {
            HrError::InvalidWageProfile(format!(
                "baseSalary {} cannot be stored",
                settings.base_salary()
            ))
        })?;
        let minutes = hours_to_minutes(settings.daily_work_hours()).ok_or_else(|| {
            HrError::InvalidWageProfile(format!(
                "dailyWorkHours {} cannot be stored",
                settings.daily_work_hours()
            ))
        })?;
        let days = i32::try_from(settings.monthly_work_days())
            .map_err(|err| HrError::InvalidWageProfile(err.to_string()))?;
        self.update_employee(id, |active| {
            active.base_salary_cents = Set(Some(cents));
            active.monthly_work_days = Set(Some(days));
            active.daily_work_minutes = Set(Some(minutes));
        })
        .await
    }

    async fn set_approved(&self, id: Uuid, approved: bool) -> HrResult<Employee> {
        self.update_employee(id, |active| active.approved = Set(approved))
            .await
    }

    async fn set_position(&self, id: Uuid, position: &str) -> HrResult<Employee> {
        let position = position.to_string();
        self.update_employee(id, |active| active.position = Set(position))
            .await
    }
}

#[async_trait]
impl OvertimeStore for SeaOrmStore {
    async fn overtime_request(&self, id: Uuid) -> HrResult<Option<OvertimeRequest>> {
        Ok(overtime_requests::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(store_error)?
            .map(overtime_from_model))
    }

    async fn overtime_requests(&self, filter: &OvertimeFilter) -> HrResult<Vec<OvertimeRequest>> {
        let mut query = overtime_requests::Entity::find()
            .order_by_asc(overtime_requests::Column::WorkDate)
            .order_by_asc(overtime_requests::Column::CreatedAt);
        if let Some(ids) = &filter.employee_ids {
            query = query.filter(overtime_requests::Column::EmployeeId.is_in(ids.iter().copied()));
        }
        if let Some(status) = filter.status {
            query = query.filter(overtime_requests::Column::Status.eq(status_to_model(status)));
        }
        if let Some(period) = filter.period {
            query = query.filter(
                overtime_requests::Column::WorkDate.between(period.first_day(), period.last_day()),
            );
        }
        Ok(query
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(overtime_from_model)
            .collect())
    }

    async fn insert_overtime(&self, request: &OvertimeRequest) -> HrResult<()> {
        let minutes = hours_to_minutes(request.hours)
            .ok_or(HrError::InvalidOvertimeHours(request.hours))?;
        overtime_requests::ActiveModel {
            id: Set(request.id),
            employee_id: Set(request.employee_id),
            work_date: Set(request.date),
            minutes: Set(minutes),
            status: Set(status_to_model(request.status)),
            reason: Set(request.reason.clone()),
            created_by: Set(request.created_by),
            created_at: Set(request.created_at),
            reviewed_by: Set(request.reviewed_by),
            reviewed_at: Set(request.reviewed_at),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn save_review(&self, request: &OvertimeRequest) -> HrResult<()> {
        let changes = overtime_requests::ActiveModel {
            status: Set(status_to_model(request.status)),
            reviewed_by: Set(request.reviewed_by),
            reviewed_at: Set(request.reviewed_at),
            ..Default::default()
        };
        let result = overtime_requests::Entity::update_many()
            .set(changes)
            .filter(overtime_requests::Column::Id.eq(request.id))
            .filter(overtime_requests::Column::Status.eq(overtime_requests::Status::Pending))
            .exec(&self.db)
            .await
            .map_err(store_error)?;
        if result.rows_affected == 1 {
            return Ok(());
        }
        match self.overtime_request(request.id).await? {
            Some(current) => Err(HrError::AlreadyReviewed(current.status)),
            None => Err(HrError::NotFound(format!("overtime request {}", request.id))),
        }
    }
}

#[async_trait]
impl ShiftScheduleStore for SeaOrmStore {
    async fn scheduled_days(
        &self,
        employee_id: Uuid,
        period: PayPeriod,
    ) -> HrResult<Vec<ScheduledDay>> {
        Ok(shift_days::Entity::find()
            .filter(shift_days::Column::EmployeeId.eq(employee_id))
            .filter(shift_days::Column::WorkDate.between(period.first_day(), period.last_day()))
            .order_by_asc(shift_days::Column::WorkDate)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(scheduled_day_from_model)
            .collect())
    }

    async fn upsert_scheduled_day(&self, day: &ScheduledDay) -> HrResult<()> {
        let model = shift_days::ActiveModel {
            employee_id: Set(day.employee_id),
            work_date: Set(day.work_date),
            week_start: Set(day.week_start),
            start_time: Set(day.start_time),
            end_time: Set(day.end_time),
            is_leave: Set(day.is_leave),
            updated_at: Set(Utc::now()),
        };
        shift_days::Entity::insert(model)
            .on_conflict(
                OnConflict::columns([shift_days::Column::EmployeeId, shift_days::Column::WorkDate])
                    .update_columns([
                        shift_days::Column::WeekStart,
                        shift_days::Column::StartTime,
                        shift_days::Column::EndTime,
                        shift_days::Column::IsLeave,
                        shift_days::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(store_error)?;
        Ok(())
    }
}

#[async_trait]
impl AttendanceStore for SeaOrmStore {
    async fn insert_attendance(&self, record: &AttendanceRecord) -> HrResult<()> {
        attendance_records::ActiveModel {
            id: Set(record.id),
            employee_id: Set(record.employee_id),
            work_date: Set(record.work_date),
            check_in: Set(record.check_in),
            check_out: Set(record.check_out),
            created_by: Set(record.created_by),
            created_at: Set(record.created_at),
        }
        .insert(&self.db)
        .await
        .map_err(store_error)?;
        Ok(())
    }

    async fn attendance(
        &self,
        employee_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> HrResult<Vec<AttendanceRecord>> {
        Ok(attendance_records::Entity::find()
            .filter(attendance_records::Column::EmployeeId.eq(employee_id))
            .filter(attendance_records::Column::WorkDate.between(from, to))
            .order_by_asc(attendance_records::Column::WorkDate)
            .all(&self.db)
            .await
            .map_err(store_error)?
            .into_iter()
            .map(attendance_from_model)
            .collect())
    }
}
