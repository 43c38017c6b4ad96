mod me;
mod types;

use std::collections::{BTreeMap, HashMap};

use anyhow::anyhow;
use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};
use chrono::{NaiveDate, NaiveTime, Utc};
use platform_api::{ApiError, internal_error};
use platform_authz::{
    Capability, PolicyContext, PolicyEngine, Position, can_approve_overtime, can_create_overtime,
    can_see_all_stores, can_see_phone_numbers,
};
use platform_db::SeaOrmStore;
use products_hr::{
    AttendanceRecord, Employee, HrModule, NewOvertimeRequest, OvertimeRequest, PayPeriod,
    ReviewDecision, ScheduledDay, WageSettings,
    store::{AttendanceStore, EmployeeDirectory, OvertimeFilter, OvertimeStore},
};
use rust_decimal::Decimal;
use tracing::{info, instrument};
use uuid::Uuid;

pub use me::MePayload;
pub use types::{
    AttendanceNode, EmployeeNode, OvertimeNode, OvertimeStatus, PayrollNode, ShiftDayNode,
    StoreSummary, WageSettingsNode,
};

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

type GqlResult<T> = async_graphql::Result<T>;

/// Employee id proven by the request's bearer token.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Viewer(pub Uuid);

#[derive(Clone, Debug)]
pub struct GraphqlData {
    pub hr: HrModule<SeaOrmStore>,
    pub payroll_currency: String,
}

pub fn build_schema(data: GraphqlData) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(data)
        .data(PolicyEngine::default())
        .finish()
}

/// SDL of the full schema. No resolver runs, so no data is registered.
pub fn schema_sdl() -> String {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .finish()
        .sdl()
}

fn api_error(err: impl Into<ApiError>) -> async_graphql::Error {
    err.into().extend()
}

fn forbidden(message: impl Into<String>) -> async_graphql::Error {
    ApiError::Forbidden(message.into()).extend()
}

fn graphql_data<'a>(ctx: &Context<'a>) -> GqlResult<&'a GraphqlData> {
    ctx.data::<GraphqlData>()
        .map_err(|_| internal_error(anyhow!("graphql data not registered")))
}

fn policy_engine<'a>(ctx: &Context<'a>) -> GqlResult<&'a PolicyEngine> {
    ctx.data::<PolicyEngine>()
        .map_err(|_| internal_error(anyhow!("policy engine not registered")))
}

/// The authenticated employee, approved or not.
async fn viewer(ctx: &Context<'_>) -> GqlResult<Employee> {
    let Some(Viewer(id)) = ctx.data_opt::<Viewer>().copied() else {
        return Err(api_error(ApiError::Unauthorized));
    };
    graphql_data(ctx)?
        .hr
        .store()
        .employee(id)
        .await
        .map_err(api_error)?
        .ok_or_else(|| api_error(ApiError::Unauthorized))
}

/// Unapproved registrations may only call `me`.
async fn active_viewer(ctx: &Context<'_>) -> GqlResult<Employee> {
    let viewer = viewer(ctx).await?;
    if !viewer.approved {
        return Err(forbidden("registration pending approval"));
    }
    Ok(viewer)
}

fn authorize(
    ctx: &Context<'_>,
    viewer: &Employee,
    capability: Capability,
    resource: impl Into<String>,
) -> GqlResult<()> {
    let request = PolicyContext::new(
        viewer.id.to_string(),
        viewer.position.as_str(),
        capability,
        resource,
    );
    policy_engine(ctx)?.check(&request).map_err(api_error)
}

fn ensure_same_store(viewer: &Employee, target: &Employee) -> GqlResult<()> {
    if can_see_all_stores(&viewer.position) || viewer.works_at(&target.store_id) {
        Ok(())
    } else {
        Err(forbidden(format!(
            "employee {} belongs to another store",
            target.id
        )))
    }
}

async fn require_employee(hr: &HrModule<SeaOrmStore>, id: Uuid) -> GqlResult<Employee> {
    hr.store()
        .employee(id)
        .await
        .map_err(api_error)?
        .ok_or_else(|| api_error(ApiError::NotFound))
}

fn optional_period(month: Option<u32>, year: Option<i32>) -> GqlResult<Option<PayPeriod>> {
    match (month, year) {
        (Some(month), Some(year)) => PayPeriod::new(year, month).map(Some).map_err(api_error),
        (None, None) => Ok(None),
        _ => Err(api_error(ApiError::invalid(
            "month and year must be given together",
        ))),
    }
}

fn summarize_stores(employees: &[Employee], pending: &[OvertimeRequest]) -> Vec<StoreSummary> {
    let mut stores: BTreeMap<&str, StoreSummary> = BTreeMap::new();
    let mut home: HashMap<Uuid, &str> = HashMap::new();
    for employee in employees {
        home.insert(employee.id, employee.store_id.as_str());
        let summary = stores
            .entry(employee.store_id.as_str())
            .or_insert_with(|| StoreSummary {
                store_id: employee.store_id.clone(),
                ..StoreSummary::default()
            });
        summary.headcount += 1;
        if !employee.approved {
            summary.pending_approvals += 1;
        }
        if summary.region.is_none() {
            summary.region = employee.region.clone();
        }
    }
    for request in pending {
        if let Some(summary) = home
            .get(&request.employee_id)
            .and_then(|store_id| stores.get_mut(*store_id))
        {
            summary.pending_overtime += 1;
        }
    }
    stores.into_values().collect()
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    #[instrument(name = "graphql.me", skip_all)]
    async fn me(&self, ctx: &Context<'_>) -> GqlResult<MePayload> {
        let viewer = viewer(ctx).await?;
        Ok(MePayload::from_employee(viewer, policy_engine(ctx)?.policy()))
    }

    /// Own store only, unless the viewer may see every store.
    #[instrument(name = "graphql.employees", skip(self, ctx))]
    async fn employees(
        &self,
        ctx: &Context<'_>,
        store_id: Option<String>,
    ) -> GqlResult<Vec<EmployeeNode>> {
        let viewer = active_viewer(ctx).await?;
        let scope = if can_see_all_stores(&viewer.position) {
            store_id
        } else {
            if store_id.as_deref().is_some_and(|s| !viewer.works_at(s)) {
                return Err(forbidden("cannot list employees of another store"));
            }
            Some(viewer.store_id.clone())
        };
        let show_phone = can_see_phone_numbers(&viewer.position);
        let employees = graphql_data(ctx)?
            .hr
            .store()
            .employees(scope.as_deref())
            .await
            .map_err(api_error)?;
        Ok(employees
            .into_iter()
            .map(|employee| EmployeeNode::new(employee, show_phone))
            .collect())
    }

    #[instrument(name = "graphql.regional_summary", skip_all)]
    async fn regional_summary(&self, ctx: &Context<'_>) -> GqlResult<Vec<StoreSummary>> {
        let viewer = active_viewer(ctx).await?;
        authorize(ctx, &viewer, Capability::ViewRegionalData, "regional_summary")?;
        let store = graphql_data(ctx)?.hr.store();
        let employees = store.employees(None).await.map_err(api_error)?;
        let pending = store
            .overtime_requests(&OvertimeFilter {
                status: Some(products_hr::OvertimeStatus::Pending),
                ..OvertimeFilter::default()
            })
            .await
            .map_err(api_error)?;
        Ok(summarize_stores(&employees, &pending))
    }

    #[instrument(name = "graphql.payroll", skip(self, ctx))]
    async fn payroll(
        &self,
        ctx: &Context<'_>,
        employee_id: Uuid,
        month: u32,
        year: i32,
    ) -> GqlResult<PayrollNode> {
        let viewer = active_viewer(ctx).await?;
        authorize(
            ctx,
            &viewer,
            Capability::ManagePayroll,
            format!("payroll/{employee_id}"),
        )?;
        let period = PayPeriod::new(year, month).map_err(api_error)?;
        let data = graphql_data(ctx)?;
        let statement = data
            .hr
            .monthly_payroll(employee_id, period)
            .await
            .map_err(api_error)?;
        Ok(PayrollNode::new(statement, &data.payroll_currency))
    }

    /// The viewer's own requests, or the whole store's for overtime approvers.
    #[instrument(name = "graphql.overtime_requests", skip(self, ctx))]
    async fn overtime_requests(
        &self,
        ctx: &Context<'_>,
        status: Option<OvertimeStatus>,
        month: Option<u32>,
        year: Option<i32>,
    ) -> GqlResult<Vec<OvertimeNode>> {
        let viewer = active_viewer(ctx).await?;
        let period = optional_period(month, year)?;
        let store = graphql_data(ctx)?.hr.store();
        let employee_ids = if can_approve_overtime(&viewer.position) {
            store
                .employees(Some(&viewer.store_id))
                .await
                .map_err(api_error)?
                .into_iter()
                .map(|employee| employee.id)
                .collect()
        } else {
            vec![viewer.id]
        };
        let filter = OvertimeFilter {
            employee_ids: Some(employee_ids),
            status: status.map(Into::into),
            period,
        };
        Ok(store
            .overtime_requests(&filter)
            .await
            .map_err(api_error)?
            .into_iter()
            .map(OvertimeNode::from)
            .collect())
    }

    /// The viewer's own attendance for one month.
    #[instrument(name = "graphql.attendance", skip(self, ctx))]
    async fn attendance(
        &self,
        ctx: &Context<'_>,
        month: u32,
        year: i32,
    ) -> GqlResult<Vec<AttendanceNode>> {
        let viewer = active_viewer(ctx).await?;
        let period = PayPeriod::new(year, month).map_err(api_error)?;
        Ok(graphql_data(ctx)?
            .hr
            .store()
            .attendance(viewer.id, period.first_day(), period.last_day())
            .await
            .map_err(api_error)?
            .into_iter()
            .map(AttendanceNode::from)
            .collect())
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    /// Files a request for the viewer, or for `employeeId` when the viewer
    /// approves overtime in that employee's store and the employee's own
    /// position may file overtime.
    #[instrument(name = "graphql.submit_overtime", skip(self, ctx, reason))]
    async fn submit_overtime(
        &self,
        ctx: &Context<'_>,
        date: NaiveDate,
        hours: Decimal,
        reason: Option<String>,
        employee_id: Option<Uuid>,
    ) -> GqlResult<OvertimeNode> {
        let viewer = active_viewer(ctx).await?;
        authorize(ctx, &viewer, Capability::CreateOvertime, "overtime")?;
        let hr = &graphql_data(ctx)?.hr;
        let target = match employee_id {
            Some(id) if id != viewer.id => {
                authorize(
                    ctx,
                    &viewer,
                    Capability::ApproveOvertime,
                    format!("employee/{id}"),
                )?;
                let target = require_employee(hr, id).await?;
                ensure_same_store(&viewer, &target)?;
                if !can_create_overtime(&target.position) {
                    return Err(forbidden(format!(
                        "{} positions do not file overtime",
                        target.position
                    )));
                }
                target.id
            }
            _ => viewer.id,
        };
        let request = hr
            .submit_overtime(
                NewOvertimeRequest {
                    employee_id: target,
                    date,
                    hours,
                    reason: reason.filter(|r| !r.trim().is_empty()),
                },
                viewer.id,
            )
            .await
            .map_err(api_error)?;
        Ok(request.into())
    }

    #[instrument(name = "graphql.review_overtime", skip(self, ctx))]
    async fn review_overtime(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        approve: bool,
    ) -> GqlResult<OvertimeNode> {
        let viewer = active_viewer(ctx).await?;
        authorize(
            ctx,
            &viewer,
            Capability::ApproveOvertime,
            format!("overtime/{id}"),
        )?;
        let hr = &graphql_data(ctx)?.hr;
        let request = hr
            .store()
            .overtime_request(id)
            .await
            .map_err(api_error)?
            .ok_or_else(|| api_error(ApiError::NotFound))?;
        let owner = require_employee(hr, request.employee_id).await?;
        ensure_same_store(&viewer, &owner)?;
        let decision = if approve {
            ReviewDecision::Approve
        } else {
            ReviewDecision::Reject
        };
        let reviewed = hr
            .review_overtime(id, viewer.id, decision)
            .await
            .map_err(api_error)?;
        Ok(reviewed.into())
    }

    #[instrument(name = "graphql.update_wage_profile", skip(self, ctx, base_salary))]
    async fn update_wage_profile(
        &self,
        ctx: &Context<'_>,
        employee_id: Uuid,
        base_salary: Decimal,
        monthly_work_days: Option<u32>,
        daily_work_hours: Option<Decimal>,
    ) -> GqlResult<WageSettingsNode> {
        let viewer = active_viewer(ctx).await?;
        authorize(
            ctx,
            &viewer,
            Capability::ManagePayroll,
            format!("wage_profile/{employee_id}"),
        )?;
        let settings = WageSettings::new(base_salary, monthly_work_days, daily_work_hours)
            .map_err(api_error)?;
        let employee = graphql_data(ctx)?
            .hr
            .save_wage_settings(employee_id, settings)
            .await
            .map_err(api_error)?;
        let saved = employee.wage.unwrap_or(settings);
        Ok(WageSettingsNode {
            employee_id,
            base_salary: saved.base_salary(),
            monthly_work_days: saved.monthly_work_days(),
            daily_work_hours: saved.daily_work_hours(),
        })
    }

    #[instrument(name = "graphql.approve_employee", skip(self, ctx))]
    async fn approve_employee(&self, ctx: &Context<'_>, id: Uuid) -> GqlResult<EmployeeNode> {
        let viewer = active_viewer(ctx).await?;
        authorize(
            ctx,
            &viewer,
            Capability::ApproveEmployees,
            format!("employee/{id}"),
        )?;
        let hr = &graphql_data(ctx)?.hr;
        let target = require_employee(hr, id).await?;
        ensure_same_store(&viewer, &target)?;
        let updated = hr.store().set_approved(id, true).await.map_err(api_error)?;
        info!(employee_id = %id, approved_by = %viewer.id, "employee registration approved");
        Ok(EmployeeNode::new(
            updated,
            can_see_phone_numbers(&viewer.position),
        ))
    }

    /// `position` must be one of the nine known position strings.
    #[instrument(name = "graphql.change_position", skip(self, ctx))]
    async fn change_position(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        position: String,
    ) -> GqlResult<EmployeeNode> {
        let viewer = active_viewer(ctx).await?;
        authorize(
            ctx,
            &viewer,
            Capability::ApprovePositionChange,
            format!("employee/{id}"),
        )?;
        let Some(position) = Position::parse(&position) else {
            return Err(api_error(ApiError::invalid(format!(
                "unknown position {position:?}"
            ))));
        };
        let hr = &graphql_data(ctx)?.hr;
        let target = require_employee(hr, id).await?;
        ensure_same_store(&viewer, &target)?;
        let updated = hr
            .store()
            .set_position(id, position.as_str())
            .await
            .map_err(api_error)?;
        info!(employee_id = %id, from = %target.position, to = %position, "position changed");
        Ok(EmployeeNode::new(
            updated,
            can_see_phone_numbers(&viewer.position),
        ))
    }

    #[instrument(name = "graphql.upsert_shift_day", skip(self, ctx))]
    async fn upsert_shift_day(
        &self,
        ctx: &Context<'_>,
        employee_id: Uuid,
        work_date: NaiveDate,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        is_leave: Option<bool>,
    ) -> GqlResult<ShiftDayNode> {
        let viewer = active_viewer(ctx).await?;
        authorize(
            ctx,
            &viewer,
            Capability::ManageShifts,
            format!("schedule/{employee_id}"),
        )?;
        let hr = &graphql_data(ctx)?.hr;
        let target = require_employee(hr, employee_id).await?;
        ensure_same_store(&viewer, &target)?;
        let day = ScheduledDay::new(
            employee_id,
            work_date,
            start_time,
            end_time,
            is_leave.unwrap_or(false),
        )
        .map_err(api_error)?;
        let saved = hr.schedule_day(day).await.map_err(api_error)?;
        Ok(saved.into())
    }

    /// Records the viewer's own check-in and optional check-out.
    #[instrument(name = "graphql.record_attendance", skip(self, ctx))]
    async fn record_attendance(
        &self,
        ctx: &Context<'_>,
        work_date: NaiveDate,
        check_in: NaiveTime,
        check_out: Option<NaiveTime>,
    ) -> GqlResult<AttendanceNode> {
        let viewer = active_viewer(ctx).await?;
        authorize(ctx, &viewer, Capability::CreateAttendance, "attendance")?;
        let record = AttendanceRecord::record(
            viewer.id,
            work_date,
            check_in,
            check_out,
            viewer.id,
            Utc::now(),
        )
        .map_err(api_error)?;
        let saved = graphql_data(ctx)?
            .hr
            .record_attendance(record)
            .await
            .map_err(api_error)?;
        Ok(saved.into())
    }
}
