use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{HrError, HrResult, PayPeriod, money::is_whole_minutes};

pub const MAX_OVERTIME_HOURS_PER_REQUEST: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OvertimeStatus {
    Pending,
    Approved,
    Rejected,
}

impl OvertimeStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OvertimeStatus::Pending => "pending",
            OvertimeStatus::Approved => "approved",
            OvertimeStatus::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(OvertimeStatus::Pending),
            "approved" => Some(OvertimeStatus::Approved),
            "rejected" => Some(OvertimeStatus::Rejected),
            _ => None,
        }
    }
}

impl fmt::Display for OvertimeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ReviewDecision {
    Approve,
    Reject,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOvertimeRequest {
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub hours: Decimal,
    pub reason: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeRequest {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub date: NaiveDate,
    pub hours: Decimal,
    pub status: OvertimeStatus,
    pub reason: Option<String>,
    /// The employee themselves, or a manager filing on their behalf.
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
    pub reviewed_by: Option<Uuid>,
    pub reviewed_at: Option<DateTime<Utc>>,
}

impl OvertimeRequest {
    pub fn submit(input: NewOvertimeRequest, created_by: Uuid, now: DateTime<Utc>) -> HrResult<Self> {
        validate_overtime_hours(input.hours)?;
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id: input.employee_id,
            date: input.date,
            hours: input.hours,
            status: OvertimeStatus::Pending,
            reason: input.reason,
            created_by,
            created_at: now,
            reviewed_by: None,
            reviewed_at: None,
        })
    }

    /// `pending -> approved | rejected`, once. Neither the employee nor the
    /// person who filed the request may review it.
    pub fn review(
        &mut self,
        reviewer: Uuid,
        decision: ReviewDecision,
        at: DateTime<Utc>,
    ) -> HrResult<()> {
        if self.status != OvertimeStatus::Pending {
            return Err(HrError::AlreadyReviewed(self.status));
        }
        if reviewer == self.employee_id || reviewer == self.created_by {
            return Err(HrError::SelfReview(self.id));
        }
        self.status = match decision {
            ReviewDecision::Approve => OvertimeStatus::Approved,
            ReviewDecision::Reject => OvertimeStatus::Rejected,
        };
        self.reviewed_by = Some(reviewer);
        self.reviewed_at = Some(at);
        Ok(())
    }

    pub fn counts_toward(&self, employee_id: Uuid, period: PayPeriod) -> bool {
        self.employee_id == employee_id
            && self.status == OvertimeStatus::Approved
            && period.contains(self.date)
    }
}

pub fn validate_overtime_hours(hours: Decimal) -> HrResult<()> {
    if hours <= Decimal::ZERO
        || hours > MAX_OVERTIME_HOURS_PER_REQUEST
        || !is_whole_minutes(hours)
    {
        return Err(HrError::InvalidOvertimeHours(hours));
    }
    Ok(())
}

/// Approved hours for `employee_id` dated inside `period`. Zero when nothing matches.
pub fn sum_approved_overtime_hours<'a, I>(requests: I, employee_id: Uuid, period: PayPeriod) -> Decimal
where
    I: IntoIterator<Item = &'a OvertimeRequest>,
{
    requests
        .into_iter()
        .filter(|request| request.counts_toward(employee_id, period))
        .map(|request| request.hours)
        .sum()
}
