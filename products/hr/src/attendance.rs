use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{HrError, HrResult};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub work_date: NaiveDate,
    pub check_in: NaiveTime,
    pub check_out: Option<NaiveTime>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

impl AttendanceRecord {
    pub fn record(
        employee_id: Uuid,
        work_date: NaiveDate,
        check_in: NaiveTime,
        check_out: Option<NaiveTime>,
        created_by: Uuid,
        now: DateTime<Utc>,
    ) -> HrResult<Self> {
        if let Some(out) = check_out {
            if out <= check_in {
                return Err(HrError::InvalidAttendance(format!(
                    "check-out {out} must be after check-in {check_in}"
                )));
            }
        }
        if work_date > now.date_naive() {
            return Err(HrError::InvalidAttendance(format!(
                "{work_date} is in the future"
            )));
        }
        Ok(Self {
            id: Uuid::new_v4(),
            employee_id,
            work_date,
            check_in,
            check_out,
            created_by,
            created_at: now,
        })
    }
}
