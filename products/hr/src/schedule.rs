use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{HrError, HrResult, PayPeriod, money::minutes_to_hours};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// One day of an employee's weekly shift schedule.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledDay {
    pub employee_id: Uuid,
    pub week_start: NaiveDate,
    pub work_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_leave: bool,
}

impl ScheduledDay {
    pub fn new(
        employee_id: Uuid,
        work_date: NaiveDate,
        start_time: Option<NaiveTime>,
        end_time: Option<NaiveTime>,
        is_leave: bool,
    ) -> HrResult<Self> {
        if start_time.is_some() != end_time.is_some() && !is_leave {
            return Err(HrError::InvalidSchedule(format!(
                "{work_date}: start and end time must be set together"
            )));
        }
        Ok(Self {
            employee_id,
            week_start: week_start_for(work_date),
            work_date,
            start_time,
            end_time,
            is_leave,
        })
    }

    pub fn is_off_day(&self) -> bool {
        self.work_date.weekday() == Weekday::Sun
    }

    /// Shift length in fractional hours. An end before the start wraps past
    /// midnight. `None` for leave days or when either time is missing.
    pub fn worked_hours(&self) -> Option<Decimal> {
        if self.is_leave {
            return None;
        }
        let (start, end) = (self.start_time?, self.end_time?);
        let mut minutes = (end - start).num_minutes();
        if minutes < 0 {
            minutes += MINUTES_PER_DAY;
        }
        i32::try_from(minutes).ok().map(minutes_to_hours)
    }
}

/// Monday of the week containing `date`.
pub fn week_start_for(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Sunday shift hours for `employee_id` inside `period`. Leave days and days
/// missing a start or end time contribute nothing.
pub fn sum_off_day_hours<'a, I>(days: I, employee_id: Uuid, period: PayPeriod) -> Decimal
where
    I: IntoIterator<Item = &'a ScheduledDay>,
{
    days.into_iter()
        .filter(|day| {
            day.employee_id == employee_id && period.contains(day.work_date) && day.is_off_day()
        })
        .filter_map(ScheduledDay::worked_hours)
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, m, 0)
    }

    fn day(employee: Uuid, on: NaiveDate, start: Option<NaiveTime>, end: Option<NaiveTime>, leave: bool) -> ScheduledDay {
        ScheduledDay {
            employee_id: employee,
            week_start: week_start_for(on),
            work_date: on,
            start_time: start,
            end_time: end,
            is_leave: leave,
        }
    }

    #[test]
    fn week_starts_on_monday() {
        // 2024-06-02 is a Sunday.
        assert_eq!(week_start_for(date(2024, 6, 2)), date(2024, 5, 27));
        assert_eq!(week_start_for(date(2024, 6, 3)), date(2024, 6, 3));
    }

    #[test]
    fn new_rejects_half_open_shift() {
        let employee = Uuid::new_v4();
        assert!(ScheduledDay::new(employee, date(2024, 6, 2), time(9, 0), None, false).is_err());
        assert!(ScheduledDay::new(employee, date(2024, 6, 2), time(9, 0), None, true).is_ok());
        assert!(ScheduledDay::new(employee, date(2024, 6, 2), None, None, false).is_ok());
    }

    #[test]
    fn overnight_shift_wraps_midnight() {
        let employee = Uuid::new_v4();
        let shift = day(employee, date(2024, 6, 2), time(22, 0), time(2, 30), false);
        assert_eq!(shift.worked_hours(), Some(Decimal::new(45, 1)));
    }

    #[test]
    fn sums_only_eligible_sundays_in_period() {
        let employee = Uuid::new_v4();
        let june = PayPeriod::new(2024, 6).unwrap();
        let days = vec![
            // Sundays in June 2024: 2, 9, 16, 23, 30.
            day(employee, date(2024, 6, 2), time(9, 0), time(17, 30), false),
            day(employee, date(2024, 6, 9), time(10, 0), time(14, 15), false),
            day(employee, date(2024, 6, 16), time(9, 0), time(17, 0), true),
            day(employee, date(2024, 6, 23), time(9, 0), None, false),
            day(employee, date(2024, 6, 30), None, time(18, 0), false),
            // Saturday, not an off day.
            day(employee, date(2024, 6, 1), time(9, 0), time(17, 0), false),
            // Sunday in the previous month's week.
            day(employee, date(2024, 5, 26), time(9, 0), time(17, 0), false),
            // Someone else's Sunday.
            day(Uuid::new_v4(), date(2024, 6, 2), time(9, 0), time(17, 0), false),
        ];
        assert_eq!(
            sum_off_day_hours(&days, employee, june),
            Decimal::new(1275, 2)
        );
    }

    #[test]
    fn no_schedule_sums_to_zero() {
        let days: Vec<ScheduledDay> = Vec::new();
        assert_eq!(
            sum_off_day_hours(&days, Uuid::new_v4(), PayPeriod::new(2024, 6).unwrap()),
            Decimal::ZERO
        );
    }
}
