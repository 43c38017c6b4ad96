use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{
    HrError, HrResult,
    money::{is_whole_cents, is_whole_minutes},
};

pub const DEFAULT_MONTHLY_WORK_DAYS: u32 = 26;
pub const MAX_MONTHLY_WORK_DAYS: u32 = 31;
/// Upper bound for a monthly salary.
pub const MAX_BASE_SALARY: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 0);

pub fn default_daily_work_hours() -> Decimal {
    Decimal::from(8)
}

fn hours_per_day() -> Decimal {
    Decimal::from(24)
}

/// Wage fields HR maintains on an employee record.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageSettings {
    base_salary: Decimal,
    monthly_work_days: u32,
    daily_work_hours: Decimal,
}

impl WageSettings {
    /// Missing day/hour counts fall back to 26 days and 8 hours.
    pub fn new(
        base_salary: Decimal,
        monthly_work_days: Option<u32>,
        daily_work_hours: Option<Decimal>,
    ) -> HrResult<Self> {
        let settings = Self {
            base_salary,
            monthly_work_days: monthly_work_days.unwrap_or(DEFAULT_MONTHLY_WORK_DAYS),
            daily_work_hours: daily_work_hours.unwrap_or_else(default_daily_work_hours),
        };
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> HrResult<()> {
        if self.base_salary <= Decimal::ZERO {
            return Err(invalid(format!(
                "baseSalary must be positive, got {}",
                self.base_salary
            )));
        }
        if self.base_salary > MAX_BASE_SALARY {
            return Err(invalid(format!(
                "baseSalary exceeds maximum allowed ({MAX_BASE_SALARY}), got {}",
                self.base_salary
            )));
        }
        if !is_whole_cents(self.base_salary) {
            return Err(invalid(format!(
                "baseSalary must be a whole number of cents, got {}",
                self.base_salary
            )));
        }
        if !(1..=MAX_MONTHLY_WORK_DAYS).contains(&self.monthly_work_days) {
            return Err(invalid(format!(
                "monthlyWorkDays must be between 1 and {MAX_MONTHLY_WORK_DAYS}, got {}",
                self.monthly_work_days
            )));
        }
        if self.daily_work_hours <= Decimal::ZERO || self.daily_work_hours > hours_per_day() {
            return Err(invalid(format!(
                "dailyWorkHours must be greater than 0 and at most 24, got {}",
                self.daily_work_hours
            )));
        }
        if !is_whole_minutes(self.daily_work_hours) {
            return Err(invalid(format!(
                "dailyWorkHours must be a whole number of minutes, got {}",
                self.daily_work_hours
            )));
        }
        Ok(())
    }

    pub fn base_salary(&self) -> Decimal {
        self.base_salary
    }

    pub fn monthly_work_days(&self) -> u32 {
        self.monthly_work_days
    }

    pub fn daily_work_hours(&self) -> Decimal {
        self.daily_work_hours
    }
}

/// Raw wage profile as received from a caller, before validation.
#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WageProfileInput {
    pub base_salary: Decimal,
    #[serde(default = "default_monthly_work_days")]
    pub monthly_work_days: u32,
    #[serde(default = "default_daily_work_hours")]
    pub daily_work_hours: Decimal,
    #[serde(default)]
    pub approved_overtime_hours: Decimal,
    #[serde(default)]
    pub off_day_hours: Decimal,
}

fn default_monthly_work_days() -> u32 {
    DEFAULT_MONTHLY_WORK_DAYS
}

/// Everything needed to compute one employee's pay for one month.
///
/// Only constructible through validation, so every instance has a non-zero
/// divisor for the rate calculations.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", try_from = "WageProfileInput")]
pub struct WageProfile {
    base_salary: Decimal,
    monthly_work_days: u32,
    daily_work_hours: Decimal,
    approved_overtime_hours: Decimal,
    off_day_hours: Decimal,
}

impl WageProfile {
    pub fn new(
        base_salary: Decimal,
        monthly_work_days: u32,
        daily_work_hours: Decimal,
        approved_overtime_hours: Decimal,
        off_day_hours: Decimal,
    ) -> HrResult<Self> {
        let settings =
            WageSettings::new(base_salary, Some(monthly_work_days), Some(daily_work_hours))?;
        Self::from_settings(&settings, approved_overtime_hours, off_day_hours)
    }

    pub fn from_settings(
        settings: &WageSettings,
        approved_overtime_hours: Decimal,
        off_day_hours: Decimal,
    ) -> HrResult<Self> {
        check_hours("approvedOvertimeHours", approved_overtime_hours)?;
        check_hours("offDayHours", off_day_hours)?;
        Ok(Self {
            base_salary: settings.base_salary,
            monthly_work_days: settings.monthly_work_days,
            daily_work_hours: settings.daily_work_hours,
            approved_overtime_hours,
            off_day_hours,
        })
    }

    pub fn base_salary(&self) -> Decimal {
        self.base_salary
    }

    pub fn monthly_work_days(&self) -> u32 {
        self.monthly_work_days
    }

    pub fn daily_work_hours(&self) -> Decimal {
        self.daily_work_hours
    }

    pub fn approved_overtime_hours(&self) -> Decimal {
        self.approved_overtime_hours
    }

    pub fn off_day_hours(&self) -> Decimal {
        self.off_day_hours
    }
}

impl TryFrom<WageProfileInput> for WageProfile {
    type Error = HrError;

    fn try_from(input: WageProfileInput) -> Result<Self, Self::Error> {
        Self::new(
            input.base_salary,
            input.monthly_work_days,
            input.daily_work_hours,
            input.approved_overtime_hours,
            input.off_day_hours,
        )
    }
}

fn check_hours(field: &str, hours: Decimal) -> HrResult<()> {
    if hours < Decimal::ZERO {
        return Err(invalid(format!("{field} must not be negative, got {hours}")));
    }
    Ok(())
}

fn invalid(message: String) -> HrError {
    HrError::InvalidWageProfile(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    #[test]
    fn settings_apply_defaults() {
        let settings = WageSettings::new(dec(17_000), None, None).unwrap();
        assert_eq!(settings.monthly_work_days(), 26);
        assert_eq!(settings.daily_work_hours(), dec(8));
    }

    #[test]
    fn rejects_non_positive_salary() {
        for salary in [dec(0), dec(-1)] {
            let err = WageSettings::new(salary, None, None).unwrap_err();
            assert!(matches!(err, HrError::InvalidWageProfile(_)));
        }
    }

    #[test]
    fn rejects_out_of_range_divisors() {
        assert!(WageSettings::new(dec(17_000), Some(0), None).is_err());
        assert!(WageSettings::new(dec(17_000), Some(32), None).is_err());
        assert!(WageSettings::new(dec(17_000), Some(31), None).is_ok());
        assert!(WageSettings::new(dec(17_000), None, Some(dec(0))).is_err());
        assert!(WageSettings::new(dec(17_000), None, Some(Decimal::new(241, 1))).is_err());
        assert!(WageSettings::new(dec(17_000), None, Some(dec(24))).is_ok());
    }

    #[test]
    fn rejects_values_storage_cannot_hold_exactly() {
        let tiny = Decimal::new(1, 3);
        assert!(WageSettings::new(tiny, None, None).is_err());
        assert!(WageSettings::new(Decimal::new(17_000_005, 3), None, None).is_err());
        assert!(WageSettings::new(dec(17_000), None, Some(tiny)).is_err());
        assert!(WageSettings::new(dec(17_000), None, Some(Decimal::new(75, 1))).is_ok());
        assert!(WageSettings::new(dec(17_000), None, Some(Decimal::new(101, 1))).is_ok());
        assert!(WageSettings::new(Decimal::new(1, 2), None, Some(Decimal::new(11, 2))).is_err());
        assert!(WageSettings::new(Decimal::new(1_700_050, 2), None, None).is_ok());
    }

    #[test]
    fn hour_aggregates_have_no_upper_cap() {
        let profile = WageProfile::new(dec(17_000), 26, dec(8), dec(900), dec(800)).unwrap();
        assert_eq!(profile.approved_overtime_hours(), dec(900));
    }

    #[test]
    fn rejects_negative_hour_aggregates() {
        let err = WageProfile::new(dec(17_000), 26, dec(8), dec(-1), dec(0)).unwrap_err();
        assert_eq!(
            err,
            HrError::InvalidWageProfile("approvedOvertimeHours must not be negative, got -1".into())
        );
        assert!(WageProfile::new(dec(17_000), 26, dec(8), dec(0), dec(-2)).is_err());
    }

    #[test]
    fn deserialization_validates() {
        let ok: WageProfile =
            serde_json::from_str(r#"{"baseSalary":"17000"}"#).unwrap();
        assert_eq!(ok.monthly_work_days(), 26);
        assert_eq!(ok.approved_overtime_hours(), Decimal::ZERO);

        let bad = serde_json::from_str::<WageProfile>(r#"{"baseSalary":"0"}"#);
        assert!(bad.is_err());
    }
}
