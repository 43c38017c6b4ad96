use rust_decimal::Decimal;
use serde::Serialize;

use crate::{
    money::round_money,
    wage::WageProfile,
};

/// Overtime is paid at 1.5x the hourly rate.
pub const OVERTIME_MULTIPLIER: Decimal = Decimal::from_parts(15, 0, 0, false, 1);
/// Sunday hours are paid at 2x the hourly rate.
pub const OFF_DAY_MULTIPLIER: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Inputs, derived rates and pay components of one monthly payroll.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollBreakdown {
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

impl PayrollBreakdown {
    /// Copy with every rate and amount rounded to cents, for display.
    ///
    /// Each field is rounded independently from the exact value, so the rounded
    /// total may differ from the sum of the rounded components by a cent.
    /// Rates are never rounded before multiplying: 17000 / 26 / 8 with 10
    /// overtime hours pays 1225.96, not the 1226.00 a rounded 81.73 rate gives.
    pub fn rounded(&self) -> Self {
        Self {
            daily_rate: round_money(self.daily_rate),
            hourly_rate: round_money(self.hourly_rate),
            overtime_rate: round_money(self.overtime_rate),
            off_day_rate: round_money(self.off_day_rate),
            overtime_pay: round_money(self.overtime_pay),
            off_day_pay: round_money(self.off_day_pay),
            total_pay: round_money(self.total_pay),
            ..*self
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct PayrollCalculator;

impl PayrollCalculator {
    pub fn compute_monthly_pay(&self, profile: &WageProfile) -> PayrollBreakdown {
        compute_monthly_pay(profile)
    }
}

/// Pure function of the profile. No rounding is applied.
pub fn compute_monthly_pay(profile: &WageProfile) -> PayrollBreakdown {
    let base_salary = profile.base_salary();
    let daily_rate = base_salary / Decimal::from(profile.monthly_work_days());
    let hourly_rate = daily_rate / profile.daily_work_hours();
    let overtime_rate = hourly_rate * OVERTIME_MULTIPLIER;
    let off_day_rate = hourly_rate * OFF_DAY_MULTIPLIER;
    let overtime_pay = profile.approved_overtime_hours() * overtime_rate;
    let off_day_pay = profile.off_day_hours() * off_day_rate;

    PayrollBreakdown {
        base_salary,
        monthly_work_days: profile.monthly_work_days(),
        daily_work_hours: profile.daily_work_hours(),
        approved_overtime_hours: profile.approved_overtime_hours(),
        off_day_hours: profile.off_day_hours(),
        daily_rate,
        hourly_rate,
        overtime_rate,
        off_day_rate,
        overtime_pay,
        off_day_pay,
        total_pay: base_salary + overtime_pay + off_day_pay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(value: i64) -> Decimal {
        Decimal::from(value)
    }

    fn cents(value: i64) -> Decimal {
        Decimal::new(value, 2)
    }

    fn profile(salary: i64, overtime: i64, off_day: i64) -> WageProfile {
        WageProfile::new(dec(salary), 26, dec(8), dec(overtime), dec(off_day)).unwrap()
    }

    #[test]
    fn base_only_profile_pays_base_salary() {
        let breakdown = compute_monthly_pay(&profile(17_000, 0, 0));
        assert_eq!(breakdown.total_pay, dec(17_000));
        let shown = breakdown.rounded();
        assert_eq!(shown.hourly_rate, cents(8_173));
        assert_eq!(shown.total_pay, cents(1_700_000));
    }

    #[test]
    fn overtime_is_paid_at_one_and_a_half() {
        let breakdown = compute_monthly_pay(&profile(17_000, 10, 0)).rounded();
        assert_eq!(breakdown.overtime_rate, cents(12_260));
        assert_eq!(breakdown.overtime_pay, cents(122_596));
        assert_eq!(breakdown.total_pay, cents(1_822_596));
    }

    #[test]
    fn off_day_hours_are_paid_double() {
        let breakdown = compute_monthly_pay(&profile(17_000, 0, 8)).rounded();
        assert_eq!(breakdown.off_day_rate, cents(16_346));
        assert_eq!(breakdown.off_day_pay, cents(130_769));
        assert_eq!(breakdown.total_pay, cents(1_830_769));
    }

    #[test]
    fn derived_values_hold_exactly() {
        let profiles = [
            profile(17_000, 0, 0),
            profile(17_000, 10, 8),
            profile(23_456, 3, 0),
            WageProfile::new(cents(1_234_567), 22, Decimal::new(75, 1), Decimal::new(45, 1), dec(6))
                .unwrap(),
            WageProfile::new(dec(1), 31, dec(24), dec(744), dec(744)).unwrap(),
        ];
        for profile in profiles {
            let b = compute_monthly_pay(&profile);
            assert_eq!(
                b.hourly_rate,
                (b.base_salary / Decimal::from(b.monthly_work_days)) / b.daily_work_hours
            );
            assert_eq!(b.overtime_rate, b.hourly_rate * Decimal::new(15, 1));
            assert_eq!(b.off_day_rate, b.hourly_rate * dec(2));
            assert_eq!(b.total_pay, b.base_salary + b.overtime_pay + b.off_day_pay);
        }
    }

    #[test]
    fn calculator_delegates_to_function() {
        let p = profile(20_000, 4, 2);
        assert_eq!(PayrollCalculator.compute_monthly_pay(&p), compute_monthly_pay(&p));
    }
}
