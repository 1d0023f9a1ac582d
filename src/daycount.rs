use chrono::{Datelike, Duration, NaiveDate};

use crate::types::EmiFrequency;

/// absolute number of days between two calendar dates
///
/// dates carry no time-of-day, so a partial day can never appear; identical
/// dates give 0
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (b - a).num_days().abs()
}

/// advance a date by `count` periods of `frequency`
///
/// monthly and yearly arithmetic lets the day-of-month overflow into the next
/// month at short-month boundaries (Jan 31 + 1 month lands on Mar 2 or Mar 3),
/// matching how the ledger has always scheduled installments
pub fn add_periods(date: NaiveDate, frequency: EmiFrequency, count: u32) -> NaiveDate {
    match frequency {
        EmiFrequency::Weekly => date + Duration::days(7 * i64::from(count)),
        EmiFrequency::Monthly => {
            let months = date.year() * 12 + date.month0() as i32 + count as i32;
            let anchor = first_of(months.div_euclid(12), months.rem_euclid(12) as u32 + 1);
            anchor + Duration::days(i64::from(date.day()) - 1)
        }
        EmiFrequency::Yearly => {
            let anchor = first_of(date.year() + count as i32, date.month());
            anchor + Duration::days(i64::from(date.day()) - 1)
        }
    }
}

fn first_of(year: i32, month: u32) -> NaiveDate {
    // month is always in 1..=12 here
    NaiveDate::from_ymd_opt(year, month, 1).expect("month in 1..=12")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 7, 1)), 182);
        assert_eq!(days_between(date(2024, 7, 1), date(2024, 1, 1)), 182);
        assert_eq!(days_between(date(2024, 1, 1), date(2024, 1, 1)), 0);
    }

    #[test]
    fn test_add_weekly_periods() {
        assert_eq!(
            add_periods(date(2024, 1, 1), EmiFrequency::Weekly, 3),
            date(2024, 1, 22)
        );
    }

    #[test]
    fn test_add_monthly_periods() {
        assert_eq!(
            add_periods(date(2024, 1, 15), EmiFrequency::Monthly, 1),
            date(2024, 2, 15)
        );
        assert_eq!(
            add_periods(date(2024, 11, 15), EmiFrequency::Monthly, 3),
            date(2025, 2, 15)
        );
    }

    #[test]
    fn test_monthly_overflow_at_short_months() {
        // Jan 31 + 1 month overflows February; leap year lands on Mar 2
        assert_eq!(
            add_periods(date(2024, 1, 31), EmiFrequency::Monthly, 1),
            date(2024, 3, 2)
        );
        // non-leap year lands on Mar 3
        assert_eq!(
            add_periods(date(2025, 1, 31), EmiFrequency::Monthly, 1),
            date(2025, 3, 3)
        );
    }

    #[test]
    fn test_add_yearly_periods() {
        assert_eq!(
            add_periods(date(2024, 5, 10), EmiFrequency::Yearly, 2),
            date(2026, 5, 10)
        );
        // Feb 29 + 1 year overflows into March
        assert_eq!(
            add_periods(date(2024, 2, 29), EmiFrequency::Yearly, 1),
            date(2025, 3, 1)
        );
    }

    #[test]
    fn test_zero_periods_is_identity() {
        let d = date(2024, 6, 30);
        assert_eq!(add_periods(d, EmiFrequency::Monthly, 0), d);
        assert_eq!(add_periods(d, EmiFrequency::Weekly, 0), d);
        assert_eq!(add_periods(d, EmiFrequency::Yearly, 0), d);
    }
}
