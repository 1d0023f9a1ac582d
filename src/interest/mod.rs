pub mod accrual;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::decimal::Money;

pub use accrual::{accrual_segments, accrued_interest};

/// one stretch of accrual between principal step-downs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccrualSegment {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// principal the segment accrued on; can go negative after an overpayment
    pub principal: Money,
    pub days: i64,
    pub interest: Money,
}

/// (1 + rate)^periods by iterated multiplication
///
/// tenures and compounding counts are small, so repeated multiplication keeps
/// full decimal precision without a float detour
pub fn growth_factor(period_rate: Decimal, periods: u32) -> Decimal {
    let base = Decimal::ONE + period_rate;
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor *= base;
    }
    factor
}
