use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::daycount;
use crate::decimal::Money;
use crate::interest::{growth_factor, AccrualSegment};
use crate::model::{Loan, Repayment};
use crate::types::InterestType;

/// interest accrued on a loan up to a reference date
///
/// `repayments` must be the repayments of this loan. the walk segments time at
/// each principal-reducing repayment, accruing on the running principal and
/// stepping it down at each boundary. returns zero when `as_of` precedes the
/// loan date.
pub fn accrued_interest(loan: &Loan, repayments: &[Repayment], as_of: NaiveDate) -> Money {
    accrual_segments(loan, repayments, as_of)
        .iter()
        .map(|s| s.interest)
        .sum()
}

/// the accrual walk behind [`accrued_interest`], segment by segment
///
/// useful for audit views that show which principal each stretch of interest
/// was charged on
pub fn accrual_segments(loan: &Loan, repayments: &[Repayment], as_of: NaiveDate) -> Vec<AccrualSegment> {
    if as_of < loan.loan_date {
        return Vec::new();
    }

    let mut reducing: Vec<&Repayment> = repayments
        .iter()
        .filter(|r| loan.reduces_principal(r))
        .collect();
    reducing.sort_by_key(|r| r.date);

    let mut segments = Vec::new();
    let mut principal = loan.principal;
    let mut start = loan.loan_date;

    for repayment in reducing {
        // later repayments fall outside the accrual window
        if repayment.date > as_of {
            break;
        }
        // a backdated repayment still steps the principal down, but no
        // negative-duration segment is accrued for it
        if repayment.date < start {
            principal -= repayment.amount;
            continue;
        }
        if let Some(segment) = accrue_segment(loan, principal, start, repayment.date) {
            segments.push(segment);
        }
        principal -= repayment.amount;
        start = repayment.date;
    }

    // the tail segment only accrues while principal remains outstanding
    if start <= as_of && principal.is_positive() {
        if let Some(segment) = accrue_segment(loan, principal, start, as_of) {
            segments.push(segment);
        }
    }

    segments
}

fn accrue_segment(loan: &Loan, principal: Money, from: NaiveDate, to: NaiveDate) -> Option<AccrualSegment> {
    let days = daycount::days_between(from, to);
    if days == 0 {
        return None;
    }

    let interest = match loan.interest_type {
        InterestType::Simple => {
            let daily_rate = loan.interest_rate.as_decimal() / loan.rate_period.day_basis();
            Money::from_decimal(principal.as_decimal() * daily_rate * Decimal::from(days))
        }
        InterestType::Compound => {
            // only whole elapsed periods are credited; leftover days within an
            // incomplete period carry no charge
            let periods = (Decimal::from(days) / loan.rate_period.compounding_days())
                .floor()
                .to_u32()
                .unwrap_or(0);
            if periods == 0 {
                Money::ZERO
            } else {
                let factor = growth_factor(loan.interest_rate.as_decimal(), periods);
                Money::from_decimal(principal.as_decimal() * (factor - Decimal::ONE))
            }
        }
    };

    Some(AccrualSegment {
        from,
        to,
        principal,
        days,
        interest,
    })
}
