use rust_decimal::Decimal;

use crate::decimal::Money;
use crate::interest::growth_factor;
use crate::model::{Loan, LoanTerms};

/// fixed installment amount for an amortizing loan
///
/// the quoted rate is annualized first (weekly x52, monthly x12), then scaled
/// down to one EMI period, so a loan can be quoted monthly but repaid weekly.
/// returns zero for non-EMI loans and degenerate tenures.
pub fn emi_amount(loan: &Loan) -> Money {
    let LoanTerms::Emi { frequency, tenure } = loan.terms else {
        return Money::ZERO;
    };
    if tenure == 0 {
        return Money::ZERO;
    }

    let annual_rate = loan.interest_rate.as_decimal()
        * Decimal::from(loan.rate_period.periods_per_year());
    let period_rate = annual_rate / Decimal::from(frequency.periods_per_year());

    if period_rate.is_zero() {
        return loan.principal / Decimal::from(tenure);
    }

    // EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
    let factor = growth_factor(period_rate, tenure);
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Money::ZERO;
    }

    Money::from_decimal(loan.principal.as_decimal() * period_rate * factor / denominator)
}
