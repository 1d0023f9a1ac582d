use chrono::NaiveDate;

use crate::decimal::Money;
use crate::interest::accrued_interest;
use crate::model::{Loan, Repayment};
use crate::types::LoanStatus;

/// total amount received, regardless of repayment kind
pub fn amount_paid(repayments: &[Repayment]) -> Money {
    repayments.iter().map(|r| r.amount).sum()
}

/// principal plus accrued interest, less everything repaid
///
/// `repayments` must be the repayments of this loan. an overpaid loan yields
/// a negative balance; it is not clamped.
pub fn outstanding_balance(loan: &Loan, repayments: &[Repayment], as_of: NaiveDate) -> Money {
    loan.principal + accrued_interest(loan, repayments, as_of) - amount_paid(repayments)
}

/// status implied by the current balance: closed once less than one whole
/// currency unit remains outstanding
///
/// not sticky. it is a pure function of the balance, recomputed on every
/// read; adding or removing repayments can move a loan either way.
pub fn derived_status(loan: &Loan, repayments: &[Repayment], as_of: NaiveDate) -> LoanStatus {
    if outstanding_balance(loan, repayments, as_of) < Money::ONE {
        LoanStatus::Closed
    } else {
        LoanStatus::Active
    }
}
