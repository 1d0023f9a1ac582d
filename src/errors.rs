use thiserror::Error;

use crate::types::{LoanId, RepaymentId};

/// integrity errors raised at the snapshot boundary
///
/// the calculation engine itself is total: guarded edge cases return zero or
/// an unclamped value instead of failing. errors only surface when a loaded
/// snapshot breaks referential integrity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("repayment {repayment} references unknown loan {loan}")]
    UnknownLoan {
        repayment: RepaymentId,
        loan: LoanId,
    },

    #[error("repayment {repayment} references loan {loan} owned by another lendie")]
    ForeignRepayment {
        repayment: RepaymentId,
        loan: LoanId,
    },

    #[error("duplicate loan id {0}")]
    DuplicateLoanId(LoanId),

    #[error("loan terms do not match the isEmi flag")]
    MalformedTerms,
}

pub type Result<T> = std::result::Result<T, LedgerError>;
