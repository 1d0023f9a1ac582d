pub mod aggregate;
pub mod balance;
pub mod daycount;
pub mod decimal;
pub mod errors;
pub mod format;
pub mod interest;
pub mod ledger;
pub mod model;
pub mod payments;
pub mod types;

// re-export key types
pub use aggregate::{
    active_totals, grand_active_totals, grand_lifetime_totals, lifetime_totals, next_due_date,
    LendieTotals,
};
pub use balance::{amount_paid, derived_status, outstanding_balance};
pub use decimal::{Money, Rate};
pub use errors::{LedgerError, Result};
pub use interest::{accrual_segments, accrued_interest, AccrualSegment};
pub use ledger::LedgerSnapshot;
pub use model::{Lendie, Loan, LoanTerms, Repayment};
pub use payments::{
    emi_amount, upcoming_payments, upcoming_payments_now, UpcomingPayment, DEFAULT_WINDOW_DAYS,
};
pub use types::{
    CurrencyCode, EmiFrequency, InterestType, LendieId, LoanId, LoanStatus, PaymentKind,
    RatePeriod, RepaymentId, RepaymentType,
};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
