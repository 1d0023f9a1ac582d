use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// unique identifier for a lendie (borrower)
pub type LendieId = Uuid;

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a repayment
pub type RepaymentId = Uuid;

/// how interest accrues on a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestType {
    Simple,
    Compound,
}

/// the period the quoted rate is stated against (12% *per month*, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatePeriod {
    Weekly,
    Monthly,
    Yearly,
}

impl RatePeriod {
    /// days the quoted rate spans, used to derive a daily simple rate
    ///
    /// monthly rates annualize through 365/12 rather than a fixed 30 days
    pub fn day_basis(&self) -> Decimal {
        match self {
            RatePeriod::Weekly => dec!(7),
            RatePeriod::Monthly => dec!(365) / dec!(12),
            RatePeriod::Yearly => dec!(365),
        }
    }

    /// length in days of one compounding period
    ///
    /// a compounding month is the mean calendar month (30.44 days)
    pub fn compounding_days(&self) -> Decimal {
        match self {
            RatePeriod::Weekly => dec!(7),
            RatePeriod::Monthly => dec!(30.44),
            RatePeriod::Yearly => dec!(365),
        }
    }

    /// number of quoted periods in a year, for rate annualization
    pub fn periods_per_year(&self) -> u32 {
        match self {
            RatePeriod::Weekly => 52,
            RatePeriod::Monthly => 12,
            RatePeriod::Yearly => 1,
        }
    }
}

/// installment cadence for EMI loans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmiFrequency {
    Weekly,
    Monthly,
    Yearly,
}

impl EmiFrequency {
    /// number of installments in a year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            EmiFrequency::Weekly => 52,
            EmiFrequency::Monthly => 12,
            EmiFrequency::Yearly => 1,
        }
    }
}

/// which part of the obligation a repayment reduces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RepaymentType {
    Principal,
    Interest,
    PrincipalInterest,
}

/// loan status, derived from the outstanding balance on every refresh
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoanStatus {
    Active,
    Closed,
}

/// kind of a projected upcoming payment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentKind {
    Emi,
    Lumpsum,
}

/// currency of a user's ledger; each ledger is single-currency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl CurrencyCode {
    /// display symbol for the currency
    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Inr => "\u{20b9}",
            CurrencyCode::Usd => "$",
            CurrencyCode::Eur => "\u{20ac}",
            CurrencyCode::Gbp => "\u{a3}",
        }
    }
}
