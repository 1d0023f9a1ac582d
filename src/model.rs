use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};
use crate::errors::LedgerError;
use crate::types::{
    EmiFrequency, InterestType, LendieId, LoanId, LoanStatus, RatePeriod, RepaymentId,
    RepaymentType,
};

/// repayment terms of a loan
///
/// exactly one shape exists per loan: amortizing installments or a single
/// lump-sum due date. the persisted flat fields (isEmi, emiFrequency, tenure,
/// dueDate) convert through [`RawTerms`], which enforces that invariant on
/// deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTerms", into = "RawTerms")]
pub enum LoanTerms {
    /// amortizing installment loan
    Emi { frequency: EmiFrequency, tenure: u32 },
    /// lump-sum loan repayable on a single date
    Lumpsum { due_date: NaiveDate },
}

/// persisted flat shape of the loan terms
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTerms {
    is_emi: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    emi_frequency: Option<EmiFrequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tenure: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    due_date: Option<NaiveDate>,
}

impl TryFrom<RawTerms> for LoanTerms {
    type Error = LedgerError;

    fn try_from(raw: RawTerms) -> Result<Self, Self::Error> {
        match raw {
            RawTerms {
                is_emi: true,
                emi_frequency: Some(frequency),
                tenure: Some(tenure),
                due_date: None,
            } => Ok(LoanTerms::Emi { frequency, tenure }),
            RawTerms {
                is_emi: false,
                emi_frequency: None,
                tenure: None,
                due_date: Some(due_date),
            } => Ok(LoanTerms::Lumpsum { due_date }),
            _ => Err(LedgerError::MalformedTerms),
        }
    }
}

impl From<LoanTerms> for RawTerms {
    fn from(terms: LoanTerms) -> Self {
        match terms {
            LoanTerms::Emi { frequency, tenure } => RawTerms {
                is_emi: true,
                emi_frequency: Some(frequency),
                tenure: Some(tenure),
                due_date: None,
            },
            LoanTerms::Lumpsum { due_date } => RawTerms {
                is_emi: false,
                emi_frequency: None,
                tenure: None,
                due_date: Some(due_date),
            },
        }
    }
}

/// a loan extended to a lendie
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: LoanId,
    pub principal: Money,
    pub interest_rate: Rate,
    pub rate_period: RatePeriod,
    pub interest_type: InterestType,
    /// interest accrues from this date
    pub loan_date: NaiveDate,
    #[serde(flatten)]
    pub terms: LoanTerms,
    /// derived cache, recomputed from the balance on every refresh
    pub status: LoanStatus,
    #[serde(default)]
    pub is_archived: bool,
}

impl Loan {
    /// create an amortizing installment loan
    pub fn emi(
        principal: Money,
        interest_rate: Rate,
        rate_period: RatePeriod,
        interest_type: InterestType,
        loan_date: NaiveDate,
        frequency: EmiFrequency,
        tenure: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            principal,
            interest_rate,
            rate_period,
            interest_type,
            loan_date,
            terms: LoanTerms::Emi { frequency, tenure },
            status: LoanStatus::Active,
            is_archived: false,
        }
    }

    /// create a lump-sum loan with a single due date
    pub fn lumpsum(
        principal: Money,
        interest_rate: Rate,
        rate_period: RatePeriod,
        interest_type: InterestType,
        loan_date: NaiveDate,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            principal,
            interest_rate,
            rate_period,
            interest_type,
            loan_date,
            terms: LoanTerms::Lumpsum { due_date },
            status: LoanStatus::Active,
            is_archived: false,
        }
    }

    pub fn is_emi(&self) -> bool {
        matches!(self.terms, LoanTerms::Emi { .. })
    }

    /// due date of a lump-sum loan
    pub fn due_date(&self) -> Option<NaiveDate> {
        match self.terms {
            LoanTerms::Lumpsum { due_date } => Some(due_date),
            LoanTerms::Emi { .. } => None,
        }
    }

    /// whether a repayment steps down the principal that interest accrues on
    ///
    /// EMI installments always reduce principal, whatever kind they were
    /// recorded with; lump-sum loans only step down on Principal and
    /// PrincipalInterest repayments
    pub fn reduces_principal(&self, repayment: &Repayment) -> bool {
        match self.terms {
            LoanTerms::Emi { .. } => true,
            LoanTerms::Lumpsum { .. } => matches!(
                repayment.kind,
                RepaymentType::Principal | RepaymentType::PrincipalInterest
            ),
        }
    }

    /// excluded from every balance, aggregate, and schedule calculation but
    /// retained for history
    pub fn is_counted(&self) -> bool {
        !self.is_archived
    }
}

/// a payment received against a loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Repayment {
    pub id: RepaymentId,
    pub loan_id: LoanId,
    pub amount: Money,
    /// date the payment was received; may be out of order relative to other
    /// repayments of the same loan
    pub date: NaiveDate,
    #[serde(rename = "type")]
    pub kind: RepaymentType,
}

impl Repayment {
    pub fn new(loan_id: LoanId, amount: Money, date: NaiveDate, kind: RepaymentType) -> Self {
        Self {
            id: Uuid::new_v4(),
            loan_id,
            amount,
            date,
            kind,
        }
    }
}

/// a borrower, owning loans and the repayments made against them
///
/// repayments are stored flat and reference loans by id, mirroring the
/// persisted record shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lendie {
    pub id: LendieId,
    pub name: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default)]
    pub loans: Vec<Loan>,
    #[serde(default)]
    pub repayments: Vec<Repayment>,
}

impl Lendie {
    pub fn new(name: impl Into<String>, mobile: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            mobile: mobile.into(),
            address: None,
            photo: None,
            loans: Vec::new(),
            repayments: Vec::new(),
        }
    }

    /// repayments recorded against one loan, in stored order
    pub fn repayments_for(&self, loan: LoanId) -> Vec<Repayment> {
        self.repayments
            .iter()
            .filter(|r| r.loan_id == loan)
            .cloned()
            .collect()
    }
}
