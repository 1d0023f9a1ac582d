use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::interest::accrued_interest;
use crate::model::{Lendie, Loan};
use crate::types::LoanStatus;

/// per-borrower roll-up of principal, interest to date, and repayments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LendieTotals {
    pub principal: Money,
    pub interest: Money,
    pub repayments: Money,
}

impl LendieTotals {
    /// what the borrower still owes across the selected loans
    pub fn outstanding(&self) -> Money {
        self.principal + self.interest - self.repayments
    }
}

impl std::ops::Add for LendieTotals {
    type Output = LendieTotals;

    fn add(self, other: LendieTotals) -> LendieTotals {
        LendieTotals {
            principal: self.principal + other.principal,
            interest: self.interest + other.interest,
            repayments: self.repayments + other.repayments,
        }
    }
}

/// totals over active loans only: archived and closed loans are excluded
///
/// relies on the cached status field; refresh statuses before aggregating
pub fn active_totals(lendie: &Lendie, as_of: NaiveDate) -> LendieTotals {
    totals_for(lendie, as_of, |loan| {
        !loan.is_archived && loan.status == LoanStatus::Active
    })
}

/// lifetime totals: closed loans count, archived loans never do
pub fn lifetime_totals(lendie: &Lendie, as_of: NaiveDate) -> LendieTotals {
    totals_for(lendie, as_of, |loan| !loan.is_archived)
}

fn totals_for(
    lendie: &Lendie,
    as_of: NaiveDate,
    include: impl Fn(&Loan) -> bool,
) -> LendieTotals {
    let mut totals = LendieTotals::default();
    for loan in lendie.loans.iter().filter(|l| include(l)) {
        let repayments = lendie.repayments_for(loan.id);
        totals.principal += loan.principal;
        totals.interest += accrued_interest(loan, &repayments, as_of);
        totals.repayments += crate::balance::amount_paid(&repayments);
    }
    totals
}

/// active-only totals summed across every borrower
pub fn grand_active_totals(lendies: &[Lendie], as_of: NaiveDate) -> LendieTotals {
    lendies
        .iter()
        .map(|l| active_totals(l, as_of))
        .fold(LendieTotals::default(), |acc, t| acc + t)
}

/// lifetime totals summed across every borrower
pub fn grand_lifetime_totals(lendies: &[Lendie], as_of: NaiveDate) -> LendieTotals {
    lendies
        .iter()
        .map(|l| lifetime_totals(l, as_of))
        .fold(LendieTotals::default(), |acc, t| acc + t)
}

/// earliest lump-sum due date on or after `today` among non-archived loans
pub fn next_due_date(lendie: &Lendie, today: NaiveDate) -> Option<NaiveDate> {
    lendie
        .loans
        .iter()
        .filter(|l| !l.is_archived)
        .filter_map(|l| l.due_date())
        .filter(|d| *d >= today)
        .min()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::model::Repayment;
    use crate::types::{InterestType, RatePeriod, RepaymentType};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn lumpsum(principal: i64, due: NaiveDate) -> Loan {
        Loan::lumpsum(
            Money::from_major(principal),
            Rate::from_percentage(dec!(12)),
            RatePeriod::Yearly,
            InterestType::Simple,
            date(2024, 1, 1),
            due,
        )
    }

    fn sample_lendie() -> Lendie {
        let mut lendie = Lendie::new("Meena", "9000000002");

        let active = lumpsum(10_000, date(2024, 12, 1));
        let mut closed = lumpsum(2_000, date(2024, 8, 1));
        closed.status = LoanStatus::Closed;
        let mut archived = lumpsum(7_000, date(2024, 10, 1));
        archived.is_archived = true;

        lendie.repayments.push(Repayment::new(
            active.id,
            Money::from_major(1_000),
            date(2024, 3, 1),
            RepaymentType::Principal,
        ));
        lendie.repayments.push(Repayment::new(
            closed.id,
            Money::from_major(2_100),
            date(2024, 5, 1),
            RepaymentType::PrincipalInterest,
        ));
        lendie.repayments.push(Repayment::new(
            archived.id,
            Money::from_major(500),
            date(2024, 4, 1),
            RepaymentType::Principal,
        ));

        lendie.loans = vec![active, closed, archived];
        lendie
    }

    #[test]
    fn test_active_totals_exclude_closed_and_archived() {
        let lendie = sample_lendie();
        let totals = active_totals(&lendie, date(2024, 6, 1));

        assert_eq!(totals.principal, Money::from_major(10_000));
        assert_eq!(totals.repayments, Money::from_major(1_000));
        assert!(totals.interest.is_positive());
    }

    #[test]
    fn test_lifetime_totals_include_closed() {
        let lendie = sample_lendie();
        let totals = lifetime_totals(&lendie, date(2024, 6, 1));

        assert_eq!(totals.principal, Money::from_major(12_000));
        // archived loan's repayment stays out of the lifetime roll-up
        assert_eq!(totals.repayments, Money::from_major(3_100));
    }

    #[test]
    fn test_grand_totals_sum_across_lendies() {
        let lendies = [sample_lendie(), sample_lendie()];
        let as_of = date(2024, 6, 1);

        let single = active_totals(&lendies[0], as_of);
        let grand = grand_active_totals(&lendies, as_of);
        assert_eq!(grand.principal, single.principal + single.principal);
        assert_eq!(grand.repayments, single.repayments + single.repayments);
    }

    #[test]
    fn test_outstanding_identity() {
        let lendie = sample_lendie();
        let totals = active_totals(&lendie, date(2024, 6, 1));
        assert_eq!(
            totals.outstanding(),
            totals.principal + totals.interest - totals.repayments
        );
    }

    #[test]
    fn test_next_due_date_skips_past_and_archived() {
        let lendie = sample_lendie();
        // aug 1 (closed loan) is the earliest future due date; the archived
        // loan's oct 1 never counts
        assert_eq!(next_due_date(&lendie, date(2024, 6, 1)), Some(date(2024, 8, 1)));
        assert_eq!(next_due_date(&lendie, date(2024, 9, 1)), Some(date(2024, 12, 1)));
        assert_eq!(next_due_date(&lendie, date(2025, 1, 1)), None);
    }
}
