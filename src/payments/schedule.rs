use chrono::{Duration, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::daycount::add_periods;
use crate::decimal::Money;
use crate::model::{Lendie, LoanTerms};
use crate::payments::emi_amount;
use crate::types::{LendieId, LoanId, LoanStatus, PaymentKind};

/// how far ahead the dashboard looks for payments coming due
pub const DEFAULT_WINDOW_DAYS: i64 = 30;

/// a payment expected within the projection window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingPayment {
    pub date: NaiveDate,
    pub lendie_id: LendieId,
    pub lendie_name: String,
    pub loan_id: LoanId,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: PaymentKind,
}

/// EMI and lump-sum due dates falling within `[today, today + window_days]`
///
/// archived and closed loans are skipped. an EMI installment already covered
/// by repayments received since the previous installment's due date is
/// considered paid and omitted. the result is ordered by date, ties keeping
/// input order.
pub fn upcoming_payments(
    lendies: &[Lendie],
    today: NaiveDate,
    window_days: i64,
) -> Vec<UpcomingPayment> {
    let window_end = today + Duration::days(window_days);
    let mut upcoming = Vec::new();

    for lendie in lendies {
        for loan in &lendie.loans {
            if loan.is_archived || loan.status != LoanStatus::Active {
                continue;
            }

            match loan.terms {
                LoanTerms::Emi { frequency, tenure } => {
                    let emi = emi_amount(loan);
                    for installment in 1..=tenure {
                        let due = add_periods(loan.loan_date, frequency, installment);
                        if due < today || due > window_end {
                            continue;
                        }

                        // payments received since the previous due date count
                        // toward this installment
                        let previous_due = add_periods(loan.loan_date, frequency, installment - 1);
                        let paid: Money = lendie
                            .repayments
                            .iter()
                            .filter(|r| {
                                r.loan_id == loan.id && r.date > previous_due && r.date <= due
                            })
                            .map(|r| r.amount)
                            .sum();
                        if paid >= emi {
                            continue;
                        }

                        upcoming.push(UpcomingPayment {
                            date: due,
                            lendie_id: lendie.id,
                            lendie_name: lendie.name.clone(),
                            loan_id: loan.id,
                            amount: emi,
                            kind: PaymentKind::Emi,
                        });
                    }
                }
                LoanTerms::Lumpsum { due_date } => {
                    // projected amount is the principal; accrued interest is
                    // settled separately at collection time
                    if due_date >= today && due_date <= window_end {
                        upcoming.push(UpcomingPayment {
                            date: due_date,
                            lendie_id: lendie.id,
                            lendie_name: lendie.name.clone(),
                            loan_id: loan.id,
                            amount: loan.principal,
                            kind: PaymentKind::Lumpsum,
                        });
                    }
                }
            }
        }
    }

    upcoming.sort_by_key(|p| p.date);
    upcoming
}

/// projection over the default window, with "today" taken from a time provider
pub fn upcoming_payments_now(
    lendies: &[Lendie],
    time_provider: &SafeTimeProvider,
) -> Vec<UpcomingPayment> {
    upcoming_payments(
        lendies,
        time_provider.now().date_naive(),
        DEFAULT_WINDOW_DAYS,
    )
}
