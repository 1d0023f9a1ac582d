use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::decimal::Money;
use crate::types::CurrencyCode;

/// format an amount with Indian-system digit grouping (lakhs, crores)
///
/// whole amounts carry no decimal part (100000 -> "1,00,000"); fractional
/// amounts show exactly two decimals (100.5 -> "100.50")
pub fn format_amount(amount: Money) -> String {
    let value = amount.as_decimal();
    let negative = value < Decimal::ZERO;
    let value = value.abs();

    let (whole, cents) = if value.fract().is_zero() {
        (value.trunc(), None)
    } else {
        let rounded = value.round_dp(2);
        let cents = (rounded.fract() * dec!(100)).to_u32().unwrap_or(0);
        (rounded.trunc(), Some(cents))
    };

    let mut out = group_indian(&whole.normalize().to_string());
    if let Some(cents) = cents {
        out.push_str(&format!(".{cents:02}"));
    }
    if negative {
        out.insert(0, '-');
    }
    out
}

/// format with the ledger's currency symbol prefixed
pub fn format_currency(amount: Money, currency: CurrencyCode) -> String {
    format!("{}{}", currency.symbol(), format_amount(amount))
}

// last three digits group together, then pairs: 1234567 -> 12,34,567
fn group_indian(digits: &str) -> String {
    let n = digits.len();
    if n <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(n - 3);
    let chars: Vec<char> = head.chars().collect();
    let mut groups: Vec<String> = Vec::new();
    let mut end = chars.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(chars[start..end].iter().collect());
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
