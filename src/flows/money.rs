//! Money amounts
//!
//! Amounts travel through the harness as strings from the fixture dataset
//! and are added as exact decimals, never floats. Display formatting
//! matches the terminal's convention: thousands grouped with a
//! non-breaking space, a dot before any fractional part.

use std::str::FromStr;

use bigdecimal::BigDecimal;

use crate::common::{Error, Result};

/// Non-breaking space between thousands groups and before currency labels
pub const NBSP: char = '\u{a0}';

fn parse(amount: &str) -> Result<BigDecimal> {
    BigDecimal::from_str(amount.trim())
        .map_err(|_| Error::Fixture(format!("invalid amount '{}'", amount)))
}

/// Exact sum of a base amount and a tip/cashback amount
///
/// The result keeps the natural scale of the operands: "1" + "5" is "6",
/// "1.50" + "0.50" is "2.00".
pub fn sum_amounts(base: &str, extra: &str) -> Result<String> {
    let sum = parse(base)? + parse(extra)?;
    Ok(sum.to_string())
}

/// Render an amount at exactly two decimals (limit announcements)
pub fn two_decimals(amount: &str) -> Result<String> {
    Ok(parse(amount)?.with_scale(2).to_string())
}

/// Format an amount the way the terminal displays it: integer part grouped
/// in threes with a non-breaking space
pub fn format_display(amount: &str) -> Result<String> {
    let canonical = parse(amount)?.to_string();

    let (body, fraction) = match canonical.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (canonical.as_str(), None),
    };
    let (sign, digits) = match body.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", body),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 4);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(NBSP);
        }
        grouped.push(ch);
    }

    let mut out = format!("{}{}", sign, grouped);
    if let Some(frac) = fraction {
        out.push('.');
        out.push_str(frac);
    }
    Ok(out)
}

/// Amount line as shown on the card-read screen: formatted amount, a
/// non-breaking space, the currency label
pub fn display_with_currency(amount: &str, currency_label: &str) -> Result<String> {
    Ok(format!("{}{}{}", format_display(amount)?, NBSP, currency_label))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addition_is_exact() {
        assert_eq!(sum_amounts("1", "5").unwrap(), "6");
        assert_eq!(sum_amounts("0.1", "0.2").unwrap(), "0.3");
        assert_eq!(sum_amounts("1.50", "0.50").unwrap(), "2.00");
        // Never a floating-point artifact
        assert_eq!(two_decimals(&sum_amounts("1", "5").unwrap()).unwrap(), "6.00");
    }

    #[test]
    fn two_decimal_rendering_for_limit_copy() {
        assert_eq!(two_decimals("3000").unwrap(), "3000.00");
        assert_eq!(two_decimals("10").unwrap(), "10.00");
        assert_eq!(two_decimals("5000").unwrap(), "5000.00");
    }

    #[test]
    fn thousands_group_with_nbsp() {
        assert_eq!(format_display("1").unwrap(), "1");
        assert_eq!(format_display("999").unwrap(), "999");
        assert_eq!(format_display("1000").unwrap(), "1\u{a0}000");
        assert_eq!(format_display("1234567").unwrap(), "1\u{a0}234\u{a0}567");
        assert_eq!(format_display("1234.50").unwrap(), "1\u{a0}234.50");
        assert_eq!(format_display("-1000").unwrap(), "-1\u{a0}000");
    }

    #[test]
    fn card_read_line_matches_terminal_convention() {
        assert_eq!(display_with_currency("1", "Kč").unwrap(), "1\u{a0}Kč");
        assert_eq!(
            display_with_currency("1000", "Kč").unwrap(),
            "1\u{a0}000\u{a0}Kč"
        );
    }

    #[test]
    fn malformed_amounts_are_fixture_faults() {
        assert!(matches!(
            format_display("1,5").unwrap_err(),
            Error::Fixture(_)
        ));
        assert!(matches!(sum_amounts("x", "1").unwrap_err(), Error::Fixture(_)));
    }
}
