//! Price formatting.
//!
//! Prices are plain `rust_decimal::Decimal` amounts in the store currency.
//! Arithmetic stays exact; only display rounds.

use rust_decimal::{Decimal, RoundingStrategy};

/// Format an amount for display, e.g. `$25.00`.
#[must_use]
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-${:.2}", rounded.abs())
    } else {
        format!("${:.2}", rounded.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(Decimal::from(25)), "$25.00");
        assert_eq!(format_price(Decimal::new(1999, 2)), "$19.99");
        assert_eq!(format_price(Decimal::new(10_005, 3)), "$10.01");
        assert_eq!(format_price(Decimal::new(-5, 0)), "-$5.00");
        assert_eq!(format_price(Decimal::ZERO), "$0.00");
    }
}
