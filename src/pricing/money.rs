use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY_DP: u32 = 2;

/// Rounds a currency amount half-up to two decimal places.
///
/// Rounding works on the shortest decimal representation of the value, so
/// `1.005` becomes `1.01` even though its binary form sits just below the
/// midpoint. Every monetary field goes through here.
pub fn round2(amount: f64) -> f64 {
    if !amount.is_finite() {
        return amount;
    }

    let decimal: Decimal = match amount.to_string().parse() {
        Ok(decimal) => decimal,
        Err(_) => return amount,
    };

    decimal
        .round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(amount)
}

/// Validates an ISO 4217 style currency code and returns it uppercased.
pub fn normalize_currency(code: &str) -> Option<String> {
    let code = code.trim();

    if code.len() == 3 && code.chars().all(|c| c.is_ascii_alphabetic()) {
        Some(code.to_ascii_uppercase())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round2(1.005), 1.01);
        assert_eq!(round2(2.675), 2.68);
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(0.124), 0.12);
        assert_eq!(round2(20.5), 20.5);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn rounds_float_noise_away() {
        assert_eq!(round2(0.1 + 0.2), 0.3);
        assert_eq!(round2(1.2 * 3.0), 3.6);
    }

    #[test]
    fn currency_codes() {
        assert_eq!(normalize_currency("usd"), Some("USD".into()));
        assert_eq!(normalize_currency(" LKR "), Some("LKR".into()));
        assert_eq!(normalize_currency("US"), None);
        assert_eq!(normalize_currency("U$D"), None);
    }
}
