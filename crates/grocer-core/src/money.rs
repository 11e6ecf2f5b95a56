//! Money type for prices and cart totals.
//!
//! Amounts are integer minor units (cents) so that subtotal, discount and
//! total always add up exactly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    INR,
    JPY,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::INR => "INR",
            Currency::JPY => "JPY",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::INR => "\u{20b9}",
            Currency::JPY => "\u{00a5}",
        }
    }

    /// Number of minor-unit digits.
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Parse a currency code, case-insensitively.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "INR" => Some(Currency::INR),
            "JPY" => Some(Currency::JPY),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A monetary amount in the smallest unit of its currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    pub amount_cents: i64,
    pub currency: Currency,
}

impl Money {
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Convert a decimal amount, rounding to the nearest minor unit.
    ///
    /// ```
    /// use grocer_core::money::{Currency, Money};
    /// let price = Money::from_decimal(4.99, Currency::USD);
    /// assert_eq!(price.amount_cents, 499);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        Self::new((amount * multiplier as f64).round() as i64, currency)
    }

    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount_cents < 0
    }

    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format with symbol, e.g. "$4.99".
    pub fn display(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), self.to_decimal())
    }

    /// Multiply by a quantity, saturating at the numeric bounds.
    pub fn times(&self, quantity: u32) -> Money {
        Money::new(
            self.amount_cents.saturating_mul(i64::from(quantity)),
            self.currency,
        )
    }

    /// `percent`% of this amount, rounded half up.
    pub fn percent_of(&self, percent: u8) -> Money {
        let scaled = i128::from(self.amount_cents) * i128::from(percent);
        let rounded = (scaled + 50).div_euclid(100);
        let clamped = rounded.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
        Money::new(clamped, self.currency)
    }

    /// Sum amounts, starting from zero in `currency`.
    pub fn total<'a>(iter: impl IntoIterator<Item = &'a Money>, currency: Currency) -> Money {
        iter.into_iter().fold(Money::zero(currency), |acc, m| acc + *m)
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        debug_assert_eq!(self.currency, other.currency, "currency mismatch");
        Money::new(self.amount_cents.saturating_add(other.amount_cents), self.currency)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        debug_assert_eq!(self.currency, other.currency, "currency mismatch");
        Money::new(self.amount_cents.saturating_sub(other.amount_cents), self.currency)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        let mut iter = iter.peekable();
        let currency = iter.peek().map(|m| m.currency).unwrap_or_default();
        iter.fold(Money::zero(currency), |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_decimal_rounds() {
        assert_eq!(Money::from_decimal(1.999, Currency::USD).amount_cents, 200);
        assert_eq!(Money::from_decimal(25.5, Currency::JPY).amount_cents, 26);
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::new(499, Currency::USD).display(), "$4.99");
        assert_eq!(Money::new(1200, Currency::JPY).display(), "\u{00a5}1200");
    }

    #[test]
    fn test_times() {
        let m = Money::new(250, Currency::USD);
        assert_eq!(m.times(3).amount_cents, 750);
        assert_eq!(m.times(0).amount_cents, 0);
    }

    #[test]
    fn test_percent_of_rounds_half_up() {
        let m = Money::new(1005, Currency::USD);
        assert_eq!(m.percent_of(10).amount_cents, 101); // 100.5 -> 101
        assert_eq!(m.percent_of(0).amount_cents, 0);
        assert_eq!(m.percent_of(100).amount_cents, 1005);
    }

    #[test]
    fn test_sum() {
        let values = [Money::new(100, Currency::EUR), Money::new(250, Currency::EUR)];
        let total: Money = values.iter().copied().sum();
        assert_eq!(total, Money::new(350, Currency::EUR));
        assert_eq!(Money::total(&values, Currency::EUR).amount_cents, 350);
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("usd"), Some(Currency::USD));
        assert_eq!(Currency::from_code("XYZ"), None);
    }
}
