//! Derived cart totals.

use crate::cart::{CartLine, Promotion};
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Subtotal, promotion discount and total for a set of lines.
///
/// Always derived from lines and the active promotion; never edited directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of unit price times quantity.
    pub subtotal: Money,
    /// Promotion discount on the subtotal.
    pub discount: Money,
    /// `subtotal - discount`.
    pub total: Money,
    /// Sum of pre-markdown prices times quantity.
    pub list_total: Money,
}

impl CartTotals {
    pub fn zero(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            subtotal: zero,
            discount: zero,
            total: zero,
            list_total: zero,
        }
    }

    pub fn compute(lines: &[CartLine], promotion: Option<&Promotion>, currency: Currency) -> Self {
        let subtotal = lines
            .iter()
            .fold(Money::zero(currency), |acc, line| acc + line.line_total());
        let list_total = lines
            .iter()
            .fold(Money::zero(currency), |acc, line| acc + line.list_total());
        let discount = promotion
            .map(|p| p.discount_on(subtotal))
            .unwrap_or_else(|| Money::zero(currency));

        Self {
            subtotal,
            discount,
            total: subtotal - discount,
            list_total,
        }
    }

    /// Savings from item markdowns, excluding the promotion.
    pub fn markdown_savings(&self) -> Money {
        self.list_total - self.subtotal
    }

    pub fn has_discount(&self) -> bool {
        self.discount.amount_cents > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogItem, Category};

    fn line(id: &str, cents: i64, quantity: u32) -> CartLine {
        let item = CatalogItem::new(id, id, Money::new(cents, Currency::USD), Category::Snacks);
        CartLine {
            quantity,
            ..CartLine::new(item)
        }
    }

    #[test]
    fn test_totals_without_promotion() {
        let totals = CartTotals::compute(&[line("a", 199, 2), line("b", 500, 1)], None, Currency::USD);
        assert_eq!(totals.subtotal.amount_cents, 898);
        assert!(totals.discount.is_zero());
        assert_eq!(totals.total, totals.subtotal);
        assert!(totals.markdown_savings().is_zero());
    }

    #[test]
    fn test_totals_with_promotion() {
        let promo = Promotion::new("SAVE10", 10, "");
        let totals = CartTotals::compute(&[line("a", 1000, 3)], Some(&promo), Currency::USD);
        assert_eq!(totals.subtotal.amount_cents, 3000);
        assert_eq!(totals.discount.amount_cents, 300);
        assert_eq!(totals.total.amount_cents, 2700);
        assert!(totals.has_discount());
    }

    #[test]
    fn test_empty_cart_is_zero() {
        let promo = Promotion::new("ORBIT20", 20, "");
        assert_eq!(CartTotals::compute(&[], Some(&promo), Currency::EUR), CartTotals::zero(Currency::EUR));
    }
}
