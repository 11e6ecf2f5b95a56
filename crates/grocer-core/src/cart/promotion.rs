//! Promotion codes.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::money::Money;

/// A percentage-off code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Promotion {
    pub code: String,
    /// Percent off the subtotal, 0 to 100.
    pub percent: u8,
    pub description: String,
}

impl Promotion {
    pub fn new(code: impl Into<String>, percent: u8, description: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            percent,
            description: description.into(),
        }
    }

    /// Case-insensitive code comparison.
    pub fn matches(&self, code: &str) -> bool {
        self.code.eq_ignore_ascii_case(code.trim())
    }

    pub fn discount_on(&self, subtotal: Money) -> Money {
        subtotal.percent_of(self.percent)
    }
}

/// The fixed set of codes a cart accepts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PromotionTable {
    promotions: Vec<Promotion>,
}

impl PromotionTable {
    /// Build a table. Codes must be non-empty, unique ignoring case, and
    /// percentages at most 100.
    pub fn new(promotions: Vec<Promotion>) -> Result<Self> {
        for (i, promo) in promotions.iter().enumerate() {
            if promo.code.trim().is_empty() {
                return Err(StoreError::InvalidPromotion {
                    code: promo.code.clone(),
                    reason: "code is empty".to_string(),
                });
            }
            if promo.percent > 100 {
                return Err(StoreError::InvalidPromotion {
                    code: promo.code.clone(),
                    reason: format!("percent {} exceeds 100", promo.percent),
                });
            }
            if promotions[..i].iter().any(|p| p.matches(&promo.code)) {
                return Err(StoreError::InvalidPromotion {
                    code: promo.code.clone(),
                    reason: "duplicate code".to_string(),
                });
            }
        }
        Ok(Self { promotions })
    }

    pub fn lookup(&self, code: &str) -> Option<&Promotion> {
        self.promotions.iter().find(|p| p.matches(code))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Promotion> {
        self.promotions.iter()
    }

    pub fn len(&self) -> usize {
        self.promotions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.promotions.is_empty()
    }
}

impl Default for PromotionTable {
    fn default() -> Self {
        Self {
            promotions: vec![
                Promotion::new("SAVE10", 10, "10% off your order"),
                Promotion::new("FREESHIP", 0, "Free Shipping"),
                Promotion::new("ORBIT20", 20, "20% off for Orbit members"),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_default_lookup_ignores_case() {
        let table = PromotionTable::default();
        assert_eq!(table.lookup("save10").unwrap().percent, 10);
        assert_eq!(table.lookup("Orbit20").unwrap().percent, 20);
        assert!(table.lookup("SAVE50").is_none());
    }

    #[test]
    fn test_discount() {
        let promo = Promotion::new("ORBIT20", 20, "");
        let discount = promo.discount_on(Money::new(2550, Currency::USD));
        assert_eq!(discount.amount_cents, 510);
    }

    #[test]
    fn test_table_validation() {
        assert!(PromotionTable::new(vec![Promotion::new("BIG", 101, "")]).is_err());
        assert!(PromotionTable::new(vec![Promotion::new(" ", 5, "")]).is_err());
        assert!(PromotionTable::new(vec![
            Promotion::new("DUP", 5, ""),
            Promotion::new("dup", 10, ""),
        ])
        .is_err());
        assert_eq!(PromotionTable::new(vec![Promotion::new("OK", 100, "")]).unwrap().len(), 1);
    }
}
