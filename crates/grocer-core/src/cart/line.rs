//! Cart lines and substitution preferences.

use crate::catalog::CatalogItem;
use crate::ids::ItemId;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum quantity held on a single line.
pub const MAX_QUANTITY_PER_LINE: u32 = 9999;

/// What the picker should do when an item is out of stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SubstitutionPreference {
    #[default]
    BestMatch,
    SameBrand,
    #[serde(alias = "no-substitution")]
    None,
}

impl SubstitutionPreference {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubstitutionPreference::BestMatch => "best-match",
            SubstitutionPreference::SameBrand => "same-brand",
            SubstitutionPreference::None => "none",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SubstitutionPreference::BestMatch => "Best Match",
            SubstitutionPreference::SameBrand => "Same Brand",
            SubstitutionPreference::None => "No Substitution",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "best-match" | "best" => Some(SubstitutionPreference::BestMatch),
            "same-brand" | "brand" => Some(SubstitutionPreference::SameBrand),
            "none" | "no-substitution" => Some(SubstitutionPreference::None),
            _ => None,
        }
    }
}

impl fmt::Display for SubstitutionPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A catalog item in the cart. `quantity` is at least 1 while the line exists.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item: CatalogItem,
    pub quantity: u32,
    pub substitution: SubstitutionPreference,
}

impl CartLine {
    pub fn new(item: CatalogItem) -> Self {
        Self {
            item,
            quantity: 1,
            substitution: SubstitutionPreference::default(),
        }
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.item.price.times(self.quantity)
    }

    /// Pre-markdown price times quantity.
    pub fn list_total(&self) -> Money {
        self.item.list_price().times(self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::Currency;

    #[test]
    fn test_line_totals() {
        let item = CatalogItem::new("bread", "Rye Bread", Money::new(300, Currency::USD), Category::Bakery)
            .with_original_price(Money::new(400, Currency::USD), 25);
        let mut line = CartLine::new(item);
        line.quantity = 3;

        assert_eq!(line.line_total().amount_cents, 900);
        assert_eq!(line.list_total().amount_cents, 1200);
        assert_eq!(line.substitution, SubstitutionPreference::BestMatch);
    }

    #[test]
    fn test_parse_preference() {
        assert_eq!(SubstitutionPreference::parse("Same_Brand"), Some(SubstitutionPreference::SameBrand));
        assert_eq!(SubstitutionPreference::parse("no-substitution"), Some(SubstitutionPreference::None));
        assert_eq!(SubstitutionPreference::parse("any"), None);
    }
}
