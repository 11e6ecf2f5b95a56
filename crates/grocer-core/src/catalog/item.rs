//! Catalog item records.

use crate::catalog::Category;
use crate::ids::ItemId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Shelf availability of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StockState {
    #[default]
    #[serde(alias = "in_stock")]
    Available,
    #[serde(alias = "low_stock")]
    Low,
    #[serde(alias = "out_of_stock")]
    Unavailable,
}

impl StockState {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockState::Available => "available",
            StockState::Low => "low",
            StockState::Unavailable => "unavailable",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockState::Available => "In Stock",
            StockState::Low => "Low Stock",
            StockState::Unavailable => "Out of Stock",
        }
    }
}

/// A purchasable product. Immutable once the catalog is built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
    /// Price actually charged per unit.
    pub price: Money,
    /// Pre-markdown price, when the item is on sale.
    pub original_price: Option<Money>,
    pub discount_percent: u8,
    pub stock: StockState,
    pub category: Category,
    pub rating: f32,
    pub review_count: u32,
    pub calories: u32,
    /// Free-form shelf-life note, e.g. "Exp: 5 days".
    pub expiry: Option<String>,
}

impl CatalogItem {
    /// Create an item with no markdown and default presentation fields.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        category: Category,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            original_price: None,
            discount_percent: 0,
            stock: StockState::Available,
            category,
            rating: 0.0,
            review_count: 0,
            calories: 0,
            expiry: None,
        }
    }

    /// Mark the item as marked down from `original`.
    pub fn with_original_price(mut self, original: Money, discount_percent: u8) -> Self {
        self.original_price = Some(original);
        self.discount_percent = discount_percent.min(100);
        self
    }

    pub fn with_stock(mut self, stock: StockState) -> Self {
        self.stock = stock;
        self
    }

    /// Price before markdown, or the selling price when not on sale.
    pub fn list_price(&self) -> Money {
        self.original_price.unwrap_or(self.price)
    }

    pub fn is_on_sale(&self) -> bool {
        self.original_price
            .map(|orig| orig.amount_cents > self.price.amount_cents)
            .unwrap_or(false)
    }
}

/// Catalog file row. Prices are decimal amounts in the catalog currency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub original_price: Option<f64>,
    #[serde(default)]
    pub discount_percent: u8,
    #[serde(default)]
    pub stock: StockState,
    pub category: Category,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub review_count: u32,
    #[serde(default)]
    pub calories: u32,
    #[serde(default)]
    pub expiry: Option<String>,
}

impl CatalogRecord {
    pub fn into_item(self, currency: Currency) -> CatalogItem {
        CatalogItem {
            id: ItemId::new(self.id),
            name: self.name,
            description: self.description,
            price: Money::from_decimal(self.price.max(0.0), currency),
            original_price: self
                .original_price
                .map(|p| Money::from_decimal(p.max(0.0), currency)),
            discount_percent: self.discount_percent.min(100),
            stock: self.stock,
            category: self.category,
            rating: self.rating,
            review_count: self.review_count,
            calories: self.calories,
            expiry: self.expiry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_price_falls_back_to_price() {
        let item = CatalogItem::new("milk", "Oat Milk", Money::new(349, Currency::USD), Category::Dairy);
        assert_eq!(item.list_price(), item.price);
        assert!(!item.is_on_sale());

        let item = item.with_original_price(Money::new(399, Currency::USD), 12);
        assert_eq!(item.list_price().amount_cents, 399);
        assert!(item.is_on_sale());
    }

    #[test]
    fn test_record_conversion_clamps_negative_prices() {
        let record: CatalogRecord = serde_json::from_str(
            r#"{"id":"x","name":"Bagel","price":-1.0,"category":"bakery","stock":"low_stock"}"#,
        )
        .unwrap();
        let item = record.into_item(Currency::USD);
        assert_eq!(item.price.amount_cents, 0);
        assert_eq!(item.stock, StockState::Low);
    }
}
