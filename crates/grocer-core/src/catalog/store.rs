//! Read-only catalog store.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::catalog::{CatalogItem, CatalogRecord, Category};
use crate::error::{Result, StoreError};
use crate::ids::ItemId;
use crate::money::Currency;

/// Items shown in the home screen's smart list.
pub const SMART_LIST_LEN: usize = 10;
/// Items shown in the express strip, after the smart list.
pub const EXPRESS_LEN: usize = 5;

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    items: Vec<CatalogRecord>,
}

/// The list of purchasable items, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct CatalogStore {
    items: Vec<CatalogItem>,
    index: HashMap<ItemId, usize>,
}

impl CatalogStore {
    /// Build a catalog, rejecting duplicate ids.
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self> {
        let mut index = HashMap::with_capacity(items.len());
        for (pos, item) in items.iter().enumerate() {
            if index.insert(item.id.clone(), pos).is_some() {
                return Err(StoreError::DuplicateItem(item.id.to_string()));
            }
        }
        debug!(items = items.len(), "catalog built");
        Ok(Self { items, index })
    }

    pub fn from_records(records: Vec<CatalogRecord>, currency: Currency) -> Result<Self> {
        Self::from_items(records.into_iter().map(|r| r.into_item(currency)).collect())
    }

    /// Load a catalog file: a JSON array of records, or TOML with `[[items]]`.
    pub fn load(path: impl AsRef<Path>, currency: Currency) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records: Vec<CatalogRecord> = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => {
                serde_json::from_str(&content).map_err(|e| StoreError::parse(path, e))?
            }
            _ => {
                toml::from_str::<TomlCatalog>(&content)
                    .map_err(|e| StoreError::parse(path, e))?
                    .items
            }
        };

        Self::from_records(records, currency)
    }

    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem> {
        self.index.get(id).map(|&pos| &self.items[pos])
    }

    /// Look up an item, failing with `ItemNotFound`.
    pub fn require(&self, id: &ItemId) -> Result<&CatalogItem> {
        self.get(id)
            .ok_or_else(|| StoreError::ItemNotFound(id.to_string()))
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn by_category(&self, category: Category) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter().filter(move |i| i.category == category)
    }

    /// Case-insensitive substring match on the item name. An empty query
    /// matches everything.
    pub fn search<'a>(&'a self, query: &str) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        let needle = query.trim().to_lowercase();
        self.items
            .iter()
            .filter(move |i| needle.is_empty() || i.name.to_lowercase().contains(&needle))
    }

    /// Leading items featured on the home screen.
    pub fn smart_list(&self) -> &[CatalogItem] {
        &self.items[..self.items.len().min(SMART_LIST_LEN)]
    }

    /// Items following the smart list.
    pub fn express(&self) -> &[CatalogItem] {
        let start = self.items.len().min(SMART_LIST_LEN);
        let end = self.items.len().min(SMART_LIST_LEN + EXPRESS_LEN);
        &self.items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(id: &str, name: &str, category: Category) -> CatalogItem {
        CatalogItem::new(id, name, Money::new(199, Currency::USD), category)
    }

    fn sample(n: usize) -> CatalogStore {
        let items = (0..n)
            .map(|i| item(&format!("item-{i}"), &format!("Fresh Item {i}"), Category::Pantry))
            .collect();
        CatalogStore::from_items(items).unwrap()
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let result = CatalogStore::from_items(vec![
            item("a", "Apple", Category::Fruits),
            item("a", "Avocado", Category::Fruits),
        ]);
        assert!(matches!(result, Err(StoreError::DuplicateItem(id)) if id == "a"));
    }

    #[test]
    fn test_lookup() {
        let catalog = sample(3);
        assert_eq!(catalog.get(&ItemId::new("item-1")).unwrap().name, "Fresh Item 1");
        assert!(catalog.require(&ItemId::new("missing")).is_err());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let catalog = CatalogStore::from_items(vec![
            item("a", "Organic Apple", Category::Fruits),
            item("b", "Premium Bagel", Category::Bakery),
        ])
        .unwrap();

        let hits: Vec<_> = catalog.search("APPLE").map(|i| i.id.as_str()).collect();
        assert_eq!(hits, vec!["a"]);
        assert_eq!(catalog.search("  ").count(), 2);
        assert_eq!(catalog.by_category(Category::Bakery).count(), 1);
    }

    #[test]
    fn test_home_slices() {
        let catalog = sample(12);
        assert_eq!(catalog.smart_list().len(), 10);
        assert_eq!(catalog.express().len(), 2);
        assert_eq!(catalog.express()[0].id.as_str(), "item-10");

        let small = sample(4);
        assert_eq!(small.smart_list().len(), 4);
        assert!(small.express().is_empty());
    }

    #[test]
    fn test_toml_records() {
        let parsed: TomlCatalog = toml::from_str(
            r#"
            [[items]]
            id = "kiwi"
            name = "Classic Kiwi"
            price = 2.49
            original_price = 2.99
            discount_percent = 17
            category = "fruits"
            "#,
        )
        .unwrap();
        let catalog = CatalogStore::from_records(parsed.items, Currency::USD).unwrap();
        let kiwi = catalog.get(&ItemId::new("kiwi")).unwrap();
        assert_eq!(kiwi.price.amount_cents, 249);
        assert_eq!(kiwi.original_price.unwrap().amount_cents, 299);
    }
}
