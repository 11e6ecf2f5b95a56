//! Storefront service object.
//!
//! Owns every store for the lifetime of one shopping session and exposes the
//! id-based operations front ends call.

use std::sync::Arc;

use tracing::debug;

use crate::cart::{CartStore, PromotionTable};
use crate::catalog::{CatalogItem, CatalogStore};
use crate::error::{Result, StoreError};
use crate::ids::ItemId;
use crate::money::Currency;
use crate::orders::{Order, OrderHistory, PaymentMethod};
use crate::support::SupportChat;
use crate::theme::ThemeStore;
use crate::wishlist::WishlistStore;

#[derive(Debug)]
pub struct Storefront {
    catalog: CatalogStore,
    cart: CartStore,
    orders: OrderHistory,
    wishlist: WishlistStore,
    theme: ThemeStore,
    support: SupportChat,
}

impl Storefront {
    /// Fails if any catalog price is not in `currency`.
    pub fn new(catalog: CatalogStore, promotions: PromotionTable, currency: Currency) -> Result<Self> {
        if let Some((item, found)) = catalog.items().iter().find_map(|item| {
            std::iter::once(item.price)
                .chain(item.original_price)
                .find(|price| price.currency != currency)
                .map(|price| (item, price.currency))
        }) {
            return Err(StoreError::CurrencyMismatch {
                item: item.id.to_string(),
                expected: currency,
                found,
            });
        }

        Ok(Self {
            catalog,
            cart: CartStore::new(currency, promotions),
            orders: OrderHistory::new(),
            wishlist: WishlistStore::new(),
            theme: ThemeStore::default(),
            support: SupportChat::new(),
        })
    }

    /// Start with the given theme instead of dark.
    pub fn with_dark_theme(mut self, dark: bool) -> Self {
        self.theme.set_dark(dark);
        self
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    pub fn orders(&self) -> &OrderHistory {
        &self.orders
    }

    pub fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.theme
    }

    pub fn theme_mut(&mut self) -> &mut ThemeStore {
        &mut self.theme
    }

    pub fn support(&self) -> &SupportChat {
        &self.support
    }

    pub fn support_mut(&mut self) -> &mut SupportChat {
        &mut self.support
    }

    /// Add one unit of a catalog item to the cart.
    pub fn add_to_cart(&mut self, id: &ItemId) -> Result<u32> {
        let item = self.catalog.require(id)?;
        Ok(self.cart.add_item(item))
    }

    /// Toggle an item on the wishlist. Returns whether it is now wishlisted.
    pub fn toggle_wishlist(&mut self, id: &ItemId) -> Result<bool> {
        self.catalog.require(id)?;
        Ok(self.wishlist.toggle(id))
    }

    /// Wishlisted items still present in the catalog.
    pub fn wishlist_items(&self) -> impl Iterator<Item = &CatalogItem> {
        self.wishlist
            .ids()
            .iter()
            .filter_map(move |id| self.catalog.get(id))
    }

    /// Snapshot the cart into order history, then clear the cart.
    pub fn place_order(&mut self) -> Result<Arc<Order>> {
        self.place_order_with(PaymentMethod::default())
    }

    /// [`place_order`](Self::place_order) paid with `payment`.
    pub fn place_order_with(&mut self, payment: PaymentMethod) -> Result<Arc<Order>> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        let lines = self.cart.lines().to_vec();
        let total = self.cart.totals().total;
        let order = self.orders.place_paid_order(lines, total, payment);
        self.cart.clear();
        debug!(order = %order.id(), "cart checked out");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::Money;

    fn storefront() -> Storefront {
        let catalog = CatalogStore::from_items(vec![
            CatalogItem::new("apple", "Organic Apple", Money::new(199, Currency::USD), Category::Fruits),
            CatalogItem::new("bagel", "Classic Bagel", Money::new(349, Currency::USD), Category::Bakery),
        ])
        .unwrap();
        Storefront::new(catalog, PromotionTable::default(), Currency::USD).unwrap()
    }

    #[test]
    fn test_unknown_item_rejected() {
        let mut store = storefront();
        let missing = ItemId::new("durian");
        assert!(matches!(store.add_to_cart(&missing), Err(StoreError::ItemNotFound(_))));
        assert!(store.toggle_wishlist(&missing).is_err());
        assert!(store.cart().is_empty());
    }

    #[test]
    fn test_foreign_currency_catalog_rejected() {
        let catalog = CatalogStore::from_items(vec![
            CatalogItem::new("apple", "Organic Apple", Money::new(199, Currency::USD), Category::Fruits),
            CatalogItem::new("brie", "Brie de Meaux", Money::new(650, Currency::EUR), Category::Dairy),
        ])
        .unwrap();

        let err = Storefront::new(catalog, PromotionTable::default(), Currency::USD).unwrap_err();
        assert!(matches!(
            err,
            StoreError::CurrencyMismatch { ref item, expected: Currency::USD, found: Currency::EUR }
                if item == "brie"
        ));
    }

    #[test]
    fn test_list_price_currency_checked() {
        let item = CatalogItem::new("kiwi", "Kiwi", Money::new(99, Currency::GBP), Category::Fruits)
            .with_original_price(Money::new(129, Currency::USD), 23);
        let catalog = CatalogStore::from_items(vec![item]).unwrap();

        assert!(Storefront::new(catalog, PromotionTable::default(), Currency::GBP).is_err());
    }

    #[test]
    fn test_place_order_clears_cart() {
        let mut store = storefront();
        store.add_to_cart(&ItemId::new("apple")).unwrap();
        store.add_to_cart(&ItemId::new("bagel")).unwrap();
        store.cart_mut().apply_promotion("SAVE10");

        let order = store.place_order().unwrap();
        assert_eq!(order.total().amount_cents, 493); // 548 - 55
        assert_eq!(order.lines().len(), 2);
        assert_eq!(order.payment(), PaymentMethod::Card);
        assert!(store.cart().is_empty());
        assert!(store.cart().promotion().is_none());
        assert_eq!(store.orders().len(), 1);
    }

    #[test]
    fn test_empty_cart_checkout_fails() {
        let mut store = storefront();
        assert!(matches!(store.place_order(), Err(StoreError::EmptyCart)));
        assert!(store.orders().is_empty());
    }

    #[test]
    fn test_wishlist_items_resolve() {
        let mut store = storefront().with_dark_theme(false);
        assert!(store.toggle_wishlist(&ItemId::new("bagel")).unwrap());
        let names: Vec<_> = store.wishlist_items().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Classic Bagel"]);
        assert!(!store.theme().is_dark());
    }
}
