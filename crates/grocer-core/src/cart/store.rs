//! The cart store.

use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::cart::{
    CartLine, CartTotals, Promotion, PromotionTable, SubstitutionPreference,
    MAX_QUANTITY_PER_LINE,
};
use crate::catalog::CatalogItem;
use crate::ids::ItemId;
use crate::money::Currency;

/// Point-in-time view of the cart published to observers.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CartSnapshot {
    pub lines: Vec<CartLine>,
    pub promotion: Option<Promotion>,
    pub totals: CartTotals,
}

/// Selected items, the active promotion and their derived totals.
///
/// Every mutation recomputes totals and publishes a fresh [`CartSnapshot`]
/// before returning, so observers never see lines and totals disagree.
#[derive(Debug)]
pub struct CartStore {
    currency: Currency,
    lines: Vec<CartLine>,
    promotions: PromotionTable,
    active: Option<Promotion>,
    totals: CartTotals,
    tx: watch::Sender<CartSnapshot>,
}

impl CartStore {
    pub fn new(currency: Currency, promotions: PromotionTable) -> Self {
        let totals = CartTotals::zero(currency);
        let (tx, _) = watch::channel(CartSnapshot {
            lines: Vec::new(),
            promotion: None,
            totals,
        });
        Self {
            currency,
            lines: Vec::new(),
            promotions,
            active: None,
            totals,
            tx,
        }
    }

    /// Add one unit of `item`, inserting a new line at quantity 1 if absent.
    ///
    /// Returns the line's new quantity.
    pub fn add_item(&mut self, item: &CatalogItem) -> u32 {
        let quantity = match self.position(&item.id) {
            Some(pos) => {
                let line = &mut self.lines[pos];
                line.quantity = line.quantity.saturating_add(1).min(MAX_QUANTITY_PER_LINE);
                line.quantity
            }
            None => {
                self.lines.push(CartLine::new(item.clone()));
                1
            }
        };
        debug!(item = %item.id, quantity, "cart add");
        self.refresh();
        quantity
    }

    /// Remove the line for `id`. Returns whether a line was removed.
    pub fn remove_item(&mut self, id: &ItemId) -> bool {
        let len_before = self.lines.len();
        self.lines.retain(|l| l.item_id() != id);
        let removed = self.lines.len() < len_before;
        if removed {
            debug!(item = %id, "cart remove");
            self.refresh();
        }
        removed
    }

    /// Set a line's quantity; zero or below removes the line.
    ///
    /// Returns whether a line for `id` existed.
    pub fn set_quantity(&mut self, id: &ItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(id);
        }

        let Some(pos) = self.position(id) else {
            return false;
        };
        let clamped = quantity.min(i64::from(MAX_QUANTITY_PER_LINE)) as u32;
        self.lines[pos].quantity = clamped;
        debug!(item = %id, quantity = clamped, "cart set quantity");
        self.refresh();
        true
    }

    pub fn set_substitution(&mut self, id: &ItemId, preference: SubstitutionPreference) -> bool {
        let Some(pos) = self.position(id) else {
            return false;
        };
        self.lines[pos].substitution = preference;
        debug!(item = %id, preference = preference.as_str(), "cart set substitution");
        self.refresh();
        true
    }

    /// Activate the promotion matching `code`, ignoring case.
    ///
    /// An unknown code leaves the current promotion and totals untouched
    /// and returns `false`.
    pub fn apply_promotion(&mut self, code: &str) -> bool {
        let Some(promo) = self.promotions.lookup(code).cloned() else {
            debug!(code, "promotion not recognized");
            return false;
        };
        debug!(code = %promo.code, percent = promo.percent, "promotion applied");
        self.active = Some(promo);
        self.refresh();
        true
    }

    pub fn clear_promotion(&mut self) {
        if let Some(promo) = self.active.take() {
            debug!(code = %promo.code, "promotion cleared");
        }
        self.refresh();
    }

    /// Empty the cart and drop the promotion together.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.active = None;
        debug!("cart cleared");
        self.refresh();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id() == id)
    }

    pub fn promotion(&self) -> Option<&Promotion> {
        self.active.as_ref()
    }

    pub fn promotions(&self) -> &PromotionTable {
        &self.promotions
    }

    pub fn totals(&self) -> CartTotals {
        self.totals
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.tx.borrow().clone()
    }

    /// Receive a new snapshot after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.tx.subscribe()
    }

    fn position(&self, id: &ItemId) -> Option<usize> {
        self.lines.iter().position(|l| l.item_id() == id)
    }

    fn refresh(&mut self) {
        self.totals = CartTotals::compute(&self.lines, self.active.as_ref(), self.currency);
        self.tx.send_replace(CartSnapshot {
            lines: self.lines.clone(),
            promotion: self.active.clone(),
            totals: self.totals,
        });
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new(Currency::default(), PromotionTable::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::money::Money;

    fn item(id: &str, cents: i64) -> CatalogItem {
        CatalogItem::new(id, id, Money::new(cents, Currency::USD), Category::Fruits)
    }

    #[test]
    fn test_add_increments_existing_line() {
        let mut cart = CartStore::default();
        let apple = item("apple", 150);

        assert_eq!(cart.add_item(&apple), 1);
        assert_eq!(cart.add_item(&apple), 2);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.totals().subtotal.amount_cents, 300);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = CartStore::default();
        cart.add_item(&item("pear", 120));

        assert!(cart.set_quantity(&ItemId::new("pear"), 0));
        assert!(cart.is_empty());
        assert!(cart.totals().subtotal.is_zero());
        assert!(!cart.set_quantity(&ItemId::new("pear"), 3));
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut cart = CartStore::default();
        cart.add_item(&item("plum", 10));
        cart.set_quantity(&ItemId::new("plum"), 1_000_000);
        assert_eq!(cart.line(&ItemId::new("plum")).unwrap().quantity, MAX_QUANTITY_PER_LINE);
    }

    #[test]
    fn test_unknown_promotion_keeps_state() {
        let mut cart = CartStore::default();
        cart.add_item(&item("kiwi", 1000));
        assert!(cart.apply_promotion("save10"));
        let before = cart.totals();

        assert!(!cart.apply_promotion("NOPE"));
        assert_eq!(cart.promotion().unwrap().code, "SAVE10");
        assert_eq!(cart.totals(), before);
    }

    #[test]
    fn test_promotion_replaces_previous() {
        let mut cart = CartStore::default();
        cart.add_item(&item("kiwi", 1000));
        cart.apply_promotion("SAVE10");
        cart.apply_promotion("ORBIT20");
        assert_eq!(cart.totals().discount.amount_cents, 200);
    }

    #[test]
    fn test_substitution_preference() {
        let mut cart = CartStore::default();
        cart.add_item(&item("milk", 300));
        let id = ItemId::new("milk");

        assert!(cart.set_substitution(&id, SubstitutionPreference::SameBrand));
        assert_eq!(cart.line(&id).unwrap().substitution, SubstitutionPreference::SameBrand);
        assert!(!cart.set_substitution(&ItemId::new("eggs"), SubstitutionPreference::None));
    }

    #[test]
    fn test_clear_resets_lines_and_promotion() {
        let mut cart = CartStore::default();
        cart.add_item(&item("bun", 99));
        cart.apply_promotion("ORBIT20");
        cart.clear();

        assert!(cart.is_empty());
        assert!(cart.promotion().is_none());
        assert_eq!(cart.totals(), CartTotals::zero(Currency::USD));
    }

    #[test]
    fn test_subscribers_see_fresh_totals() {
        let mut cart = CartStore::default();
        let mut rx = cart.subscribe();

        cart.add_item(&item("mango", 250));
        assert!(rx.has_changed().unwrap());
        let snapshot = rx.borrow_and_update().clone();
        assert_eq!(snapshot.lines.len(), 1);
        assert_eq!(snapshot.totals.subtotal.amount_cents, 250);
        assert_eq!(snapshot, cart.snapshot());
    }
}
