//! Wishlist store.

use tokio::sync::watch;
use tracing::debug;

use crate::ids::ItemId;

/// Favorited item ids.
#[derive(Debug)]
pub struct WishlistStore {
    ids: Vec<ItemId>,
    tx: watch::Sender<Vec<ItemId>>,
}

impl WishlistStore {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self { ids: Vec::new(), tx }
    }

    /// Flip membership of `id`. Returns whether it is now wishlisted.
    pub fn toggle(&mut self, id: &ItemId) -> bool {
        let present = match self.ids.iter().position(|i| i == id) {
            Some(pos) => {
                self.ids.remove(pos);
                false
            }
            None => {
                self.ids.push(id.clone());
                true
            }
        };
        debug!(item = %id, present, "wishlist toggled");
        self.tx.send_replace(self.ids.clone());
        present
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.ids.contains(id)
    }

    /// Wishlisted ids. Order carries no meaning.
    pub fn ids(&self) -> &[ItemId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<ItemId>> {
        self.tx.subscribe()
    }
}

impl Default for WishlistStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_twice_restores() {
        let mut wishlist = WishlistStore::new();
        let id = ItemId::new("cherry");

        assert!(wishlist.toggle(&id));
        assert!(wishlist.contains(&id));
        assert!(!wishlist.toggle(&id));
        assert!(!wishlist.contains(&id));
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_toggle_leaves_other_ids() {
        let mut wishlist = WishlistStore::new();
        wishlist.toggle(&ItemId::new("a"));
        wishlist.toggle(&ItemId::new("b"));
        wishlist.toggle(&ItemId::new("a"));

        assert_eq!(wishlist.ids(), &[ItemId::new("b")]);
        assert_eq!(*wishlist.subscribe().borrow(), vec![ItemId::new("b")]);
    }
}
