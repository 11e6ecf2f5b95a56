//! Storefront state for the Orbit Grocer app.
//!
//! Everything lives in memory and every mutation is synchronous:
//!
//! - **Catalog**: read-only item list with search and category filters
//! - **Cart**: lines, substitution preferences, promotion codes, totals
//! - **Orders**: immutable snapshots of completed checkouts
//! - **Wishlist** and **Theme**: small observable flags and sets
//! - **Checkout**: scripted payment gateway with pacing delays
//! - **Support**: scripted assistant transcript
//!
//! Stores publish snapshots through `tokio::sync::watch`; front ends call
//! `subscribe()` and re-render when the receiver changes.
//!
//! # Example
//!
//! ```rust
//! use grocer_core::prelude::*;
//!
//! let catalog = CatalogStore::from_items(vec![CatalogItem::new(
//!     "apple",
//!     "Organic Apple",
//!     Money::new(199, Currency::USD),
//!     Category::Fruits,
//! )])
//! .unwrap();
//!
//! let mut store = Storefront::new(catalog, PromotionTable::default(), Currency::USD).unwrap();
//! store.add_to_cart(&ItemId::new("apple")).unwrap();
//! assert!(store.cart_mut().apply_promotion("save10"));
//! assert_eq!(store.cart().totals().total.amount_cents, 179);
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod storefront;
pub mod support;
pub mod theme;
pub mod wishlist;

pub use error::StoreError;
pub use ids::{ItemId, OrderId};
pub use money::{Currency, Money};
pub use storefront::Storefront;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::StoreError;
    pub use crate::ids::{ItemId, OrderId};
    pub use crate::money::{Currency, Money};

    pub use crate::cart::{
        CartLine, CartSnapshot, CartStore, CartTotals, Promotion, PromotionTable,
        SubstitutionPreference,
    };
    pub use crate::catalog::{CatalogItem, CatalogRecord, CatalogStore, Category, StockState};
    pub use crate::checkout::{CheckoutSimulator, GatewayStep, Pacing};
    pub use crate::orders::{Order, OrderHistory, OrderStatus, PaymentMethod};
    pub use crate::storefront::Storefront;
    pub use crate::support::{ChatMessage, Sender, SupportChat};
    pub use crate::theme::ThemeStore;
    pub use crate::wishlist::WishlistStore;
}
