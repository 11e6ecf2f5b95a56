//! Product catalog module.
//!
//! Item records, category tags and the read-only catalog store.

mod category;
mod item;
mod store;

pub use category::Category;
pub use item::{CatalogItem, CatalogRecord, StockState};
pub use store::{CatalogStore, EXPRESS_LEN, SMART_LIST_LEN};
