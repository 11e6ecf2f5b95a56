//! Shopping cart module.
//!
//! Cart lines, promotion codes, derived totals and the cart store.

mod line;
mod promotion;
mod store;
mod totals;

pub use line::{CartLine, SubstitutionPreference, MAX_QUANTITY_PER_LINE};
pub use promotion::{Promotion, PromotionTable};
pub use store::{CartSnapshot, CartStore};
pub use totals::CartTotals;
