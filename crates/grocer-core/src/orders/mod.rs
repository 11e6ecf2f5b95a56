//! Order history module.

mod history;
mod order;

pub use history::OrderHistory;
pub use order::{Order, OrderStatus, PaymentMethod};
