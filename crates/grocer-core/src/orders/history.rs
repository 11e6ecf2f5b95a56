//! Order history store.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::info;

use crate::cart::CartLine;
use crate::ids::OrderId;
use crate::money::Money;
use crate::orders::{Order, PaymentMethod};

/// Placed orders, most recent first.
///
/// Orders are shared as `Arc<Order>` so published snapshots never copy or
/// expose mutable access to an order.
#[derive(Debug)]
pub struct OrderHistory {
    orders: Vec<Arc<Order>>,
    tx: watch::Sender<Vec<Arc<Order>>>,
}

impl OrderHistory {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(Vec::new());
        Self {
            orders: Vec::new(),
            tx,
        }
    }

    /// Record an order for `lines` and `total`. No stock or payment checks
    /// are made.
    pub fn place_order(&mut self, lines: Vec<CartLine>, total: Money) -> Arc<Order> {
        self.place_paid_order(lines, total, PaymentMethod::default())
    }

    /// Like [`place_order`](Self::place_order), recording how it was paid.
    pub fn place_paid_order(
        &mut self,
        lines: Vec<CartLine>,
        total: Money,
        payment: PaymentMethod,
    ) -> Arc<Order> {
        let order = Arc::new(Order::new(lines, total, payment));
        info!(
            order = %order.id(),
            lines = order.lines().len(),
            total = %order.total(),
            payment = payment.as_str(),
            "order placed"
        );
        self.orders.insert(0, Arc::clone(&order));
        self.tx.send_replace(self.orders.clone());
        order
    }

    pub fn orders(&self) -> &[Arc<Order>] {
        &self.orders
    }

    pub fn get(&self, id: &OrderId) -> Option<&Arc<Order>> {
        self.orders.iter().find(|o| o.id() == id)
    }

    pub fn latest(&self) -> Option<&Arc<Order>> {
        self.orders.first()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Arc<Order>>> {
        self.tx.subscribe()
    }
}

impl Default for OrderHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_orders_are_prepended() {
        let mut history = OrderHistory::new();
        let first = history.place_order(Vec::new(), Money::new(100, Currency::USD));
        let second = history.place_order(Vec::new(), Money::new(200, Currency::USD));

        assert_eq!(history.len(), 2);
        assert_eq!(history.latest().unwrap().id(), second.id());
        assert_eq!(history.orders()[1].id(), first.id());
        assert_eq!(history.get(first.id()).unwrap().total().amount_cents, 100);
    }

    #[test]
    fn test_subscribers_receive_history() {
        let mut history = OrderHistory::new();
        let rx = history.subscribe();
        history.place_order(Vec::new(), Money::zero(Currency::USD));
        assert_eq!(rx.borrow().len(), 1);
    }
}
