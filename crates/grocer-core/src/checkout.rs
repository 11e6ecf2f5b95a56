//! Simulated payment gateway.
//!
//! Nothing is charged. The gateway walks a fixed list of steps with pacing
//! delays, then places the order and clears the cart.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StoreError};
use crate::orders::{Order, PaymentMethod};
use crate::storefront::Storefront;

/// One stage of the scripted gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayStep {
    Connecting,
    Verifying,
    FraudCheck,
    Approved,
}

impl GatewayStep {
    pub const ALL: [GatewayStep; 4] = [
        GatewayStep::Connecting,
        GatewayStep::Verifying,
        GatewayStep::FraudCheck,
        GatewayStep::Approved,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GatewayStep::Connecting => "Connecting to Secure Gateway...",
            GatewayStep::Verifying => "Verifying Payment Details...",
            GatewayStep::FraudCheck => "Running Fraud Checks...",
            GatewayStep::Approved => "Payment Approved!",
        }
    }

    /// Delay at real-time pacing.
    pub fn nominal(&self) -> Duration {
        match self {
            GatewayStep::Connecting => Duration::from_millis(1500),
            GatewayStep::Verifying => Duration::from_millis(1500),
            GatewayStep::FraudCheck => Duration::from_millis(2000),
            GatewayStep::Approved => Duration::from_millis(1000),
        }
    }

    /// 1-indexed position in the sequence.
    pub fn number(&self) -> usize {
        match self {
            GatewayStep::Connecting => 1,
            GatewayStep::Verifying => 2,
            GatewayStep::FraudCheck => 3,
            GatewayStep::Approved => 4,
        }
    }
}

/// Longest pause any single gateway step takes, whatever the pacing.
pub const MAX_STEP_DELAY: Duration = Duration::from_secs(60 * 60);

/// Scale applied to every gateway delay. `0.0` skips waiting entirely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pacing(f64);

impl Pacing {
    pub fn realtime() -> Self {
        Self(1.0)
    }

    pub fn instant() -> Self {
        Self(0.0)
    }

    /// Negative or non-finite factors are treated as instant.
    pub fn scaled(factor: f64) -> Self {
        if factor.is_finite() && factor > 0.0 {
            Self(factor)
        } else {
            Self(0.0)
        }
    }

    pub fn factor(&self) -> f64 {
        self.0
    }

    /// Scaled delay, saturating at [`MAX_STEP_DELAY`].
    pub fn apply(&self, nominal: Duration) -> Duration {
        if !(self.0 > 0.0 && self.0.is_finite()) {
            return Duration::ZERO;
        }
        Duration::try_from_secs_f64(nominal.as_secs_f64() * self.0)
            .map_or(MAX_STEP_DELAY, |d| d.min(MAX_STEP_DELAY))
    }

    /// Whether any gateway step hits [`MAX_STEP_DELAY`] at this pacing.
    pub fn is_capped(&self) -> bool {
        GatewayStep::ALL
            .iter()
            .any(|step| self.apply(step.nominal()) >= MAX_STEP_DELAY)
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self::realtime()
    }
}

/// Runs the scripted gateway against a storefront's cart.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSimulator {
    pacing: Pacing,
    payment: PaymentMethod,
}

impl CheckoutSimulator {
    pub fn new(pacing: Pacing) -> Self {
        Self {
            pacing,
            payment: PaymentMethod::default(),
        }
    }

    /// Pay with `payment` instead of card.
    pub fn with_payment(mut self, payment: PaymentMethod) -> Self {
        self.payment = payment;
        self
    }

    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    /// Total wait across all steps at the configured pacing.
    pub fn expected_duration(&self) -> Duration {
        GatewayStep::ALL
            .iter()
            .map(|s| self.pacing.apply(s.nominal()))
            .sum()
    }

    /// Walk the gateway steps, reporting each to `on_step` before its delay,
    /// then place the order.
    ///
    /// The cart is checked before the first step so an empty cart fails fast
    /// without any waiting.
    pub async fn run<F>(&self, storefront: &mut Storefront, mut on_step: F) -> Result<Arc<Order>>
    where
        F: FnMut(GatewayStep),
    {
        if storefront.cart().is_empty() {
            return Err(StoreError::EmptyCart);
        }

        for step in GatewayStep::ALL {
            debug!(step = step.label(), payment = self.payment.as_str(), "gateway step");
            on_step(step);
            let delay = self.pacing.apply(step.nominal());
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        storefront.place_order_with(self.payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::PromotionTable;
    use crate::catalog::{CatalogItem, CatalogStore, Category};
    use crate::ids::ItemId;
    use crate::money::{Currency, Money};

    fn storefront() -> Storefront {
        let catalog = CatalogStore::from_items(vec![CatalogItem::new(
            "cola",
            "Classic Cola",
            Money::new(199, Currency::USD),
            Category::Beverages,
        )])
        .unwrap();
        Storefront::new(catalog, PromotionTable::default(), Currency::USD).unwrap()
    }

    #[test]
    fn test_pacing() {
        assert_eq!(Pacing::scaled(-2.0), Pacing::instant());
        assert_eq!(Pacing::scaled(f64::NAN), Pacing::instant());
        assert_eq!(
            Pacing::scaled(0.5).apply(Duration::from_millis(2000)),
            Duration::from_millis(1000)
        );
        assert_eq!(
            CheckoutSimulator::default().expected_duration(),
            Duration::from_millis(6000)
        );
    }

    #[test]
    fn test_huge_pacing_saturates() {
        let pacing = Pacing::scaled(1e20);
        assert_eq!(pacing.apply(Duration::from_millis(1500)), MAX_STEP_DELAY);
        assert_eq!(Pacing::scaled(f64::MAX).apply(Duration::from_millis(2000)), MAX_STEP_DELAY);
        assert!(pacing.is_capped());
        assert!(!Pacing::realtime().is_capped());
        assert_eq!(
            CheckoutSimulator::new(pacing).expected_duration(),
            MAX_STEP_DELAY * 4
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_huge_pacing_checkout_completes() {
        let mut store = storefront();
        store.add_to_cart(&ItemId::new("cola")).unwrap();

        let order = CheckoutSimulator::new(Pacing::scaled(1e20))
            .run(&mut store, |_| {})
            .await
            .unwrap();
        assert_eq!(order.item_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_walks_steps_then_places_order() {
        let mut store = storefront();
        store.add_to_cart(&ItemId::new("cola")).unwrap();

        let started = tokio::time::Instant::now();
        let mut seen = Vec::new();
        let order = CheckoutSimulator::new(Pacing::realtime())
            .with_payment(PaymentMethod::Wallet)
            .run(&mut store, |step| seen.push(step))
            .await
            .unwrap();

        assert_eq!(seen, GatewayStep::ALL.to_vec());
        assert!(started.elapsed() >= Duration::from_millis(6000));
        assert_eq!(order.total().amount_cents, 199);
        assert_eq!(order.payment(), PaymentMethod::Wallet);
        assert!(store.cart().is_empty());
        assert_eq!(store.orders().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_cart_fails_before_any_step() {
        let mut store = storefront();
        let mut steps = 0;
        let result = CheckoutSimulator::new(Pacing::instant())
            .run(&mut store, |_| steps += 1)
            .await;

        assert!(matches!(result, Err(StoreError::EmptyCart)));
        assert_eq!(steps, 0);
    }
}
