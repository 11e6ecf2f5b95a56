//! Order snapshots.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cart::CartLine;
use crate::ids::OrderId;
use crate::money::Money;

/// Order status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Delivered,
    Processing,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Delivered => "delivered",
            OrderStatus::Processing => "processing",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Processing => "Processing",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// How an order was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentMethod {
    #[default]
    Card,
    Upi,
    NetBanking,
    Wallet,
    CashOnDelivery,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 5] = [
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::NetBanking,
        PaymentMethod::Wallet,
        PaymentMethod::CashOnDelivery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "card",
            PaymentMethod::Upi => "upi",
            PaymentMethod::NetBanking => "net-banking",
            PaymentMethod::Wallet => "wallet",
            PaymentMethod::CashOnDelivery => "cash-on-delivery",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit/Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Wallet => "Wallets",
            PaymentMethod::CashOnDelivery => "Cash on Delivery",
        }
    }

    /// Parse a method name, also accepting `cod`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "card" => Some(PaymentMethod::Card),
            "upi" => Some(PaymentMethod::Upi),
            "net-banking" | "netbanking" => Some(PaymentMethod::NetBanking),
            "wallet" => Some(PaymentMethod::Wallet),
            "cash-on-delivery" | "cod" => Some(PaymentMethod::CashOnDelivery),
            _ => None,
        }
    }
}

/// A completed checkout. Fields are private so a placed order cannot be
/// edited afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    id: OrderId,
    lines: Vec<CartLine>,
    total: Money,
    created_at: DateTime<Utc>,
    status: OrderStatus,
    #[serde(default)]
    payment: PaymentMethod,
}

impl Order {
    pub(crate) fn new(lines: Vec<CartLine>, total: Money, payment: PaymentMethod) -> Self {
        Self {
            id: OrderId::generate(),
            lines,
            total,
            created_at: Utc::now(),
            status: OrderStatus::default(),
            payment,
        }
    }

    pub fn id(&self) -> &OrderId {
        &self.id
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn total(&self) -> Money {
        self.total
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment(&self) -> PaymentMethod {
        self.payment
    }

    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Short human-facing reference, e.g. "#1a2b3c4d".
    pub fn short_ref(&self) -> String {
        let prefix: String = self.id.as_str().chars().take(8).collect();
        format!("#{}", prefix)
    }
}
