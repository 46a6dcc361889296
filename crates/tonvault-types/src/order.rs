//! Order types for the Tonvault exchange.
//!
//! An order is a standing offer to trade a fixed amount of a token at a
//! fixed price per unit, denominated in the base token. It is filled in
//! whole against exactly one taker — no partial fills, no order book.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Asset, OrderId, WalletId};

/// Which side of the trade the order's owner (the maker) is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Lifecycle status of an order. The only transition is
/// `Open → Filled`, exactly once. There is no cancelled state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "OPEN"),
            Self::Filled => write!(f, "FILLED"),
        }
    }
}

/// A resting order. Amount and price are strictly positive from creation
/// onward; the exchange rejects anything else before persisting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    /// The maker's wallet.
    pub wallet_id: WalletId,
    pub side: OrderSide,
    /// The traded token. Never the base token itself.
    pub token: Asset,
    pub amount: Decimal,
    /// Price per unit of `token`, in base-token units.
    pub price_per_unit: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Total price of the full fill: `amount * price_per_unit`,
    /// in base-token units. `None` if the product overflows `Decimal`.
    #[must_use]
    pub fn total_price(&self) -> Option<Decimal> {
        self.amount.checked_mul(self.price_per_unit)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == OrderStatus::Open
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    pub fn dummy(side: OrderSide, token: &str, amount: Decimal, price: Decimal) -> Self {
        Self {
            id: OrderId::new(),
            wallet_id: WalletId::new(),
            side,
            token: token.to_string(),
            amount,
            price_per_unit: price,
            status: OrderStatus::Open,
            created_at: Utc::now(),
        }
    }

    pub fn dummy_for_wallet(
        wallet_id: WalletId,
        side: OrderSide,
        token: &str,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            wallet_id,
            ..Self::dummy(side, token, amount, price)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_price_is_amount_times_price() {
        let order = Order::dummy(
            OrderSide::Sell,
            "SLH",
            Decimal::new(10, 0),
            Decimal::new(5, 0),
        );
        assert_eq!(order.total_price(), Some(Decimal::new(50, 0)));
    }

    #[test]
    fn total_price_overflow_is_none() {
        let order = Order::dummy(OrderSide::Sell, "SLH", Decimal::MAX, Decimal::new(2, 0));
        assert_eq!(order.total_price(), None);
    }

    #[test]
    fn order_side_display() {
        assert_eq!(format!("{}", OrderSide::Buy), "BUY");
        assert_eq!(format!("{}", OrderSide::Sell), "SELL");
    }

    #[test]
    fn fresh_order_is_open() {
        let order = Order::dummy(OrderSide::Buy, "SLH", Decimal::ONE, Decimal::ONE);
        assert!(order.is_open());
        assert_eq!(format!("{}", order.status), "OPEN");
    }

    #[test]
    fn side_serde_is_lowercase() {
        let json = serde_json::to_string(&OrderSide::Sell).unwrap();
        assert_eq!(json, "\"sell\"");
        let json = serde_json::to_string(&OrderStatus::Open).unwrap();
        assert_eq!(json, "\"open\"");
    }
}
