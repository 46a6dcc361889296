//! The exchange: wallet registry, order store, and fill settlement.
//!
//! State machine per order: `Open --fill--> Filled`. Nothing else.
//!
//! A fill runs entirely under `&mut self` with no await points, so it is
//! one critical section: all lookups and the taker's funds check happen
//! before any mutation, and exactly one caller can move an order from
//! `Open` to `Filled` — later callers observe `OrderNotOpen`.

use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use tonvault_ledger::Ledger;
use tonvault_types::{
    AccountId, Asset, Order, OrderId, OrderSide, OrderStatus, Result, TonvaultError, Wallet,
    WalletId, constants::BASE_TOKEN,
};

/// The custodial exchange core. Owns the ledger, the wallet registry,
/// and the order store; all three mutate only through the operations
/// below.
pub struct Exchange {
    ledger: Ledger,
    /// Registered wallets by ID.
    wallets: HashMap<WalletId, Wallet>,
    /// All orders by ID, open and filled. Orders are never deleted.
    orders: HashMap<OrderId, Order>,
}

impl Exchange {
    /// Create a new empty exchange.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ledger: Ledger::new(),
            wallets: HashMap::new(),
            orders: HashMap::new(),
        }
    }

    // =====================================================================
    // Wallet registry
    // =====================================================================

    /// Register a wallet for an account. The wallet is immutable after
    /// this point; only balances and orders referencing it change.
    pub fn register_wallet(
        &mut self,
        account_id: AccountId,
        address: impl Into<String>,
        public_key: impl Into<String>,
        encrypted_secret: impl Into<String>,
    ) -> Wallet {
        let wallet = Wallet {
            id: WalletId::new(),
            account_id,
            address: address.into(),
            public_key: public_key.into(),
            encrypted_secret: encrypted_secret.into(),
        };
        tracing::info!(wallet = %wallet.id, account = %account_id, address = %wallet.address,
            "Wallet registered");
        self.wallets.insert(wallet.id, wallet.clone());
        wallet
    }

    /// Look up a registered wallet.
    #[must_use]
    pub fn wallet(&self, wallet_id: WalletId) -> Option<&Wallet> {
        self.wallets.get(&wallet_id)
    }

    // =====================================================================
    // Ledger passthrough
    // =====================================================================

    /// Deposit funds into a wallet's balance. See [`Ledger::deposit`].
    pub fn deposit(&mut self, wallet_id: WalletId, token: &str, amount: Decimal) -> Result<Decimal> {
        self.ledger.deposit(wallet_id, token, amount)
    }

    /// Withdraw funds from a wallet's balance. See [`Ledger::withdraw`].
    pub fn withdraw(
        &mut self,
        wallet_id: WalletId,
        token: &str,
        amount: Decimal,
    ) -> Result<Decimal> {
        self.ledger.withdraw(wallet_id, token, amount)
    }

    /// Balance of a (wallet, token) pair.
    #[must_use]
    pub fn balance(&self, wallet_id: WalletId, token: &str) -> Decimal {
        self.ledger.balance(wallet_id, token)
    }

    /// Read access to the underlying ledger.
    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // =====================================================================
    // Orders
    // =====================================================================

    /// Create a resting order in `Open` state and return it.
    ///
    /// # Errors
    /// - [`TonvaultError::WalletNotFound`] if the maker wallet is unknown
    /// - [`TonvaultError::InvalidOrder`] if amount or price is not
    ///   strictly positive, or the traded token is the base token itself
    pub fn create_order(
        &mut self,
        wallet_id: WalletId,
        side: OrderSide,
        token: &str,
        amount: Decimal,
        price_per_unit: Decimal,
    ) -> Result<Order> {
        if !self.wallets.contains_key(&wallet_id) {
            return Err(TonvaultError::WalletNotFound(wallet_id));
        }
        if amount <= Decimal::ZERO || price_per_unit <= Decimal::ZERO {
            return Err(TonvaultError::InvalidOrder {
                reason: format!(
                    "amount and price must be positive (amount={amount}, price={price_per_unit})"
                ),
            });
        }
        if token == BASE_TOKEN {
            return Err(TonvaultError::InvalidOrder {
                reason: format!("cannot trade the base token {BASE_TOKEN} against itself"),
            });
        }
        if amount.checked_mul(price_per_unit).is_none() {
            return Err(TonvaultError::InvalidOrder {
                reason: format!(
                    "total price overflows (amount={amount}, price={price_per_unit})"
                ),
            });
        }

        let order = Order {
            id: OrderId::new(),
            wallet_id,
            side,
            token: token.to_string(),
            amount,
            price_per_unit,
            status: OrderStatus::Open,
            created_at: Utc::now(),
        };
        tracing::info!(order = %order.id, wallet = %wallet_id, side = %side, token,
            %amount, price = %price_per_unit, "Order created");
        self.orders.insert(order.id, order.clone());
        Ok(order)
    }

    /// Fill an open order in whole against a taker, settling all legs as
    /// one atomic unit. On success the order is `Filled` and the updated
    /// order is returned.
    ///
    /// Settlement legs, priced at `total = amount * price_per_unit` in
    /// the base token:
    /// - sell order: taker pays `total` base token to the maker and is
    ///   credited `amount` of the traded token
    /// - buy order: taker pays `amount` of the traded token to the maker
    ///   and is credited `total` base token
    ///
    /// The taker's paying leg is the only fallible mutation and runs
    /// first; if it fails nothing has changed and the order stays `Open`.
    ///
    /// # Errors
    /// - [`TonvaultError::OrderNotFound`] / [`TonvaultError::OrderNotOpen`]
    /// - [`TonvaultError::WalletNotFound`] if maker or taker is unknown
    /// - [`TonvaultError::InsufficientBalance`] if the taker cannot pay
    pub fn fill_order(&mut self, order_id: OrderId, taker_wallet_id: WalletId) -> Result<Order> {
        let order = self
            .orders
            .get(&order_id)
            .ok_or(TonvaultError::OrderNotFound(order_id))?;
        if !order.is_open() {
            return Err(TonvaultError::OrderNotOpen(order_id));
        }

        let maker_wallet_id = order.wallet_id;
        let side = order.side;
        let token: Asset = order.token.clone();
        let amount = order.amount;
        // Creation rejected overflowing totals, so this only trips on a
        // corrupted order.
        let total_price = order
            .total_price()
            .ok_or_else(|| TonvaultError::Internal(format!("order {order_id}: price overflow")))?;

        if !self.wallets.contains_key(&maker_wallet_id) {
            return Err(TonvaultError::WalletNotFound(maker_wallet_id));
        }
        if !self.wallets.contains_key(&taker_wallet_id) {
            return Err(TonvaultError::WalletNotFound(taker_wallet_id));
        }

        match side {
            // Maker sells `token`: taker pays the price leg, receives the
            // token leg from exchange inventory.
            OrderSide::Sell => {
                self.ledger
                    .transfer(taker_wallet_id, maker_wallet_id, BASE_TOKEN, total_price)?;
                self.ledger.deposit(taker_wallet_id, &token, amount)?;
            }
            // Maker buys `token`: taker pays the token leg, receives the
            // price leg from exchange inventory.
            OrderSide::Buy => {
                self.ledger
                    .transfer(taker_wallet_id, maker_wallet_id, &token, amount)?;
                self.ledger.deposit(taker_wallet_id, BASE_TOKEN, total_price)?;
            }
        }

        // Point of no return: balances moved, flip the status.
        let order = self
            .orders
            .get_mut(&order_id)
            .ok_or(TonvaultError::OrderNotFound(order_id))?;
        order.status = OrderStatus::Filled;

        tracing::info!(order = %order_id, maker = %maker_wallet_id, taker = %taker_wallet_id,
            side = %side, token = %token, %amount, total = %total_price, "Order filled");
        Ok(order.clone())
    }

    /// Look up an order.
    #[must_use]
    pub fn order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// All open orders, oldest first.
    #[must_use]
    pub fn open_orders(&self) -> Vec<Order> {
        let mut open: Vec<Order> = self
            .orders
            .values()
            .filter(|o| o.is_open())
            .cloned()
            .collect();
        open.sort_by_key(|o| o.id);
        open
    }

    /// All orders placed by a wallet, oldest first.
    #[must_use]
    pub fn orders_for(&self, wallet_id: WalletId) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .orders
            .values()
            .filter(|o| o.wallet_id == wallet_id)
            .cloned()
            .collect();
        orders.sort_by_key(|o| o.id);
        orders
    }
}

impl Default for Exchange {
    fn default() -> Self {
        Self::new()
    }
}
