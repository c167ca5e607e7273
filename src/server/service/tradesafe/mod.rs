//! TradeSafe escrow integration.
//!
//! - `client` - OAuth2 + GraphQL client for the TradeSafe API
//! - `signature` - HMAC verification of inbound webhooks
//! - `webhook` - Applies webhook state changes to trades and orders
//!
//! `TradeSafeService` ties the client to the trade records kept for each order.

pub mod client;
pub mod signature;
pub mod webhook;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::trade::TradeRepository,
    error::AppError,
    model::{
        order::Order,
        trade::{CreateTradeParam, Trade},
    },
    service::tradesafe::client::{BuyerDetails, NewTransaction, TradeSafeClient},
};

pub struct TradeSafeService<'a> {
    db: &'a DatabaseConnection,
    client: &'a TradeSafeClient,
}

impl<'a> TradeSafeService<'a> {
    pub fn new(db: &'a DatabaseConnection, client: &'a TradeSafeClient) -> Self {
        Self { db, client }
    }

    /// Opens an escrow transaction for an order and records it as a trade.
    ///
    /// Registers the buyer, creates the transaction for the order total and stores the
    /// trade in `CREATED` state.
    ///
    /// # Returns
    /// - `Ok(Trade)` - Recorded trade
    /// - `Err(AppError::PaymentErr)` - TradeSafe call failed; nothing is recorded
    pub async fn open_trade(&self, order: &Order, buyer: &BuyerDetails) -> Result<Trade, AppError> {
        let buyer_token = self.client.create_buyer_token(buyer).await?;

        let created = self
            .client
            .create_transaction(&NewTransaction {
                reference: order_reference(order.id),
                title: format!("KibbleDrop order #{}", order.id),
                description: describe_items(order),
                value_cents: order.total_cents,
                buyer_token,
            })
            .await?;

        let trade = TradeRepository::new(self.db)
            .create(CreateTradeParam {
                order_id: order.id,
                transaction_id: created.id,
                allocation_id: created.allocation_id,
                amount_cents: order.total_cents,
            })
            .await?;

        tracing::info!(
            "Opened TradeSafe transaction {} for order {}",
            trade.transaction_id,
            order.id
        );

        Ok(trade)
    }

    /// Hosted payment page for an order, opening the trade first when it has none.
    pub async fn payment_link(&self, order: &Order, buyer: &BuyerDetails) -> Result<String, AppError> {
        let trade = match TradeRepository::new(self.db)
            .find_by_order_id(order.id)
            .await?
        {
            Some(trade) => trade,
            None => self.open_trade(order, buyer).await?,
        };

        Ok(self.client.checkout_link(&trade.transaction_id).await?)
    }

    /// Tells TradeSafe the order's goods are on their way.
    ///
    /// Does nothing when the order has no trade or the trade has no allocation.
    pub async fn start_delivery(&self, order_id: i32) -> Result<(), AppError> {
        let Some(trade) = TradeRepository::new(self.db)
            .find_by_order_id(order_id)
            .await?
        else {
            return Ok(());
        };
        let Some(allocation_id) = trade.allocation_id else {
            return Ok(());
        };

        self.client.start_delivery(&allocation_id).await?;
        tracing::info!("Started delivery on allocation {} for order {}", allocation_id, order_id);

        Ok(())
    }

    /// Cancels the order's escrow transaction unless it has already finished.
    pub async fn cancel(&self, order_id: i32, comment: &str) -> Result<(), AppError> {
        let Some(trade) = TradeRepository::new(self.db)
            .find_by_order_id(order_id)
            .await?
        else {
            return Ok(());
        };
        if trade.state.is_terminal() {
            return Ok(());
        }

        self.client
            .cancel_transaction(&trade.transaction_id, comment)
            .await?;
        tracing::info!(
            "Cancelled TradeSafe transaction {} for order {}",
            trade.transaction_id,
            order_id
        );

        Ok(())
    }
}

/// Reference sent to TradeSafe and echoed back in webhooks.
pub fn order_reference(order_id: i32) -> String {
    format!("order-{}", order_id)
}

fn describe_items(order: &Order) -> String {
    order
        .items
        .iter()
        .map(|item| format!("{} x {}", item.quantity, item.product_name))
        .collect::<Vec<_>>()
        .join(", ")
}
