//! Webhook-driven trade and order transitions.
//!
//! Notifications may arrive late, twice, or out of order. A notification is only acted
//! on when it moves the trade forward (see `TradeState::advances_to`); everything else is
//! acknowledged and dropped so TradeSafe stops redelivering it.

use entity::sea_orm_active_enums::OrderStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};
use serde::Deserialize;

use crate::server::{
    data::{order::OrderRepository, trade::TradeRepository},
    error::AppError,
    model::trade::TradeState,
    service::{order::restock, tradesafe::order_reference},
};

/// Body of a TradeSafe transaction notification.
#[derive(Debug, Clone, Deserialize)]
pub struct WebhookPayload {
    /// TradeSafe transaction id.
    pub id: String,
    pub state: String,
    #[serde(default)]
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookOutcome {
    Applied,
    Ignored,
}

impl WebhookOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Ignored => "ignored",
        }
    }
}

/// Order status a trade state moves an order in `current` status to, if any.
pub fn order_transition(current: OrderStatus, state: &TradeState) -> Option<OrderStatus> {
    use OrderStatus::*;

    match (state, current) {
        (TradeState::FundsDeposited | TradeState::FundsReceived, Pending) => Some(Paid),
        (
            TradeState::Delivered | TradeState::FundsReleased | TradeState::Completed,
            Paid | Processing | Shipped,
        ) => Some(Delivered),
        (TradeState::Cancelled | TradeState::Declined, Pending) => Some(Cancelled),
        (TradeState::Cancelled | TradeState::Declined, Paid | Processing) => Some(Refunded),
        _ => None,
    }
}

pub struct WebhookService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> WebhookService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Applies a verified notification.
    ///
    /// The trade state, the order status and any restock are written in one transaction.
    ///
    /// # Returns
    /// - `Ok(WebhookOutcome::Applied)` - Trade advanced
    /// - `Ok(WebhookOutcome::Ignored)` - Duplicate, stale, post-terminal or unknown state
    /// - `Err(AppError::NotFound)` - No trade with that transaction id
    pub async fn handle(&self, payload: WebhookPayload) -> Result<WebhookOutcome, AppError> {
        let next = TradeState::parse(&payload.state);

        let txn = self.db.begin().await?;
        let trade_repo = TradeRepository::new(&txn);
        let order_repo = OrderRepository::new(&txn);

        let Some(trade) = trade_repo.find_by_transaction_id(&payload.id).await? else {
            return Err(AppError::NotFound("Unknown transaction".to_string()));
        };

        if let Some(reference) = payload.reference.as_deref() {
            if reference != order_reference(trade.order_id) {
                tracing::warn!(
                    "Webhook for transaction {} carries reference {} but belongs to order {}",
                    trade.transaction_id,
                    reference,
                    trade.order_id
                );
            }
        }

        if !trade.state.advances_to(&next) {
            tracing::info!(
                "Ignoring {} for transaction {} in state {}",
                next.as_str(),
                trade.transaction_id,
                trade.state.as_str()
            );
            return Ok(WebhookOutcome::Ignored);
        }

        let order = order_repo
            .find_by_id(trade.order_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found".to_string()))?;

        if let Some(status) = order_transition(order.status, &next) {
            order_repo.update_status(order.id, status, None).await?;
            if status == OrderStatus::Cancelled {
                restock(&txn, &order.items).await?;
            }
            tracing::info!(
                "Order {} moved from {:?} to {:?} by TradeSafe {}",
                order.id,
                order.status,
                status,
                next.as_str()
            );
        }

        trade_repo.update_state(trade.id, &next).await?;
        txn.commit().await?;

        Ok(WebhookOutcome::Applied)
    }
}
