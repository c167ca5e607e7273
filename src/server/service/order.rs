//! Order history, cancellation and the admin fulfilment workflow.

use entity::sea_orm_active_enums::OrderStatus;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, TransactionTrait};

use crate::server::{
    data::{order::OrderRepository, product::ProductRepository},
    error::AppError,
    model::{
        order::{
            can_transition, customer_can_cancel, Order, OrderItem, PaginatedOrders,
            UpdateOrderStatusParam,
        },
        user::User,
    },
    service::tradesafe::{client::BuyerDetails, client::TradeSafeClient, TradeSafeService},
    util::pagination::total_pages,
};

/// Returns every item's quantity to stock.
pub(crate) async fn restock<C: ConnectionTrait>(db: &C, items: &[OrderItem]) -> Result<(), DbErr> {
    let product_repo = ProductRepository::new(db);
    for item in items {
        product_repo
            .increment_stock(item.product_id, item.quantity)
            .await?;
    }
    Ok(())
}

pub struct OrderService<'a> {
    db: &'a DatabaseConnection,
    tradesafe: &'a TradeSafeClient,
}

impl<'a> OrderService<'a> {
    pub fn new(db: &'a DatabaseConnection, tradesafe: &'a TradeSafeClient) -> Self {
        Self { db, tradesafe }
    }

    /// Lists a customer's own orders, newest first.
    pub async fn list_for_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedOrders, AppError> {
        let (orders, total) = OrderRepository::new(self.db)
            .get_paginated_by_user(user_id, page, per_page)
            .await?;

        Ok(PaginatedOrders {
            orders,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Lists every order, optionally filtered by status.
    pub async fn list(
        &self,
        status: Option<OrderStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedOrders, AppError> {
        let (orders, total) = OrderRepository::new(self.db)
            .get_paginated(status, page, per_page)
            .await?;

        Ok(PaginatedOrders {
            orders,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Gets an order visible to `user`.
    ///
    /// # Returns
    /// - `Ok(Order)` - The order, when `user` owns it or is an admin
    /// - `Err(AppError::NotFound)` - Missing, or owned by someone else
    pub async fn get_for_user(&self, user: &User, order_id: i32) -> Result<Order, AppError> {
        let order = self.find(order_id).await?;
        if order.user_id != user.id && !user.is_admin() {
            return Err(not_found());
        }
        Ok(order)
    }

    /// Cancels one of the customer's own orders and puts its stock back.
    ///
    /// The escrow transaction is cancelled after the order is committed; a provider
    /// failure is logged and does not undo the cancellation.
    ///
    /// # Returns
    /// - `Ok(Order)` - The cancelled order
    /// - `Err(AppError::NotFound)` - Missing, or owned by someone else
    /// - `Err(AppError::BadRequest)` - Order already shipped or closed
    pub async fn cancel(&self, user: &User, order_id: i32) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;
        let order_repo = OrderRepository::new(&txn);

        let order = order_repo
            .find_by_id(order_id)
            .await?
            .filter(|order| order.user_id == user.id)
            .ok_or_else(not_found)?;

        if !customer_can_cancel(order.status) {
            return Err(AppError::BadRequest(match order.status {
                OrderStatus::Shipped | OrderStatus::Delivered => {
                    "Cannot cancel a shipped order".to_string()
                }
                _ => "Order is already closed".to_string(),
            }));
        }

        order_repo
            .update_status(order.id, OrderStatus::Cancelled, None)
            .await?;
        restock(&txn, &order.items).await?;
        txn.commit().await?;

        tracing::info!("User {} cancelled order {}", user.id, order.id);

        self.cancel_trade(order.id, "Cancelled by customer").await;

        self.find(order.id).await
    }

    /// Moves an order through the fulfilment workflow.
    ///
    /// Cancelling restores stock. Shipping starts delivery on the escrow allocation;
    /// cancelling or refunding cancels the escrow transaction. Both provider calls are
    /// best effort.
    ///
    /// # Returns
    /// - `Ok(Order)` - Updated order
    /// - `Err(AppError::NotFound)` - No such order
    /// - `Err(AppError::BadRequest)` - Transition not allowed from the current status
    pub async fn update_status(
        &self,
        order_id: i32,
        param: UpdateOrderStatusParam,
    ) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;
        let order_repo = OrderRepository::new(&txn);

        let order = order_repo
            .find_by_id(order_id)
            .await?
            .ok_or_else(not_found)?;

        if !can_transition(order.status, param.status) {
            return Err(AppError::BadRequest(format!(
                "Cannot move an order from {} to {}",
                format!("{:?}", order.status).to_lowercase(),
                format!("{:?}", param.status).to_lowercase()
            )));
        }

        let tracking_number = param
            .tracking_number
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty());

        order_repo
            .update_status(order.id, param.status, tracking_number)
            .await?;
        if param.status == OrderStatus::Cancelled {
            restock(&txn, &order.items).await?;
        }
        txn.commit().await?;

        tracing::info!(
            "Order {} moved from {:?} to {:?}",
            order.id,
            order.status,
            param.status
        );

        match param.status {
            OrderStatus::Shipped => {
                if let Err(e) = TradeSafeService::new(self.db, self.tradesafe)
                    .start_delivery(order.id)
                    .await
                {
                    tracing::error!("Failed to start delivery for order {}: {}", order.id, e);
                }
            }
            OrderStatus::Cancelled => self.cancel_trade(order.id, "Cancelled by store").await,
            OrderStatus::Refunded => self.cancel_trade(order.id, "Refunded by store").await,
            _ => {}
        }

        self.find(order.id).await
    }

    /// Fresh escrow checkout link for one of the customer's pending orders.
    ///
    /// Opens the escrow transaction first when checkout could not.
    ///
    /// # Returns
    /// - `Ok(String)` - Checkout URL
    /// - `Err(AppError::NotFound)` - Missing, or owned by someone else
    /// - `Err(AppError::BadRequest)` - Order is no longer pending
    /// - `Err(AppError::PaymentErr)` - TradeSafe call failed
    pub async fn payment_link(&self, user: &User, order_id: i32) -> Result<String, AppError> {
        let order = self.find(order_id).await?;
        if order.user_id != user.id {
            return Err(not_found());
        }
        if order.status != OrderStatus::Pending {
            return Err(AppError::BadRequest(
                "Only pending orders can be paid".to_string(),
            ));
        }

        let buyer = BuyerDetails::new(&user.name, &user.email, None);
        TradeSafeService::new(self.db, self.tradesafe)
            .payment_link(&order, &buyer)
            .await
    }

    async fn cancel_trade(&self, order_id: i32, comment: &str) {
        if let Err(e) = TradeSafeService::new(self.db, self.tradesafe)
            .cancel(order_id, comment)
            .await
        {
            tracing::error!(
                "Failed to cancel TradeSafe transaction for order {}: {}",
                order_id,
                e
            );
        }
    }

    async fn find(&self, order_id: i32) -> Result<Order, AppError> {
        OrderRepository::new(self.db)
            .find_by_id(order_id)
            .await?
            .ok_or_else(not_found)
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Order not found".to_string())
}
