//! Turns a customer's cart into a pending order and opens its escrow payment.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{cart::CartRepository, order::OrderRepository, product::ProductRepository},
    error::AppError,
    model::{
        cart::ShippingPolicy,
        order::{CheckoutParam, CheckoutResult, CreateOrderParam, NewOrderItem, Order},
        user::User,
    },
    service::tradesafe::{
        client::{BuyerDetails, TradeSafeClient},
        TradeSafeService,
    },
};

pub struct CheckoutService<'a> {
    db: &'a DatabaseConnection,
    tradesafe: &'a TradeSafeClient,
    shipping: ShippingPolicy,
}

impl<'a> CheckoutService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        tradesafe: &'a TradeSafeClient,
        shipping: ShippingPolicy,
    ) -> Self {
        Self {
            db,
            tradesafe,
            shipping,
        }
    }

    /// Places an order for everything in the user's cart.
    ///
    /// The order, its stock decrements and the emptied cart are committed together.
    /// The escrow transaction is opened afterwards; if TradeSafe cannot be reached the
    /// order stays pending without a payment link and the customer can ask for one
    /// later.
    ///
    /// # Returns
    /// - `Ok(CheckoutResult)` - Placed order and optional checkout link
    /// - `Err(AppError::BadRequest)` - Empty cart, archived product or insufficient stock
    pub async fn checkout(
        &self,
        user: &User,
        param: CheckoutParam,
    ) -> Result<CheckoutResult, AppError> {
        let order = self.place_order(user.id, param.shipping_address).await?;

        tracing::info!(
            "User {} placed order {} for {} cents",
            user.id,
            order.id,
            order.total_cents
        );

        let buyer = BuyerDetails::new(&user.name, &user.email, param.phone);
        let payment_url = match TradeSafeService::new(self.db, self.tradesafe)
            .payment_link(&order, &buyer)
            .await
        {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::error!("Failed to open payment for order {}: {}", order.id, e);
                None
            }
        };

        let order = OrderRepository::new(self.db)
            .find_by_id(order.id)
            .await?
            .unwrap_or(order);

        Ok(CheckoutResult { order, payment_url })
    }

    async fn place_order(&self, user_id: i32, shipping_address: String) -> Result<Order, AppError> {
        let txn = self.db.begin().await?;
        let cart_repo = CartRepository::new(&txn);
        let product_repo = ProductRepository::new(&txn);

        let lines = cart_repo.get_lines(user_id).await?;
        if lines.is_empty() {
            return Err(AppError::BadRequest("Your cart is empty".to_string()));
        }
        if let Some(line) = lines.iter().find(|line| !line.product.active) {
            return Err(AppError::BadRequest(format!(
                "{} is no longer available",
                line.product.name
            )));
        }

        let items: Vec<NewOrderItem> = lines
            .iter()
            .map(|line| NewOrderItem {
                product_id: line.product.id,
                product_name: line.product.name.clone(),
                unit_price_cents: line.product.price_cents,
                quantity: line.quantity,
            })
            .collect();

        let mut param = CreateOrderParam {
            user_id,
            subscription_id: None,
            shipping_address,
            shipping_cents: 0,
            items,
        };
        param.shipping_cents = self.shipping.shipping_for(param.subtotal_cents());

        for line in &lines {
            if !product_repo
                .decrement_stock(line.product.id, line.quantity)
                .await?
            {
                return Err(AppError::BadRequest(format!(
                    "Not enough {} in stock",
                    line.product.name
                )));
            }
        }

        let order = OrderRepository::new(&txn).create(param).await?;
        cart_repo.clear(user_id).await?;
        txn.commit().await?;

        Ok(order)
    }
}
