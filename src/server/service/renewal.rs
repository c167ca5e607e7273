//! Turns due subscriptions into orders.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        order::OrderRepository, product::ProductRepository, subscription::SubscriptionRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        order::{CreateOrderParam, NewOrderItem, Order},
        subscription::{next_delivery_after, Subscription},
    },
    service::tradesafe::{
        client::{BuyerDetails, TradeSafeClient},
        TradeSafeService,
    },
};

/// Result of one renewal run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenewalSummary {
    pub renewed: usize,
    pub skipped: usize,
}

/// Why a due subscription could not be renewed this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unavailable(i32),
    OutOfStock(i32),
    Empty,
}

pub struct RenewalService<'a> {
    db: &'a DatabaseConnection,
    tradesafe: &'a TradeSafeClient,
}

impl<'a> RenewalService<'a> {
    pub fn new(db: &'a DatabaseConnection, tradesafe: &'a TradeSafeClient) -> Self {
        Self { db, tradesafe }
    }

    /// Renews every active subscription due at `now`.
    ///
    /// Subscriptions that cannot be fulfilled are left untouched and picked up again on
    /// the next run.
    pub async fn renew_due(&self, now: DateTime<Utc>) -> Result<RenewalSummary, AppError> {
        let due = SubscriptionRepository::new(self.db).get_due(now).await?;
        let mut summary = RenewalSummary::default();

        for subscription in due {
            match self.renew(&subscription, now).await? {
                Ok(order) => {
                    summary.renewed += 1;
                    tracing::info!(
                        "Subscription {} renewed as order {}",
                        subscription.id,
                        order.id
                    );
                    self.open_payment(&order).await;
                }
                Err(reason) => {
                    summary.skipped += 1;
                    tracing::warn!(
                        "Skipped renewal of subscription {}: {:?}",
                        subscription.id,
                        reason
                    );
                }
            }
        }

        Ok(summary)
    }

    /// Creates the order for one delivery and moves the schedule forward.
    ///
    /// The order, stock decrements and new delivery date are committed together. When
    /// the scheduled date is more than one interval in the past the schedule is rolled
    /// forward past `now` so a stalled scheduler does not produce a burst of orders.
    async fn renew(
        &self,
        subscription: &Subscription,
        now: DateTime<Utc>,
    ) -> Result<Result<Order, SkipReason>, AppError> {
        if subscription.items.is_empty() {
            return Ok(Err(SkipReason::Empty));
        }

        let txn = self.db.begin().await?;
        let product_repo = ProductRepository::new(&txn);

        let ids: Vec<i32> = subscription.items.iter().map(|i| i.product_id).collect();
        let products = product_repo.find_by_ids(&ids).await?;

        let mut items = Vec::with_capacity(subscription.items.len());
        for line in &subscription.items {
            let Some(product) = products.iter().find(|p| p.id == line.product_id && p.active)
            else {
                return Ok(Err(SkipReason::Unavailable(line.product_id)));
            };
            items.push(NewOrderItem {
                product_id: product.id,
                product_name: product.name.clone(),
                unit_price_cents: product.subscription_price_cents(),
                quantity: line.quantity,
            });
        }

        for item in &items {
            if !product_repo
                .decrement_stock(item.product_id, item.quantity)
                .await?
            {
                return Ok(Err(SkipReason::OutOfStock(item.product_id)));
            }
        }

        let order = OrderRepository::new(&txn)
            .create(CreateOrderParam {
                user_id: subscription.user_id,
                subscription_id: Some(subscription.id),
                shipping_address: subscription.shipping_address.clone(),
                shipping_cents: 0,
                items,
            })
            .await?;

        let mut next = next_delivery_after(subscription.frequency, subscription.next_delivery_at);
        while next <= now {
            next = next_delivery_after(subscription.frequency, next);
        }
        SubscriptionRepository::new(&txn)
            .set_next_delivery(subscription.id, next)
            .await?;

        txn.commit().await?;

        Ok(Ok(order))
    }

    async fn open_payment(&self, order: &Order) {
        let buyer = match UserRepository::new(self.db).find_by_id(order.user_id).await {
            Ok(Some(user)) => BuyerDetails::new(&user.name, &user.email, None),
            Ok(None) => return,
            Err(e) => {
                tracing::error!("Failed to load buyer for order {}: {}", order.id, e);
                return;
            }
        };

        if let Err(e) = TradeSafeService::new(self.db, self.tradesafe)
            .open_trade(order, &buyer)
            .await
        {
            tracing::error!("Failed to open payment for order {}: {}", order.id, e);
        }
    }
}
