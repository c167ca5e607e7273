//! Subscription data repository.
//!
//! Subscriptions are returned with their lines priced at the current subscription rate
//! of each product, so reads join subscription items with products.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{DeliveryFrequency, SubscriptionStatus};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::{
    analytics::SubscriptionSnapshot,
    product::Product,
    subscription::{
        CreateSubscriptionParam, Subscription, SubscriptionItemParam, SubscriptionLine,
    },
};

pub struct SubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active subscription and its items.
    ///
    /// Issues several statements; run it on a transaction.
    ///
    /// # Returns
    /// - `Ok(Subscription)` - The created subscription with priced lines
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateSubscriptionParam) -> Result<Subscription, DbErr> {
        let now = Utc::now();
        let entity = entity::subscription::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            pet_profile_id: ActiveValue::Set(param.pet_profile_id),
            status: ActiveValue::Set(SubscriptionStatus::Active),
            frequency: ActiveValue::Set(param.frequency),
            next_delivery_at: ActiveValue::Set(param.next_delivery_at),
            shipping_address: ActiveValue::Set(param.shipping_address),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            cancelled_at: ActiveValue::Set(None),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        self.insert_items(entity.id, &param.items).await?;

        self.hydrate(vec![entity])
            .await?
            .pop()
            .ok_or_else(|| DbErr::RecordNotFound("subscription".to_string()))
    }

    pub async fn find_by_id(&self, subscription_id: i32) -> Result<Option<Subscription>, DbErr> {
        let Some(entity) = entity::prelude::Subscription::find_by_id(subscription_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![entity]).await?.pop())
    }

    /// Gets a user's subscriptions, newest first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<Subscription>, DbErr> {
        let entities = entity::prelude::Subscription::find()
            .filter(entity::subscription::Column::UserId.eq(user_id))
            .order_by_desc(entity::subscription::Column::CreatedAt)
            .order_by_desc(entity::subscription::Column::Id)
            .all(self.db)
            .await?;

        self.hydrate(entities).await
    }

    /// Gets all subscriptions by next delivery date, optionally filtered by status.
    pub async fn get_paginated(
        &self,
        status: Option<SubscriptionStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Subscription>, u64), DbErr> {
        let mut query = entity::prelude::Subscription::find();
        if let Some(status) = status {
            query = query.filter(entity::subscription::Column::Status.eq(status));
        }

        let paginator = query
            .order_by_asc(entity::subscription::Column::NextDeliveryAt)
            .order_by_asc(entity::subscription::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.hydrate(entities).await?, total))
    }

    /// Active subscriptions whose next delivery is at or before `now`.
    pub async fn get_due(&self, now: DateTime<Utc>) -> Result<Vec<Subscription>, DbErr> {
        let entities = entity::prelude::Subscription::find()
            .filter(entity::subscription::Column::Status.eq(SubscriptionStatus::Active))
            .filter(entity::subscription::Column::NextDeliveryAt.lte(now))
            .order_by_asc(entity::subscription::Column::NextDeliveryAt)
            .all(self.db)
            .await?;

        self.hydrate(entities).await
    }

    /// Updates frequency, address and next delivery date.
    pub async fn update_schedule(
        &self,
        subscription_id: i32,
        frequency: DeliveryFrequency,
        shipping_address: String,
        next_delivery_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::prelude::Subscription::update_many()
            .col_expr(
                entity::subscription::Column::Frequency,
                Expr::value(frequency),
            )
            .col_expr(
                entity::subscription::Column::ShippingAddress,
                Expr::value(shipping_address),
            )
            .col_expr(
                entity::subscription::Column::NextDeliveryAt,
                Expr::value(next_delivery_at),
            )
            .col_expr(
                entity::subscription::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::subscription::Column::Id.eq(subscription_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Replaces every line of a subscription. Run it on a transaction.
    pub async fn replace_items(
        &self,
        subscription_id: i32,
        items: &[SubscriptionItemParam],
    ) -> Result<(), DbErr> {
        entity::prelude::SubscriptionItem::delete_many()
            .filter(entity::subscription_item::Column::SubscriptionId.eq(subscription_id))
            .exec(self.db)
            .await?;

        self.insert_items(subscription_id, items).await
    }

    /// Sets the status; `cancelled_at` is written as given.
    pub async fn set_status(
        &self,
        subscription_id: i32,
        status: SubscriptionStatus,
        cancelled_at: Option<DateTime<Utc>>,
    ) -> Result<(), DbErr> {
        entity::prelude::Subscription::update_many()
            .col_expr(entity::subscription::Column::Status, Expr::value(status))
            .col_expr(
                entity::subscription::Column::CancelledAt,
                Expr::value(cancelled_at),
            )
            .col_expr(
                entity::subscription::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::subscription::Column::Id.eq(subscription_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn set_next_delivery(
        &self,
        subscription_id: i32,
        next_delivery_at: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        entity::prelude::Subscription::update_many()
            .col_expr(
                entity::subscription::Column::NextDeliveryAt,
                Expr::value(next_delivery_at),
            )
            .col_expr(
                entity::subscription::Column::UpdatedAt,
                Expr::value(Utc::now()),
            )
            .filter(entity::subscription::Column::Id.eq(subscription_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Unlinks a pet profile from every subscription referencing it.
    pub async fn detach_pet_profile(&self, pet_profile_id: i32) -> Result<(), DbErr> {
        entity::prelude::Subscription::update_many()
            .col_expr(
                entity::subscription::Column::PetProfileId,
                Expr::value(Option::<i32>::None),
            )
            .filter(entity::subscription::Column::PetProfileId.eq(pet_profile_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count_by_status(&self, status: SubscriptionStatus) -> Result<u64, DbErr> {
        entity::prelude::Subscription::find()
            .filter(entity::subscription::Column::Status.eq(status))
            .count(self.db)
            .await
    }

    /// Counts active subscriptions with a delivery due in `[from, to)`.
    pub async fn count_active_due_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<u64, DbErr> {
        entity::prelude::Subscription::find()
            .filter(entity::subscription::Column::Status.eq(SubscriptionStatus::Active))
            .filter(entity::subscription::Column::NextDeliveryAt.gte(from))
            .filter(entity::subscription::Column::NextDeliveryAt.lt(to))
            .count(self.db)
            .await
    }

    /// Lifecycle timestamps of every subscription created before `to`.
    pub async fn get_snapshots_before(
        &self,
        to: DateTime<Utc>,
    ) -> Result<Vec<SubscriptionSnapshot>, DbErr> {
        let entities = entity::prelude::Subscription::find()
            .filter(entity::subscription::Column::CreatedAt.lt(to))
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| SubscriptionSnapshot {
                status: entity.status,
                created_at: entity.created_at,
                cancelled_at: entity.cancelled_at,
            })
            .collect())
    }

    async fn insert_items(
        &self,
        subscription_id: i32,
        items: &[SubscriptionItemParam],
    ) -> Result<(), DbErr> {
        for item in items {
            entity::subscription_item::ActiveModel {
                subscription_id: ActiveValue::Set(subscription_id),
                product_id: ActiveValue::Set(item.product_id),
                quantity: ActiveValue::Set(item.quantity),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
        }

        Ok(())
    }

    /// Loads priced lines for a batch of subscriptions, preserving input order.
    async fn hydrate(
        &self,
        subscriptions: Vec<entity::subscription::Model>,
    ) -> Result<Vec<Subscription>, DbErr> {
        if subscriptions.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = subscriptions.iter().map(|s| s.id).collect();

        let mut lines: HashMap<i32, Vec<SubscriptionLine>> = HashMap::new();
        for (item, product) in entity::prelude::SubscriptionItem::find()
            .filter(entity::subscription_item::Column::SubscriptionId.is_in(ids))
            .order_by_asc(entity::subscription_item::Column::Id)
            .find_also_related(entity::prelude::Product)
            .all(self.db)
            .await?
        {
            let Some(product) = product.map(Product::from_entity) else {
                continue;
            };
            lines
                .entry(item.subscription_id)
                .or_default()
                .push(SubscriptionLine {
                    product_id: product.id,
                    unit_price_cents: product.subscription_price_cents(),
                    product_name: product.name,
                    quantity: item.quantity,
                });
        }

        Ok(subscriptions
            .into_iter()
            .map(|subscription| {
                let items = lines.remove(&subscription.id).unwrap_or_default();
                Subscription::from_entity(subscription, items)
            })
            .collect())
    }
}
