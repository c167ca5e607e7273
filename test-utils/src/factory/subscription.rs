//! Subscription factory for creating recurring deliveries.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::{DeliveryFrequency, SubscriptionStatus};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating subscriptions together with their items.
///
/// # Example
///
/// ```rust,ignore
/// let (subscription, items) = SubscriptionFactory::new(&db, user.id)
///     .item(product.id, 2)
///     .next_delivery_at(Utc::now() - Duration::hours(1))
///     .build()
///     .await?;
/// ```
pub struct SubscriptionFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    status: SubscriptionStatus,
    frequency: DeliveryFrequency,
    next_delivery_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    cancelled_at: Option<DateTime<Utc>>,
    items: Vec<(i32, i32)>,
}

impl<'a> SubscriptionFactory<'a> {
    /// Creates a new SubscriptionFactory with default values.
    ///
    /// Defaults: active, monthly, next delivery in 7 days, created now, no items.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        let now = Utc::now();
        Self {
            db,
            user_id,
            status: SubscriptionStatus::Active,
            frequency: DeliveryFrequency::Monthly,
            next_delivery_at: now + chrono::Duration::days(7),
            created_at: now,
            cancelled_at: None,
            items: Vec::new(),
        }
    }

    pub fn status(mut self, status: SubscriptionStatus) -> Self {
        self.status = status;
        self
    }

    pub fn frequency(mut self, frequency: DeliveryFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    pub fn next_delivery_at(mut self, next_delivery_at: DateTime<Utc>) -> Self {
        self.next_delivery_at = next_delivery_at;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Marks the subscription cancelled at the given time.
    pub fn cancelled_at(mut self, cancelled_at: DateTime<Utc>) -> Self {
        self.status = SubscriptionStatus::Cancelled;
        self.cancelled_at = Some(cancelled_at);
        self
    }

    /// Adds a product line to the subscription.
    pub fn item(mut self, product_id: i32, quantity: i32) -> Self {
        self.items.push((product_id, quantity));
        self
    }

    /// Inserts the subscription and its items.
    pub async fn build(
        self,
    ) -> Result<
        (
            entity::subscription::Model,
            Vec<entity::subscription_item::Model>,
        ),
        DbErr,
    > {
        let subscription = entity::subscription::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            pet_profile_id: ActiveValue::Set(None),
            status: ActiveValue::Set(self.status),
            frequency: ActiveValue::Set(self.frequency),
            next_delivery_at: ActiveValue::Set(self.next_delivery_at),
            shipping_address: ActiveValue::Set("1 Kennel Road, Cape Town".to_string()),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            cancelled_at: ActiveValue::Set(self.cancelled_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut items = Vec::with_capacity(self.items.len());
        for (product_id, quantity) in self.items {
            let item = entity::subscription_item::ActiveModel {
                subscription_id: ActiveValue::Set(subscription.id),
                product_id: ActiveValue::Set(product_id),
                quantity: ActiveValue::Set(quantity),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            items.push(item);
        }

        Ok((subscription, items))
    }
}

/// Creates an active monthly subscription with a single line.
pub async fn create_subscription(
    db: &DatabaseConnection,
    user_id: i32,
    product_id: i32,
) -> Result<entity::subscription::Model, DbErr> {
    let (subscription, _) = SubscriptionFactory::new(db, user_id)
        .item(product_id, 1)
        .build()
        .await?;
    Ok(subscription)
}
