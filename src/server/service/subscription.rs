//! Recurring deliveries managed by customers.
//!
//! Renewal of due subscriptions lives in `service::renewal`; this service covers the
//! customer lifecycle (create, edit, pause, resume, skip, cancel) and the admin listing.

use std::collections::HashSet;

use chrono::Utc;
use entity::sea_orm_active_enums::SubscriptionStatus;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{
        pet_profile::PetProfileRepository, product::ProductRepository,
        subscription::SubscriptionRepository,
    },
    error::AppError,
    model::{
        cart::validate_line_quantity,
        subscription::{
            next_delivery_after, CreateSubscriptionParam, PaginatedSubscriptions, Subscription,
            SubscriptionItemParam, UpdateSubscriptionParam,
        },
    },
    util::pagination::total_pages,
};

pub struct SubscriptionService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> SubscriptionService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Subscription>, AppError> {
        Ok(SubscriptionRepository::new(self.db)
            .get_by_user(user_id)
            .await?)
    }

    /// Lists every subscription by next delivery date.
    pub async fn list(
        &self,
        status: Option<SubscriptionStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedSubscriptions, AppError> {
        let (subscriptions, total) = SubscriptionRepository::new(self.db)
            .get_paginated(status, page, per_page)
            .await?;

        Ok(PaginatedSubscriptions {
            subscriptions,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Starts a subscription.
    ///
    /// # Returns
    /// - `Ok(Subscription)` - Active subscription
    /// - `Err(AppError::BadRequest)` - No items, bad quantity, duplicate or unavailable
    ///   product, or blank address
    /// - `Err(AppError::NotFound)` - Pet profile missing or owned by someone else
    pub async fn create(&self, param: CreateSubscriptionParam) -> Result<Subscription, AppError> {
        let mut param = param;
        param.shipping_address = required_address(&param.shipping_address)?;
        self.validate_items(&param.items).await?;
        if let Some(pet_profile_id) = param.pet_profile_id {
            self.ensure_pet_owned(param.user_id, pet_profile_id).await?;
        }

        let user_id = param.user_id;
        let txn = self.db.begin().await?;
        let subscription = SubscriptionRepository::new(&txn).create(param).await?;
        txn.commit().await?;

        tracing::info!(
            "User {} started subscription {} ({:?})",
            user_id,
            subscription.id,
            subscription.frequency
        );

        Ok(subscription)
    }

    /// Gets one of the user's subscriptions; others' are reported missing.
    pub async fn get(&self, user_id: i32, subscription_id: i32) -> Result<Subscription, AppError> {
        SubscriptionRepository::new(self.db)
            .find_by_id(subscription_id)
            .await?
            .filter(|s| s.user_id == user_id)
            .ok_or_else(not_found)
    }

    /// Applies a partial update to an open subscription.
    ///
    /// # Returns
    /// - `Ok(Subscription)` - Updated subscription
    /// - `Err(AppError::BadRequest)` - Subscription cancelled or invalid field
    /// - `Err(AppError::NotFound)` - Not one of the user's subscriptions
    pub async fn update(
        &self,
        user_id: i32,
        subscription_id: i32,
        param: UpdateSubscriptionParam,
    ) -> Result<Subscription, AppError> {
        let subscription = self.get(user_id, subscription_id).await?;
        ensure_open(&subscription)?;

        if let Some(items) = &param.items {
            self.validate_items(items).await?;
        }
        let shipping_address = match &param.shipping_address {
            Some(address) => required_address(address)?,
            None => subscription.shipping_address.clone(),
        };

        let txn = self.db.begin().await?;
        let repo = SubscriptionRepository::new(&txn);
        repo.update_schedule(
            subscription.id,
            param.frequency.unwrap_or(subscription.frequency),
            shipping_address,
            param.next_delivery_at.unwrap_or(subscription.next_delivery_at),
        )
        .await?;
        if let Some(items) = &param.items {
            repo.replace_items(subscription.id, items).await?;
        }
        txn.commit().await?;

        self.get(user_id, subscription_id).await
    }

    /// Pauses an active subscription; renewals stop until it is resumed.
    pub async fn pause(&self, user_id: i32, subscription_id: i32) -> Result<Subscription, AppError> {
        let subscription = self.get(user_id, subscription_id).await?;
        if subscription.status != SubscriptionStatus::Active {
            return Err(AppError::BadRequest(
                "Only active subscriptions can be paused".to_string(),
            ));
        }

        SubscriptionRepository::new(self.db)
            .set_status(subscription.id, SubscriptionStatus::Paused, None)
            .await?;

        self.get(user_id, subscription_id).await
    }

    /// Resumes a paused subscription. A delivery date left in the past becomes now.
    pub async fn resume(
        &self,
        user_id: i32,
        subscription_id: i32,
    ) -> Result<Subscription, AppError> {
        let subscription = self.get(user_id, subscription_id).await?;
        if subscription.status != SubscriptionStatus::Paused {
            return Err(AppError::BadRequest(
                "Only paused subscriptions can be resumed".to_string(),
            ));
        }

        let txn = self.db.begin().await?;
        let repo = SubscriptionRepository::new(&txn);
        repo.set_status(subscription.id, SubscriptionStatus::Active, None)
            .await?;

        let now = Utc::now();
        if subscription.next_delivery_at < now {
            repo.set_next_delivery(subscription.id, now).await?;
        }
        txn.commit().await?;

        self.get(user_id, subscription_id).await
    }

    /// Skips the next delivery by moving it one interval later.
    pub async fn skip(&self, user_id: i32, subscription_id: i32) -> Result<Subscription, AppError> {
        let subscription = self.get(user_id, subscription_id).await?;
        if subscription.status != SubscriptionStatus::Active {
            return Err(AppError::BadRequest(
                "Only active subscriptions can skip a delivery".to_string(),
            ));
        }

        SubscriptionRepository::new(self.db)
            .set_next_delivery(
                subscription.id,
                next_delivery_after(subscription.frequency, subscription.next_delivery_at),
            )
            .await?;

        self.get(user_id, subscription_id).await
    }

    /// Cancels a subscription for good.
    pub async fn cancel(
        &self,
        user_id: i32,
        subscription_id: i32,
    ) -> Result<Subscription, AppError> {
        let subscription = self.get(user_id, subscription_id).await?;
        ensure_open(&subscription)?;

        SubscriptionRepository::new(self.db)
            .set_status(
                subscription.id,
                SubscriptionStatus::Cancelled,
                Some(Utc::now()),
            )
            .await?;

        tracing::info!("User {} cancelled subscription {}", user_id, subscription.id);

        self.get(user_id, subscription_id).await
    }

    async fn validate_items(&self, items: &[SubscriptionItemParam]) -> Result<(), AppError> {
        if items.is_empty() {
            return Err(AppError::BadRequest(
                "A subscription needs at least one item".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        for item in items {
            validate_line_quantity(item.quantity)?;
            if !seen.insert(item.product_id) {
                return Err(AppError::BadRequest(
                    "Each product may appear only once".to_string(),
                ));
            }
        }

        let ids: Vec<i32> = items.iter().map(|item| item.product_id).collect();
        let products = ProductRepository::new(self.db).find_by_ids(&ids).await?;
        for id in ids {
            if !products.iter().any(|p| p.id == id && p.active) {
                return Err(AppError::BadRequest(format!(
                    "Product {} is not available",
                    id
                )));
            }
        }

        Ok(())
    }

    async fn ensure_pet_owned(&self, user_id: i32, pet_profile_id: i32) -> Result<(), AppError> {
        PetProfileRepository::new(self.db)
            .find_by_id(pet_profile_id)
            .await?
            .filter(|pet| pet.user_id == user_id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound("Pet profile not found".to_string()))
    }
}

fn ensure_open(subscription: &Subscription) -> Result<(), AppError> {
    if subscription.status == SubscriptionStatus::Cancelled {
        return Err(AppError::BadRequest(
            "Subscription is cancelled".to_string(),
        ));
    }
    Ok(())
}

fn required_address(address: &str) -> Result<String, AppError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(AppError::BadRequest(
            "Shipping address is required".to_string(),
        ));
    }
    Ok(address.to_string())
}

fn not_found() -> AppError {
    AppError::NotFound("Subscription not found".to_string())
}
