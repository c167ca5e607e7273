use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryFrequencyDto {
    Weekly,
    Biweekly,
    Monthly,
    Bimonthly,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatusDto {
    Active,
    Paused,
    Cancelled,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct SubscriptionItemDto {
    pub product_id: i32,
    pub product_name: String,
    pub quantity: i32,
    /// Discounted unit price charged on each delivery.
    pub unit_price_cents: i64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct SubscriptionDto {
    pub id: i32,
    pub user_id: i32,
    pub pet_profile_id: Option<i32>,
    pub status: SubscriptionStatusDto,
    pub frequency: DeliveryFrequencyDto,
    pub next_delivery_at: DateTime<Utc>,
    pub shipping_address: String,
    pub items: Vec<SubscriptionItemDto>,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct SubscriptionItemInputDto {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct CreateSubscriptionDto {
    pub frequency: DeliveryFrequencyDto,
    pub items: Vec<SubscriptionItemInputDto>,
    pub shipping_address: String,
    pub pet_profile_id: Option<i32>,
    /// First delivery; defaults to now.
    pub start_date: Option<DateTime<Utc>>,
}

/// Partial update; omitted fields are left unchanged.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, Default)]
pub struct UpdateSubscriptionDto {
    pub frequency: Option<DeliveryFrequencyDto>,
    pub items: Option<Vec<SubscriptionItemInputDto>>,
    pub shipping_address: Option<String>,
    pub next_delivery_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct PaginatedSubscriptionsDto {
    pub subscriptions: Vec<SubscriptionDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
