use crate::server::{
    data::subscription::SubscriptionRepository,
    model::subscription::{CreateSubscriptionParam, SubscriptionItemParam},
};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{DeliveryFrequency, SubscriptionStatus};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod detach_pet_profile;
mod get_due;
mod replace_items;
