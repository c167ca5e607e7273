//! SeaORM entity models for the KibbleDrop store.

pub mod prelude;

pub mod cart_item;
pub mod order;
pub mod order_item;
pub mod pet_profile;
pub mod product;
pub mod sea_orm_active_enums;
pub mod subscription;
pub mod subscription_item;
pub mod trade;
pub mod user;
