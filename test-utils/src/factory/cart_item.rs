//! Cart line factory.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Puts `quantity` of a product in the user's cart.
pub async fn create_cart_item(
    db: &DatabaseConnection,
    user_id: i32,
    product_id: i32,
    quantity: i32,
) -> Result<entity::cart_item::Model, DbErr> {
    entity::cart_item::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        product_id: ActiveValue::Set(product_id),
        quantity: ActiveValue::Set(quantity),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
