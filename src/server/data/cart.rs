//! Cart data repository.
//!
//! One row per (user, product) pair holding the requested quantity.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::{cart::CartLine, product::Product};

pub struct CartRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> CartRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets the user's cart lines with their products, in the order they were added.
    pub async fn get_lines(&self, user_id: i32) -> Result<Vec<CartLine>, DbErr> {
        let rows = entity::prelude::CartItem::find()
            .filter(entity::cart_item::Column::UserId.eq(user_id))
            .order_by_asc(entity::cart_item::Column::Id)
            .find_also_related(entity::prelude::Product)
            .all(self.db)
            .await?;

        Ok(rows
            .into_iter()
            .filter_map(|(item, product)| {
                product.map(|product| CartLine {
                    product: Product::from_entity(product),
                    quantity: item.quantity,
                })
            })
            .collect())
    }

    /// Current quantity of a product in the cart, if present.
    pub async fn find_quantity(&self, user_id: i32, product_id: i32) -> Result<Option<i32>, DbErr> {
        let item = entity::prelude::CartItem::find()
            .filter(entity::cart_item::Column::UserId.eq(user_id))
            .filter(entity::cart_item::Column::ProductId.eq(product_id))
            .one(self.db)
            .await?;

        Ok(item.map(|item| item.quantity))
    }

    /// Sets the quantity of a line, inserting it when missing.
    pub async fn set_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<(), DbErr> {
        let existing = entity::prelude::CartItem::find()
            .filter(entity::cart_item::Column::UserId.eq(user_id))
            .filter(entity::cart_item::Column::ProductId.eq(product_id))
            .one(self.db)
            .await?;

        match existing {
            Some(item) => {
                let mut active: entity::cart_item::ActiveModel = item.into();
                active.quantity = ActiveValue::Set(quantity);
                active.update(self.db).await?;
            }
            None => {
                entity::cart_item::ActiveModel {
                    user_id: ActiveValue::Set(user_id),
                    product_id: ActiveValue::Set(product_id),
                    quantity: ActiveValue::Set(quantity),
                    created_at: ActiveValue::Set(Utc::now()),
                    ..Default::default()
                }
                .insert(self.db)
                .await?;
            }
        }

        Ok(())
    }

    /// Removes a line from the cart.
    ///
    /// # Returns
    /// - `Ok(true)` - Line removed
    /// - `Ok(false)` - Product was not in the cart
    pub async fn remove(&self, user_id: i32, product_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::CartItem::delete_many()
            .filter(entity::cart_item::Column::UserId.eq(user_id))
            .filter(entity::cart_item::Column::ProductId.eq(product_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn clear(&self, user_id: i32) -> Result<(), DbErr> {
        entity::prelude::CartItem::delete_many()
            .filter(entity::cart_item::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
