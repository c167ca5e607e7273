//! Order factory for creating orders with line items.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::OrderStatus;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating orders together with their items.
///
/// Totals are derived from the items; shipping defaults to zero.
///
/// # Example
///
/// ```rust,ignore
/// let (order, items) = OrderFactory::new(&db, user.id)
///     .status(OrderStatus::Paid)
///     .item(&product, 2)
///     .build()
///     .await?;
/// ```
pub struct OrderFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i32,
    subscription_id: Option<i32>,
    status: OrderStatus,
    shipping_cents: i64,
    created_at: DateTime<Utc>,
    items: Vec<(i32, String, i64, i32)>,
}

impl<'a> OrderFactory<'a> {
    /// Creates a new OrderFactory: pending, no shipping fee, created now, no items.
    pub fn new(db: &'a DatabaseConnection, user_id: i32) -> Self {
        Self {
            db,
            user_id,
            subscription_id: None,
            status: OrderStatus::Pending,
            shipping_cents: 0,
            created_at: Utc::now(),
            items: Vec::new(),
        }
    }

    pub fn status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }

    pub fn subscription_id(mut self, subscription_id: i32) -> Self {
        self.subscription_id = Some(subscription_id);
        self
    }

    pub fn shipping_cents(mut self, shipping_cents: i64) -> Self {
        self.shipping_cents = shipping_cents;
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Adds a line for the product at its current price.
    pub fn item(mut self, product: &entity::product::Model, quantity: i32) -> Self {
        self.items.push((
            product.id,
            product.name.clone(),
            product.price_cents,
            quantity,
        ));
        self
    }

    /// Inserts the order and its items.
    pub async fn build(
        self,
    ) -> Result<(entity::order::Model, Vec<entity::order_item::Model>), DbErr> {
        let subtotal: i64 = self
            .items
            .iter()
            .map(|(_, _, price, quantity)| price * *quantity as i64)
            .sum();

        let order = entity::order::ActiveModel {
            user_id: ActiveValue::Set(self.user_id),
            subscription_id: ActiveValue::Set(self.subscription_id),
            status: ActiveValue::Set(self.status),
            subtotal_cents: ActiveValue::Set(subtotal),
            shipping_cents: ActiveValue::Set(self.shipping_cents),
            total_cents: ActiveValue::Set(subtotal + self.shipping_cents),
            shipping_address: ActiveValue::Set("1 Kennel Road, Cape Town".to_string()),
            tracking_number: ActiveValue::Set(None),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut items = Vec::with_capacity(self.items.len());
        for (product_id, product_name, unit_price_cents, quantity) in self.items {
            let item = entity::order_item::ActiveModel {
                order_id: ActiveValue::Set(order.id),
                product_id: ActiveValue::Set(product_id),
                product_name: ActiveValue::Set(product_name),
                unit_price_cents: ActiveValue::Set(unit_price_cents),
                quantity: ActiveValue::Set(quantity),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            items.push(item);
        }

        Ok((order, items))
    }
}

/// Creates a pending order with one unit of the product.
pub async fn create_order(
    db: &DatabaseConnection,
    user_id: i32,
    product: &entity::product::Model,
) -> Result<entity::order::Model, DbErr> {
    let (order, _) = OrderFactory::new(db, user_id)
        .item(product, 1)
        .build()
        .await?;
    Ok(order)
}
