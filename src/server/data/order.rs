//! Order data repository.
//!
//! Orders are always returned with their items and the state of their escrow trade, so
//! every read loads the three tables and stitches them together here.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::OrderStatus;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::server::model::order::{CreateOrderParam, Order};

pub struct OrderRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a pending order and snapshots its items.
    ///
    /// Totals are computed from the items plus the given shipping charge.
    ///
    /// # Returns
    /// - `Ok(Order)` - The created order with its items
    /// - `Err(DbErr)` - Database error during insert
    pub async fn create(&self, param: CreateOrderParam) -> Result<Order, DbErr> {
        let now = Utc::now();
        let subtotal = param.subtotal_cents();

        let order = entity::order::ActiveModel {
            user_id: ActiveValue::Set(param.user_id),
            subscription_id: ActiveValue::Set(param.subscription_id),
            status: ActiveValue::Set(OrderStatus::Pending),
            subtotal_cents: ActiveValue::Set(subtotal),
            shipping_cents: ActiveValue::Set(param.shipping_cents),
            total_cents: ActiveValue::Set(subtotal + param.shipping_cents),
            shipping_address: ActiveValue::Set(param.shipping_address),
            tracking_number: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        let mut items = Vec::with_capacity(param.items.len());
        for item in param.items {
            let entity = entity::order_item::ActiveModel {
                order_id: ActiveValue::Set(order.id),
                product_id: ActiveValue::Set(item.product_id),
                product_name: ActiveValue::Set(item.product_name),
                unit_price_cents: ActiveValue::Set(item.unit_price_cents),
                quantity: ActiveValue::Set(item.quantity),
                ..Default::default()
            }
            .insert(self.db)
            .await?;
            items.push(entity);
        }

        Ok(Order::from_entity(order, items, None))
    }

    pub async fn find_by_id(&self, order_id: i32) -> Result<Option<Order>, DbErr> {
        let Some(entity) = entity::prelude::Order::find_by_id(order_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        Ok(self.hydrate(vec![entity]).await?.pop())
    }

    /// Sets an order's status and, when given, its tracking number.
    ///
    /// # Returns
    /// - `Ok(true)` - Order updated
    /// - `Ok(false)` - No order with that id
    pub async fn update_status(
        &self,
        order_id: i32,
        status: OrderStatus,
        tracking_number: Option<String>,
    ) -> Result<bool, DbErr> {
        let Some(entity) = entity::prelude::Order::find_by_id(order_id)
            .one(self.db)
            .await?
        else {
            return Ok(false);
        };

        let mut active: entity::order::ActiveModel = entity.into();
        active.status = ActiveValue::Set(status);
        if tracking_number.is_some() {
            active.tracking_number = ActiveValue::Set(tracking_number);
        }
        active.updated_at = ActiveValue::Set(Utc::now());
        active.update(self.db).await?;

        Ok(true)
    }

    /// Gets a user's orders, newest first.
    pub async fn get_paginated_by_user(
        &self,
        user_id: i32,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Order>, u64), DbErr> {
        let query =
            entity::prelude::Order::find().filter(entity::order::Column::UserId.eq(user_id));

        self.paginate(query, page, per_page).await
    }

    /// Gets all orders, newest first, optionally filtered by status.
    pub async fn get_paginated(
        &self,
        status: Option<OrderStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Order>, u64), DbErr> {
        let mut query = entity::prelude::Order::find();
        if let Some(status) = status {
            query = query.filter(entity::order::Column::Status.eq(status));
        }

        self.paginate(query, page, per_page).await
    }

    /// Gets every order created in `[from, to)`, oldest first.
    pub async fn get_created_between(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Order>, DbErr> {
        let entities = entity::prelude::Order::find()
            .filter(entity::order::Column::CreatedAt.gte(from))
            .filter(entity::order::Column::CreatedAt.lt(to))
            .order_by_asc(entity::order::Column::CreatedAt)
            .all(self.db)
            .await?;

        self.hydrate(entities).await
    }

    /// Counts orders in any of the given statuses.
    pub async fn count_by_status(&self, statuses: &[OrderStatus]) -> Result<u64, DbErr> {
        entity::prelude::Order::find()
            .filter(entity::order::Column::Status.is_in(statuses.iter().copied()))
            .count(self.db)
            .await
    }

    async fn paginate(
        &self,
        query: Select<entity::prelude::Order>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Order>, u64), DbErr> {
        let paginator = query
            .order_by_desc(entity::order::Column::CreatedAt)
            .order_by_desc(entity::order::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((self.hydrate(entities).await?, total))
    }

    /// Loads items and trades for a batch of orders, preserving input order.
    async fn hydrate(&self, orders: Vec<entity::order::Model>) -> Result<Vec<Order>, DbErr> {
        if orders.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();

        let mut items: HashMap<i32, Vec<entity::order_item::Model>> = HashMap::new();
        for item in entity::prelude::OrderItem::find()
            .filter(entity::order_item::Column::OrderId.is_in(ids.clone()))
            .order_by_asc(entity::order_item::Column::Id)
            .all(self.db)
            .await?
        {
            items.entry(item.order_id).or_default().push(item);
        }

        let mut trades: HashMap<i32, entity::trade::Model> = entity::prelude::Trade::find()
            .filter(entity::trade::Column::OrderId.is_in(ids))
            .all(self.db)
            .await?
            .into_iter()
            .map(|trade| (trade.order_id, trade))
            .collect();

        Ok(orders
            .into_iter()
            .map(|order| {
                let order_items = items.remove(&order.id).unwrap_or_default();
                let trade = trades.remove(&order.id);
                Order::from_entity(order, order_items, trade)
            })
            .collect())
    }
}
