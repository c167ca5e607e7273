//! Product data repository.
//!
//! Catalog queries for the storefront and admin screens, plus the stock adjustments made
//! by checkout, cancellation and subscription renewal. Stock changes are conditional
//! updates so a concurrent writer cannot push stock below zero.

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, ExprTrait},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::product::{Product, ProductFilter, SaveProductParam};

pub struct ProductRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a product.
    ///
    /// # Returns
    /// - `Ok(Product)` - The created product
    /// - `Err(DbErr)` - Database error, including a duplicate slug
    pub async fn create(&self, param: SaveProductParam) -> Result<Product, DbErr> {
        let now = Utc::now();
        let entity = entity::product::ActiveModel {
            name: ActiveValue::Set(param.name),
            slug: ActiveValue::Set(param.slug),
            description: ActiveValue::Set(param.description),
            species: ActiveValue::Set(param.species),
            brand: ActiveValue::Set(param.brand),
            price_cents: ActiveValue::Set(param.price_cents),
            weight_grams: ActiveValue::Set(param.weight_grams),
            stock: ActiveValue::Set(param.stock),
            image_url: ActiveValue::Set(param.image_url),
            active: ActiveValue::Set(param.active),
            subscription_discount_percent: ActiveValue::Set(param.subscription_discount_percent),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Product::from_entity(entity))
    }

    /// Replaces every editable field of a product.
    ///
    /// # Returns
    /// - `Ok(Some(Product))` - Updated product
    /// - `Ok(None)` - No product with that id
    /// - `Err(DbErr)` - Database error during update
    pub async fn update(
        &self,
        product_id: i32,
        param: SaveProductParam,
    ) -> Result<Option<Product>, DbErr> {
        let Some(entity) = entity::prelude::Product::find_by_id(product_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::product::ActiveModel = entity.into();
        active.name = ActiveValue::Set(param.name);
        active.slug = ActiveValue::Set(param.slug);
        active.description = ActiveValue::Set(param.description);
        active.species = ActiveValue::Set(param.species);
        active.brand = ActiveValue::Set(param.brand);
        active.price_cents = ActiveValue::Set(param.price_cents);
        active.weight_grams = ActiveValue::Set(param.weight_grams);
        active.stock = ActiveValue::Set(param.stock);
        active.image_url = ActiveValue::Set(param.image_url);
        active.active = ActiveValue::Set(param.active);
        active.subscription_discount_percent =
            ActiveValue::Set(param.subscription_discount_percent);
        active.updated_at = ActiveValue::Set(Utc::now());

        let entity = active.update(self.db).await?;

        Ok(Some(Product::from_entity(entity)))
    }

    pub async fn find_by_id(&self, product_id: i32) -> Result<Option<Product>, DbErr> {
        let entity = entity::prelude::Product::find_by_id(product_id)
            .one(self.db)
            .await?;

        Ok(entity.map(Product::from_entity))
    }

    /// Finds a product by slug, optionally only when it is active.
    pub async fn find_by_slug(
        &self,
        slug: &str,
        active_only: bool,
    ) -> Result<Option<Product>, DbErr> {
        let mut query =
            entity::prelude::Product::find().filter(entity::product::Column::Slug.eq(slug));
        if active_only {
            query = query.filter(entity::product::Column::Active.eq(true));
        }

        Ok(query.one(self.db).await?.map(Product::from_entity))
    }

    /// Loads the given products; missing ids are silently skipped.
    pub async fn find_by_ids(&self, product_ids: &[i32]) -> Result<Vec<Product>, DbErr> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Product::find()
            .filter(entity::product::Column::Id.is_in(product_ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Product::from_entity).collect())
    }

    /// Checks whether another product already uses `slug`.
    ///
    /// # Arguments
    /// - `slug` - Slug to check
    /// - `exclude_id` - Product being edited, which may keep its own slug
    pub async fn slug_taken(&self, slug: &str, exclude_id: Option<i32>) -> Result<bool, DbErr> {
        let mut query =
            entity::prelude::Product::find().filter(entity::product::Column::Slug.eq(slug));
        if let Some(id) = exclude_id {
            query = query.filter(entity::product::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Gets products matching the filter ordered by name.
    ///
    /// # Returns
    /// - `Ok((products, total))` - Products on the page and the total matching count
    /// - `Err(DbErr)` - Database error during pagination query
    pub async fn get_paginated(
        &self,
        filter: &ProductFilter,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<Product>, u64), DbErr> {
        let mut query = entity::prelude::Product::find();

        if !filter.include_inactive {
            query = query.filter(entity::product::Column::Active.eq(true));
        }
        if let Some(species) = filter.species {
            query = query.filter(entity::product::Column::Species.eq(species));
        }
        if let Some(search) = filter.search.as_deref().map(str::trim) {
            if !search.is_empty() {
                query = query.filter(
                    Condition::any()
                        .add(entity::product::Column::Name.contains(search))
                        .add(entity::product::Column::Brand.contains(search)),
                );
            }
        }

        let paginator = query
            .order_by_asc(entity::product::Column::Name)
            .order_by_asc(entity::product::Column::Id)
            .paginate(self.db, per_page);

        let total = paginator.num_items().await?;
        let entities = paginator.fetch_page(page).await?;

        Ok((
            entities.into_iter().map(Product::from_entity).collect(),
            total,
        ))
    }

    /// Archives or restores a product.
    ///
    /// # Returns
    /// - `Ok(true)` - Product found and updated
    /// - `Ok(false)` - No product with that id
    pub async fn set_active(&self, product_id: i32, active: bool) -> Result<bool, DbErr> {
        let result = entity::prelude::Product::update_many()
            .col_expr(entity::product::Column::Active, Expr::value(active))
            .col_expr(entity::product::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::product::Column::Id.eq(product_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Removes `quantity` units from stock if enough are available.
    ///
    /// A single conditional update, so two writers racing for the last units cannot
    /// both succeed.
    ///
    /// # Returns
    /// - `Ok(true)` - Stock decremented
    /// - `Ok(false)` - Product missing, or fewer than `quantity` units in stock
    /// - `Err(DbErr)` - Database error
    pub async fn decrement_stock(&self, product_id: i32, quantity: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Product::update_many()
            .col_expr(
                entity::product::Column::Stock,
                Expr::col(entity::product::Column::Stock).sub(quantity),
            )
            .filter(entity::product::Column::Id.eq(product_id))
            .filter(entity::product::Column::Stock.gte(quantity))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Returns `quantity` units to stock.
    pub async fn increment_stock(&self, product_id: i32, quantity: i32) -> Result<(), DbErr> {
        entity::prelude::Product::update_many()
            .col_expr(
                entity::product::Column::Stock,
                Expr::col(entity::product::Column::Stock).add(quantity),
            )
            .filter(entity::product::Column::Id.eq(product_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn count_active(&self) -> Result<u64, DbErr> {
        entity::prelude::Product::find()
            .filter(entity::product::Column::Active.eq(true))
            .count(self.db)
            .await
    }

    /// Active products with stock at or below `threshold`, lowest stock first.
    pub async fn get_low_stock(&self, threshold: i32) -> Result<Vec<Product>, DbErr> {
        let entities = entity::prelude::Product::find()
            .filter(entity::product::Column::Active.eq(true))
            .filter(entity::product::Column::Stock.lte(threshold))
            .order_by_asc(entity::product::Column::Stock)
            .order_by_asc(entity::product::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Product::from_entity).collect())
    }
}
