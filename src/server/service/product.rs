//! Catalog management.
//!
//! The storefront only ever sees active products; archived ones remain visible to admins
//! and keep their order history intact.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::product::ProductRepository,
    error::AppError,
    model::product::{PaginatedProducts, Product, ProductFilter, SaveProductParam},
    util::pagination::total_pages,
};

pub struct ProductService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProductService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists products matching the filter, ordered by name.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedProducts, AppError> {
        let (products, total) = ProductRepository::new(self.db)
            .get_paginated(filter, page, per_page)
            .await?;

        Ok(PaginatedProducts {
            products,
            total,
            page,
            per_page,
            total_pages: total_pages(total, per_page),
        })
    }

    /// Finds an active product by slug for the storefront.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Product, AppError> {
        ProductRepository::new(self.db)
            .find_by_slug(slug, true)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn get_by_id(&self, product_id: i32) -> Result<Product, AppError> {
        ProductRepository::new(self.db)
            .find_by_id(product_id)
            .await?
            .ok_or_else(not_found)
    }

    /// Adds a product to the catalog.
    ///
    /// # Returns
    /// - `Ok(Product)` - Created product
    /// - `Err(AppError::Conflict)` - Slug already used by another product
    pub async fn create(&self, param: SaveProductParam) -> Result<Product, AppError> {
        let product_repo = ProductRepository::new(self.db);

        if product_repo.slug_taken(&param.slug, None).await? {
            return Err(slug_taken(&param.slug));
        }

        let product = product_repo.create(param).await?;
        tracing::info!("Created product {} ({})", product.id, product.slug);

        Ok(product)
    }

    /// Replaces a product's fields.
    ///
    /// # Returns
    /// - `Ok(Product)` - Updated product
    /// - `Err(AppError::NotFound)` - No such product
    /// - `Err(AppError::Conflict)` - Slug already used by another product
    pub async fn update(
        &self,
        product_id: i32,
        param: SaveProductParam,
    ) -> Result<Product, AppError> {
        let product_repo = ProductRepository::new(self.db);

        if product_repo
            .slug_taken(&param.slug, Some(product_id))
            .await?
        {
            return Err(slug_taken(&param.slug));
        }

        product_repo
            .update(product_id, param)
            .await?
            .ok_or_else(not_found)
    }

    /// Hides a product from the storefront without deleting it.
    pub async fn archive(&self, product_id: i32) -> Result<(), AppError> {
        if !ProductRepository::new(self.db)
            .set_active(product_id, false)
            .await?
        {
            return Err(not_found());
        }

        tracing::info!("Archived product {}", product_id);
        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Product not found".to_string())
}

fn slug_taken(slug: &str) -> AppError {
    AppError::Conflict(format!("Slug '{}' is already in use", slug))
}
