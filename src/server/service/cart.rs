//! Server-side shopping cart.

use sea_orm::DatabaseConnection;

use crate::server::{
    data::{cart::CartRepository, product::ProductRepository},
    error::AppError,
    model::{
        cart::{validate_line_quantity, Cart, ShippingPolicy, MAX_LINE_QUANTITY},
        product::Product,
    },
};

pub struct CartService<'a> {
    db: &'a DatabaseConnection,
    shipping: ShippingPolicy,
}

impl<'a> CartService<'a> {
    pub fn new(db: &'a DatabaseConnection, shipping: ShippingPolicy) -> Self {
        Self { db, shipping }
    }

    /// Loads the cart with totals under the store shipping policy.
    pub async fn get(&self, user_id: i32) -> Result<Cart, AppError> {
        let lines = CartRepository::new(self.db).get_lines(user_id).await?;
        Ok(Cart::new(lines, &self.shipping))
    }

    /// Adds `quantity` units of a product, on top of any already in the cart.
    ///
    /// # Returns
    /// - `Ok(Cart)` - Updated cart
    /// - `Err(AppError::NotFound)` - Product missing or archived
    /// - `Err(AppError::BadRequest)` - Quantity out of range or above stock
    pub async fn add_item(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Cart, AppError> {
        validate_line_quantity(quantity)?;

        let cart_repo = CartRepository::new(self.db);
        let product = self.active_product(product_id).await?;

        let existing = cart_repo.find_quantity(user_id, product_id).await?;
        let total = existing.unwrap_or(0) + quantity;
        if total > MAX_LINE_QUANTITY {
            return Err(AppError::BadRequest(format!(
                "At most {} of one product per order",
                MAX_LINE_QUANTITY
            )));
        }
        ensure_in_stock(&product, total)?;

        cart_repo.set_quantity(user_id, product_id, total).await?;

        self.get(user_id).await
    }

    /// Sets the quantity of a line; zero removes it.
    pub async fn set_item_quantity(
        &self,
        user_id: i32,
        product_id: i32,
        quantity: i32,
    ) -> Result<Cart, AppError> {
        if quantity == 0 {
            return self.remove_item(user_id, product_id).await;
        }
        validate_line_quantity(quantity)?;

        let product = self.active_product(product_id).await?;
        ensure_in_stock(&product, quantity)?;

        CartRepository::new(self.db)
            .set_quantity(user_id, product_id, quantity)
            .await?;

        self.get(user_id).await
    }

    /// Removes a line.
    ///
    /// # Returns
    /// - `Ok(Cart)` - Updated cart
    /// - `Err(AppError::NotFound)` - Product was not in the cart
    pub async fn remove_item(&self, user_id: i32, product_id: i32) -> Result<Cart, AppError> {
        if !CartRepository::new(self.db)
            .remove(user_id, product_id)
            .await?
        {
            return Err(AppError::NotFound("Product is not in the cart".to_string()));
        }

        self.get(user_id).await
    }

    pub async fn clear(&self, user_id: i32) -> Result<(), AppError> {
        CartRepository::new(self.db).clear(user_id).await?;
        Ok(())
    }

    async fn active_product(&self, product_id: i32) -> Result<Product, AppError> {
        ProductRepository::new(self.db)
            .find_by_id(product_id)
            .await?
            .filter(|product| product.active)
            .ok_or_else(|| AppError::NotFound("Product not found".to_string()))
    }
}

fn ensure_in_stock(product: &Product, quantity: i32) -> Result<(), AppError> {
    if quantity > product.stock {
        return Err(AppError::BadRequest(format!(
            "Only {} of {} in stock",
            product.stock, product.name
        )));
    }
    Ok(())
}
