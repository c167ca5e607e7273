//! Cart models and the store shipping policy.

use crate::{
    model::cart::{CartDto, CartLineDto},
    server::{error::AppError, model::product::Product},
};

/// Largest quantity a single cart or subscription line may hold.
pub const MAX_LINE_QUANTITY: i32 = 99;

/// Flat-fee shipping waived above a subtotal threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingPolicy {
    pub fee_cents: i64,
    /// Subtotals at or above this amount ship free.
    pub free_threshold_cents: i64,
}

impl ShippingPolicy {
    /// Shipping charged for a one-off order with the given subtotal.
    ///
    /// An empty order ships nothing and is charged nothing.
    pub fn shipping_for(&self, subtotal_cents: i64) -> i64 {
        if subtotal_cents <= 0 || subtotal_cents >= self.free_threshold_cents {
            0
        } else {
            self.fee_cents
        }
    }
}

/// Checks a requested line quantity is within 1-99.
pub fn validate_line_quantity(quantity: i32) -> Result<(), AppError> {
    if !(1..=MAX_LINE_QUANTITY).contains(&quantity) {
        return Err(AppError::BadRequest(format!(
            "Quantity must be between 1 and {}",
            MAX_LINE_QUANTITY
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i32,
}

impl CartLine {
    pub fn line_total_cents(&self) -> i64 {
        self.product.price_cents.saturating_mul(self.quantity as i64)
    }
}

/// A user's cart priced under the store shipping policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    pub lines: Vec<CartLine>,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

impl Cart {
    pub fn new(lines: Vec<CartLine>, shipping: &ShippingPolicy) -> Self {
        let subtotal_cents = lines.iter().map(CartLine::line_total_cents).sum();
        let shipping_cents = shipping.shipping_for(subtotal_cents);
        Self {
            lines,
            subtotal_cents,
            shipping_cents,
            total_cents: subtotal_cents + shipping_cents,
        }
    }

    pub fn into_dto(self) -> CartDto {
        CartDto {
            items: self
                .lines
                .into_iter()
                .map(|line| {
                    let line_total_cents = line.line_total_cents();
                    CartLineDto {
                        product_id: line.product.id,
                        name: line.product.name,
                        slug: line.product.slug,
                        unit_price_cents: line.product.price_cents,
                        quantity: line.quantity,
                        line_total_cents,
                        stock: line.product.stock,
                    }
                })
                .collect(),
            subtotal_cents: self.subtotal_cents,
            shipping_cents: self.shipping_cents,
            total_cents: self.total_cents,
        }
    }
}
