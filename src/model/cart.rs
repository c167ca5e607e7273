use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct CartLineDto {
    pub product_id: i32,
    pub name: String,
    pub slug: String,
    pub unit_price_cents: i64,
    pub quantity: i32,
    pub line_total_cents: i64,
    pub stock: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct CartDto {
    pub items: Vec<CartLineDto>,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct AddCartItemDto {
    pub product_id: i32,
    pub quantity: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct UpdateCartItemDto {
    /// New quantity; 0 removes the line.
    pub quantity: i32,
}
