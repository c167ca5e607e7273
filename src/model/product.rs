use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SpeciesDto {
    Dog,
    Cat,
    SmallPet,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub species: SpeciesDto,
    pub brand: String,
    pub price_cents: i64,
    pub weight_grams: i32,
    pub stock: i32,
    pub image_url: Option<String>,
    pub active: bool,
    pub subscription_discount_percent: i32,
    /// Unit price a subscriber pays after the subscription discount.
    pub subscription_price_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body for creating or replacing a product.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct SaveProductDto {
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub description: String,
    pub species: SpeciesDto,
    pub brand: String,
    pub price_cents: i64,
    pub weight_grams: i32,
    pub stock: i32,
    pub image_url: Option<String>,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub subscription_discount_percent: i32,
}

fn default_active() -> bool {
    true
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct PaginatedProductsDto {
    pub products: Vec<ProductDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}
