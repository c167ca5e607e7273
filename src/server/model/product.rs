//! Catalog product models.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::Species;

use crate::{
    model::product::{PaginatedProductsDto, ProductDto, SaveProductDto, SpeciesDto},
    server::error::AppError,
};

/// Largest subscription discount an admin may configure, in percent.
pub const MAX_SUBSCRIPTION_DISCOUNT_PERCENT: i32 = 50;

/// Highest accepted unit price (R1,000,000).
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub species: Species,
    pub brand: String,
    pub price_cents: i64,
    pub weight_grams: i32,
    pub stock: i32,
    pub image_url: Option<String>,
    /// Inactive products are hidden from the storefront and cannot be ordered.
    pub active: bool,
    pub subscription_discount_percent: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Unit price charged on subscription deliveries.
    pub fn subscription_price_cents(&self) -> i64 {
        discounted_price(self.price_cents, self.subscription_discount_percent)
    }

    pub fn into_dto(self) -> ProductDto {
        let subscription_price_cents = self.subscription_price_cents();
        ProductDto {
            id: self.id,
            name: self.name,
            slug: self.slug,
            description: self.description,
            species: self.species.into(),
            brand: self.brand,
            price_cents: self.price_cents,
            weight_grams: self.weight_grams,
            stock: self.stock,
            image_url: self.image_url,
            active: self.active,
            subscription_discount_percent: self.subscription_discount_percent,
            subscription_price_cents,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn from_entity(entity: entity::product::Model) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            slug: entity.slug,
            description: entity.description,
            species: entity.species,
            brand: entity.brand,
            price_cents: entity.price_cents,
            weight_grams: entity.weight_grams,
            stock: entity.stock,
            image_url: entity.image_url,
            active: entity.active,
            subscription_discount_percent: entity.subscription_discount_percent,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Applies a percentage discount, rounding the result down to whole cents.
pub fn discounted_price(price_cents: i64, discount_percent: i32) -> i64 {
    let discounted = price_cents as i128 * (100 - discount_percent as i128) / 100;
    i64::try_from(discounted).unwrap_or(if discounted < 0 { i64::MIN } else { i64::MAX })
}

impl From<Species> for SpeciesDto {
    fn from(species: Species) -> Self {
        match species {
            Species::Dog => SpeciesDto::Dog,
            Species::Cat => SpeciesDto::Cat,
            Species::SmallPet => SpeciesDto::SmallPet,
        }
    }
}

impl From<SpeciesDto> for Species {
    fn from(species: SpeciesDto) -> Self {
        match species {
            SpeciesDto::Dog => Species::Dog,
            SpeciesDto::Cat => Species::Cat,
            SpeciesDto::SmallPet => Species::SmallPet,
        }
    }
}

/// Validated fields for creating or replacing a product.
#[derive(Debug, Clone)]
pub struct SaveProductParam {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub species: Species,
    pub brand: String,
    pub price_cents: i64,
    pub weight_grams: i32,
    pub stock: i32,
    pub image_url: Option<String>,
    pub active: bool,
    pub subscription_discount_percent: i32,
}

impl SaveProductParam {
    /// Validates a product payload.
    ///
    /// # Returns
    /// - `Ok(SaveProductParam)` - Payload is valid
    /// - `Err(AppError::BadRequest)` - Empty name or brand, malformed slug, non-positive
    ///   or excessive price, non-positive weight, negative stock, or discount outside 0-50
    pub fn from_dto(dto: SaveProductDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Product name is required".to_string()));
        }
        let brand = dto.brand.trim().to_string();
        if brand.is_empty() {
            return Err(AppError::BadRequest("Brand is required".to_string()));
        }
        if !is_valid_slug(&dto.slug) {
            return Err(AppError::BadRequest(
                "Slug may only contain lowercase letters, digits and dashes".to_string(),
            ));
        }
        if dto.price_cents <= 0 {
            return Err(AppError::BadRequest("Price must be positive".to_string()));
        }
        if dto.price_cents > MAX_PRICE_CENTS {
            return Err(AppError::BadRequest(format!(
                "Price cannot exceed {} cents",
                MAX_PRICE_CENTS
            )));
        }
        if dto.weight_grams <= 0 {
            return Err(AppError::BadRequest("Weight must be positive".to_string()));
        }
        if dto.stock < 0 {
            return Err(AppError::BadRequest("Stock cannot be negative".to_string()));
        }
        if !(0..=MAX_SUBSCRIPTION_DISCOUNT_PERCENT).contains(&dto.subscription_discount_percent) {
            return Err(AppError::BadRequest(format!(
                "Subscription discount must be between 0 and {}",
                MAX_SUBSCRIPTION_DISCOUNT_PERCENT
            )));
        }

        Ok(Self {
            name,
            slug: dto.slug,
            description: dto.description,
            species: dto.species.into(),
            brand,
            price_cents: dto.price_cents,
            weight_grams: dto.weight_grams,
            stock: dto.stock,
            image_url: dto.image_url.filter(|url| !url.trim().is_empty()),
            active: dto.active,
            subscription_discount_percent: dto.subscription_discount_percent,
        })
    }
}

/// Slugs are non-empty and use only `a-z`, `0-9` and `-`.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

/// Catalog listing filter.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub species: Option<Species>,
    /// Case-insensitive substring matched against name and brand.
    pub search: Option<String>,
    pub include_inactive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedProducts {
    pub products: Vec<Product>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedProducts {
    pub fn into_dto(self) -> PaginatedProductsDto {
        PaginatedProductsDto {
            products: self.products.into_iter().map(Product::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}
