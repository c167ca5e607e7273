//! Product factory for creating catalog entries.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::Species;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test products with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let product = ProductFactory::new(&db)
///     .name("Salmon Kibble 2kg")
///     .species(Species::Cat)
///     .price_cents(25_000)
///     .build()
///     .await?;
/// ```
pub struct ProductFactory<'a> {
    db: &'a DatabaseConnection,
    name: String,
    slug: String,
    species: Species,
    brand: String,
    price_cents: i64,
    weight_grams: i32,
    stock: i32,
    active: bool,
    subscription_discount_percent: i32,
}

impl<'a> ProductFactory<'a> {
    /// Creates a new ProductFactory with default values.
    ///
    /// Defaults:
    /// - name: `"Kibble {id}"`, slug: `"kibble-{id}"`
    /// - species: dog, brand: `"Acme Pet"`
    /// - price: 19 900 cents, weight: 2 000 g, stock: 100
    /// - active, no subscription discount
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            name: format!("Kibble {}", id),
            slug: format!("kibble-{}", id),
            species: Species::Dog,
            brand: "Acme Pet".to_string(),
            price_cents: 19_900,
            weight_grams: 2_000,
            stock: 100,
            active: true,
            subscription_discount_percent: 0,
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = slug.into();
        self
    }

    pub fn species(mut self, species: Species) -> Self {
        self.species = species;
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    pub fn price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = price_cents;
        self
    }

    pub fn stock(mut self, stock: i32) -> Self {
        self.stock = stock;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn subscription_discount_percent(mut self, percent: i32) -> Self {
        self.subscription_discount_percent = percent;
        self
    }

    /// Builds and inserts the product entity into the database.
    pub async fn build(self) -> Result<entity::product::Model, DbErr> {
        let now = Utc::now();
        entity::product::ActiveModel {
            name: ActiveValue::Set(self.name),
            slug: ActiveValue::Set(self.slug),
            description: ActiveValue::Set("Complete dry food.".to_string()),
            species: ActiveValue::Set(self.species),
            brand: ActiveValue::Set(self.brand),
            price_cents: ActiveValue::Set(self.price_cents),
            weight_grams: ActiveValue::Set(self.weight_grams),
            stock: ActiveValue::Set(self.stock),
            image_url: ActiveValue::Set(None),
            active: ActiveValue::Set(self.active),
            subscription_discount_percent: ActiveValue::Set(self.subscription_discount_percent),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates an active dog product with default values.
pub async fn create_product(db: &DatabaseConnection) -> Result<entity::product::Model, DbErr> {
    ProductFactory::new(db).build().await
}
