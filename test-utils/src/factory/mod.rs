//! Factory methods for creating test data.
//!
//! Each entity has its own factory module with a `Factory` builder for customization and a
//! `create_*` convenience function for quick default creation. Factories insert straight into
//! the database and return the entity model.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! let user = factory::user::create_user(&db).await?;
//! let product = factory::product::ProductFactory::new(&db)
//!     .price_cents(45_000)
//!     .stock(3)
//!     .build()
//!     .await?;
//!
//! let (order, items) = factory::order::OrderFactory::new(&db, user.id)
//!     .item(&product, 2)
//!     .build()
//!     .await?;
//! ```
//!
//! # Available Factories
//!
//! - `user` - Customers and admins
//! - `product` - Catalog products
//! - `cart_item` - Cart lines
//! - `pet_profile` - Pet profiles
//! - `subscription` - Subscriptions with their items
//! - `order` - Orders with their items
//! - `trade` - TradeSafe escrow transactions

pub mod cart_item;
pub mod helpers;
pub mod order;
pub mod pet_profile;
pub mod product;
pub mod subscription;
pub mod trade;
pub mod user;

pub use cart_item::create_cart_item;
pub use order::create_order;
pub use pet_profile::create_pet_profile;
pub use product::create_product;
pub use subscription::create_subscription;
pub use trade::create_trade;
pub use user::{create_admin, create_user};
