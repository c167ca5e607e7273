//! Domain models and operation parameters.
//!
//! Repositories convert SeaORM entity models into these types at the data boundary and
//! controllers convert them into DTOs at the HTTP boundary. Parameter types (`*Param`)
//! carry validated input from controllers into services.

pub mod analytics;
pub mod cart;
pub mod order;
pub mod pet_profile;
pub mod product;
pub mod subscription;
pub mod trade;
pub mod user;
