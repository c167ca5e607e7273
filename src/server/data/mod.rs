//! Database repository layer for all domain entities.
//!
//! This module contains repository structs that handle database operations (CRUD) for each
//! domain in the application. Repositories use SeaORM entity models internally and return
//! domain models to keep the data layer separate from business logic. Every repository is
//! generic over `ConnectionTrait`, so the same code runs on the pool or inside a transaction.

pub mod cart;
pub mod order;
pub mod pet_profile;
pub mod product;
pub mod subscription;
pub mod trade;
pub mod user;

#[cfg(test)]
mod test;
