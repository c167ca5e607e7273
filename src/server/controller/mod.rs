//! HTTP request handlers.
//!
//! Handlers check access with `AuthGuard`, convert DTOs into validated params, call a
//! service and convert the result back into a DTO. Each module exposes a tag used to
//! group its routes in the OpenAPI document.

pub mod analytics;
pub mod auth;
pub mod cart;
pub mod health;
pub mod order;
pub mod pet_profile;
pub mod product;
pub mod subscription;
pub mod user;
pub mod webhook;

#[cfg(test)]
mod test;
