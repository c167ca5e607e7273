//! Request and response DTOs exchanged over the JSON API.
//!
//! These types describe the wire format only. The server converts them to and from its
//! domain models (`server::model`) at the controller boundary.

pub mod analytics;
pub mod api;
pub mod cart;
pub mod checkout;
pub mod order;
pub mod pet;
pub mod product;
pub mod subscription;
pub mod user;
