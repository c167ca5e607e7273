//! Store business rules.
//!
//! Services sit between controllers and repositories. Each one borrows the database
//! connection and, where payments are involved, the TradeSafe client. Operations that
//! touch stock, carts and orders together run inside a single transaction; calls to
//! TradeSafe happen after commit so a provider outage never rolls back an order.

pub mod admin;
pub mod analytics;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod order;
pub mod pet_profile;
pub mod product;
pub mod renewal;
pub mod subscription;
pub mod tradesafe;
pub mod user;

#[cfg(test)]
mod test;
