//! Application state shared across all request handlers.
//!
//! The state is built once during startup and cloned into every handler through Axum's
//! state extraction. Every field is cheap to clone: the database connection is a pool,
//! the TradeSafe client and admin code service share their internals through `Arc`.

use sea_orm::DatabaseConnection;

use crate::server::{
    model::cart::ShippingPolicy,
    service::{admin::code::AdminCodeService, tradesafe::client::TradeSafeClient},
};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,

    /// Authenticated client for the TradeSafe escrow API.
    pub tradesafe: TradeSafeClient,

    /// Secret shared with TradeSafe for signing webhook bodies.
    pub webhook_secret: String,

    /// One-time codes granting the first admin account.
    pub admin_code_service: AdminCodeService,

    pub shipping: ShippingPolicy,

    /// Active products at or below this stock level appear on the dashboard.
    pub low_stock_threshold: i32,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        tradesafe: TradeSafeClient,
        webhook_secret: String,
        admin_code_service: AdminCodeService,
        shipping: ShippingPolicy,
        low_stock_threshold: i32,
    ) -> Self {
        Self {
            db,
            tradesafe,
            webhook_secret,
            admin_code_service,
            shipping,
            low_stock_threshold,
        }
    }
}
