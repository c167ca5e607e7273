use oauth2::{basic::BasicClient, AuthType, ClientId, ClientSecret, TokenUrl};
use sea_orm::DatabaseConnection;

use crate::server::{
    model::cart::ShippingPolicy,
    service::{admin::code::AdminCodeService, tradesafe::client::TradeSafeClient},
    state::AppState,
};


const WEBHOOK_SECRET: &str = "whsec-test";

/// State around a test database with TradeSafe pointed at a closed local port.
fn app_state(db: &DatabaseConnection) -> AppState {
    let oauth = BasicClient::new(ClientId::new("client-id".to_string()))
        .set_client_secret(ClientSecret::new("client-secret".to_string()))
        .set_auth_type(AuthType::RequestBody)
        .set_token_uri(TokenUrl::new("http://127.0.0.1:9/oauth/token".to_string()).unwrap());

    let tradesafe = TradeSafeClient::new(
        reqwest::Client::new(),
        oauth,
        "http://127.0.0.1:9/graphql".to_string(),
        "seller-token".to_string(),
    );

    AppState::new(
        db.clone(),
        tradesafe,
        WEBHOOK_SECRET.to_string(),
        AdminCodeService::new(),
        ShippingPolicy {
            fee_cents: 8_500,
            free_threshold_cents: 50_000,
        },
        10,
    )
}
