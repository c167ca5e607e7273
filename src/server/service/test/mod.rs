use httpmock::prelude::*;
use oauth2::{basic::BasicClient, AuthType, ClientId, ClientSecret, TokenUrl};
use serde_json::json;

use crate::server::{
    model::{cart::ShippingPolicy, user::User},
    service::tradesafe::client::TradeSafeClient,
};

mod checkout;
mod order;

const SHIPPING: ShippingPolicy = ShippingPolicy {
    fee_cents: 8_500,
    free_threshold_cents: 50_000,
};

fn tradesafe_at(base_url: &str) -> TradeSafeClient {
    let oauth = BasicClient::new(ClientId::new("client-id".to_string()))
        .set_client_secret(ClientSecret::new("client-secret".to_string()))
        .set_auth_type(AuthType::RequestBody)
        .set_token_uri(TokenUrl::new(format!("{}/oauth/token", base_url)).unwrap());

    let http = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    TradeSafeClient::new(
        http,
        oauth,
        format!("{}/graphql", base_url),
        "seller-token".to_string(),
    )
}

/// Client pointed at a closed local port; every call fails to connect.
fn offline_tradesafe() -> TradeSafeClient {
    tradesafe_at("http://127.0.0.1:9")
}

fn mock_tradesafe(server: &MockServer) -> TradeSafeClient {
    tradesafe_at(&server.base_url())
}

/// Mocks the token endpoint plus buyer token, transaction and checkout link calls.
async fn mock_payment_flow(server: &MockServer, transaction_id: &str) {
    server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200).json_body(json!({
                "access_token": "access-1",
                "token_type": "Bearer",
                "expires_in": 3600
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql").body_contains("tokenCreate");
            then.status(200)
                .json_body(json!({ "data": { "tokenCreate": { "id": "buyer-1" } } }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/graphql")
                .body_contains("transactionCreate");
            then.status(200).json_body(json!({
                "data": {
                    "transactionCreate": {
                        "id": transaction_id,
                        "state": "CREATED",
                        "allocations": [{ "id": "alloc-1" }]
                    }
                }
            }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql").body_contains("checkoutLink");
            then.status(200).json_body(json!({
                "data": { "checkoutLink": format!("https://pay.example/{}", transaction_id) }
            }));
        })
        .await;
}

fn user(entity: entity::user::Model) -> User {
    User::from_entity(entity)
}
