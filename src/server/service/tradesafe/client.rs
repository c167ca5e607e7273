//! TradeSafe GraphQL client.
//!
//! Authenticates with the OAuth2 client-credentials grant and keeps the access token
//! until shortly before it expires. Every call is a single POST to the GraphQL endpoint;
//! failures are returned to the caller without retrying.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use oauth2::{basic::BasicClient, EndpointNotSet, EndpointSet, TokenResponse};
use serde::{de::DeserializeOwned, Deserialize};
use serde_json::{json, Value};
use tokio::sync::RwLock;

use crate::server::error::payment::PaymentError;

/// OAuth2 client with only the token endpoint configured.
pub type TradeSafeOAuthClient =
    BasicClient<EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Tokens are refreshed this long before the provider says they expire.
const TOKEN_REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Lifetime assumed when the token response omits `expires_in`.
const DEFAULT_TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

const TOKEN_CREATE: &str = r#"
mutation tokenCreate($input: TokenInput!) {
  tokenCreate(input: $input) { id }
}"#;

const TRANSACTION_CREATE: &str = r#"
mutation transactionCreate($input: CreateTransactionInput!) {
  transactionCreate(input: $input) {
    id
    state
    allocations { id }
  }
}"#;

const CHECKOUT_LINK: &str = r#"
query checkoutLink($transactionId: ID!) {
  checkoutLink(transactionId: $transactionId)
}"#;

const ALLOCATION_START_DELIVERY: &str = r#"
mutation allocationStartDelivery($id: ID!) {
  allocationStartDelivery(id: $id) { id state }
}"#;

const TRANSACTION_CANCEL: &str = r#"
mutation transactionCancel($id: ID!, $comment: String!) {
  transactionCancel(id: $id, comment: $comment) { id state }
}"#;

#[derive(Clone)]
struct CachedToken {
    secret: String,
    refresh_at: Instant,
}

/// Buyer party details registered with TradeSafe before a transaction is opened.
#[derive(Debug, Clone)]
pub struct BuyerDetails {
    pub given_name: String,
    pub family_name: String,
    pub email: String,
    pub mobile: Option<String>,
}

impl BuyerDetails {
    /// Splits a full name on its last space; single names repeat as the family name.
    pub fn new(full_name: &str, email: &str, mobile: Option<String>) -> Self {
        let full_name = full_name.trim();
        let (given_name, family_name) = match full_name.rsplit_once(' ') {
            Some((given, family)) => (given.trim(), family.trim()),
            None => (full_name, full_name),
        };

        Self {
            given_name: given_name.to_string(),
            family_name: family_name.to_string(),
            email: email.to_string(),
            mobile: mobile.filter(|m| !m.trim().is_empty()),
        }
    }
}

/// A single-allocation escrow transaction to open.
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub reference: String,
    pub title: String,
    pub description: String,
    pub value_cents: i64,
    pub buyer_token: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreatedTransaction {
    pub id: String,
    pub state: String,
    pub allocation_id: Option<String>,
}

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct IdOnly {
    id: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TokenCreateData {
    token_create: Option<IdOnly>,
}

#[derive(Deserialize)]
struct TransactionData {
    id: String,
    state: String,
    #[serde(default)]
    allocations: Vec<IdOnly>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TransactionCreateData {
    transaction_create: Option<TransactionData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutLinkData {
    checkout_link: Option<String>,
}

/// Handle to the TradeSafe API.
///
/// Cheap to clone; clones share the cached access token.
#[derive(Clone)]
pub struct TradeSafeClient {
    http: reqwest::Client,
    oauth: TradeSafeOAuthClient,
    api_url: String,
    seller_token: String,
    token: Arc<RwLock<Option<CachedToken>>>,
}

impl TradeSafeClient {
    /// # Arguments
    /// - `http` - HTTP client with redirects disabled
    /// - `oauth` - Client-credentials client for the TradeSafe token endpoint
    /// - `api_url` - GraphQL endpoint
    /// - `seller_token` - TradeSafe token of the store's seller party
    pub fn new(
        http: reqwest::Client,
        oauth: TradeSafeOAuthClient,
        api_url: String,
        seller_token: String,
    ) -> Self {
        Self {
            http,
            oauth,
            api_url,
            seller_token,
            token: Arc::new(RwLock::new(None)),
        }
    }

    /// Registers a buyer party and returns its token id.
    pub async fn create_buyer_token(&self, buyer: &BuyerDetails) -> Result<String, PaymentError> {
        let data: TokenCreateData = self
            .graphql(
                TOKEN_CREATE,
                json!({
                    "input": {
                        "user": {
                            "givenName": buyer.given_name,
                            "familyName": buyer.family_name,
                            "email": buyer.email,
                            "mobile": buyer.mobile,
                        }
                    }
                }),
            )
            .await?;

        data.token_create
            .map(|token| token.id)
            .ok_or(PaymentError::MissingData("tokenCreate.id"))
    }

    /// Opens an escrow transaction with one allocation, the buyer and the store as seller.
    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<CreatedTransaction, PaymentError> {
        let value = transaction.value_cents as f64 / 100.0;

        let data: TransactionCreateData = self
            .graphql(
                TRANSACTION_CREATE,
                json!({
                    "input": {
                        "title": transaction.title,
                        "description": transaction.description,
                        "industry": "GENERAL_GOODS_SERVICES",
                        "currency": "ZAR",
                        "feeAllocation": "SELLER",
                        "workflow": "STANDARD",
                        "reference": transaction.reference,
                        "allocations": {
                            "create": [{
                                "title": transaction.title,
                                "description": transaction.description,
                                "value": value,
                                "daysToDeliver": 7,
                                "daysToInspect": 7,
                            }]
                        },
                        "parties": {
                            "create": [
                                { "token": transaction.buyer_token, "role": "BUYER" },
                                { "token": self.seller_token, "role": "SELLER" },
                            ]
                        }
                    }
                }),
            )
            .await?;

        let created = data
            .transaction_create
            .ok_or(PaymentError::MissingData("transactionCreate"))?;

        Ok(CreatedTransaction {
            id: created.id,
            state: created.state,
            allocation_id: created.allocations.into_iter().next().map(|a| a.id),
        })
    }

    /// Gets the hosted payment page for a transaction.
    pub async fn checkout_link(&self, transaction_id: &str) -> Result<String, PaymentError> {
        let data: CheckoutLinkData = self
            .graphql(CHECKOUT_LINK, json!({ "transactionId": transaction_id }))
            .await?;

        data.checkout_link
            .ok_or(PaymentError::MissingData("checkoutLink"))
    }

    /// Marks an allocation as dispatched.
    pub async fn start_delivery(&self, allocation_id: &str) -> Result<(), PaymentError> {
        let _: Value = self
            .graphql(ALLOCATION_START_DELIVERY, json!({ "id": allocation_id }))
            .await?;
        Ok(())
    }

    pub async fn cancel_transaction(
        &self,
        transaction_id: &str,
        comment: &str,
    ) -> Result<(), PaymentError> {
        let _: Value = self
            .graphql(
                TRANSACTION_CANCEL,
                json!({ "id": transaction_id, "comment": comment }),
            )
            .await?;
        Ok(())
    }

    /// Returns a cached access token, fetching a new one when missing or about to expire.
    async fn access_token(&self) -> Result<String, PaymentError> {
        if let Some(token) = self.token.read().await.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.secret.clone());
            }
        }

        let mut slot = self.token.write().await;
        if let Some(token) = slot.as_ref() {
            if Instant::now() < token.refresh_at {
                return Ok(token.secret.clone());
            }
        }

        let response = self
            .oauth
            .exchange_client_credentials()
            .request_async(&self.http)
            .await
            .map_err(|e| PaymentError::Token(e.to_string()))?;

        let lifetime = response.expires_in().unwrap_or(DEFAULT_TOKEN_LIFETIME);
        let secret = response.access_token().secret().clone();

        *slot = Some(CachedToken {
            secret: secret.clone(),
            refresh_at: Instant::now() + lifetime.saturating_sub(TOKEN_REFRESH_MARGIN),
        });

        tracing::debug!("Fetched TradeSafe access token valid for {:?}", lifetime);

        Ok(secret)
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: Value,
    ) -> Result<T, PaymentError> {
        let token = self.access_token().await?;

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: GraphQlResponse<T> = response.json().await?;

        if let Some(errors) = body.errors.filter(|errors| !errors.is_empty()) {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(PaymentError::GraphQl(message));
        }

        body.data.ok_or(PaymentError::MissingData("data"))
    }
}
