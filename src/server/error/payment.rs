use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures talking to, or hearing from, the TradeSafe escrow API.
#[derive(Error, Debug)]
pub enum PaymentError {
    /// The client-credentials token exchange failed.
    #[error("TradeSafe token request failed: {0}")]
    Token(String),

    /// Transport-level failure reaching the GraphQL endpoint.
    #[error("TradeSafe request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The GraphQL endpoint answered with a non-success HTTP status.
    #[error("TradeSafe responded with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The GraphQL response carried an `errors` array.
    #[error("TradeSafe GraphQL error: {0}")]
    GraphQl(String),

    /// The response decoded but lacked the expected field.
    #[error("TradeSafe response missing {0}")]
    MissingData(&'static str),

    /// Webhook signature header missing or not matching the body.
    #[error("Invalid webhook signature")]
    InvalidSignature,
}

/// Converts payment errors into HTTP responses.
///
/// - `InvalidSignature` → 401 Unauthorized
/// - every upstream failure → 502 Bad Gateway with a generic message; details are logged
impl IntoResponse for PaymentError {
    fn into_response(self) -> Response {
        match self {
            Self::InvalidSignature => {
                tracing::warn!("Rejected TradeSafe webhook with invalid signature");
                (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorDto {
                        error: "Invalid signature".to_string(),
                    }),
                )
                    .into_response()
            }
            err => {
                tracing::error!("{}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    Json(ErrorDto {
                        error: "Payment provider unavailable".to_string(),
                    }),
                )
                    .into_response()
            }
        }
    }
}
