use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::api::{ErrorDto, StatusDto},
    server::{
        error::AppError,
        service::tradesafe::{
            signature::{self, SIGNATURE_HEADER},
            webhook::{WebhookPayload, WebhookService},
        },
        state::AppState,
    },
};

pub static WEBHOOK_TAG: &str = "webhook";

/// Receives TradeSafe transaction notifications.
///
/// The signature is checked against the raw body before anything is parsed.
#[utoipa::path(
    post,
    path = "/api/webhooks/tradesafe",
    tag = WEBHOOK_TAG,
    params(
        ("X-TradeSafe-Signature" = String, Header, description = "Hex HMAC-SHA256 of the raw body")
    ),
    request_body(content = String, description = "JSON `{id, state, reference?}`", content_type = "application/json"),
    responses(
        (status = 200, description = "Notification applied or ignored", body = StatusDto),
        (status = 400, description = "Malformed body", body = ErrorDto),
        (status = 401, description = "Missing or invalid signature", body = ErrorDto),
        (status = 404, description = "Unknown transaction", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn tradesafe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let signature_header = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok());
    signature::verify(&state.webhook_secret, &body, signature_header)?;

    let payload: WebhookPayload = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook body: {}", e)))?;

    tracing::debug!(
        "TradeSafe webhook for transaction {}: {}",
        payload.id,
        payload.state
    );

    let outcome = WebhookService::new(&state.db).handle(payload).await?;

    Ok((StatusCode::OK, Json(StatusDto::new(outcome.as_str()))))
}
