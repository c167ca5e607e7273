//! Request extractors that report rejections as `AppError::BadRequest`.
//!
//! axum's own `Json`, `Query` and `Path` reject with plain-text bodies and, for JSON
//! that does not match the target type, a 422. These wrappers keep every client error
//! a 400 with the usual `{"error": "..."}` body.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;

use crate::server::error::AppError;

/// JSON request body.
#[derive(Debug)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// Query string parameters.
#[derive(Debug)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

/// Path segments.
#[derive(Debug)]
pub struct ApiPath<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{self, header, Method, StatusCode},
        response::IntoResponse,
    };
    use serde::Deserialize;

    use super::*;

    #[derive(Deserialize, Debug)]
    struct Payload {
        quantity: i32,
    }

    fn json_request(body: &str) -> Request {
        http::Request::builder()
            .method(Method::POST)
            .uri("/api/cart/items")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn error_body(error: AppError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    /// Tests that unparsable and mistyped JSON bodies become JSON 400s.
    ///
    /// Expected: 400 with an `error` field for each
    #[tokio::test]
    async fn rejects_bad_json_with_error_body() {
        for body in ["{not json", r#"{"quantity":"two"}"#, "{}"] {
            let rejection = ApiJson::<Payload>::from_request(json_request(body), &())
                .await
                .unwrap_err();
            assert!(matches!(rejection, AppError::BadRequest(_)));

            let (status, body) = error_body(rejection).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert!(body["error"].is_string());
        }
    }

    /// Tests that a body without a JSON content type is rejected the same way.
    ///
    /// Expected: Err(BadRequest)
    #[tokio::test]
    async fn rejects_missing_content_type() {
        let request = http::Request::builder()
            .method(Method::POST)
            .uri("/api/cart/items")
            .body(Body::from(r#"{"quantity":2}"#))
            .unwrap();

        let rejection = ApiJson::<Payload>::from_request(request, &())
            .await
            .unwrap_err();
        assert!(matches!(rejection, AppError::BadRequest(_)));
    }

    /// Tests that a valid body passes through.
    ///
    /// Expected: Ok with the parsed payload
    #[tokio::test]
    async fn accepts_valid_json() {
        let request = json_request(r#"{"quantity":2}"#);
        let ApiJson(payload) = ApiJson::<Payload>::from_request(request, &())
            .await
            .unwrap();
        assert_eq!(payload.quantity, 2);
    }

    /// Tests query string parsing.
    ///
    /// Expected: Err(BadRequest) for a non-numeric value, Ok otherwise
    #[tokio::test]
    async fn parses_query_strings() {
        let (mut parts, _) = http::Request::builder()
            .uri("/api/cart?quantity=lots")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let rejection = ApiQuery::<Payload>::from_request_parts(&mut parts, &())
            .await
            .unwrap_err();
        assert!(matches!(rejection, AppError::BadRequest(_)));

        let (mut parts, _) = http::Request::builder()
            .uri("/api/cart?quantity=3")
            .body(Body::empty())
            .unwrap()
            .into_parts();
        let ApiQuery(payload) = ApiQuery::<Payload>::from_request_parts(&mut parts, &())
            .await
            .unwrap();
        assert_eq!(payload.quantity, 3);
    }
}
