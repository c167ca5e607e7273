use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        cart::{AddCartItemDto, CartDto, UpdateCartItemDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        service::cart::CartService,
        state::AppState,
        util::extract::{ApiJson, ApiPath},
    },
};

pub static CART_TAG: &str = "cart";

#[utoipa::path(
    get,
    path = "/api/cart",
    tag = CART_TAG,
    responses(
        (status = 200, description = "Cart with totals", body = CartDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_cart(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let cart = CartService::new(&state.db, state.shipping).get(user.id).await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/cart/items",
    tag = CART_TAG,
    request_body = AddCartItemDto,
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 400, description = "Quantity out of range or above stock", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_cart_item(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<AddCartItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let cart = CartService::new(&state.db, state.shipping)
        .add_item(user.id, payload.product_id, payload.quantity)
        .await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/cart/items/{product_id}",
    tag = CART_TAG,
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    request_body = UpdateCartItemDto,
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 400, description = "Quantity out of range or above stock", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Product not found or not in the cart", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    session: Session,
    ApiPath(product_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateCartItemDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let cart = CartService::new(&state.db, state.shipping)
        .set_item_quantity(user.id, product_id, payload.quantity)
        .await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/cart/items/{product_id}",
    tag = CART_TAG,
    params(
        ("product_id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Updated cart", body = CartDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Product not in the cart", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    session: Session,
    ApiPath(product_id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let cart = CartService::new(&state.db, state.shipping)
        .remove_item(user.id, product_id)
        .await?;

    Ok((StatusCode::OK, Json(cart.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/cart",
    tag = CART_TAG,
    responses(
        (status = 204, description = "Cart emptied"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn clear_cart(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    CartService::new(&state.db, state.shipping)
        .clear(user.id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
