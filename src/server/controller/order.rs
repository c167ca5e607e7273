use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        checkout::{CheckoutDto, CheckoutResultDto, PaymentLinkDto},
        order::{OrderDto, OrderStatusDto, PaginatedOrdersDto, UpdateOrderStatusDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::order::{CheckoutParam, UpdateOrderStatusParam},
        service::{checkout::CheckoutService, order::OrderService},
        state::AppState,
        util::{
            extract::{ApiJson, ApiPath, ApiQuery},
            pagination::{default_entries, PaginationParams},
        },
    },
};

pub static ORDER_TAG: &str = "order";

/// Admin order listing query.
#[derive(Deserialize, Debug)]
pub struct AdminOrderQuery {
    pub status: Option<OrderStatusDto>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

#[utoipa::path(
    post,
    path = "/api/checkout",
    tag = ORDER_TAG,
    request_body = CheckoutDto,
    responses(
        (status = 201, description = "Order placed; payment_url is null when the payment provider was unreachable", body = CheckoutResultDto),
        (status = 400, description = "Empty cart, unavailable product or insufficient stock", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CheckoutDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let result = CheckoutService::new(&state.db, &state.tradesafe, state.shipping)
        .checkout(&user, CheckoutParam::from_dto(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(result.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    tag = ORDER_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "The user's orders, newest first", body = PaginatedOrdersDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_orders(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(pagination): ApiQuery<PaginationParams>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let orders = OrderService::new(&state.db, &state.tradesafe)
        .list_for_user(user.id, pagination.page, pagination.per_page())
        .await?;

    Ok((StatusCode::OK, Json(orders.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = ORDER_TAG,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order", body = OrderDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_order(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let order = OrderService::new(&state.db, &state.tradesafe)
        .get_for_user(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/cancel",
    tag = ORDER_TAG,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Order cancelled and stock restored", body = OrderDto),
        (status = 400, description = "Order already shipped or closed", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_order(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let order = OrderService::new(&state.db, &state.tradesafe)
        .cancel(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/orders/{id}/payment",
    tag = ORDER_TAG,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    responses(
        (status = 200, description = "Fresh checkout link", body = PaymentLinkDto),
        (status = 400, description = "Order is not pending", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 502, description = "Payment provider unavailable", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_payment_link(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let payment_url = OrderService::new(&state.db, &state.tradesafe)
        .payment_link(&user, id)
        .await?;

    Ok((StatusCode::OK, Json(PaymentLinkDto { payment_url })))
}

#[utoipa::path(
    get,
    path = "/api/admin/orders",
    tag = ORDER_TAG,
    params(
        ("status" = Option<OrderStatusDto>, Query, description = "Only orders in this status"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Orders, newest first", body = PaginatedOrdersDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_orders(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<AdminOrderQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let pagination = PaginationParams {
        page: query.page,
        entries: query.entries,
    };

    let orders = OrderService::new(&state.db, &state.tradesafe)
        .list(
            query.status.map(Into::into),
            pagination.page,
            pagination.per_page(),
        )
        .await?;

    Ok((StatusCode::OK, Json(orders.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/orders/{id}/status",
    tag = ORDER_TAG,
    params(
        ("id" = i32, Path, description = "Order ID")
    ),
    request_body = UpdateOrderStatusDto,
    responses(
        (status = 200, description = "Order updated", body = OrderDto),
        (status = 400, description = "Transition not allowed", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Order not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_order_status(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateOrderStatusDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let order = OrderService::new(&state.db, &state.tradesafe)
        .update_status(
            id,
            UpdateOrderStatusParam {
                status: payload.status.into(),
                tracking_number: payload.tracking_number,
            },
        )
        .await?;

    Ok((StatusCode::OK, Json(order.into_dto())))
}
