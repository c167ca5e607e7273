use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        subscription::{
            CreateSubscriptionDto, PaginatedSubscriptionsDto, SubscriptionDto,
            SubscriptionStatusDto, UpdateSubscriptionDto,
        },
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::subscription::{CreateSubscriptionParam, Subscription, UpdateSubscriptionParam},
        service::subscription::SubscriptionService,
        state::AppState,
        util::{
            extract::{ApiJson, ApiPath, ApiQuery},
            pagination::{default_entries, PaginationParams},
        },
    },
};

pub static SUBSCRIPTION_TAG: &str = "subscription";

/// Admin subscription listing query.
#[derive(Deserialize, Debug)]
pub struct AdminSubscriptionQuery {
    pub status: Option<SubscriptionStatusDto>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

#[utoipa::path(
    get,
    path = "/api/subscriptions",
    tag = SUBSCRIPTION_TAG,
    responses(
        (status = 200, description = "The user's subscriptions, newest first", body = Vec<SubscriptionDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_subscriptions(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscriptions = SubscriptionService::new(&state.db)
        .list_for_user(user.id)
        .await?;

    let dto: Vec<SubscriptionDto> = subscriptions
        .into_iter()
        .map(Subscription::into_dto)
        .collect();

    Ok((StatusCode::OK, Json(dto)))
}

#[utoipa::path(
    post,
    path = "/api/subscriptions",
    tag = SUBSCRIPTION_TAG,
    request_body = CreateSubscriptionDto,
    responses(
        (status = 201, description = "Subscription started", body = SubscriptionDto),
        (status = 400, description = "Invalid items or address", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Pet profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_subscription(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<CreateSubscriptionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscription = SubscriptionService::new(&state.db)
        .create(CreateSubscriptionParam::from_dto(user.id, payload, Utc::now()))
        .await?;

    Ok((StatusCode::CREATED, Json(subscription.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/subscriptions/{id}",
    tag = SUBSCRIPTION_TAG,
    params(
        ("id" = i32, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Subscription", body = SubscriptionDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Subscription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_subscription(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscription = SubscriptionService::new(&state.db).get(user.id, id).await?;

    Ok((StatusCode::OK, Json(subscription.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/subscriptions/{id}",
    tag = SUBSCRIPTION_TAG,
    params(
        ("id" = i32, Path, description = "Subscription ID")
    ),
    request_body = UpdateSubscriptionDto,
    responses(
        (status = 200, description = "Subscription updated", body = SubscriptionDto),
        (status = 400, description = "Invalid field or cancelled subscription", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Subscription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_subscription(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateSubscriptionDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscription = SubscriptionService::new(&state.db)
        .update(user.id, id, UpdateSubscriptionParam::from(payload))
        .await?;

    Ok((StatusCode::OK, Json(subscription.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/subscriptions/{id}/pause",
    tag = SUBSCRIPTION_TAG,
    params(
        ("id" = i32, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Subscription paused", body = SubscriptionDto),
        (status = 400, description = "Subscription is not active", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Subscription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn pause_subscription(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscription = SubscriptionService::new(&state.db)
        .pause(user.id, id)
        .await?;

    Ok((StatusCode::OK, Json(subscription.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/subscriptions/{id}/resume",
    tag = SUBSCRIPTION_TAG,
    params(
        ("id" = i32, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Subscription resumed", body = SubscriptionDto),
        (status = 400, description = "Subscription is not paused", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Subscription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resume_subscription(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscription = SubscriptionService::new(&state.db)
        .resume(user.id, id)
        .await?;

    Ok((StatusCode::OK, Json(subscription.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/subscriptions/{id}/skip",
    tag = SUBSCRIPTION_TAG,
    params(
        ("id" = i32, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Next delivery moved one interval later", body = SubscriptionDto),
        (status = 400, description = "Subscription is not active", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Subscription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn skip_subscription(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscription = SubscriptionService::new(&state.db)
        .skip(user.id, id)
        .await?;

    Ok((StatusCode::OK, Json(subscription.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/subscriptions/{id}/cancel",
    tag = SUBSCRIPTION_TAG,
    params(
        ("id" = i32, Path, description = "Subscription ID")
    ),
    responses(
        (status = 200, description = "Subscription cancelled", body = SubscriptionDto),
        (status = 400, description = "Subscription already cancelled", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Subscription not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn cancel_subscription(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let subscription = SubscriptionService::new(&state.db)
        .cancel(user.id, id)
        .await?;

    Ok((StatusCode::OK, Json(subscription.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/subscriptions",
    tag = SUBSCRIPTION_TAG,
    params(
        ("status" = Option<SubscriptionStatusDto>, Query, description = "Only subscriptions in this status"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)")
    ),
    responses(
        (status = 200, description = "Subscriptions by next delivery date", body = PaginatedSubscriptionsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_subscriptions(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<AdminSubscriptionQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let pagination = PaginationParams {
        page: query.page,
        entries: query.entries,
    };

    let subscriptions = SubscriptionService::new(&state.db)
        .list(
            query.status.map(Into::into),
            pagination.page,
            pagination.per_page(),
        )
        .await?;

    Ok((StatusCode::OK, Json(subscriptions.into_dto())))
}
