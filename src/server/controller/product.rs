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
        product::{PaginatedProductsDto, ProductDto, SaveProductDto, SpeciesDto},
    },
    server::{
        error::AppError,
        middleware::auth::{AuthGuard, Permission},
        model::product::{ProductFilter, SaveProductParam},
        service::product::ProductService,
        state::AppState,
        util::{
            extract::{ApiJson, ApiPath, ApiQuery},
            pagination::{default_entries, PaginationParams},
        },
    },
};

pub static PRODUCT_TAG: &str = "product";

/// Catalog listing query: pagination plus optional species and text filters.
#[derive(Deserialize, Debug)]
pub struct ProductQuery {
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
    pub species: Option<SpeciesDto>,
    pub search: Option<String>,
}

impl ProductQuery {
    fn pagination(&self) -> PaginationParams {
        PaginationParams {
            page: self.page,
            entries: self.entries,
        }
    }

    fn filter(self, include_inactive: bool) -> ProductFilter {
        ProductFilter {
            species: self.species.map(Into::into),
            search: self.search,
            include_inactive,
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/products",
    tag = PRODUCT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("species" = Option<SpeciesDto>, Query, description = "Only products for this species"),
        ("search" = Option<String>, Query, description = "Substring of name or brand")
    ),
    responses(
        (status = 200, description = "Active products ordered by name", body = PaginatedProductsDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_products(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> Result<impl IntoResponse, AppError> {
    let pagination = query.pagination();

    let products = ProductService::new(&state.db)
        .list(&query.filter(false), pagination.page, pagination.per_page())
        .await?;

    Ok((StatusCode::OK, Json(products.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/products/{slug}",
    tag = PRODUCT_TAG,
    params(
        ("slug" = String, Path, description = "Product slug")
    ),
    responses(
        (status = 200, description = "Product", body = ProductDto),
        (status = 404, description = "No active product with that slug", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_product(
    State(state): State<AppState>,
    ApiPath(slug): ApiPath<String>,
) -> Result<impl IntoResponse, AppError> {
    let product = ProductService::new(&state.db).get_by_slug(&slug).await?;

    Ok((StatusCode::OK, Json(product.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/admin/products",
    tag = PRODUCT_TAG,
    params(
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10, max: 100)"),
        ("species" = Option<SpeciesDto>, Query, description = "Only products for this species"),
        ("search" = Option<String>, Query, description = "Substring of name or brand")
    ),
    responses(
        (status = 200, description = "All products, archived included", body = PaginatedProductsDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_all_products(
    State(state): State<AppState>,
    session: Session,
    ApiQuery(query): ApiQuery<ProductQuery>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let pagination = query.pagination();

    let products = ProductService::new(&state.db)
        .list(&query.filter(true), pagination.page, pagination.per_page())
        .await?;

    Ok((StatusCode::OK, Json(products.into_dto())))
}

#[utoipa::path(
    post,
    path = "/api/admin/products",
    tag = PRODUCT_TAG,
    request_body = SaveProductDto,
    responses(
        (status = 201, description = "Product created", body = ProductDto),
        (status = 400, description = "Invalid product data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 409, description = "Slug already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_product(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<SaveProductDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let product = ProductService::new(&state.db)
        .create(SaveProductParam::from_dto(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(product.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/admin/products/{id}",
    tag = PRODUCT_TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    request_body = SaveProductDto,
    responses(
        (status = 200, description = "Product updated", body = ProductDto),
        (status = 400, description = "Invalid product data", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 409, description = "Slug already in use", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_product(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<SaveProductDto>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    let product = ProductService::new(&state.db)
        .update(id, SaveProductParam::from_dto(payload)?)
        .await?;

    Ok((StatusCode::OK, Json(product.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/admin/products/{id}",
    tag = PRODUCT_TAG,
    params(
        ("id" = i32, Path, description = "Product ID")
    ),
    responses(
        (status = 204, description = "Product archived"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not an admin", body = ErrorDto),
        (status = 404, description = "Product not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn archive_product(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let _ = AuthGuard::new(&state.db, &session)
        .require(&[Permission::Admin])
        .await?;

    ProductService::new(&state.db).archive(id).await?;

    Ok(StatusCode::NO_CONTENT)
}
