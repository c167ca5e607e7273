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
        pet::{PetProfileDto, SavePetProfileDto},
    },
    server::{
        error::AppError,
        middleware::auth::AuthGuard,
        model::pet_profile::{PetProfile, SavePetProfileParam},
        service::pet_profile::PetProfileService,
        state::AppState,
        util::extract::{ApiJson, ApiPath},
    },
};

pub static PET_TAG: &str = "pet";

#[utoipa::path(
    get,
    path = "/api/pets",
    tag = PET_TAG,
    responses(
        (status = 200, description = "The user's pets ordered by name", body = Vec<PetProfileDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pets(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let pets = PetProfileService::new(&state.db).list(user.id).await?;

    let dto: Vec<PetProfileDto> = pets.into_iter().map(PetProfile::into_dto).collect();

    Ok((StatusCode::OK, Json(dto)))
}

#[utoipa::path(
    post,
    path = "/api/pets",
    tag = PET_TAG,
    request_body = SavePetProfileDto,
    responses(
        (status = 201, description = "Pet profile created", body = PetProfileDto),
        (status = 400, description = "Invalid pet profile", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_pet(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<SavePetProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let pet = PetProfileService::new(&state.db)
        .create(user.id, SavePetProfileParam::from_dto(payload)?)
        .await?;

    Ok((StatusCode::CREATED, Json(pet.into_dto())))
}

#[utoipa::path(
    get,
    path = "/api/pets/{id}",
    tag = PET_TAG,
    params(
        ("id" = i32, Path, description = "Pet profile ID")
    ),
    responses(
        (status = 200, description = "Pet profile", body = PetProfileDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Pet profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_pet(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let pet = PetProfileService::new(&state.db).get(user.id, id).await?;

    Ok((StatusCode::OK, Json(pet.into_dto())))
}

#[utoipa::path(
    put,
    path = "/api/pets/{id}",
    tag = PET_TAG,
    params(
        ("id" = i32, Path, description = "Pet profile ID")
    ),
    request_body = SavePetProfileDto,
    responses(
        (status = 200, description = "Pet profile updated", body = PetProfileDto),
        (status = 400, description = "Invalid pet profile", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Pet profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_pet(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<SavePetProfileDto>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    let pet = PetProfileService::new(&state.db)
        .update(user.id, id, SavePetProfileParam::from_dto(payload)?)
        .await?;

    Ok((StatusCode::OK, Json(pet.into_dto())))
}

#[utoipa::path(
    delete,
    path = "/api/pets/{id}",
    tag = PET_TAG,
    params(
        ("id" = i32, Path, description = "Pet profile ID")
    ),
    responses(
        (status = 204, description = "Pet profile deleted and unlinked from subscriptions"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Pet profile not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_pet(
    State(state): State<AppState>,
    session: Session,
    ApiPath(id): ApiPath<i32>,
) -> Result<impl IntoResponse, AppError> {
    let user = AuthGuard::new(&state.db, &session).require(&[]).await?;

    PetProfileService::new(&state.db).delete(user.id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}
