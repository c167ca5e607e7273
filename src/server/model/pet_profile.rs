//! Pet profile models.

use chrono::{DateTime, NaiveDate, Utc};
use entity::sea_orm_active_enums::Species;

use crate::{
    model::pet::{PetProfileDto, SavePetProfileDto},
    server::error::AppError,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PetProfile {
    pub id: i32,
    pub user_id: i32,
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub weight_grams: Option<i32>,
    pub allergies: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl PetProfile {
    pub fn from_entity(entity: entity::pet_profile::Model) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            name: entity.name,
            species: entity.species,
            breed: entity.breed,
            birth_date: entity.birth_date,
            weight_grams: entity.weight_grams,
            allergies: entity.allergies,
            created_at: entity.created_at,
        }
    }

    pub fn into_dto(self) -> PetProfileDto {
        PetProfileDto {
            id: self.id,
            name: self.name,
            species: self.species.into(),
            breed: self.breed,
            birth_date: self.birth_date,
            weight_grams: self.weight_grams,
            allergies: self.allergies,
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SavePetProfileParam {
    pub name: String,
    pub species: Species,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub weight_grams: Option<i32>,
    pub allergies: Option<String>,
}

impl SavePetProfileParam {
    /// Validates a pet profile payload; name is required and weight must be positive.
    pub fn from_dto(dto: SavePetProfileDto) -> Result<Self, AppError> {
        let name = dto.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::BadRequest("Pet name is required".to_string()));
        }
        if matches!(dto.weight_grams, Some(weight) if weight <= 0) {
            return Err(AppError::BadRequest("Weight must be positive".to_string()));
        }

        Ok(Self {
            name,
            species: dto.species.into(),
            breed: non_blank(dto.breed),
            birth_date: dto.birth_date,
            weight_grams: dto.weight_grams,
            allergies: non_blank(dto.allergies),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
