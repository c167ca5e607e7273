use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::model::product::SpeciesDto;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct PetProfileDto {
    pub id: i32,
    pub name: String,
    pub species: SpeciesDto,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub weight_grams: Option<i32>,
    pub allergies: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body for creating or replacing a pet profile.
#[derive(Serialize, Deserialize, ToSchema, Clone, Debug)]
pub struct SavePetProfileDto {
    pub name: String,
    pub species: SpeciesDto,
    pub breed: Option<String>,
    pub birth_date: Option<NaiveDate>,
    pub weight_grams: Option<i32>,
    pub allergies: Option<String>,
}
