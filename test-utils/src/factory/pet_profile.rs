//! Pet profile factory.

use crate::factory::helpers::next_id;
use chrono::Utc;
use entity::sea_orm_active_enums::Species;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Creates a dog profile named `"Pet {id}"` for the user.
pub async fn create_pet_profile(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<entity::pet_profile::Model, DbErr> {
    entity::pet_profile::ActiveModel {
        user_id: ActiveValue::Set(user_id),
        name: ActiveValue::Set(format!("Pet {}", next_id())),
        species: ActiveValue::Set(Species::Dog),
        breed: ActiveValue::Set(Some("Labrador".to_string())),
        birth_date: ActiveValue::Set(None),
        weight_grams: ActiveValue::Set(Some(28_000)),
        allergies: ActiveValue::Set(None),
        created_at: ActiveValue::Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
}
