//! Pet profile data repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

use crate::server::model::pet_profile::{PetProfile, SavePetProfileParam};

pub struct PetProfileRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> PetProfileRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        param: SavePetProfileParam,
    ) -> Result<PetProfile, DbErr> {
        let entity = entity::pet_profile::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            name: ActiveValue::Set(param.name),
            species: ActiveValue::Set(param.species),
            breed: ActiveValue::Set(param.breed),
            birth_date: ActiveValue::Set(param.birth_date),
            weight_grams: ActiveValue::Set(param.weight_grams),
            allergies: ActiveValue::Set(param.allergies),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(PetProfile::from_entity(entity))
    }

    pub async fn find_by_id(&self, pet_profile_id: i32) -> Result<Option<PetProfile>, DbErr> {
        let entity = entity::prelude::PetProfile::find_by_id(pet_profile_id)
            .one(self.db)
            .await?;

        Ok(entity.map(PetProfile::from_entity))
    }

    /// Gets a user's pets ordered by name.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<PetProfile>, DbErr> {
        let entities = entity::prelude::PetProfile::find()
            .filter(entity::pet_profile::Column::UserId.eq(user_id))
            .order_by_asc(entity::pet_profile::Column::Name)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(PetProfile::from_entity).collect())
    }

    /// Replaces the editable fields of a profile.
    ///
    /// # Returns
    /// - `Ok(Some(PetProfile))` - Updated profile
    /// - `Ok(None)` - No profile with that id
    pub async fn update(
        &self,
        pet_profile_id: i32,
        param: SavePetProfileParam,
    ) -> Result<Option<PetProfile>, DbErr> {
        let Some(entity) = entity::prelude::PetProfile::find_by_id(pet_profile_id)
            .one(self.db)
            .await?
        else {
            return Ok(None);
        };

        let mut active: entity::pet_profile::ActiveModel = entity.into();
        active.name = ActiveValue::Set(param.name);
        active.species = ActiveValue::Set(param.species);
        active.breed = ActiveValue::Set(param.breed);
        active.birth_date = ActiveValue::Set(param.birth_date);
        active.weight_grams = ActiveValue::Set(param.weight_grams);
        active.allergies = ActiveValue::Set(param.allergies);

        Ok(Some(PetProfile::from_entity(active.update(self.db).await?)))
    }

    pub async fn delete(&self, pet_profile_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::PetProfile::delete_by_id(pet_profile_id)
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
