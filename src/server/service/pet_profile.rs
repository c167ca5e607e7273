//! Pet profiles owned by a customer.

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::{pet_profile::PetProfileRepository, subscription::SubscriptionRepository},
    error::AppError,
    model::pet_profile::{PetProfile, SavePetProfileParam},
};

pub struct PetProfileService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PetProfileService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list(&self, user_id: i32) -> Result<Vec<PetProfile>, AppError> {
        Ok(PetProfileRepository::new(self.db).get_by_user(user_id).await?)
    }

    pub async fn create(
        &self,
        user_id: i32,
        param: SavePetProfileParam,
    ) -> Result<PetProfile, AppError> {
        Ok(PetProfileRepository::new(self.db)
            .create(user_id, param)
            .await?)
    }

    /// Gets one of the user's pets; anyone else's is reported missing.
    pub async fn get(&self, user_id: i32, pet_profile_id: i32) -> Result<PetProfile, AppError> {
        PetProfileRepository::new(self.db)
            .find_by_id(pet_profile_id)
            .await?
            .filter(|pet| pet.user_id == user_id)
            .ok_or_else(not_found)
    }

    pub async fn update(
        &self,
        user_id: i32,
        pet_profile_id: i32,
        param: SavePetProfileParam,
    ) -> Result<PetProfile, AppError> {
        self.get(user_id, pet_profile_id).await?;

        PetProfileRepository::new(self.db)
            .update(pet_profile_id, param)
            .await?
            .ok_or_else(not_found)
    }

    /// Deletes a pet, unlinking it from any subscription that referenced it.
    pub async fn delete(&self, user_id: i32, pet_profile_id: i32) -> Result<(), AppError> {
        self.get(user_id, pet_profile_id).await?;

        let txn = self.db.begin().await?;
        SubscriptionRepository::new(&txn)
            .detach_pet_profile(pet_profile_id)
            .await?;
        PetProfileRepository::new(&txn)
            .delete(pet_profile_id)
            .await?;
        txn.commit().await?;

        Ok(())
    }
}

fn not_found() -> AppError {
    AppError::NotFound("Pet profile not found".to_string())
}
