use sea_orm_migration::{prelude::*, schema::*};

use super::m20260105_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PetProfile::Table)
                    .if_not_exists()
                    .col(pk_auto(PetProfile::Id))
                    .col(integer(PetProfile::UserId))
                    .col(string(PetProfile::Name))
                    .col(string_len(PetProfile::Species, 16))
                    .col(string_null(PetProfile::Breed))
                    .col(date_null(PetProfile::BirthDate))
                    .col(integer_null(PetProfile::WeightGrams))
                    .col(text_null(PetProfile::Allergies))
                    .col(
                        timestamp_with_time_zone(PetProfile::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_pet_profile_user_id")
                            .from(PetProfile::Table, PetProfile::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PetProfile::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PetProfile {
    Table,
    Id,
    UserId,
    Name,
    Species,
    Breed,
    BirthDate,
    WeightGrams,
    Allergies,
    CreatedAt,
}
