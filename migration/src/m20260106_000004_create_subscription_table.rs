use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000001_create_user_table::User,
    m20260105_000003_create_pet_profile_table::PetProfile,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Subscription::Table)
                    .if_not_exists()
                    .col(pk_auto(Subscription::Id))
                    .col(integer(Subscription::UserId))
                    .col(integer_null(Subscription::PetProfileId))
                    .col(string_len(Subscription::Status, 16).default("active"))
                    .col(string_len(Subscription::Frequency, 16))
                    .col(timestamp_with_time_zone(Subscription::NextDeliveryAt))
                    .col(text(Subscription::ShippingAddress))
                    .col(
                        timestamp_with_time_zone(Subscription::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Subscription::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Subscription::CancelledAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_user_id")
                            .from(Subscription::Table, Subscription::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_pet_profile_id")
                            .from(Subscription::Table, Subscription::PetProfileId)
                            .to(PetProfile::Table, PetProfile::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_subscription_status_next_delivery")
                    .table(Subscription::Table)
                    .col(Subscription::Status)
                    .col(Subscription::NextDeliveryAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscription::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Subscription {
    Table,
    Id,
    UserId,
    PetProfileId,
    Status,
    Frequency,
    NextDeliveryAt,
    ShippingAddress,
    CreatedAt,
    UpdatedAt,
    CancelledAt,
}
