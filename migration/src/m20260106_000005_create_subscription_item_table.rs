use sea_orm_migration::{prelude::*, schema::*};

use super::{
    m20260105_000002_create_product_table::Product,
    m20260106_000004_create_subscription_table::Subscription,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionItem::Table)
                    .if_not_exists()
                    .col(pk_auto(SubscriptionItem::Id))
                    .col(integer(SubscriptionItem::SubscriptionId))
                    .col(integer(SubscriptionItem::ProductId))
                    .col(integer(SubscriptionItem::Quantity))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_item_subscription_id")
                            .from(SubscriptionItem::Table, SubscriptionItem::SubscriptionId)
                            .to(Subscription::Table, Subscription::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscription_item_product_id")
                            .from(SubscriptionItem::Table, SubscriptionItem::ProductId)
                            .to(Product::Table, Product::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubscriptionItem::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum SubscriptionItem {
    Table,
    Id,
    SubscriptionId,
    ProductId,
    Quantity,
}
