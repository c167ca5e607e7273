use sea_orm_migration::{prelude::*, schema::*};

use super::m20260107_000007_create_order_table::Order;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Trade::Table)
                    .if_not_exists()
                    .col(pk_auto(Trade::Id))
                    .col(integer_uniq(Trade::OrderId))
                    .col(string_uniq(Trade::TransactionId))
                    .col(string_null(Trade::AllocationId))
                    .col(string(Trade::State))
                    .col(big_integer(Trade::AmountCents))
                    .col(
                        timestamp_with_time_zone(Trade::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Trade::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_trade_order_id")
                            .from(Trade::Table, Trade::OrderId)
                            .to(Order::Table, Order::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Trade::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Trade {
    Table,
    Id,
    OrderId,
    TransactionId,
    AllocationId,
    State,
    AmountCents,
    CreatedAt,
    UpdatedAt,
}
