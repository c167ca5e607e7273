use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Product::Table)
                    .if_not_exists()
                    .col(pk_auto(Product::Id))
                    .col(string(Product::Name))
                    .col(string_uniq(Product::Slug))
                    .col(text(Product::Description))
                    .col(string_len(Product::Species, 16))
                    .col(string(Product::Brand))
                    .col(big_integer(Product::PriceCents))
                    .col(integer(Product::WeightGrams))
                    .col(integer(Product::Stock).default(0))
                    .col(string_null(Product::ImageUrl))
                    .col(boolean(Product::Active).default(true))
                    .col(integer(Product::SubscriptionDiscountPercent).default(0))
                    .col(
                        timestamp_with_time_zone(Product::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp_with_time_zone(Product::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Product::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Product {
    Table,
    Id,
    Name,
    Slug,
    Description,
    Species,
    Brand,
    PriceCents,
    WeightGrams,
    Stock,
    ImageUrl,
    Active,
    SubscriptionDiscountPercent,
    CreatedAt,
    UpdatedAt,
}
