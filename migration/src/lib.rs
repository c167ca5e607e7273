pub use sea_orm_migration::prelude::*;

mod m20260105_000001_create_user_table;
mod m20260105_000002_create_product_table;
mod m20260105_000003_create_pet_profile_table;
mod m20260106_000004_create_subscription_table;
mod m20260106_000005_create_subscription_item_table;
mod m20260106_000006_create_cart_item_table;
mod m20260107_000007_create_order_table;
mod m20260107_000008_create_order_item_table;
mod m20260108_000009_create_trade_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_create_user_table::Migration),
            Box::new(m20260105_000002_create_product_table::Migration),
            Box::new(m20260105_000003_create_pet_profile_table::Migration),
            Box::new(m20260106_000004_create_subscription_table::Migration),
            Box::new(m20260106_000005_create_subscription_item_table::Migration),
            Box::new(m20260106_000006_create_cart_item_table::Migration),
            Box::new(m20260107_000007_create_order_table::Migration),
            Box::new(m20260107_000008_create_order_item_table::Migration),
            Box::new(m20260108_000009_create_trade_table::Migration),
        ]
    }
}
