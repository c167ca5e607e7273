use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::Species;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub species: Species,
    pub brand: String,
    pub price_cents: i64,
    pub weight_grams: i32,
    pub stock: i32,
    pub image_url: Option<String>,
    pub active: bool,
    pub subscription_discount_percent: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::cart_item::Entity")]
    CartItem,
    #[sea_orm(has_many = "super::order_item::Entity")]
    OrderItem,
    #[sea_orm(has_many = "super::subscription_item::Entity")]
    SubscriptionItem,
}

impl Related<super::cart_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CartItem.def()
    }
}

impl Related<super::order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::OrderItem.def()
    }
}

impl Related<super::subscription_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubscriptionItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
