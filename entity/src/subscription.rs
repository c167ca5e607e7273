use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{DeliveryFrequency, SubscriptionStatus};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "subscription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub pet_profile_id: Option<i32>,
    pub status: SubscriptionStatus,
    pub frequency: DeliveryFrequency,
    pub next_delivery_at: DateTimeUtc,
    #[sea_orm(column_type = "Text")]
    pub shipping_address: String,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub cancelled_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::pet_profile::Entity",
        from = "Column::PetProfileId",
        to = "super::pet_profile::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    PetProfile,
    #[sea_orm(has_many = "super::subscription_item::Entity")]
    SubscriptionItem,
    #[sea_orm(has_many = "super::order::Entity")]
    Order,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::pet_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PetProfile.def()
    }
}

impl Related<super::subscription_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubscriptionItem.def()
    }
}

impl Related<super::order::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Order.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
