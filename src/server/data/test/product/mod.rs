use crate::server::{
    data::product::ProductRepository,
    model::product::{ProductFilter, SaveProductParam},
};
use entity::sea_orm_active_enums::Species;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod decrement_stock;
mod get_low_stock;
mod get_paginated;
mod slug_taken;
mod update;
