use crate::server::{
    data::order::OrderRepository,
    model::order::{CreateOrderParam, NewOrderItem},
};
use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::OrderStatus;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod find_by_id;
mod get_created_between;
mod get_paginated;
mod update_status;
