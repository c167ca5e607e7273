use crate::server::{data::user::UserRepository, model::user::CreateUserParam};
use entity::sea_orm_active_enums::UserRole;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod admin_exists;
mod create;
mod find_credentials_by_email;
mod get_all_paginated;
mod set_role;
