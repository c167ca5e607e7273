use crate::server::data::cart::CartRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod clear;
mod get_lines;
mod set_quantity;
