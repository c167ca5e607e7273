use crate::server::{
    data::trade::TradeRepository,
    model::trade::{CreateTradeParam, TradeState},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod create;
mod update_state;
