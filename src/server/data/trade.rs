//! Trade data repository.
//!
//! Persists the TradeSafe transaction opened for an order and the last state the
//! provider reported for it.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityTrait, QueryFilter,
};

use crate::server::model::trade::{CreateTradeParam, Trade, TradeState};

pub struct TradeRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> TradeRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records a new escrow transaction in the `CREATED` state.
    pub async fn create(&self, param: CreateTradeParam) -> Result<Trade, DbErr> {
        let now = Utc::now();
        let entity = entity::trade::ActiveModel {
            order_id: ActiveValue::Set(param.order_id),
            transaction_id: ActiveValue::Set(param.transaction_id),
            allocation_id: ActiveValue::Set(param.allocation_id),
            state: ActiveValue::Set(TradeState::Created.as_str().to_string()),
            amount_cents: ActiveValue::Set(param.amount_cents),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Trade::from_entity(entity))
    }

    pub async fn find_by_order_id(&self, order_id: i32) -> Result<Option<Trade>, DbErr> {
        let entity = entity::prelude::Trade::find()
            .filter(entity::trade::Column::OrderId.eq(order_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Trade::from_entity))
    }

    pub async fn find_by_transaction_id(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Trade>, DbErr> {
        let entity = entity::prelude::Trade::find()
            .filter(entity::trade::Column::TransactionId.eq(transaction_id))
            .one(self.db)
            .await?;

        Ok(entity.map(Trade::from_entity))
    }

    /// Stores the latest provider state for a trade.
    pub async fn update_state(&self, trade_id: i32, state: &TradeState) -> Result<(), DbErr> {
        entity::prelude::Trade::update_many()
            .col_expr(
                entity::trade::Column::State,
                Expr::value(state.as_str().to_string()),
            )
            .col_expr(entity::trade::Column::UpdatedAt, Expr::value(Utc::now()))
            .filter(entity::trade::Column::Id.eq(trade_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
