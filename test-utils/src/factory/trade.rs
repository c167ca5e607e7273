//! Trade factory for escrow transactions.

use crate::factory::helpers::next_id;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Opens a trade for the order in the given provider state.
///
/// Transaction and allocation ids are unique per call (`txn-{n}` / `alloc-{n}`).
pub async fn create_trade(
    db: &DatabaseConnection,
    order: &entity::order::Model,
    state: &str,
) -> Result<entity::trade::Model, DbErr> {
    let id = next_id();
    let now = Utc::now();
    entity::trade::ActiveModel {
        order_id: ActiveValue::Set(order.id),
        transaction_id: ActiveValue::Set(format!("txn-{}", id)),
        allocation_id: ActiveValue::Set(Some(format!("alloc-{}", id))),
        state: ActiveValue::Set(state.to_string()),
        amount_cents: ActiveValue::Set(order.total_cents),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
    .insert(db)
    .await
}
