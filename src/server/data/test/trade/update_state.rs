use super::*;

/// Tests storing a new provider state.
///
/// Expected: state persisted in its provider spelling
#[tokio::test]
async fn persists_new_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let order = factory::create_order(db, user.id, &product).await?;
    let trade = factory::create_trade(db, &order, "CREATED").await?;

    let repo = TradeRepository::new(db);
    repo.update_state(trade.id, &TradeState::FundsReceived)
        .await?;

    let found = repo
        .find_by_transaction_id(&trade.transaction_id)
        .await?
        .unwrap();
    assert_eq!(found.state, TradeState::FundsReceived);

    Ok(())
}
