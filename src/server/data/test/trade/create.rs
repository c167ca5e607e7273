use super::*;

/// Tests recording a newly opened escrow transaction.
///
/// Expected: trade in CREATED state, findable by order and transaction id
#[tokio::test]
async fn records_created_trade() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let order = factory::create_order(db, user.id, &product).await?;

    let repo = TradeRepository::new(db);
    let trade = repo
        .create(CreateTradeParam {
            order_id: order.id,
            transaction_id: "txn-abc".to_string(),
            allocation_id: Some("alloc-abc".to_string()),
            amount_cents: order.total_cents,
        })
        .await?;

    assert_eq!(trade.state, TradeState::Created);
    assert_eq!(
        repo.find_by_order_id(order.id).await?.map(|t| t.id),
        Some(trade.id)
    );
    assert_eq!(
        repo.find_by_transaction_id("txn-abc").await?.map(|t| t.order_id),
        Some(order.id)
    );
    assert!(repo.find_by_transaction_id("txn-missing").await?.is_none());

    Ok(())
}
