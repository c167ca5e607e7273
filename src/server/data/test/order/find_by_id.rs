use super::*;

/// Tests loading an order with its items and escrow trade.
///
/// Expected: Ok(Some) carrying items and the trade's state
#[tokio::test]
async fn includes_items_and_payment_state() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let (order, _) = factory::order::OrderFactory::new(db, user.id)
        .item(&product, 3)
        .build()
        .await?;
    factory::create_trade(db, &order, "FUNDS_RECEIVED").await?;

    let found = OrderRepository::new(db).find_by_id(order.id).await?.unwrap();

    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].quantity, 3);
    assert_eq!(found.payment_state.as_deref(), Some("FUNDS_RECEIVED"));

    Ok(())
}

/// Tests looking up an order that does not exist.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_when_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(OrderRepository::new(db).find_by_id(42).await?.is_none());

    Ok(())
}
