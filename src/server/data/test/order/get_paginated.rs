use super::*;

/// Tests a customer's order history.
///
/// Expected: only that customer's orders, newest first
#[tokio::test]
async fn lists_user_orders_newest_first() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;

    let (older, _) = factory::order::OrderFactory::new(db, user.id)
        .item(&product, 1)
        .created_at(Utc::now() - Duration::days(2))
        .build()
        .await?;
    let (newer, _) = factory::order::OrderFactory::new(db, user.id)
        .item(&product, 1)
        .build()
        .await?;
    factory::create_order(db, other.id, &product).await?;

    let (orders, total) = OrderRepository::new(db)
        .get_paginated_by_user(user.id, 0, 10)
        .await?;

    assert_eq!(total, 2);
    assert_eq!(
        orders.iter().map(|o| o.id).collect::<Vec<_>>(),
        vec![newer.id, older.id]
    );

    Ok(())
}

/// Tests the admin listing filtered by status.
///
/// Expected: only orders in the requested status counted
#[tokio::test]
async fn filters_by_status() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;

    factory::order::OrderFactory::new(db, user.id)
        .item(&product, 1)
        .status(OrderStatus::Paid)
        .build()
        .await?;
    factory::create_order(db, user.id, &product).await?;

    let repo = OrderRepository::new(db);
    let (paid, paid_total) = repo
        .get_paginated(Some(OrderStatus::Paid), 0, 10)
        .await?;
    let (_, all_total) = repo.get_paginated(None, 0, 10).await?;

    assert_eq!(paid_total, 1);
    assert_eq!(paid[0].status, OrderStatus::Paid);
    assert_eq!(all_total, 2);
    assert_eq!(
        repo.count_by_status(&[OrderStatus::Pending, OrderStatus::Paid])
            .await?,
        2
    );

    Ok(())
}
