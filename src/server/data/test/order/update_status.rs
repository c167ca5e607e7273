use super::*;

/// Tests moving an order to a new status with a tracking number.
///
/// Expected: Ok(true), status and tracking number stored
#[tokio::test]
async fn sets_status_and_tracking() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let order = factory::create_order(db, user.id, &product).await?;

    let repo = OrderRepository::new(db);
    assert!(
        repo.update_status(order.id, OrderStatus::Shipped, Some("TRK123".to_string()))
            .await?
    );

    let found = repo.find_by_id(order.id).await?.unwrap();
    assert_eq!(found.status, OrderStatus::Shipped);
    assert_eq!(found.tracking_number.as_deref(), Some("TRK123"));

    assert!(repo.update_status(order.id, OrderStatus::Delivered, None).await?);
    let found = repo.find_by_id(order.id).await?.unwrap();
    assert_eq!(found.tracking_number.as_deref(), Some("TRK123"));

    Ok(())
}

/// Tests updating a missing order.
///
/// Expected: Ok(false)
#[tokio::test]
async fn returns_false_when_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    assert!(
        !OrderRepository::new(db)
            .update_status(7, OrderStatus::Paid, None)
            .await?
    );

    Ok(())
}
