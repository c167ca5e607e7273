use super::*;

/// Tests swapping the contents of a subscription.
///
/// Expected: old lines removed, new lines present
#[tokio::test]
async fn replaces_every_line() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let old = factory::create_product(db).await?;
    let new = factory::create_product(db).await?;
    let subscription = factory::create_subscription(db, user.id, old.id).await?;

    let repo = SubscriptionRepository::new(db);
    repo.replace_items(
        subscription.id,
        &[SubscriptionItemParam {
            product_id: new.id,
            quantity: 4,
        }],
    )
    .await?;

    let found = repo.find_by_id(subscription.id).await?.unwrap();
    assert_eq!(found.items.len(), 1);
    assert_eq!(found.items[0].product_id, new.id);
    assert_eq!(found.items[0].quantity, 4);

    Ok(())
}

/// Tests cancelling and then reading lifecycle snapshots.
///
/// Expected: snapshot reflects the cancellation timestamp
#[tokio::test]
async fn set_status_records_cancellation() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let subscription = factory::create_subscription(db, user.id, product.id).await?;
    let now = Utc::now();

    let repo = SubscriptionRepository::new(db);
    repo.set_status(subscription.id, SubscriptionStatus::Cancelled, Some(now))
        .await?;

    let snapshots = repo.get_snapshots_before(now + Duration::minutes(1)).await?;
    assert_eq!(snapshots.len(), 1);
    assert_eq!(snapshots[0].status, SubscriptionStatus::Cancelled);
    assert!(snapshots[0].cancelled_at.is_some());
    assert_eq!(repo.count_by_status(SubscriptionStatus::Active).await?, 0);

    Ok(())
}
