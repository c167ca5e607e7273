use super::*;

/// Tests selecting subscriptions due for renewal.
///
/// Expected: only active subscriptions with next delivery at or before now
#[tokio::test]
async fn selects_active_due_subscriptions() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let now = Utc::now();

    let (due, _) = factory::subscription::SubscriptionFactory::new(db, user.id)
        .item(product.id, 1)
        .next_delivery_at(now - Duration::hours(1))
        .build()
        .await?;
    factory::subscription::SubscriptionFactory::new(db, user.id)
        .item(product.id, 1)
        .next_delivery_at(now - Duration::hours(1))
        .status(SubscriptionStatus::Paused)
        .build()
        .await?;
    factory::subscription::SubscriptionFactory::new(db, user.id)
        .item(product.id, 1)
        .next_delivery_at(now + Duration::days(1))
        .build()
        .await?;

    let repo = SubscriptionRepository::new(db);
    let found = repo.get_due(now).await?;

    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, due.id);
    assert_eq!(found[0].items.len(), 1);
    assert_eq!(
        repo.count_active_due_between(now, now + Duration::days(7))
            .await?,
        1
    );

    Ok(())
}
