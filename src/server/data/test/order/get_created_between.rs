use super::*;

/// Tests the half-open creation window used by analytics.
///
/// Expected: orders at `from` included, orders at `to` excluded
#[tokio::test]
async fn window_is_half_open() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let to = Utc::now();
    let from = to - Duration::days(7);

    let (at_start, _) = factory::order::OrderFactory::new(db, user.id)
        .item(&product, 1)
        .created_at(from)
        .build()
        .await?;
    factory::order::OrderFactory::new(db, user.id)
        .item(&product, 1)
        .created_at(to)
        .build()
        .await?;
    factory::order::OrderFactory::new(db, user.id)
        .item(&product, 1)
        .created_at(from - Duration::seconds(1))
        .build()
        .await?;

    let orders = OrderRepository::new(db).get_created_between(from, to).await?;

    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].id, at_start.id);
    assert_eq!(orders[0].items.len(), 1);

    Ok(())
}
