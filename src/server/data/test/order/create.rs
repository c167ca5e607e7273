use super::*;

/// Tests creating an order from snapshotted items.
///
/// Expected: pending order with subtotal from items and total including shipping
#[tokio::test]
async fn computes_totals_from_items() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let kibble = factory::create_product(db).await?;
    let treats = factory::create_product(db).await?;

    let order = OrderRepository::new(db)
        .create(CreateOrderParam {
            user_id: user.id,
            subscription_id: None,
            shipping_address: "12 Paw Lane".to_string(),
            shipping_cents: 9_900,
            items: vec![
                NewOrderItem {
                    product_id: kibble.id,
                    product_name: kibble.name.clone(),
                    unit_price_cents: 19_900,
                    quantity: 2,
                },
                NewOrderItem {
                    product_id: treats.id,
                    product_name: treats.name.clone(),
                    unit_price_cents: 4_500,
                    quantity: 1,
                },
            ],
        })
        .await?;

    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.subtotal_cents, 44_300);
    assert_eq!(order.total_cents, 54_200);
    assert_eq!(order.items.len(), 2);
    assert_eq!(order.payment_state, None);

    Ok(())
}
