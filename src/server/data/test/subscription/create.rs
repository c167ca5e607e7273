use super::*;

/// Tests creating a subscription with discounted lines.
///
/// Expected: active subscription whose lines use the subscription price
#[tokio::test]
async fn prices_lines_at_subscription_rate() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .price_cents(20_000)
        .subscription_discount_percent(10)
        .build()
        .await?;
    let next = Utc::now() + Duration::days(3);

    let subscription = SubscriptionRepository::new(db)
        .create(CreateSubscriptionParam {
            user_id: user.id,
            pet_profile_id: None,
            frequency: DeliveryFrequency::Biweekly,
            shipping_address: "12 Paw Lane".to_string(),
            next_delivery_at: next,
            items: vec![SubscriptionItemParam {
                product_id: product.id,
                quantity: 2,
            }],
        })
        .await?;

    assert_eq!(subscription.status, SubscriptionStatus::Active);
    assert_eq!(subscription.frequency, DeliveryFrequency::Biweekly);
    assert_eq!(subscription.items.len(), 1);
    assert_eq!(subscription.items[0].unit_price_cents, 18_000);
    assert_eq!(subscription.items[0].quantity, 2);
    assert!(subscription.cancelled_at.is_none());

    Ok(())
}
