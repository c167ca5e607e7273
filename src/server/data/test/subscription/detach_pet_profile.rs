use super::*;

/// Tests unlinking a deleted pet from its subscriptions.
///
/// Expected: pet_profile_id cleared, subscription otherwise untouched
#[tokio::test]
async fn clears_pet_reference() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let pet = factory::create_pet_profile(db, user.id).await?;

    let repo = SubscriptionRepository::new(db);
    let subscription = repo
        .create(CreateSubscriptionParam {
            user_id: user.id,
            pet_profile_id: Some(pet.id),
            frequency: DeliveryFrequency::Monthly,
            shipping_address: "12 Paw Lane".to_string(),
            next_delivery_at: Utc::now() + Duration::days(5),
            items: vec![SubscriptionItemParam {
                product_id: product.id,
                quantity: 1,
            }],
        })
        .await?;

    repo.detach_pet_profile(pet.id).await?;

    let found = repo.find_by_id(subscription.id).await?.unwrap();
    assert_eq!(found.pet_profile_id, None);
    assert_eq!(found.status, SubscriptionStatus::Active);

    Ok(())
}
