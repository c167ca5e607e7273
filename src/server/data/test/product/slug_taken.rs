use super::*;

/// Tests slug uniqueness checks.
///
/// Expected: taken for other products, free when editing the owner
#[tokio::test]
async fn detects_slug_owned_by_other_product() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::ProductFactory::new(db)
        .slug("puppy-starter")
        .build()
        .await?;

    let repo = ProductRepository::new(db);

    assert!(repo.slug_taken("puppy-starter", None).await?);
    assert!(!repo.slug_taken("puppy-starter", Some(product.id)).await?);
    assert!(!repo.slug_taken("senior-blend", None).await?);

    Ok(())
}
