use super::*;

/// Tests the low-stock listing.
///
/// Expected: only active products at or below the threshold, lowest stock first
#[tokio::test]
async fn lists_active_products_at_or_below_threshold() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let ten = factory::product::ProductFactory::new(db)
        .stock(10)
        .build()
        .await?;
    let two = factory::product::ProductFactory::new(db)
        .stock(2)
        .build()
        .await?;
    factory::product::ProductFactory::new(db)
        .stock(11)
        .build()
        .await?;
    factory::product::ProductFactory::new(db)
        .stock(0)
        .active(false)
        .build()
        .await?;

    let repo = ProductRepository::new(db);
    let low = repo.get_low_stock(10).await?;

    assert_eq!(
        low.iter().map(|p| p.id).collect::<Vec<_>>(),
        vec![two.id, ten.id]
    );

    Ok(())
}
