use super::*;

/// Tests taking units from stock.
///
/// Expected: Ok(true) and stock reduced by the quantity
#[tokio::test]
async fn decrements_available_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::ProductFactory::new(db)
        .stock(5)
        .build()
        .await?;

    let repo = ProductRepository::new(db);

    assert!(repo.decrement_stock(product.id, 5).await?);
    assert_eq!(repo.find_by_id(product.id).await?.unwrap().stock, 0);

    Ok(())
}

/// Tests asking for more units than are in stock.
///
/// Expected: Ok(false) and stock unchanged
#[tokio::test]
async fn refuses_to_oversell() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::ProductFactory::new(db)
        .stock(2)
        .build()
        .await?;

    let repo = ProductRepository::new(db);

    assert!(!repo.decrement_stock(product.id, 3).await?);
    assert!(!repo.decrement_stock(999, 1).await?);
    assert_eq!(repo.find_by_id(product.id).await?.unwrap().stock, 2);

    Ok(())
}

/// Tests returning units to stock.
///
/// Expected: stock increased by the quantity
#[tokio::test]
async fn increments_stock() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::ProductFactory::new(db)
        .stock(1)
        .build()
        .await?;

    let repo = ProductRepository::new(db);
    repo.increment_stock(product.id, 4).await?;

    assert_eq!(repo.find_by_id(product.id).await?.unwrap().stock, 5);

    Ok(())
}

/// Tests two buyers racing for the last unit.
///
/// Expected: exactly one decrement succeeds and stock ends at zero
#[tokio::test]
async fn only_one_racer_gets_last_unit() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::ProductFactory::new(db)
        .stock(1)
        .build()
        .await?;

    let first = ProductRepository::new(db);
    let second = ProductRepository::new(db);
    let (a, b) = tokio::join!(
        first.decrement_stock(product.id, 1),
        second.decrement_stock(product.id, 1)
    );

    assert!(a? ^ b?);
    assert_eq!(first.find_by_id(product.id).await?.unwrap().stock, 0);

    Ok(())
}

/// Tests interleaved restocks both land.
///
/// Expected: stock grows by the sum of both quantities; a missing product is a no-op
#[tokio::test]
async fn concurrent_restocks_add_up() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let product = factory::product::ProductFactory::new(db)
        .stock(2)
        .build()
        .await?;

    let repo = ProductRepository::new(db);
    let (a, b) = tokio::join!(
        repo.increment_stock(product.id, 3),
        repo.increment_stock(product.id, 4)
    );
    a?;
    b?;
    repo.increment_stock(999, 1).await?;

    assert_eq!(repo.find_by_id(product.id).await?.unwrap().stock, 9);

    Ok(())
}
