use super::*;

/// Tests adding a product that is not yet in the cart.
///
/// Expected: a new line with the given quantity
#[tokio::test]
async fn inserts_missing_line() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;

    let repo = CartRepository::new(db);
    repo.set_quantity(user.id, product.id, 3).await?;

    assert_eq!(repo.find_quantity(user.id, product.id).await?, Some(3));

    Ok(())
}

/// Tests changing the quantity of an existing line.
///
/// Expected: the line is updated in place rather than duplicated
#[tokio::test]
async fn updates_existing_line() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    factory::create_cart_item(db, user.id, product.id, 1).await?;

    let repo = CartRepository::new(db);
    repo.set_quantity(user.id, product.id, 4).await?;

    let lines = repo.get_lines(user.id).await?;
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 4);

    Ok(())
}
