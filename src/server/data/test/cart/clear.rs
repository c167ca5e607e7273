use super::*;

/// Tests removing a single line.
///
/// Expected: Ok(true) first time, Ok(false) once the line is gone
#[tokio::test]
async fn removes_single_line() -> Result<(), DbErr> {
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

    assert!(repo.remove(user.id, product.id).await?);
    assert!(!repo.remove(user.id, product.id).await?);
    assert_eq!(repo.find_quantity(user.id, product.id).await?, None);

    Ok(())
}

/// Tests emptying a cart.
///
/// Expected: every line of the user removed, other carts untouched
#[tokio::test]
async fn clears_only_that_users_cart() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_catalog_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;
    let other = factory::create_user(db).await?;
    let first = factory::create_product(db).await?;
    let second = factory::create_product(db).await?;
    factory::create_cart_item(db, user.id, first.id, 1).await?;
    factory::create_cart_item(db, user.id, second.id, 1).await?;
    factory::create_cart_item(db, other.id, first.id, 1).await?;

    let repo = CartRepository::new(db);
    repo.clear(user.id).await?;

    assert!(repo.get_lines(user.id).await?.is_empty());
    assert_eq!(repo.get_lines(other.id).await?.len(), 1);

    Ok(())
}
