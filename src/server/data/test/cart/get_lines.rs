use super::*;

/// Tests loading cart lines with their products.
///
/// Expected: only the user's lines, in the order they were added
#[tokio::test]
async fn returns_user_lines_in_insert_order() -> Result<(), DbErr> {
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

    factory::create_cart_item(db, user.id, second.id, 2).await?;
    factory::create_cart_item(db, user.id, first.id, 1).await?;
    factory::create_cart_item(db, other.id, first.id, 5).await?;

    let lines = CartRepository::new(db).get_lines(user.id).await?;

    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].product.id, second.id);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[1].product.id, first.id);

    Ok(())
}
