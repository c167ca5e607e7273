use super::*;

/// Tests promoting a customer.
///
/// Expected: Ok(Some) with the admin role
#[tokio::test]
async fn promotes_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let user = factory::create_user(db).await?;

    let repo = UserRepository::new(db);
    let updated = repo.set_role(user.id, UserRole::Admin).await?.unwrap();

    assert_eq!(updated.role, UserRole::Admin);
    assert!(repo.admin_exists().await?);

    Ok(())
}

/// Tests changing the role of a missing user.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_missing_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert!(repo.set_role(999, UserRole::Admin).await?.is_none());

    Ok(())
}
