use super::*;

/// Tests creating a user.
///
/// Expected: Ok with the stored fields returned
#[tokio::test]
async fn creates_user() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .create(CreateUserParam {
            email: "owner@example.com".to_string(),
            name: "Owner".to_string(),
            password_hash: "hash".to_string(),
            role: UserRole::Customer,
        })
        .await?;

    assert_eq!(user.email, "owner@example.com");
    assert_eq!(user.role, UserRole::Customer);
    assert!(repo.email_exists("owner@example.com").await?);

    Ok(())
}

/// Tests that the unique email constraint is enforced.
///
/// Expected: Err on the second insert
#[tokio::test]
async fn rejects_duplicate_email() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let param = CreateUserParam {
        email: "dup@example.com".to_string(),
        name: "First".to_string(),
        password_hash: "hash".to_string(),
        role: UserRole::Customer,
    };

    repo.create(param.clone()).await?;
    let result = repo.create(param).await;

    assert!(result.is_err());

    Ok(())
}
