use super::*;

/// Tests paginating users ordered by name.
///
/// Expected: Ok with the second page holding the last user and total of 3
#[tokio::test]
async fn paginates_by_name() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::User)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db).name("Charlie").build().await?;
    factory::user::UserFactory::new(db).name("Alice").build().await?;
    factory::user::UserFactory::new(db).name("Bob").build().await?;

    let repo = UserRepository::new(db);
    let (first, total) = repo.get_all_paginated(0, 2).await?;
    let (second, _) = repo.get_all_paginated(1, 2).await?;

    assert_eq!(total, 3);
    assert_eq!(
        first.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Alice", "Bob"]
    );
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].name, "Charlie");

    Ok(())
}
