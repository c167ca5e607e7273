use super::*;

/// Tests that the storefront listing hides inactive products.
///
/// Expected: only active products counted and returned
#[tokio::test]
async fn hides_inactive_products() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_product(db).await?;
    factory::product::ProductFactory::new(db)
        .active(false)
        .build()
        .await?;

    let repo = ProductRepository::new(db);
    let (public, public_total) = repo
        .get_paginated(&ProductFilter::default(), 0, 10)
        .await?;
    let (all, all_total) = repo
        .get_paginated(
            &ProductFilter {
                include_inactive: true,
                ..Default::default()
            },
            0,
            10,
        )
        .await?;

    assert_eq!(public_total, 1);
    assert!(public.iter().all(|p| p.active));
    assert_eq!(all_total, 2);
    assert_eq!(all.len(), 2);

    Ok(())
}

/// Tests filtering by species and searching name or brand.
///
/// Expected: species and search filters combine
#[tokio::test]
async fn filters_by_species_and_search() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let salmon = factory::product::ProductFactory::new(db)
        .name("Salmon Feast")
        .species(Species::Cat)
        .brand("Whisker Co")
        .build()
        .await?;
    factory::product::ProductFactory::new(db)
        .name("Salmon Bites")
        .species(Species::Dog)
        .build()
        .await?;
    let whisker = factory::product::ProductFactory::new(db)
        .name("Chicken Supper")
        .species(Species::Cat)
        .brand("Whisker Co")
        .build()
        .await?;

    let repo = ProductRepository::new(db);

    let (cats, _) = repo
        .get_paginated(
            &ProductFilter {
                species: Some(Species::Cat),
                search: Some("salmon".to_string()),
                include_inactive: false,
            },
            0,
            10,
        )
        .await?;
    assert_eq!(cats.iter().map(|p| p.id).collect::<Vec<_>>(), vec![salmon.id]);

    let (by_brand, total) = repo
        .get_paginated(
            &ProductFilter {
                search: Some("Whisker".to_string()),
                ..Default::default()
            },
            0,
            10,
        )
        .await?;
    assert_eq!(total, 2);
    assert_eq!(by_brand[0].id, whisker.id);

    Ok(())
}
