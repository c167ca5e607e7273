use super::*;

fn param(name: &str, slug: &str) -> SaveProductParam {
    SaveProductParam {
        name: name.to_string(),
        slug: slug.to_string(),
        description: "Grain free".to_string(),
        species: Species::Cat,
        brand: "Whisker Co".to_string(),
        price_cents: 32_500,
        weight_grams: 1_500,
        stock: 7,
        image_url: None,
        active: true,
        subscription_discount_percent: 15,
    }
}

/// Tests replacing a product's fields.
///
/// Expected: Ok(Some) with every field updated
#[tokio::test]
async fn replaces_fields() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);
    let product = repo.create(param("Old", "old-name")).await?;

    let updated = repo
        .update(product.id, param("Tuna Pate", "tuna-pate"))
        .await?
        .unwrap();

    assert_eq!(updated.name, "Tuna Pate");
    assert_eq!(updated.slug, "tuna-pate");
    assert_eq!(updated.subscription_price_cents(), 27_625);
    assert!(repo.find_by_slug("tuna-pate", true).await?.is_some());

    Ok(())
}

/// Tests that archived products are hidden from slug lookups for the storefront.
///
/// Expected: None when active_only, Some otherwise
#[tokio::test]
async fn archived_product_hidden_by_slug() -> Result<(), DbErr> {
    let test = TestBuilder::new()
        .with_table(entity::prelude::Product)
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = ProductRepository::new(db);
    let product = repo.create(param("Tuna Pate", "tuna-pate")).await?;
    assert!(repo.set_active(product.id, false).await?);

    assert!(repo.find_by_slug("tuna-pate", true).await?.is_none());
    assert!(repo.find_by_slug("tuna-pate", false).await?.is_some());

    Ok(())
}
