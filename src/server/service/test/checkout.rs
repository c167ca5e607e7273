use entity::sea_orm_active_enums::OrderStatus;
use httpmock::MockServer;
use test_utils::{builder::TestBuilder, factory};

use super::*;
use crate::server::{
    data::{cart::CartRepository, order::OrderRepository, product::ProductRepository},
    error::AppError,
    model::order::CheckoutParam,
    service::checkout::CheckoutService,
};

fn address() -> CheckoutParam {
    CheckoutParam {
        shipping_address: "1 Kennel Road, Cape Town".to_string(),
        phone: None,
    }
}

/// Tests checking out with nothing in the cart.
///
/// Expected: Err(BadRequest("Your cart is empty"))
#[tokio::test]
async fn rejects_empty_cart() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = user(factory::create_user(db).await?);

    let result = CheckoutService::new(db, &tradesafe, SHIPPING)
        .checkout(&customer, address())
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Your cart is empty"),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }

    Ok(())
}

/// Tests that a line short on stock aborts the whole checkout.
///
/// Expected: Err(BadRequest), no order, stock and cart untouched
#[tokio::test]
async fn rolls_back_when_stock_runs_out() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = user(factory::create_user(db).await?);
    let plenty = factory::product::ProductFactory::new(db)
        .stock(10)
        .build()
        .await?;
    let scarce = factory::product::ProductFactory::new(db)
        .name("Senior Formula")
        .stock(1)
        .build()
        .await?;
    factory::create_cart_item(db, customer.id, plenty.id, 2).await?;
    factory::create_cart_item(db, customer.id, scarce.id, 3).await?;

    let result = CheckoutService::new(db, &tradesafe, SHIPPING)
        .checkout(&customer, address())
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Not enough Senior Formula in stock"),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }

    let products = ProductRepository::new(db);
    assert_eq!(products.find_by_id(plenty.id).await?.unwrap().stock, 10);
    assert_eq!(products.find_by_id(scarce.id).await?.unwrap().stock, 1);
    assert_eq!(CartRepository::new(db).get_lines(customer.id).await?.len(), 2);
    assert_eq!(
        OrderRepository::new(db)
            .get_paginated_by_user(customer.id, 0, 10)
            .await?
            .1,
        0
    );

    Ok(())
}

/// Tests checking out an archived product.
///
/// Expected: Err(BadRequest) naming the product
#[tokio::test]
async fn rejects_archived_products() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = user(factory::create_user(db).await?);
    let archived = factory::product::ProductFactory::new(db)
        .name("Discontinued Mix")
        .active(false)
        .build()
        .await?;
    factory::create_cart_item(db, customer.id, archived.id, 1).await?;

    let result = CheckoutService::new(db, &tradesafe, SHIPPING)
        .checkout(&customer, address())
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Discontinued Mix is no longer available"),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }

    Ok(())
}

/// Tests that an unreachable payment provider does not undo the order.
///
/// Expected: pending order with shipping fee, stock taken, cart emptied, no payment link
#[tokio::test]
async fn places_order_when_payment_provider_is_down() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = user(factory::create_user(db).await?);
    let product = factory::product::ProductFactory::new(db)
        .price_cents(19_900)
        .stock(5)
        .build()
        .await?;
    factory::create_cart_item(db, customer.id, product.id, 2).await?;

    let result = CheckoutService::new(db, &tradesafe, SHIPPING)
        .checkout(&customer, address())
        .await?;

    assert_eq!(result.payment_url, None);
    let order = result.order;
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(order.subtotal_cents, 39_800);
    assert_eq!(order.shipping_cents, 8_500);
    assert_eq!(order.total_cents, 48_300);
    assert_eq!(order.items.len(), 1);
    assert_eq!(order.items[0].quantity, 2);
    assert_eq!(order.payment_state, None);

    assert_eq!(
        ProductRepository::new(db)
            .find_by_id(product.id)
            .await?
            .unwrap()
            .stock,
        3
    );
    assert!(CartRepository::new(db).get_lines(customer.id).await?.is_empty());

    Ok(())
}

/// Tests a checkout that opens the escrow transaction.
///
/// Expected: checkout link returned, free shipping above the threshold, trade recorded
#[tokio::test]
async fn opens_payment_for_new_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start_async().await;
    mock_payment_flow(&server, "txn-checkout").await;
    let tradesafe = mock_tradesafe(&server);

    let customer = user(factory::create_user(db).await?);
    let product = factory::product::ProductFactory::new(db)
        .price_cents(30_000)
        .build()
        .await?;
    factory::create_cart_item(db, customer.id, product.id, 2).await?;

    let result = CheckoutService::new(db, &tradesafe, SHIPPING)
        .checkout(&customer, address())
        .await?;

    assert_eq!(
        result.payment_url.as_deref(),
        Some("https://pay.example/txn-checkout")
    );
    assert_eq!(result.order.shipping_cents, 0);
    assert_eq!(result.order.total_cents, 60_000);
    assert_eq!(result.order.payment_state.as_deref(), Some("CREATED"));

    Ok(())
}
