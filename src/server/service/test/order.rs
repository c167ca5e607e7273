use entity::sea_orm_active_enums::OrderStatus;
use httpmock::prelude::*;
use serde_json::json;
use test_utils::{builder::TestBuilder, factory};

use super::*;
use crate::server::{
    data::product::ProductRepository,
    error::AppError,
    model::order::UpdateOrderStatusParam,
    service::order::OrderService,
};

fn status(status: OrderStatus, tracking_number: Option<&str>) -> UpdateOrderStatusParam {
    UpdateOrderStatusParam {
        status,
        tracking_number: tracking_number.map(str::to_string),
    }
}

/// Tests a customer cancelling their pending order.
///
/// Expected: order cancelled and its units back in stock
#[tokio::test]
async fn customer_cancel_restocks() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(4)
        .build()
        .await?;
    let (order, _) = factory::order::OrderFactory::new(db, customer.id)
        .item(&product, 3)
        .build()
        .await?;

    let cancelled = OrderService::new(db, &tradesafe)
        .cancel(&user(customer), order.id)
        .await?;

    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    assert_eq!(
        ProductRepository::new(db)
            .find_by_id(product.id)
            .await?
            .unwrap()
            .stock,
        7
    );

    Ok(())
}

/// Tests cancelling an order that has left the warehouse.
///
/// Expected: Err(BadRequest("Cannot cancel a shipped order")) and stock unchanged
#[tokio::test]
async fn customer_cannot_cancel_shipped_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(4)
        .build()
        .await?;
    let (order, _) = factory::order::OrderFactory::new(db, customer.id)
        .status(OrderStatus::Shipped)
        .item(&product, 1)
        .build()
        .await?;

    let result = OrderService::new(db, &tradesafe)
        .cancel(&user(customer), order.id)
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Cannot cancel a shipped order"),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }
    assert_eq!(
        ProductRepository::new(db)
            .find_by_id(product.id)
            .await?
            .unwrap()
            .stock,
        4
    );

    Ok(())
}

/// Tests that another customer's order looks missing.
///
/// Expected: Err(NotFound) for get and cancel, Ok for an admin
#[tokio::test]
async fn hides_orders_of_other_customers() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let owner = factory::create_user(db).await?;
    let stranger = user(factory::create_user(db).await?);
    let admin = user(factory::create_admin(db).await?);
    let product = factory::create_product(db).await?;
    let order = factory::create_order(db, owner.id, &product).await?;

    let service = OrderService::new(db, &tradesafe);

    assert!(matches!(
        service.get_for_user(&stranger, order.id).await,
        Err(AppError::NotFound(_))
    ));
    assert!(matches!(
        service.cancel(&stranger, order.id).await,
        Err(AppError::NotFound(_))
    ));
    assert_eq!(service.get_for_user(&admin, order.id).await?.id, order.id);

    Ok(())
}

/// Tests walking an order through fulfilment.
///
/// Expected: each allowed step applied, tracking number trimmed and kept
#[tokio::test]
async fn admin_moves_order_through_fulfilment() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let order = factory::create_order(db, customer.id, &product).await?;

    let service = OrderService::new(db, &tradesafe);

    service
        .update_status(order.id, status(OrderStatus::Paid, None))
        .await?;
    service
        .update_status(order.id, status(OrderStatus::Processing, None))
        .await?;
    let shipped = service
        .update_status(order.id, status(OrderStatus::Shipped, Some("  TRK-42 ")))
        .await?;
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(shipped.tracking_number.as_deref(), Some("TRK-42"));

    let delivered = service
        .update_status(order.id, status(OrderStatus::Delivered, None))
        .await?;
    assert_eq!(delivered.status, OrderStatus::Delivered);
    assert_eq!(delivered.tracking_number.as_deref(), Some("TRK-42"));

    Ok(())
}

/// Tests skipping a step of the workflow.
///
/// Expected: Err(BadRequest) naming both statuses, order unchanged
#[tokio::test]
async fn rejects_disallowed_transition() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let order = factory::create_order(db, customer.id, &product).await?;

    let service = OrderService::new(db, &tradesafe);
    let result = service
        .update_status(order.id, status(OrderStatus::Shipped, Some("TRK")))
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => {
            assert_eq!(msg, "Cannot move an order from pending to shipped")
        }
        other => panic!("Expected BadRequest, got: {:?}", other),
    }

    let admin = user(factory::create_admin(db).await?);
    assert_eq!(
        service.get_for_user(&admin, order.id).await?.status,
        OrderStatus::Pending
    );

    Ok(())
}

/// Tests the store cancelling a paid order with an open escrow transaction.
///
/// Expected: stock restored and the transaction cancelled at TradeSafe
#[tokio::test]
async fn admin_cancel_restocks_and_cancels_trade() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/oauth/token");
            then.status(200).json_body(json!({
                "access_token": "access-1",
                "token_type": "Bearer",
                "expires_in": 3600
            }));
        })
        .await;
    let cancel = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/graphql")
                .body_contains("transactionCancel")
                .body_contains("Cancelled by store");
            then.status(200).json_body(json!({
                "data": { "transactionCancel": { "id": "txn-1", "state": "CANCELLED" } }
            }));
        })
        .await;
    let tradesafe = mock_tradesafe(&server);

    let customer = factory::create_user(db).await?;
    let product = factory::product::ProductFactory::new(db)
        .stock(0)
        .build()
        .await?;
    let (order, _) = factory::order::OrderFactory::new(db, customer.id)
        .status(OrderStatus::Paid)
        .item(&product, 2)
        .build()
        .await?;
    factory::create_trade(db, &order, "FUNDS_RECEIVED").await?;

    let updated = OrderService::new(db, &tradesafe)
        .update_status(order.id, status(OrderStatus::Cancelled, None))
        .await?;

    assert_eq!(updated.status, OrderStatus::Cancelled);
    assert_eq!(
        ProductRepository::new(db)
            .find_by_id(product.id)
            .await?
            .unwrap()
            .stock,
        2
    );
    cancel.assert_async().await;

    Ok(())
}

/// Tests asking for a payment link on a paid order.
///
/// Expected: Err(BadRequest("Only pending orders can be paid"))
#[tokio::test]
async fn payment_link_requires_pending_order() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let tradesafe = offline_tradesafe();

    let customer = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let (order, _) = factory::order::OrderFactory::new(db, customer.id)
        .status(OrderStatus::Paid)
        .item(&product, 1)
        .build()
        .await?;

    let result = OrderService::new(db, &tradesafe)
        .payment_link(&user(customer), order.id)
        .await;

    match result {
        Err(AppError::BadRequest(msg)) => assert_eq!(msg, "Only pending orders can be paid"),
        other => panic!("Expected BadRequest, got: {:?}", other),
    }

    Ok(())
}

/// Tests asking for a payment link when checkout could not open the transaction.
///
/// Expected: transaction opened now and its checkout link returned
#[tokio::test]
async fn payment_link_opens_missing_trade() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_store_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    let server = MockServer::start_async().await;
    mock_payment_flow(&server, "txn-late").await;
    let tradesafe = mock_tradesafe(&server);

    let customer = factory::create_user(db).await?;
    let product = factory::create_product(db).await?;
    let order = factory::create_order(db, customer.id, &product).await?;

    let url = OrderService::new(db, &tradesafe)
        .payment_link(&user(customer), order.id)
        .await?;

    assert_eq!(url, "https://pay.example/txn-late");

    Ok(())
}
