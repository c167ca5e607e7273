//! Order models and the order status lifecycle.

use chrono::{DateTime, Utc};
use entity::sea_orm_active_enums::OrderStatus;

use crate::{
    model::{
        checkout::{CheckoutDto, CheckoutResultDto},
        order::{OrderDto, OrderItemDto, OrderStatusDto, PaginatedOrdersDto},
    },
    server::error::AppError,
};

/// Line captured at order time; name and price are snapshots of the product.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    pub product_id: i32,
    pub product_name: String,
    pub unit_price_cents: i64,
    pub quantity: i32,
}

impl OrderItem {
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents.saturating_mul(self.quantity as i64)
    }

    pub fn from_entity(entity: entity::order_item::Model) -> Self {
        Self {
            product_id: entity.product_id,
            product_name: entity.product_name,
            unit_price_cents: entity.unit_price_cents,
            quantity: entity.quantity,
        }
    }

    pub fn into_dto(self) -> OrderItemDto {
        let line_total_cents = self.line_total_cents();
        OrderItemDto {
            product_id: self.product_id,
            product_name: self.product_name,
            unit_price_cents: self.unit_price_cents,
            quantity: self.quantity,
            line_total_cents,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i32,
    pub user_id: i32,
    pub subscription_id: Option<i32>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub total_cents: i64,
    pub shipping_address: String,
    pub tracking_number: Option<String>,
    /// Escrow state of the linked trade, if one was opened.
    pub payment_state: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    pub fn from_entity(
        entity: entity::order::Model,
        items: Vec<entity::order_item::Model>,
        trade: Option<entity::trade::Model>,
    ) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            subscription_id: entity.subscription_id,
            status: entity.status,
            items: items.into_iter().map(OrderItem::from_entity).collect(),
            subtotal_cents: entity.subtotal_cents,
            shipping_cents: entity.shipping_cents,
            total_cents: entity.total_cents,
            shipping_address: entity.shipping_address,
            tracking_number: entity.tracking_number,
            payment_state: trade.map(|t| t.state),
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }

    pub fn into_dto(self) -> OrderDto {
        OrderDto {
            id: self.id,
            user_id: self.user_id,
            subscription_id: self.subscription_id,
            status: self.status.into(),
            items: self.items.into_iter().map(OrderItem::into_dto).collect(),
            subtotal_cents: self.subtotal_cents,
            shipping_cents: self.shipping_cents,
            total_cents: self.total_cents,
            shipping_address: self.shipping_address,
            tracking_number: self.tracking_number,
            payment_state: self.payment_state,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl From<OrderStatus> for OrderStatusDto {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => OrderStatusDto::Pending,
            OrderStatus::Paid => OrderStatusDto::Paid,
            OrderStatus::Processing => OrderStatusDto::Processing,
            OrderStatus::Shipped => OrderStatusDto::Shipped,
            OrderStatus::Delivered => OrderStatusDto::Delivered,
            OrderStatus::Cancelled => OrderStatusDto::Cancelled,
            OrderStatus::Refunded => OrderStatusDto::Refunded,
        }
    }
}

impl From<OrderStatusDto> for OrderStatus {
    fn from(status: OrderStatusDto) -> Self {
        match status {
            OrderStatusDto::Pending => OrderStatus::Pending,
            OrderStatusDto::Paid => OrderStatus::Paid,
            OrderStatusDto::Processing => OrderStatus::Processing,
            OrderStatusDto::Shipped => OrderStatus::Shipped,
            OrderStatusDto::Delivered => OrderStatus::Delivered,
            OrderStatusDto::Cancelled => OrderStatus::Cancelled,
            OrderStatusDto::Refunded => OrderStatus::Refunded,
        }
    }
}

/// Whether an admin may move an order from `from` to `to`.
///
/// pending → paid | cancelled
/// paid → processing | cancelled | refunded
/// processing → shipped | cancelled
/// shipped → delivered
/// delivered → refunded
pub fn can_transition(from: OrderStatus, to: OrderStatus) -> bool {
    use OrderStatus::*;

    matches!(
        (from, to),
        (Pending, Paid)
            | (Pending, Cancelled)
            | (Paid, Processing)
            | (Paid, Cancelled)
            | (Paid, Refunded)
            | (Processing, Shipped)
            | (Processing, Cancelled)
            | (Shipped, Delivered)
            | (Delivered, Refunded)
    )
}

/// Customers may cancel until the order leaves the warehouse.
pub fn customer_can_cancel(status: OrderStatus) -> bool {
    matches!(
        status,
        OrderStatus::Pending | OrderStatus::Paid | OrderStatus::Processing
    )
}

/// Orders whose value counts as realised revenue.
pub fn is_revenue(status: OrderStatus) -> bool {
    matches!(
        status,
        OrderStatus::Paid | OrderStatus::Processing | OrderStatus::Shipped | OrderStatus::Delivered
    )
}

/// Line to snapshot into a new order.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrderItem {
    pub product_id: i32,
    pub product_name: String,
    pub unit_price_cents: i64,
    pub quantity: i32,
}

/// Parameters for inserting a pending order and its items.
#[derive(Debug, Clone)]
pub struct CreateOrderParam {
    pub user_id: i32,
    pub subscription_id: Option<i32>,
    pub shipping_address: String,
    pub shipping_cents: i64,
    pub items: Vec<NewOrderItem>,
}

impl CreateOrderParam {
    pub fn subtotal_cents(&self) -> i64 {
        self.items
            .iter()
            .map(|item| item.unit_price_cents.saturating_mul(item.quantity as i64))
            .sum()
    }
}

/// Admin status change request.
#[derive(Debug, Clone)]
pub struct UpdateOrderStatusParam {
    pub status: OrderStatus,
    pub tracking_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PaginatedOrders {
    pub orders: Vec<Order>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedOrders {
    pub fn into_dto(self) -> PaginatedOrdersDto {
        PaginatedOrdersDto {
            orders: self.orders.into_iter().map(Order::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Checkout request after validation.
#[derive(Debug, Clone)]
pub struct CheckoutParam {
    pub shipping_address: String,
    pub phone: Option<String>,
}

impl CheckoutParam {
    pub fn from_dto(dto: CheckoutDto) -> Result<Self, AppError> {
        let shipping_address = dto.shipping_address.trim().to_string();
        if shipping_address.is_empty() {
            return Err(AppError::BadRequest(
                "Shipping address is required".to_string(),
            ));
        }

        Ok(Self {
            shipping_address,
            phone: dto
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        })
    }
}

/// Placed order and, when the escrow could be opened, where to pay for it.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutResult {
    pub order: Order,
    pub payment_url: Option<String>,
}

impl CheckoutResult {
    pub fn into_dto(self) -> CheckoutResultDto {
        CheckoutResultDto {
            order: self.order.into_dto(),
            payment_url: self.payment_url,
        }
    }
}
