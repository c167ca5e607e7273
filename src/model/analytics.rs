use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct DailyRevenueDto {
    pub date: NaiveDate,
    pub revenue_cents: i64,
    pub order_count: u64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct TopProductDto {
    pub product_id: i32,
    pub name: String,
    pub units: i64,
    pub revenue_cents: i64,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct AnalyticsDto {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub total_revenue_cents: i64,
    pub order_count: u64,
    pub average_order_value_cents: i64,
    pub subscription_revenue_cents: i64,
    pub revenue_by_day: Vec<DailyRevenueDto>,
    pub top_products: Vec<TopProductDto>,
    pub new_customers: u64,
    pub new_subscriptions: u64,
    pub cancelled_subscriptions: u64,
    pub active_subscriptions: u64,
    pub churn_rate: Option<f64>,
    pub retention_rate: Option<f64>,
    pub repeat_customer_rate: Option<f64>,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct LowStockProductDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub stock: i32,
}

#[derive(Serialize, Deserialize, ToSchema, Clone, Debug, PartialEq)]
pub struct DashboardDto {
    pub customer_count: u64,
    pub product_count: u64,
    pub pending_orders: u64,
    pub awaiting_fulfilment: u64,
    pub active_subscriptions: u64,
    pub subscriptions_due_next_7_days: u64,
    pub revenue_last_30_days_cents: i64,
    pub low_stock_products: Vec<LowStockProductDto>,
}
