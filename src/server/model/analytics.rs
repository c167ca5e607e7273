//! Analytics and dashboard models.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use entity::sea_orm_active_enums::SubscriptionStatus;

use crate::{
    model::analytics::{
        AnalyticsDto, DailyRevenueDto, DashboardDto, LowStockProductDto, TopProductDto,
    },
    server::{error::AppError, model::product::Product},
};

pub const DEFAULT_WINDOW_DAYS: i64 = 30;
pub const MAX_WINDOW_DAYS: i64 = 366;
pub const DEFAULT_TOP_PRODUCTS: usize = 5;
pub const MAX_TOP_PRODUCTS: usize = 50;

/// Half-open reporting window `[from, to)` and top-product list size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalyticsWindow {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub top: usize,
}

impl AnalyticsWindow {
    /// Resolves query parameters into a window ending at `now` by default.
    ///
    /// `to` defaults to `now` and `from` to 30 days before `to`. `top` is clamped to
    /// 1-50 and defaults to 5.
    ///
    /// # Returns
    /// - `Ok(AnalyticsWindow)` - Valid window
    /// - `Err(AppError::BadRequest)` - `to` not after `from`, or window longer than 366 days
    pub fn resolve(
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        top: Option<usize>,
        now: DateTime<Utc>,
    ) -> Result<Self, AppError> {
        let to = to.unwrap_or(now);
        let from = from.unwrap_or(to - Duration::days(DEFAULT_WINDOW_DAYS));

        if to <= from {
            return Err(AppError::BadRequest(
                "'to' must be after 'from'".to_string(),
            ));
        }
        if to - from > Duration::days(MAX_WINDOW_DAYS) {
            return Err(AppError::BadRequest(format!(
                "Window may span at most {} days",
                MAX_WINDOW_DAYS
            )));
        }

        Ok(Self {
            from,
            to,
            top: top
                .unwrap_or(DEFAULT_TOP_PRODUCTS)
                .clamp(1, MAX_TOP_PRODUCTS),
        })
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.from && at < self.to
    }

    /// Every UTC calendar day touched by the window, ascending.
    pub fn days(&self) -> Vec<NaiveDate> {
        let first = self.from.date_naive();
        let last = (self.to - Duration::nanoseconds(1)).date_naive();
        first.iter_days().take_while(|day| *day <= last).collect()
    }
}

/// Lifecycle timestamps of a subscription, enough to compute churn.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionSnapshot {
    pub status: SubscriptionStatus,
    pub created_at: DateTime<Utc>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyRevenue {
    pub date: NaiveDate,
    pub revenue_cents: i64,
    pub order_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopProduct {
    pub product_id: i32,
    pub name: String,
    pub units: i64,
    pub revenue_cents: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analytics {
    pub window: AnalyticsWindow,
    pub total_revenue_cents: i64,
    /// Number of revenue orders in the window.
    pub order_count: u64,
    pub average_order_value_cents: i64,
    pub subscription_revenue_cents: i64,
    pub revenue_by_day: Vec<DailyRevenue>,
    pub top_products: Vec<TopProduct>,
    pub new_customers: u64,
    pub new_subscriptions: u64,
    pub cancelled_subscriptions: u64,
    pub active_subscriptions: u64,
    pub churn_rate: Option<f64>,
    pub retention_rate: Option<f64>,
    pub repeat_customer_rate: Option<f64>,
}

impl Analytics {
    pub fn into_dto(self) -> AnalyticsDto {
        AnalyticsDto {
            from: self.window.from,
            to: self.window.to,
            total_revenue_cents: self.total_revenue_cents,
            order_count: self.order_count,
            average_order_value_cents: self.average_order_value_cents,
            subscription_revenue_cents: self.subscription_revenue_cents,
            revenue_by_day: self
                .revenue_by_day
                .into_iter()
                .map(|day| DailyRevenueDto {
                    date: day.date,
                    revenue_cents: day.revenue_cents,
                    order_count: day.order_count,
                })
                .collect(),
            top_products: self
                .top_products
                .into_iter()
                .map(|p| TopProductDto {
                    product_id: p.product_id,
                    name: p.name,
                    units: p.units,
                    revenue_cents: p.revenue_cents,
                })
                .collect(),
            new_customers: self.new_customers,
            new_subscriptions: self.new_subscriptions,
            cancelled_subscriptions: self.cancelled_subscriptions,
            active_subscriptions: self.active_subscriptions,
            churn_rate: self.churn_rate,
            retention_rate: self.retention_rate,
            repeat_customer_rate: self.repeat_customer_rate,
        }
    }
}

/// Operational snapshot for the admin landing page.
#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub customer_count: u64,
    pub product_count: u64,
    pub pending_orders: u64,
    pub awaiting_fulfilment: u64,
    pub active_subscriptions: u64,
    pub subscriptions_due_next_7_days: u64,
    pub revenue_last_30_days_cents: i64,
    pub low_stock_products: Vec<Product>,
}

impl Dashboard {
    pub fn into_dto(self) -> DashboardDto {
        DashboardDto {
            customer_count: self.customer_count,
            product_count: self.product_count,
            pending_orders: self.pending_orders,
            awaiting_fulfilment: self.awaiting_fulfilment,
            active_subscriptions: self.active_subscriptions,
            subscriptions_due_next_7_days: self.subscriptions_due_next_7_days,
            revenue_last_30_days_cents: self.revenue_last_30_days_cents,
            low_stock_products: self
                .low_stock_products
                .into_iter()
                .map(|p| LowStockProductDto {
                    id: p.id,
                    name: p.name,
                    slug: p.slug,
                    stock: p.stock,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 30, 12, 0, 0).unwrap()
    }

    /// Tests defaults when no parameters are given.
    ///
    /// Expected: last 30 days ending now, top 5
    #[test]
    fn defaults_to_last_thirty_days() {
        let window = AnalyticsWindow::resolve(None, None, None, now()).unwrap();

        assert_eq!(window.to, now());
        assert_eq!(window.from, now() - Duration::days(30));
        assert_eq!(window.top, 5);
    }

    /// Tests window validation.
    ///
    /// Expected: Err for reversed, empty and over-long windows
    #[test]
    fn rejects_invalid_windows() {
        let to = now();
        assert!(AnalyticsWindow::resolve(Some(to), Some(to), None, now()).is_err());
        assert!(
            AnalyticsWindow::resolve(Some(to + Duration::days(1)), Some(to), None, now()).is_err()
        );
        assert!(
            AnalyticsWindow::resolve(Some(to - Duration::days(367)), Some(to), None, now())
                .is_err()
        );
        assert!(
            AnalyticsWindow::resolve(Some(to - Duration::days(366)), Some(to), None, now()).is_ok()
        );
    }

    /// Tests top-product clamping.
    ///
    /// Expected: 0 becomes 1 and 500 becomes 50
    #[test]
    fn clamps_top() {
        let low = AnalyticsWindow::resolve(None, None, Some(0), now()).unwrap();
        let high = AnalyticsWindow::resolve(None, None, Some(500), now()).unwrap();
        assert_eq!(low.top, 1);
        assert_eq!(high.top, 50);
    }

    /// Tests calendar days covered by a window ending at midnight.
    ///
    /// Expected: the end day is excluded when `to` is exactly midnight
    #[test]
    fn lists_days_in_window() {
        let from = Utc.with_ymd_and_hms(2026, 6, 1, 15, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2026, 6, 4, 0, 0, 0).unwrap();
        let window = AnalyticsWindow::resolve(Some(from), Some(to), None, now()).unwrap();

        let days = window.days();

        assert_eq!(days.len(), 3);
        assert_eq!(days[0], NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
        assert_eq!(days[2], NaiveDate::from_ymd_opt(2026, 6, 3).unwrap());
    }
}
