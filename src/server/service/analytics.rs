//! Sales analytics and the admin dashboard.
//!
//! Figures are computed in memory from the orders and subscriptions in the reporting
//! window; `aggregate` holds all of the arithmetic so it can be tested without a
//! database.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Duration, Utc};
use entity::sea_orm_active_enums::{OrderStatus, SubscriptionStatus};
use sea_orm::DatabaseConnection;

use crate::server::{
    data::{
        order::OrderRepository, product::ProductRepository, subscription::SubscriptionRepository,
        user::UserRepository,
    },
    error::AppError,
    model::{
        analytics::{
            Analytics, AnalyticsWindow, DailyRevenue, Dashboard, SubscriptionSnapshot, TopProduct,
        },
        order::{is_revenue, Order},
    },
};

/// Inputs to `aggregate` besides the window.
pub struct AnalyticsInput {
    /// Orders created inside the window, any status.
    pub orders: Vec<Order>,
    pub new_customers: u64,
    /// Every subscription created before the end of the window.
    pub subscriptions: Vec<SubscriptionSnapshot>,
    pub active_subscriptions: u64,
}

/// Computes every analytics figure for `window`.
pub fn aggregate(window: AnalyticsWindow, input: AnalyticsInput) -> Analytics {
    let revenue_orders: Vec<&Order> = input
        .orders
        .iter()
        .filter(|order| is_revenue(order.status) && window.contains(order.created_at))
        .collect();

    let total_revenue_cents: i64 = revenue_orders.iter().map(|o| o.total_cents).sum();
    let order_count = revenue_orders.len() as u64;
    let average_order_value_cents = if order_count == 0 {
        0
    } else {
        total_revenue_cents.div_euclid(order_count as i64)
    };
    let subscription_revenue_cents = revenue_orders
        .iter()
        .filter(|o| o.subscription_id.is_some())
        .map(|o| o.total_cents)
        .sum();

    let mut days: BTreeMap<_, DailyRevenue> = window
        .days()
        .into_iter()
        .map(|date| {
            (
                date,
                DailyRevenue {
                    date,
                    revenue_cents: 0,
                    order_count: 0,
                },
            )
        })
        .collect();
    for order in &revenue_orders {
        if let Some(day) = days.get_mut(&order.created_at.date_naive()) {
            day.revenue_cents += order.total_cents;
            day.order_count += 1;
        }
    }

    let mut products: HashMap<i32, TopProduct> = HashMap::new();
    for item in revenue_orders.iter().flat_map(|o| o.items.iter()) {
        let entry = products.entry(item.product_id).or_insert_with(|| TopProduct {
            product_id: item.product_id,
            name: item.product_name.clone(),
            units: 0,
            revenue_cents: 0,
        });
        entry.units += item.quantity as i64;
        entry.revenue_cents += item.line_total_cents();
    }
    let mut top_products: Vec<TopProduct> = products.into_values().collect();
    top_products.sort_by(|a, b| {
        b.revenue_cents
            .cmp(&a.revenue_cents)
            .then(b.units.cmp(&a.units))
            .then(a.product_id.cmp(&b.product_id))
    });
    top_products.truncate(window.top);

    let new_subscriptions = input
        .subscriptions
        .iter()
        .filter(|s| window.contains(s.created_at))
        .count() as u64;
    let cancelled_in_window =
        |s: &SubscriptionSnapshot| s.cancelled_at.is_some_and(|at| window.contains(at));
    let cancelled_subscriptions = input
        .subscriptions
        .iter()
        .filter(|s| cancelled_in_window(s))
        .count() as u64;

    let churn_base: Vec<&SubscriptionSnapshot> = input
        .subscriptions
        .iter()
        .filter(|s| s.created_at < window.from)
        .filter(|s| s.cancelled_at.is_none_or(|at| at >= window.from))
        .collect();
    let churn_rate = ratio(
        churn_base.iter().filter(|s| cancelled_in_window(s)).count(),
        churn_base.len(),
    );

    let mut orders_per_customer: HashMap<i32, usize> = HashMap::new();
    for order in &revenue_orders {
        *orders_per_customer.entry(order.user_id).or_default() += 1;
    }
    let repeat_customer_rate = ratio(
        orders_per_customer.values().filter(|n| **n >= 2).count(),
        orders_per_customer.len(),
    );

    Analytics {
        window,
        total_revenue_cents,
        order_count,
        average_order_value_cents,
        subscription_revenue_cents,
        revenue_by_day: days.into_values().collect(),
        top_products,
        new_customers: input.new_customers,
        new_subscriptions,
        cancelled_subscriptions,
        active_subscriptions: input.active_subscriptions,
        churn_rate,
        retention_rate: churn_rate.map(|churn| 1.0 - churn),
        repeat_customer_rate,
    }
}

fn ratio(part: usize, whole: usize) -> Option<f64> {
    (whole > 0).then(|| part as f64 / whole as f64)
}

pub struct AnalyticsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AnalyticsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn analytics(&self, window: AnalyticsWindow) -> Result<Analytics, AppError> {
        let orders = OrderRepository::new(self.db)
            .get_created_between(window.from, window.to)
            .await?;
        let new_customers = UserRepository::new(self.db)
            .count_customers_created_between(window.from, window.to)
            .await?;

        let subscription_repo = SubscriptionRepository::new(self.db);
        let subscriptions = subscription_repo.get_snapshots_before(window.to).await?;
        let active_subscriptions = subscription_repo
            .count_by_status(SubscriptionStatus::Active)
            .await?;

        Ok(aggregate(
            window,
            AnalyticsInput {
                orders,
                new_customers,
                subscriptions,
                active_subscriptions,
            },
        ))
    }

    /// Operational snapshot as of `now`.
    pub async fn dashboard(
        &self,
        now: DateTime<Utc>,
        low_stock_threshold: i32,
    ) -> Result<Dashboard, AppError> {
        let order_repo = OrderRepository::new(self.db);
        let product_repo = ProductRepository::new(self.db);
        let subscription_repo = SubscriptionRepository::new(self.db);

        let revenue_last_30_days_cents = order_repo
            .get_created_between(now - Duration::days(30), now)
            .await?
            .iter()
            .filter(|order| is_revenue(order.status))
            .map(|order| order.total_cents)
            .sum();

        Ok(Dashboard {
            customer_count: UserRepository::new(self.db).count_customers().await?,
            product_count: product_repo.count_active().await?,
            pending_orders: order_repo.count_by_status(&[OrderStatus::Pending]).await?,
            awaiting_fulfilment: order_repo
                .count_by_status(&[OrderStatus::Paid, OrderStatus::Processing])
                .await?,
            active_subscriptions: subscription_repo
                .count_by_status(SubscriptionStatus::Active)
                .await?,
            subscriptions_due_next_7_days: subscription_repo
                .count_active_due_between(now, now + Duration::days(7))
                .await?,
            revenue_last_30_days_cents,
            low_stock_products: product_repo.get_low_stock(low_stock_threshold).await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    use crate::server::model::order::OrderItem;

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, day, hour, 0, 0).unwrap()
    }

    fn window() -> AnalyticsWindow {
        AnalyticsWindow::resolve(Some(at(1, 0)), Some(at(4, 0)), Some(5), at(30, 0)).unwrap()
    }

    fn order(
        id: i32,
        user_id: i32,
        status: OrderStatus,
        created_at: DateTime<Utc>,
        items: Vec<(i32, i64, i32)>,
    ) -> Order {
        let items: Vec<OrderItem> = items
            .into_iter()
            .map(|(product_id, unit_price_cents, quantity)| OrderItem {
                product_id,
                product_name: format!("Product {}", product_id),
                unit_price_cents,
                quantity,
            })
            .collect();
        let subtotal: i64 = items.iter().map(OrderItem::line_total_cents).sum();
        Order {
            id,
            user_id,
            subscription_id: None,
            status,
            items,
            subtotal_cents: subtotal,
            shipping_cents: 0,
            total_cents: subtotal,
            shipping_address: "1 Main Rd".to_string(),
            tracking_number: None,
            payment_state: None,
            created_at,
            updated_at: created_at,
        }
    }

    fn input(orders: Vec<Order>, subscriptions: Vec<SubscriptionSnapshot>) -> AnalyticsInput {
        AnalyticsInput {
            orders,
            new_customers: 0,
            subscriptions,
            active_subscriptions: 0,
        }
    }

    fn snapshot(
        created_at: DateTime<Utc>,
        cancelled_at: Option<DateTime<Utc>>,
    ) -> SubscriptionSnapshot {
        SubscriptionSnapshot {
            status: if cancelled_at.is_some() {
                SubscriptionStatus::Cancelled
            } else {
                SubscriptionStatus::Active
            },
            created_at,
            cancelled_at,
        }
    }

    /// Tests revenue totals only count paid-through-delivered orders.
    ///
    /// Expected: pending, cancelled and refunded orders excluded; average floors
    #[test]
    fn counts_only_revenue_orders() {
        let orders = vec![
            order(1, 1, OrderStatus::Paid, at(1, 9), vec![(1, 1000, 1)]),
            order(2, 2, OrderStatus::Delivered, at(2, 9), vec![(1, 1001, 1)]),
            order(3, 3, OrderStatus::Pending, at(2, 10), vec![(1, 5000, 1)]),
            order(4, 4, OrderStatus::Refunded, at(3, 10), vec![(1, 5000, 1)]),
            order(5, 5, OrderStatus::Cancelled, at(3, 11), vec![(1, 5000, 1)]),
        ];

        let analytics = aggregate(window(), input(orders, vec![]));

        assert_eq!(analytics.total_revenue_cents, 2001);
        assert_eq!(analytics.order_count, 2);
        assert_eq!(analytics.average_order_value_cents, 1000);
        assert_eq!(analytics.repeat_customer_rate, Some(0.0));
    }

    /// Tests an empty window.
    ///
    /// Expected: zeros everywhere, every day present, rates null
    #[test]
    fn empty_window_has_zero_filled_days() {
        let analytics = aggregate(window(), input(vec![], vec![]));

        assert_eq!(analytics.total_revenue_cents, 0);
        assert_eq!(analytics.average_order_value_cents, 0);
        assert_eq!(analytics.revenue_by_day.len(), 3);
        assert!(analytics.revenue_by_day.iter().all(|d| d.revenue_cents == 0));
        assert_eq!(
            analytics.revenue_by_day[0].date,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
        );
        assert_eq!(analytics.churn_rate, None);
        assert_eq!(analytics.retention_rate, None);
        assert_eq!(analytics.repeat_customer_rate, None);
        assert!(analytics.top_products.is_empty());
    }

    /// Tests daily revenue bucketing.
    ///
    /// Expected: each revenue order lands on its UTC calendar day
    #[test]
    fn buckets_revenue_by_day() {
        let orders = vec![
            order(1, 1, OrderStatus::Paid, at(1, 1), vec![(1, 500, 2)]),
            order(2, 1, OrderStatus::Shipped, at(1, 23), vec![(2, 300, 1)]),
            order(3, 2, OrderStatus::Processing, at(3, 12), vec![(1, 500, 1)]),
        ];

        let analytics = aggregate(window(), input(orders, vec![]));

        let days = &analytics.revenue_by_day;
        assert_eq!((days[0].revenue_cents, days[0].order_count), (1300, 2));
        assert_eq!((days[1].revenue_cents, days[1].order_count), (0, 0));
        assert_eq!((days[2].revenue_cents, days[2].order_count), (500, 1));
        assert_eq!(analytics.repeat_customer_rate, Some(0.5));
    }

    /// Tests top product ordering and truncation.
    ///
    /// Expected: revenue desc, then units desc, then product id asc
    #[test]
    fn ranks_top_products() {
        let orders = vec![order(
            1,
            1,
            OrderStatus::Paid,
            at(2, 9),
            vec![(3, 1000, 1), (2, 500, 2), (1, 250, 4), (4, 2000, 1)],
        )];
        let mut window = window();
        window.top = 3;

        let analytics = aggregate(window, input(orders, vec![]));

        let ids: Vec<i32> = analytics.top_products.iter().map(|p| p.product_id).collect();
        assert_eq!(ids, vec![4, 1, 2]);
        assert_eq!(analytics.top_products[1].units, 4);
    }

    /// Tests churn over subscriptions that existed when the window opened.
    ///
    /// Expected: one of two eligible subscriptions cancelled in window; earlier
    /// cancellations and new subscriptions excluded from the base
    #[test]
    fn computes_churn_and_retention() {
        let before = at(1, 0) - Duration::days(10);
        let subscriptions = vec![
            snapshot(before, None),
            snapshot(before, Some(at(2, 8))),
            snapshot(before, Some(before + Duration::days(1))),
            snapshot(at(2, 0), Some(at(3, 0))),
        ];

        let analytics = aggregate(window(), input(vec![], subscriptions));

        assert_eq!(analytics.churn_rate, Some(0.5));
        assert_eq!(analytics.retention_rate, Some(0.5));
        assert_eq!(analytics.new_subscriptions, 1);
        assert_eq!(analytics.cancelled_subscriptions, 2);
    }
}
