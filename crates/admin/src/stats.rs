//! Rollup calculations over fetched orders.
//!
//! Pure functions so the dashboard math is testable without a database.

use rust_decimal::Decimal;

use voltlane_core::OrderStatus;

use crate::db::AdminOrder;

/// Per-status order counts for the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct OrderCounts {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
    pub cancelled: usize,
}

/// Total revenue: the sum of `total_amount` over non-cancelled orders.
#[must_use]
pub fn revenue(orders: &[AdminOrder]) -> Decimal {
    orders
        .iter()
        .filter(|o| o.status != OrderStatus::Cancelled)
        .map(|o| o.total_amount)
        .sum()
}

/// Count orders per status.
#[must_use]
pub fn order_counts(orders: &[AdminOrder]) -> OrderCounts {
    let mut counts = OrderCounts {
        total: orders.len(),
        ..OrderCounts::default()
    };

    for order in orders {
        match order.status {
            OrderStatus::Pending => counts.pending += 1,
            OrderStatus::Completed => counts.completed += 1,
            OrderStatus::Cancelled => counts.cancelled += 1,
        }
    }

    counts
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;
    use voltlane_core::PaymentStatus;

    use super::*;

    fn order(total: i64, status: OrderStatus) -> AdminOrder {
        AdminOrder {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            email: "shopper@example.com".to_string(),
            full_name: "Pat Shopper".to_string(),
            total_amount: Decimal::new(total, 0),
            status,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_revenue_excludes_cancelled() {
        let orders = vec![
            order(100, OrderStatus::Completed),
            order(50, OrderStatus::Pending),
            order(999, OrderStatus::Cancelled),
        ];

        assert_eq!(revenue(&orders), Decimal::new(150, 0));
    }

    #[test]
    fn test_revenue_empty_is_zero() {
        assert_eq!(revenue(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_order_counts() {
        let orders = vec![
            order(10, OrderStatus::Pending),
            order(20, OrderStatus::Pending),
            order(30, OrderStatus::Completed),
            order(40, OrderStatus::Cancelled),
        ];

        let counts = order_counts(&orders);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.pending, 2);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.cancelled, 1);
    }

    #[test]
    fn test_order_counts_empty() {
        assert_eq!(order_counts(&[]), OrderCounts::default());
    }
}
