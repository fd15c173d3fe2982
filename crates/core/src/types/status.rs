//! Status enums for orders, payments, and newsletter subscribers.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
///
/// Orders are created `Pending` and only an admin actor moves them to a
/// terminal state. Terminal states never transition again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Whether a transition from `self` to `next` is allowed.
    ///
    /// The only legal transitions are `Pending -> Completed` and
    /// `Pending -> Cancelled`.
    #[must_use]
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed) | (Self::Pending, Self::Cancelled)
        )
    }

    /// Whether this status is terminal.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Completed => write!(f, "completed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Payment status recorded on an order.
///
/// Nothing in this codebase drives `Failed`; the simulated payment bridge
/// only ever reports success, but the contract leaves room for a real
/// processor integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Paid,
    Failed,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

impl std::str::FromStr for PaymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            _ => Err(format!("invalid payment status: {s}")),
        }
    }
}

/// Newsletter subscriber status.
///
/// Subscribers are upserted by email: unsubscribing flips the status,
/// re-subscribing flips it back, and no duplicate rows are ever created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubscriberStatus {
    #[default]
    Active,
    Unsubscribed,
}

impl std::fmt::Display for SubscriberStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Unsubscribed => write!(f, "unsubscribed"),
        }
    }
}

impl std::str::FromStr for SubscriberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "unsubscribed" => Ok(Self::Unsubscribed),
            _ => Err(format!("invalid subscriber status: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_allowed_transitions() {
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::Pending.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_order_status_terminal_states_are_final() {
        for terminal in [OrderStatus::Completed, OrderStatus::Cancelled] {
            assert!(terminal.is_terminal());
            for next in [
                OrderStatus::Pending,
                OrderStatus::Completed,
                OrderStatus::Cancelled,
            ] {
                assert!(!terminal.can_transition_to(next));
            }
        }
    }

    #[test]
    fn test_order_status_no_self_transition() {
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Pending));
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Completed,
            OrderStatus::Cancelled,
        ] {
            let parsed: OrderStatus = status.to_string().parse().expect("round trip");
            assert_eq!(parsed, status);
        }

        for status in [
            PaymentStatus::Pending,
            PaymentStatus::Paid,
            PaymentStatus::Failed,
        ] {
            let parsed: PaymentStatus = status.to_string().parse().expect("round trip");
            assert_eq!(parsed, status);
        }

        for status in [SubscriberStatus::Active, SubscriberStatus::Unsubscribed] {
            let parsed: SubscriberStatus = status.to_string().parse().expect("round trip");
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_invalid_status_strings_rejected() {
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!("refunded".parse::<PaymentStatus>().is_err());
        assert!("paused".parse::<SubscriberStatus>().is_err());
    }
}
