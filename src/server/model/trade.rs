//! Escrow trade models and TradeSafe state progression.

use chrono::{DateTime, Utc};

/// TradeSafe transaction state as reported by the API and webhooks.
///
/// States are ranked by how far the escrow has progressed so late or replayed
/// notifications can be recognised. `Unknown` keeps states this service does not
/// act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TradeState {
    Created,
    Pending,
    FundsDeposited,
    FundsReceived,
    Initiated,
    Sent,
    Delivered,
    FundsReleased,
    Completed,
    Cancelled,
    Declined,
    Unknown(String),
}

impl TradeState {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Self::Created,
            "PENDING" => Self::Pending,
            "FUNDS_DEPOSITED" => Self::FundsDeposited,
            "FUNDS_RECEIVED" => Self::FundsReceived,
            "INITIATED" => Self::Initiated,
            "SENT" => Self::Sent,
            "DELIVERED" => Self::Delivered,
            "FUNDS_RELEASED" => Self::FundsReleased,
            "COMPLETED" => Self::Completed,
            "CANCELLED" => Self::Cancelled,
            "DECLINED" => Self::Declined,
            other => Self::Unknown(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "CREATED",
            Self::Pending => "PENDING",
            Self::FundsDeposited => "FUNDS_DEPOSITED",
            Self::FundsReceived => "FUNDS_RECEIVED",
            Self::Initiated => "INITIATED",
            Self::Sent => "SENT",
            Self::Delivered => "DELIVERED",
            Self::FundsReleased => "FUNDS_RELEASED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
            Self::Declined => "DECLINED",
            Self::Unknown(value) => value,
        }
    }

    /// Position in the escrow lifecycle; `None` for unknown states.
    pub fn rank(&self) -> Option<u8> {
        let rank = match self {
            Self::Created => 0,
            Self::Pending => 1,
            Self::FundsDeposited => 2,
            Self::FundsReceived => 3,
            Self::Initiated => 4,
            Self::Sent => 5,
            Self::Delivered => 6,
            Self::FundsReleased => 7,
            Self::Completed | Self::Cancelled | Self::Declined => 8,
            Self::Unknown(_) => return None,
        };
        Some(rank)
    }

    /// No further notifications are acted on once a trade reaches these states.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled | Self::Declined)
    }

    /// Whether moving from `self` to `next` is forward progress.
    ///
    /// Duplicates, stale states, anything after a terminal state and unknown states
    /// are not.
    pub fn advances_to(&self, next: &TradeState) -> bool {
        if self.is_terminal() {
            return false;
        }
        match (self.rank(), next.rank()) {
            (Some(current), Some(next)) => next > current,
            (None, Some(_)) => true,
            (_, None) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: i32,
    pub order_id: i32,
    pub transaction_id: String,
    pub allocation_id: Option<String>,
    pub state: TradeState,
    pub amount_cents: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Trade {
    pub fn from_entity(entity: entity::trade::Model) -> Self {
        Self {
            id: entity.id,
            order_id: entity.order_id,
            transaction_id: entity.transaction_id,
            allocation_id: entity.allocation_id,
            state: TradeState::parse(&entity.state),
            amount_cents: entity.amount_cents,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        }
    }
}

/// Parameters for recording a newly opened escrow transaction.
#[derive(Debug, Clone)]
pub struct CreateTradeParam {
    pub order_id: i32,
    pub transaction_id: String,
    pub allocation_id: Option<String>,
    pub amount_cents: i64,
}
