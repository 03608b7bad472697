//! Order (commande) status values and the role gate over status writes.
//!
//! Transitions are not sequenced: any status may follow any other. The only
//! rule is which target values a given role may write.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_PREPARING: &str = "preparing";
pub const STATUS_READY: &str = "ready";
pub const STATUS_DELIVERED: &str = "delivered";

/// All valid status values, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_PENDING,
    STATUS_PREPARING,
    STATUS_READY,
    STATUS_DELIVERED,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => STATUS_PENDING,
            OrderStatus::Preparing => STATUS_PREPARING,
            OrderStatus::Ready => STATUS_READY,
            OrderStatus::Delivered => STATUS_DELIVERED,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_PENDING => Ok(OrderStatus::Pending),
            STATUS_PREPARING => Ok(OrderStatus::Preparing),
            STATUS_READY => Ok(OrderStatus::Ready),
            STATUS_DELIVERED => Ok(OrderStatus::Delivered),
            other => Err(CoreError::Validation(format!(
                "Invalid status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

/// Status values each role is permitted to write.
///
/// | Role     | Allowed                  |
/// |----------|--------------------------|
/// | admin    | any                      |
/// | preparer | `ready`                  |
/// | receiver | `pending`, `delivered`   |
pub fn allowed_statuses(role: Role) -> &'static [OrderStatus] {
    match role {
        Role::Admin => &OrderStatus::ALL,
        Role::Preparer => &[OrderStatus::Ready],
        Role::Receiver => &[OrderStatus::Pending, OrderStatus::Delivered],
    }
}

/// Reject a status write the role is not permitted to perform.
pub fn ensure_status_allowed(role: Role, status: OrderStatus) -> Result<(), CoreError> {
    if allowed_statuses(role).contains(&status) {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Status '{status}' is not allowed for role '{role}'"
        )))
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn admin_may_write_every_status() {
        for status in OrderStatus::ALL {
            assert!(ensure_status_allowed(Role::Admin, status).is_ok());
        }
    }

    #[test]
    fn preparer_may_only_mark_ready() {
        assert!(ensure_status_allowed(Role::Preparer, OrderStatus::Ready).is_ok());
        for status in [
            OrderStatus::Pending,
            OrderStatus::Preparing,
            OrderStatus::Delivered,
        ] {
            assert_matches!(
                ensure_status_allowed(Role::Preparer, status),
                Err(CoreError::Forbidden(_))
            );
        }
    }

    #[test]
    fn receiver_may_write_pending_or_delivered() {
        assert!(ensure_status_allowed(Role::Receiver, OrderStatus::Pending).is_ok());
        assert!(ensure_status_allowed(Role::Receiver, OrderStatus::Delivered).is_ok());
        assert!(ensure_status_allowed(Role::Receiver, OrderStatus::Ready).is_err());
        assert!(ensure_status_allowed(Role::Receiver, OrderStatus::Preparing).is_err());
    }

    #[test]
    fn forbidden_message_names_status_and_role() {
        let err = ensure_status_allowed(Role::Preparer, OrderStatus::Pending).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("pending"));
        assert!(msg.contains("preparer"));
    }

    #[test]
    fn status_round_trips_through_str() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), status);
        }
        assert!("cancelled".parse::<OrderStatus>().is_err());
    }
}
