use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::address::Address;
use crate::errors::OrderGraphError;

/// Shipping progress of a delivery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryStatus {
    Ready,
    Completed,
}

impl DeliveryStatus {
    /// Column value stored in `delivery.status`
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Ready => "READY",
            DeliveryStatus::Completed => "COMPLETED",
        }
    }
}

impl FromStr for DeliveryStatus {
    type Err = OrderGraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "READY" => Ok(DeliveryStatus::Ready),
            "COMPLETED" => Ok(DeliveryStatus::Completed),
            other => Err(OrderGraphError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Delivery owned 1:1 by an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delivery {
    /// Store-assigned identifier (`None` until persisted)
    pub id: Option<i64>,
    pub address: Address,
    pub status: DeliveryStatus,
}

impl Delivery {
    /// A fresh delivery to the given address, ready to ship
    pub fn ready(address: Address) -> Self {
        Self {
            id: None,
            address,
            status: DeliveryStatus::Ready,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == DeliveryStatus::Completed
    }
}
