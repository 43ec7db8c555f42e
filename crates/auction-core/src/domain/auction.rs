//! Auction entity.

use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use super::AuctionId;
use crate::ports::{Clock, IdGenerator};

/// Auction lifecycle status.
///
/// State transitions:
/// - Active -> Completed
///
/// There is no way back to Active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuctionStatus {
    /// Accepting bids.
    Active,

    /// Closed, either by expiry or by another writer.
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductCondition {
    New,
    Used,
    Refurbished,
}

/// An item for sale with a lifecycle status and a creation time.
///
/// `id` and `created_at` are fixed at construction; everything except
/// `status` is payload the expiration core never looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Auction {
    id: AuctionId,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    status: AuctionStatus,
    created_at: DateTime<Utc>,
}

impl Auction {
    /// Create a fresh, Active auction stamped with the clock's current time,
    /// truncated to whole seconds.
    pub fn new(
        ids: &dyn IdGenerator,
        clock: &dyn Clock,
        product_name: impl Into<String>,
        category: impl Into<String>,
        description: impl Into<String>,
        condition: ProductCondition,
    ) -> Self {
        Self {
            id: ids.generate_auction_id(),
            product_name: product_name.into(),
            category: category.into(),
            description: description.into(),
            condition,
            status: AuctionStatus::Active,
            // rows keep whole seconds
            created_at: clock.now().trunc_subsecs(0),
        }
    }

    /// Rebuild an auction from stored parts.
    pub fn from_parts(
        id: AuctionId,
        product_name: String,
        category: String,
        description: String,
        condition: ProductCondition,
        status: AuctionStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            product_name,
            category,
            description,
            condition,
            status,
            created_at,
        }
    }

    pub fn id(&self) -> AuctionId {
        self.id
    }

    pub fn status(&self) -> AuctionStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
