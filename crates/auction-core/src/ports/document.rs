//! Storage row for an auction.
//!
//! The store keeps creation time as Unix seconds, so anything compared
//! against a row's `timestamp` is compared at second granularity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::StoreError;
use crate::domain::{Auction, AuctionId, AuctionStatus, ProductCondition};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuctionDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub product_name: String,
    pub category: String,
    pub description: String,
    pub condition: ProductCondition,
    pub status: AuctionStatus,
    /// Creation time, Unix seconds.
    pub timestamp: i64,
}

impl From<&Auction> for AuctionDocument {
    fn from(auction: &Auction) -> Self {
        Self {
            id: auction.id().to_store_key(),
            product_name: auction.product_name.clone(),
            category: auction.category.clone(),
            description: auction.description.clone(),
            condition: auction.condition,
            status: auction.status(),
            timestamp: auction.created_at().timestamp(),
        }
    }
}

impl TryFrom<AuctionDocument> for Auction {
    type Error = StoreError;

    fn try_from(doc: AuctionDocument) -> Result<Self, Self::Error> {
        let id: AuctionId = doc
            .id
            .parse()
            .map_err(|e| StoreError::Decode(format!("_id {:?}: {e}", doc.id)))?;
        let created_at = DateTime::<Utc>::from_timestamp(doc.timestamp, 0)
            .ok_or_else(|| StoreError::Decode(format!("timestamp out of range: {}", doc.timestamp)))?;

        Ok(Auction::from_parts(
            id,
            doc.product_name,
            doc.category,
            doc.description,
            doc.condition,
            doc.status,
            created_at,
        ))
    }
}
