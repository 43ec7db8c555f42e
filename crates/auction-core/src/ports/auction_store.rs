//! AuctionStore port - document store holding auction rows
//!
//! The expiration cycle and the foreground create/read paths share one
//! store handle. Implementations must be safe to call concurrently.
//!
//! # 実装
//! - `impls::InMemoryAuctionStore`: 開発・テスト用

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use super::AuctionDocument;
use crate::domain::{AuctionId, AuctionStatus};

/// StoreError は store 層の失敗
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    #[error("cannot decode row: {0}")]
    Decode(String),

    #[error("store call timed out after {0:?}")]
    Timeout(Duration),
}

/// Conjunction of optional predicates over a row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuctionFilter {
    pub id: Option<String>,
    pub status: Option<AuctionStatus>,
    /// `timestamp <= created_at_or_before` (Unix seconds).
    pub created_at_or_before: Option<i64>,
}

impl AuctionFilter {
    pub fn by_id(id: AuctionId) -> Self {
        Self {
            id: Some(id.to_store_key()),
            ..Self::default()
        }
    }

    /// Open auctions created at or before `cutoff`.
    pub fn expired_open(cutoff: DateTime<Utc>) -> Self {
        Self {
            status: Some(AuctionStatus::Active),
            created_at_or_before: Some(cutoff.timestamp()),
            ..Self::default()
        }
    }

    pub fn matches(&self, doc: &AuctionDocument) -> bool {
        self.id.as_ref().is_none_or(|id| *id == doc.id)
            && self.status.is_none_or(|status| status == doc.status)
            && self
                .created_at_or_before
                .is_none_or(|cutoff| doc.timestamp <= cutoff)
    }
}

/// Field writes applied by `update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuctionMutation {
    SetStatus(AuctionStatus),
}

impl AuctionMutation {
    /// Apply to a row. Returns whether anything changed.
    pub fn apply(&self, doc: &mut AuctionDocument) -> bool {
        match *self {
            AuctionMutation::SetStatus(status) => {
                let changed = doc.status != status;
                doc.status = status;
                changed
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateSummary {
    pub matched: u64,
    pub modified: u64,
}

/// AuctionStore は auction 行の CRUD
///
/// # 設計原則
/// - `find_one` は「存在しない」を `Ok(None)` で返す（エラーとは区別）
/// - `update` は一致した全行に mutation を適用し、同じ値の書き込みは成功扱い
/// - 1 行の update は store から見て atomic
#[async_trait]
pub trait AuctionStore: Send + Sync {
    async fn insert(&self, doc: AuctionDocument) -> Result<(), StoreError>;

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<AuctionDocument>, StoreError>;

    async fn find_one(&self, filter: &AuctionFilter)
    -> Result<Option<AuctionDocument>, StoreError>;

    async fn update(
        &self,
        filter: &AuctionFilter,
        mutation: AuctionMutation,
    ) -> Result<UpdateSummary, StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ProductCondition;
    use chrono::TimeZone;
    use ulid::Ulid;

    fn doc(status: AuctionStatus, timestamp: i64) -> AuctionDocument {
        AuctionDocument {
            id: Ulid::new().to_string(),
            product_name: "p".into(),
            category: "c".into(),
            description: "d".into(),
            condition: ProductCondition::New,
            status,
            timestamp,
        }
    }

    #[test]
    fn expired_open_filter_is_inclusive_at_cutoff() {
        let cutoff = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let filter = AuctionFilter::expired_open(cutoff);
        let ts = cutoff.timestamp();

        assert!(filter.matches(&doc(AuctionStatus::Active, ts)));
        assert!(filter.matches(&doc(AuctionStatus::Active, ts - 1)));
        assert!(!filter.matches(&doc(AuctionStatus::Active, ts + 1)));
        assert!(!filter.matches(&doc(AuctionStatus::Completed, ts - 1)));
    }

    #[test]
    fn by_id_filter_matches_only_that_row() {
        let row = doc(AuctionStatus::Active, 0);
        let id: AuctionId = row.id.parse().unwrap();

        assert!(AuctionFilter::by_id(id).matches(&row));
        assert!(!AuctionFilter::by_id(AuctionId::from_ulid(Ulid::new())).matches(&row));
    }

    #[test]
    fn set_status_reports_change_once() {
        let mut row = doc(AuctionStatus::Active, 0);
        let mutation = AuctionMutation::SetStatus(AuctionStatus::Completed);

        assert!(mutation.apply(&mut row));
        assert!(!mutation.apply(&mut row));
        assert_eq!(row.status, AuctionStatus::Completed);
    }
}
