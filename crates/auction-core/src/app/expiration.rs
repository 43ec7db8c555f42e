//! ExpirationSweeper - scan for expired open auctions and close them.
//!
//! # フロー（1 cycle）
//! 1. cycle lock を取得（同じ sweeper の cycle は直列）
//! 2. cutoff = now - lifetime（lifetime は毎回読み直す）
//! 3. `status == Active && timestamp <= cutoff` で検索
//! 4. 候補ごとに `status = Completed` を書き込む（1 件の失敗で止めない）
//!
//! Errors never leave a cycle. A candidate that failed to close still
//! matches the filter and is retried by the next cycle.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::ExpiryConfig;
use super::config::bounded;
use super::lifetime::resolve_lifetime;
use crate::domain::{Auction, AuctionId, AuctionStatus};
use crate::ports::{AuctionFilter, AuctionMutation, AuctionStore, Clock, ConfigSource, StoreError};

/// Outcome of one cycle, for tests and debug logs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    pub candidates: usize,
    pub closed: usize,
    pub failed: usize,
    pub scan_failed: bool,
}

pub struct ExpirationSweeper {
    store: Arc<dyn AuctionStore>,
    clock: Arc<dyn Clock>,
    config_source: Arc<dyn ConfigSource>,
    store_timeout: Duration,
    /// Held for exactly one cycle. Foreground paths never take it.
    cycle_lock: Mutex<()>,
}

impl ExpirationSweeper {
    pub fn new(
        store: Arc<dyn AuctionStore>,
        clock: Arc<dyn Clock>,
        config_source: Arc<dyn ConfigSource>,
        config: &ExpiryConfig,
    ) -> Self {
        Self {
            store,
            clock,
            config_source,
            store_timeout: config.store_timeout,
            cycle_lock: Mutex::new(()),
        }
    }

    /// `now - lifetime`, saturating at the earliest representable time.
    pub fn cutoff(&self) -> DateTime<Utc> {
        let lifetime = resolve_lifetime(&*self.config_source);
        self.clock
            .now()
            .checked_sub_signed(lifetime)
            .unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// Open auctions created at or before `cutoff`.
    ///
    /// Rows that cannot be turned back into an `Auction` are logged and
    /// skipped so one bad row does not stall every other expiry.
    pub async fn find_expired_open_auctions(
        &self,
        cutoff: DateTime<Utc>,
    ) -> Result<Vec<Auction>, StoreError> {
        let filter = AuctionFilter::expired_open(cutoff);
        let rows = bounded(self.store_timeout, self.store.find(&filter)).await?;

        let mut expired = Vec::with_capacity(rows.len());
        for row in rows {
            let row_id = row.id.clone();
            match Auction::try_from(row) {
                Ok(auction) => expired.push(auction),
                Err(e) => error!(row_id = %row_id, error = %e, "Error decoding expired auction"),
            }
        }
        Ok(expired)
    }

    /// Set one auction to Completed. Already-completed is a no-op success.
    pub async fn close_auction(&self, id: AuctionId) -> Result<(), StoreError> {
        let mutation = AuctionMutation::SetStatus(AuctionStatus::Completed);
        bounded(self.store_timeout, self.store.update(&AuctionFilter::by_id(id), mutation))
            .await
            .map(|_| ())
    }

    /// Run exactly one scan-and-close cycle.
    pub async fn run_cycle(&self) -> CycleReport {
        let _guard = self.cycle_lock.lock().await;
        let mut report = CycleReport::default();

        let cutoff = self.cutoff();
        let candidates = match self.find_expired_open_auctions(cutoff).await {
            Ok(candidates) => candidates,
            Err(e) => {
                error!(error = %e, %cutoff, "Error finding expired auctions");
                report.scan_failed = true;
                return report;
            }
        };
        report.candidates = candidates.len();

        for auction in &candidates {
            let auction_id = auction.id();
            match self.close_auction(auction_id).await {
                Ok(()) => {
                    info!(%auction_id, "Auction closed automatically");
                    report.closed += 1;
                }
                Err(e) => {
                    error!(%auction_id, error = %e, "Error closing auction");
                    report.failed += 1;
                }
            }
        }

        debug!(
            %cutoff,
            candidates = report.candidates,
            closed = report.closed,
            failed = report.failed,
            "expiration cycle finished"
        );
        report
    }
}
