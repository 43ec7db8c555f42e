//! AuctionRepository - store handle + expiry loop
//!
//! Constructing a repository starts its expiry loop; the loop shares the
//! store handle with the foreground create / lookup calls but never their
//! locks.

use std::sync::Arc;
use std::time::Duration;

use tracing::error;

use super::config::bounded;
use super::{CycleReport, ExpirationSweeper, ExpiryConfig, ExpiryLoop};
use crate::domain::{Auction, AuctionError, AuctionId};
use crate::ports::{AuctionDocument, AuctionFilter, AuctionStore, Clock, ConfigSource};

pub struct AuctionRepository {
    store: Arc<dyn AuctionStore>,
    sweeper: Arc<ExpirationSweeper>,
    expiry: ExpiryLoop,
    store_timeout: Duration,
}

impl AuctionRepository {
    /// Build the repository and spawn its expiry loop.
    ///
    /// Must be called from inside a tokio runtime.
    pub fn new(
        store: Arc<dyn AuctionStore>,
        clock: Arc<dyn Clock>,
        config_source: Arc<dyn ConfigSource>,
        config: ExpiryConfig,
    ) -> Self {
        let sweeper = Arc::new(ExpirationSweeper::new(
            Arc::clone(&store),
            clock,
            config_source,
            &config,
        ));
        let expiry = ExpiryLoop::spawn(Arc::clone(&sweeper), config.check_interval);

        Self {
            store,
            sweeper,
            expiry,
            store_timeout: config.store_timeout,
        }
    }

    pub async fn create_auction(&self, auction: &Auction) -> Result<(), AuctionError> {
        let doc = AuctionDocument::from(auction);
        if let Err(e) = bounded(self.store_timeout, self.store.insert(doc)).await {
            error!(auction_id = %auction.id(), error = %e, "Error trying to insert auction");
            return Err(AuctionError::internal("Error trying to insert auction"));
        }
        Ok(())
    }

    pub async fn get_auction_by_id(&self, id: AuctionId) -> Result<Auction, AuctionError> {
        let found = bounded(self.store_timeout, self.store.find_one(&AuctionFilter::by_id(id)))
            .await
            .and_then(|row| row.map(Auction::try_from).transpose());

        match found {
            Ok(Some(auction)) => Ok(auction),
            Ok(None) => Err(AuctionError::not_found("Auction not found")),
            Err(e) => {
                error!(auction_id = %id, error = %e, "Error finding auction");
                Err(AuctionError::internal("Error finding auction"))
            }
        }
    }

    /// Run one expiration cycle now, serialized with the background loop.
    pub async fn run_expiration_cycle(&self) -> CycleReport {
        self.sweeper.run_cycle().await
    }

    /// Stop the expiry loop after its in-flight cycle.
    pub async fn shutdown(self) {
        self.expiry.shutdown_and_join().await;
    }
}
