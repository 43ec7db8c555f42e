//! FaultyStore - 失敗注入用のテストラッパー

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::InMemoryAuctionStore;
use crate::domain::AuctionId;
use crate::ports::{AuctionDocument, AuctionFilter, AuctionMutation, AuctionStore, StoreError, UpdateSummary};

/// Delegates to an in-memory store, failing on demand.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: InMemoryAuctionStore,
    fail_find: AtomicBool,
    fail_update_for: Mutex<HashSet<String>>,
    stall: Mutex<Option<Duration>>,
    update_attempts: AtomicUsize,
    find_calls: AtomicUsize,
}

impl FaultyStore {
    pub fn new(inner: InMemoryAuctionStore) -> Self {
        Self {
            inner,
            ..Self::default()
        }
    }

    pub fn fail_find(&self, on: bool) {
        self.fail_find.store(on, Ordering::SeqCst);
    }

    pub fn fail_update_for(&self, id: AuctionId) {
        self.fail_update_for.lock().unwrap().insert(id.to_store_key());
    }

    /// Every call sleeps this long before doing anything.
    pub fn stall(&self, delay: Duration) {
        *self.stall.lock().unwrap() = Some(delay);
    }

    pub fn update_attempts(&self) -> usize {
        self.update_attempts.load(Ordering::SeqCst)
    }

    pub fn find_calls(&self) -> usize {
        self.find_calls.load(Ordering::SeqCst)
    }

    async fn maybe_stall(&self) {
        let delay = *self.stall.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl AuctionStore for FaultyStore {
    async fn insert(&self, doc: AuctionDocument) -> Result<(), StoreError> {
        self.maybe_stall().await;
        self.inner.insert(doc).await
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<AuctionDocument>, StoreError> {
        self.find_calls.fetch_add(1, Ordering::SeqCst);
        self.maybe_stall().await;
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(StoreError::Query("find error".into()));
        }
        self.inner.find(filter).await
    }

    async fn find_one(
        &self,
        filter: &AuctionFilter,
    ) -> Result<Option<AuctionDocument>, StoreError> {
        self.maybe_stall().await;
        if self.fail_find.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("connection error".into()));
        }
        self.inner.find_one(filter).await
    }

    async fn update(
        &self,
        filter: &AuctionFilter,
        mutation: AuctionMutation,
    ) -> Result<UpdateSummary, StoreError> {
        self.update_attempts.fetch_add(1, Ordering::SeqCst);
        self.maybe_stall().await;
        let failing = filter
            .id
            .as_ref()
            .is_some_and(|id| self.fail_update_for.lock().unwrap().contains(id));
        if failing {
            return Err(StoreError::Unavailable("update error".into()));
        }
        self.inner.update(filter, mutation).await
    }
}
