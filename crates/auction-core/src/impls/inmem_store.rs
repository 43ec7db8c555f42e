//! InMemoryAuctionStore - 開発用の document store
//!
//! # 実装詳細
//! - 行は `serde_json::Value` として保持（document store と同じく型なしで保存）
//! - tokio の Mutex で排他制御（foreground と expiration cycle が同時に触る）
//! - `_id` の重複 insert は DuplicateKey

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::ports::{AuctionDocument, AuctionFilter, AuctionMutation, AuctionStore, StoreError, UpdateSummary};

#[derive(Clone, Default)]
pub struct InMemoryAuctionStore {
    rows: Arc<Mutex<HashMap<String, Value>>>,
}

impl InMemoryAuctionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.lock().await.len()
    }
}

fn encode(doc: &AuctionDocument) -> Result<Value, StoreError> {
    serde_json::to_value(doc).map_err(|e| StoreError::Decode(e.to_string()))
}

fn decode(value: &Value) -> Result<AuctionDocument, StoreError> {
    AuctionDocument::deserialize(value).map_err(|e| StoreError::Decode(e.to_string()))
}

#[async_trait]
impl AuctionStore for InMemoryAuctionStore {
    async fn insert(&self, doc: AuctionDocument) -> Result<(), StoreError> {
        let value = encode(&doc)?;
        let mut rows = self.rows.lock().await;
        if rows.contains_key(&doc.id) {
            return Err(StoreError::DuplicateKey(doc.id));
        }
        rows.insert(doc.id, value);
        Ok(())
    }

    async fn find(&self, filter: &AuctionFilter) -> Result<Vec<AuctionDocument>, StoreError> {
        let rows = self.rows.lock().await;
        let mut found = Vec::new();
        for value in rows.values() {
            let doc = decode(value)?;
            if filter.matches(&doc) {
                found.push(doc);
            }
        }
        // HashMap の順序は不定なので id 順（= ULID なので作成順）に揃える
        found.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(found)
    }

    async fn find_one(
        &self,
        filter: &AuctionFilter,
    ) -> Result<Option<AuctionDocument>, StoreError> {
        if let Some(id) = &filter.id {
            let rows = self.rows.lock().await;
            return match rows.get(id) {
                Some(value) => {
                    let doc = decode(value)?;
                    Ok(filter.matches(&doc).then_some(doc))
                }
                None => Ok(None),
            };
        }
        Ok(self.find(filter).await?.into_iter().next())
    }

    async fn update(
        &self,
        filter: &AuctionFilter,
        mutation: AuctionMutation,
    ) -> Result<UpdateSummary, StoreError> {
        let mut rows = self.rows.lock().await;
        let mut summary = UpdateSummary::default();
        for value in rows.values_mut() {
            let mut doc = decode(value)?;
            if !filter.matches(&doc) {
                continue;
            }
            summary.matched += 1;
            if mutation.apply(&mut doc) {
                *value = encode(&doc)?;
                summary.modified += 1;
            }
        }
        Ok(summary)
    }
}
