//! Impls - ports の実装（開発用・テスト用）
//!
//! # 含まれる実装
//! - **InMemoryAuctionStore**: 開発用の document store
//!
//! 本番用の store 実装は別クレートに置く想定です。

pub mod inmem_store;

#[cfg(test)]
pub(crate) mod faulty_store;

pub use self::inmem_store::InMemoryAuctionStore;
