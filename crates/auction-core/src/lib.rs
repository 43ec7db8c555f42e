//! auction-core
//!
//! Automatic auction expiration on top of a document store.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（AuctionId, Auction, AuctionStatus, errors）
//! - **ports**: 抽象化レイヤー（AuctionStore, Clock, ConfigSource, IdGenerator）
//! - **app**: アプリケーションロジック（lifetime, ExpirationSweeper, ExpiryLoop, AuctionRepository）
//! - **impls**: 実装（InMemoryAuctionStore など開発用）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
