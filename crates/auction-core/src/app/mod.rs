//! App - アプリケーション層
//!
//! ports を組み合わせて auction の自動クローズを実装します。
//!
//! # 主要コンポーネント
//! - **lifetime**: `AUCTION_DURATION_MINUTES` から有効期間を解決
//! - **ExpirationSweeper**: 期限切れ検索 + 1 件ずつクローズ（1 cycle）
//! - **ExpiryLoop**: 固定周期で cycle を回すバックグラウンドタスク
//! - **AuctionRepository**: store handle と ExpiryLoop の所有者

pub mod config;
pub mod expiration;
pub mod expiry_loop;
pub mod lifetime;
pub mod repository;

pub use self::config::ExpiryConfig;
pub use self::expiration::{CycleReport, ExpirationSweeper};
pub use self::expiry_loop::ExpiryLoop;
pub use self::lifetime::{AUCTION_DURATION_ENV, resolve_lifetime};
pub use self::repository::AuctionRepository;
