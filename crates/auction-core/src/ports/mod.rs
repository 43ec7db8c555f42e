//! Ports - 抽象化レイヤー
//!
//! 外部システム（document store, 時計, 環境変数）へのインターフェース。

pub mod auction_store;
pub mod clock;
pub mod config_source;
pub mod document;
pub mod id_generator;

pub use self::auction_store::{AuctionFilter, AuctionMutation, AuctionStore, StoreError, UpdateSummary};
pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::config_source::{ConfigSource, ProcessEnv, StaticConfig};
pub use self::document::AuctionDocument;
pub use self::id_generator::{IdGenerator, UlidGenerator};
