//! IdGenerator port - ID 生成の抽象化
//!
//! # 実装
//! - **UlidGenerator**: ULID ベース（本番用）

use crate::domain::AuctionId;
use crate::ports::Clock;
use ulid::Ulid;

/// IdGenerator は store に渡す前の Auction ID を生成
///
/// # Thread Safety
/// - `Send + Sync` を要求（foreground の複数タスクから使える）
pub trait IdGenerator: Send + Sync {
    fn generate_auction_id(&self) -> AuctionId;
}

/// UlidGenerator は ULID ベースの ID 生成器
///
/// Clock を使って現在時刻ベースの ULID を生成します。
/// FixedClock を渡せば timestamp 部分が決定的になります。
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn generate_auction_id(&self) -> AuctionId {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        let ulid = Ulid::from_parts(timestamp_ms, rand::random());
        AuctionId::from(ulid)
    }
}
