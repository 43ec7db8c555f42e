//! Lifetime - how long an auction stays open.
//!
//! Resolution never fails: anything unusable falls back to the default
//! with a warning.

use chrono::TimeDelta;
use tracing::warn;

use crate::ports::ConfigSource;

/// Config key holding the lifetime in minutes.
pub const AUCTION_DURATION_ENV: &str = "AUCTION_DURATION_MINUTES";

pub const DEFAULT_AUCTION_DURATION_MINUTES: i64 = 60;

pub fn default_lifetime() -> TimeDelta {
    TimeDelta::minutes(DEFAULT_AUCTION_DURATION_MINUTES)
}

/// Effective auction lifetime from `AUCTION_DURATION_MINUTES`.
///
/// # 解決ルール
/// - 未設定 / 空文字: 60 分
/// - 正の整数: その分数
/// - それ以外（0, 負数, 数値でない, 桁あふれ）: warn を出して 60 分
pub fn resolve_lifetime(source: &dyn ConfigSource) -> TimeDelta {
    lifetime_from_value(source.get(AUCTION_DURATION_ENV).as_deref())
}

/// Same rules as [`resolve_lifetime`], applied to an already-read value.
pub fn lifetime_from_value(raw: Option<&str>) -> TimeDelta {
    let raw = match raw {
        None | Some("") => return default_lifetime(),
        Some(raw) => raw,
    };

    let parsed = raw
        .parse::<i64>()
        .ok()
        .filter(|minutes| *minutes > 0)
        .and_then(TimeDelta::try_minutes);

    match parsed {
        Some(lifetime) => lifetime,
        None => {
            warn!(
                value = raw,
                default_minutes = DEFAULT_AUCTION_DURATION_MINUTES,
                "Invalid {AUCTION_DURATION_ENV}, using default"
            );
            default_lifetime()
        }
    }
}
