//! Domain identifiers (strongly-typed IDs).
//!
//! Auctions are keyed by a ULID. The store sees the bare ULID string,
//! `Display` adds the `auction-` prefix for logs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Identifier of an Auction.
///
/// Immutable once assigned; `Copy` because it is only 16 bytes.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AuctionId(Ulid);

impl AuctionId {
    pub const PREFIX: &'static str = "auction-";

    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }

    pub fn as_ulid(&self) -> Ulid {
        self.0
    }

    /// Key used by the store (`_id` column). No prefix.
    pub fn to_store_key(&self) -> String {
        self.0.to_string()
    }
}

impl From<Ulid> for AuctionId {
    fn from(ulid: Ulid) -> Self {
        Self::from_ulid(ulid)
    }
}

impl fmt::Display for AuctionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", Self::PREFIX, self.0)
    }
}

/// Accepts both the store key and the prefixed display form.
impl FromStr for AuctionId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.strip_prefix(Self::PREFIX).unwrap_or(s);
        Ulid::from_string(raw).map(Self)
    }
}
