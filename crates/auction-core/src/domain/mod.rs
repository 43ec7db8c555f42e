//! Domain model (IDs, auction entity, errors).

pub mod auction;
pub mod errors;
pub mod ids;

pub use auction::{Auction, AuctionStatus, ProductCondition};
pub use errors::{AuctionError, ErrorKind};
pub use ids::AuctionId;
