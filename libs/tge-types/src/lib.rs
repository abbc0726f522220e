#![no_std]

mod airdrop;
mod cost;
mod error;
mod product;
mod sale;

pub use airdrop::*;
pub use cost::*;
pub use error::*;
pub use product::*;
pub use sale::*;

/// Largest supported ledger precision (matches an 18-decimal "ether" unit)
pub const MAX_DECIMALS: u32 = 18;

/// Denominator for every percent-based parameter (decay, bonus, discount)
pub const PERCENT_DENOMINATOR: i128 = 100;

pub const SECONDS_PER_HOUR: u64 = 3600;
pub const SECONDS_PER_DAY: u64 = 86400;

/// Upper bound on entries returned by paginated queries.
/// Keeps a single query well under the 100 read-entry limit.
pub const MAX_PAGE_SIZE: u32 = 50;
