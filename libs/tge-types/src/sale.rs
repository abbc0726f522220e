use soroban_sdk::{contracttype, Address};

/// Construction parameters for a crowdsale
#[contracttype]
#[derive(Clone, Debug)]
pub struct SaleParams {
    /// Token pool the sale draws from (the sale must be one of its trustees)
    pub pool: Address,
    /// Optional participant restrictions (the sale must be one of its managers)
    pub restrictions: Option<Address>,
    /// Token contributions are paid in
    pub payment_token: Address,
    /// Receives every contribution
    pub beneficiary: Address,
    /// Ledger timestamp the sale opens at; 0 means "now"
    pub start_time: u64,
    pub duration_hours: u64,
    /// Funding goal in payment base units (informational, no refund path)
    pub min_cap: i128,
    /// Whole tokens per whole unit of value
    pub rate: i128,
    /// Hard cap in payment base units; 0 means uncapped
    pub max_cap: i128,
    /// Payment base units per whole unit of value
    pub value_unit: i128,
}

/// Sale configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct SaleConfig {
    pub owner: Address,
    pub pool: Address,
    pub token: Address,
    pub restrictions: Option<Address>,
    pub payment_token: Address,
    pub beneficiary: Address,
    pub start_time: u64,
    pub end_time: u64,
    pub min_cap: i128,
    pub rate: i128,
    pub max_cap: i128,
    pub value_unit: i128,
}

/// Lifecycle phase, derived from the ledger timestamp and the raised total
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum SaleState {
    BeforeStart = 0,
    Open = 1,
    Closed = 2,
}
