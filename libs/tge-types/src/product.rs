use soroban_sdk::{contracttype, Address, String, Vec};

/// Construction parameters for a vendor catalog
#[contracttype]
#[derive(Clone, Debug)]
pub struct VendorParams {
    pub name: String,
    /// Ledger the products sell; the vendor contract holds the allocation
    pub token: Address,
    pub payment_token: Address,
    pub beneficiary: Address,
}

/// Vendor configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct VendorConfig {
    pub owner: Address,
    pub name: String,
    pub token: Address,
    pub payment_token: Address,
    pub beneficiary: Address,
}

/// Extra tokens granted while the ledger timestamp is at or before `ends_at`
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BonusTier {
    pub ends_at: u64,
    pub percent: u32,
}

/// Parameters accepted by `create_product`
#[contracttype]
#[derive(Clone, Debug)]
pub struct ProductParams {
    pub name: String,
    /// Whole tokens the product may sell
    pub total_tokens: i128,
    /// Payment base units per whole token; 0 makes a free product
    pub price: i128,
    /// Whole tokens granted per purchase of a free product
    pub free_amount: i128,
    /// 0 means "now"
    pub start_time: u64,
    pub duration_hours: u64,
    pub bonus_enabled: bool,
    /// Ordered by `ends_at`
    pub bonus_tiers: Vec<BonusTier>,
    pub single_purchase: bool,
}

/// A registered product - one independent bounded sale
#[contracttype]
#[derive(Clone, Debug)]
pub struct Product {
    pub name: String,
    /// Allocation in ledger units
    pub total_tokens: i128,
    pub price: i128,
    pub free_amount: i128,
    pub start_time: u64,
    pub end_time: u64,
    pub bonus_enabled: bool,
    pub bonus_tiers: Vec<BonusTier>,
    pub single_purchase: bool,
    pub active: bool,
}
