use soroban_sdk::{contracttype, Address, String};

/// Construction parameters for a tiered airdrop campaign
#[contracttype]
#[derive(Clone, Debug)]
pub struct AirdropParams {
    /// Ledger the campaign mints on (the campaign must be a minter)
    pub token: Address,
    pub label: String,
    /// Whole tokens granted per claim in the first tier
    pub tier_amount: i128,
    /// Claims served by each tier
    pub tier_capacity: u32,
    pub tier_count: u32,
    /// Percent removed from the amount at each decay step
    pub decay_factor: u32,
    /// Number of tiers after the first that apply a decay step
    pub decay_steps: u32,
    /// Maximum successful claims over the campaign lifetime; 0 = tiers only
    pub total_cap: u32,
    /// One claim per address
    pub per_address_limit: bool,
}

/// One slice of the distribution schedule
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Tier {
    /// Whole tokens granted per claim
    pub amount: i128,
    pub capacity: u32,
    pub claimed: u32,
}

impl Tier {
    pub fn new(amount: i128, capacity: u32) -> Self {
        Self {
            amount,
            capacity,
            claimed: 0,
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.claimed >= self.capacity
    }
}

/// Campaign configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct AirdropConfig {
    pub owner: Address,
    pub token: Address,
    pub label: String,
    pub tier_count: u32,
    pub total_cap: u32,
    pub per_address_limit: bool,
}
