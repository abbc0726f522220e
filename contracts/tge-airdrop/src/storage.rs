use soroban_sdk::{contracttype, Address, Env};
use tge_types::{AirdropConfig, Error, Tier};

// ============================================================================
// SOROBAN RESOURCE LIMITS - Tier schedule layout:
// ============================================================================
// - Write entries per tx: 50 entries
// - Every tier is its own Persistent entry written once at initialization,
//   so the schedule length is bounded by the write limit
// - A claim touches one tier entry and one claimed flag, never the schedule
// ============================================================================

/// Maximum number of tiers a campaign may define.
/// Leaves room under the 50 write entry limit for config and counters.
pub const MAX_TIERS: u32 = 40;

/// Storage keys for the airdrop contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Campaign configuration (Instance storage)
    Config,
    /// Index of the tier serving claims (Instance storage)
    Cursor,
    /// Successful claims so far (Instance storage)
    TotalClaims,
    /// Ledger units minted so far (Instance storage)
    TotalMinted,
    /// Tier data: index -> Tier (Persistent storage)
    Tier(u32),
    /// Address that already claimed (Persistent storage)
    Claimed(Address),
}

const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Config ===

pub fn has_config(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Config)
}

pub fn get_config(env: &Env) -> Result<AirdropConfig, Error> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &AirdropConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Counters ===

pub fn get_cursor(env: &Env) -> u32 {
    env.storage().instance().get(&DataKey::Cursor).unwrap_or(0)
}

pub fn set_cursor(env: &Env, cursor: u32) {
    env.storage().instance().set(&DataKey::Cursor, &cursor);
}

pub fn get_total_claims(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::TotalClaims)
        .unwrap_or(0)
}

pub fn set_total_claims(env: &Env, claims: u32) {
    env.storage().instance().set(&DataKey::TotalClaims, &claims);
}

pub fn get_total_minted(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalMinted)
        .unwrap_or(0)
}

pub fn set_total_minted(env: &Env, minted: i128) {
    env.storage().instance().set(&DataKey::TotalMinted, &minted);
}

// === Tiers ===

pub fn get_tier(env: &Env, index: u32) -> Option<Tier> {
    let key = DataKey::Tier(index);
    let tier = env.storage().persistent().get(&key);
    if tier.is_some() {
        extend_persistent_ttl(env, &key);
    }
    tier
}

pub fn set_tier(env: &Env, index: u32, tier: &Tier) {
    let key = DataKey::Tier(index);
    env.storage().persistent().set(&key, tier);
    extend_persistent_ttl(env, &key);
}

// === Claims ===

pub fn has_claimed(env: &Env, claimer: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Claimed(claimer.clone()))
}

pub fn set_claimed(env: &Env, claimer: &Address) {
    let key = DataKey::Claimed(claimer.clone());
    env.storage().persistent().set(&key, &true);
    extend_persistent_ttl(env, &key);
}
