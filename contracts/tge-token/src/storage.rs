use soroban_sdk::{contracttype, Address, Env, String};
use tge_types::Error;

// ============================================================================
// SOROBAN RESOURCE LIMITS - Storage layout for the ledger:
// ============================================================================
// - Metadata, supply and the lock flag live in Instance storage (one entry,
//   loaded with the contract on every call)
// - Every balance, exemption, minter flag and allowance is its own
//   Persistent entry (~60 bytes) so no single entry grows with holders
// - Role entries are removed when revoked instead of stored as `false`
// ============================================================================

/// Storage keys for the ledger contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Token metadata and owner (Instance storage)
    Info,
    /// Total supply in ledger units (Instance storage)
    TotalSupply,
    /// Global transfer lock (Instance storage)
    Locked,
    /// Holder -> balance (Persistent storage)
    Balance(Address),
    /// Address exempt from the lock (Persistent storage)
    TransferAllowed(Address),
    /// Address allowed to issue new supply (Persistent storage)
    Minter(Address),
    /// (owner, spender) -> delegated amount (Persistent storage)
    Allowance(Address, Address),
}

/// Metadata fixed at initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct TokenInfo {
    pub owner: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u32,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280; // ~1 day
const INSTANCE_TTL_EXTEND: u32 = 518400; // ~30 days
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

/// Extend instance storage TTL
pub fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

/// Extend persistent storage TTL for a key
pub fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

// === Info ===

pub fn has_info(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::Info)
}

pub fn get_info(env: &Env) -> Result<TokenInfo, Error> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Info)
        .ok_or(Error::NotInitialized)
}

pub fn set_info(env: &Env, info: &TokenInfo) {
    env.storage().instance().set(&DataKey::Info, info);
    extend_instance_ttl(env);
}

// === Supply and lock ===

pub fn get_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

pub fn set_total_supply(env: &Env, supply: i128) {
    env.storage().instance().set(&DataKey::TotalSupply, &supply);
}

pub fn is_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&DataKey::Locked)
        .unwrap_or(false)
}

pub fn set_locked(env: &Env, locked: bool) {
    env.storage().instance().set(&DataKey::Locked, &locked);
}

// === Balances ===

pub fn get_balance(env: &Env, holder: &Address) -> i128 {
    let key = DataKey::Balance(holder.clone());
    match env.storage().persistent().get::<_, i128>(&key) {
        Some(balance) => {
            extend_persistent_ttl(env, &key);
            balance
        }
        None => 0,
    }
}

pub fn set_balance(env: &Env, holder: &Address, balance: i128) {
    let key = DataKey::Balance(holder.clone());
    if balance == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &balance);
        extend_persistent_ttl(env, &key);
    }
}

// === Role flags ===

fn get_flag(env: &Env, key: &DataKey) -> bool {
    env.storage().persistent().has(key)
}

fn set_flag(env: &Env, key: &DataKey, value: bool) {
    if value {
        env.storage().persistent().set(key, &true);
        extend_persistent_ttl(env, key);
    } else {
        env.storage().persistent().remove(key);
    }
}

pub fn is_transfer_allowed(env: &Env, address: &Address) -> bool {
    get_flag(env, &DataKey::TransferAllowed(address.clone()))
}

pub fn set_transfer_allowed(env: &Env, address: &Address, allowed: bool) {
    set_flag(env, &DataKey::TransferAllowed(address.clone()), allowed);
}

pub fn is_minter(env: &Env, address: &Address) -> bool {
    get_flag(env, &DataKey::Minter(address.clone()))
}

pub fn set_minter(env: &Env, address: &Address, allowed: bool) {
    set_flag(env, &DataKey::Minter(address.clone()), allowed);
}

// === Allowances ===

pub fn get_allowance(env: &Env, from: &Address, spender: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Allowance(from.clone(), spender.clone()))
        .unwrap_or(0)
}

pub fn set_allowance(env: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = DataKey::Allowance(from.clone(), spender.clone());
    if amount == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &amount);
        extend_persistent_ttl(env, &key);
    }
}
