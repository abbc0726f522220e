use soroban_sdk::{contracttype, Address, Env};
use tge_types::{Error, SaleConfig};

/// Storage keys for the sale contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Sale configuration (Instance storage)
    Config,
    /// Total value raised, payment base units (Instance storage)
    Raised,
    /// Distinct investors (Instance storage)
    InvestorCount,
    /// Value contributed by an investor (Persistent storage)
    Invested(Address),
    /// Tokens released to an investor (Persistent storage)
    TokensBought(Address),
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

pub fn get_config(env: &Env) -> Result<SaleConfig, Error> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Totals ===

pub fn get_raised(env: &Env) -> i128 {
    env.storage().instance().get(&DataKey::Raised).unwrap_or(0)
}

pub fn set_raised(env: &Env, raised: i128) {
    env.storage().instance().set(&DataKey::Raised, &raised);
}

pub fn get_investor_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::InvestorCount)
        .unwrap_or(0)
}

pub fn set_investor_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::InvestorCount, &count);
}

// === Per-investor ===

fn get_amount(env: &Env, key: &DataKey) -> i128 {
    match env.storage().persistent().get::<_, i128>(key) {
        Some(amount) => {
            extend_persistent_ttl(env, key);
            amount
        }
        None => 0,
    }
}

fn set_amount(env: &Env, key: &DataKey, amount: i128) {
    env.storage().persistent().set(key, &amount);
    extend_persistent_ttl(env, key);
}

pub fn get_invested(env: &Env, investor: &Address) -> i128 {
    get_amount(env, &DataKey::Invested(investor.clone()))
}

pub fn set_invested(env: &Env, investor: &Address, amount: i128) {
    set_amount(env, &DataKey::Invested(investor.clone()), amount);
}

pub fn get_tokens_bought(env: &Env, investor: &Address) -> i128 {
    get_amount(env, &DataKey::TokensBought(investor.clone()))
}

pub fn set_tokens_bought(env: &Env, investor: &Address, amount: i128) {
    set_amount(env, &DataKey::TokensBought(investor.clone()), amount);
}
