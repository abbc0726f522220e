#![no_std]

use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, IntoVal, Symbol};
use tge_math::{combine, price_footprint};
use tge_types::{CostEstimate, Error};

/// Custodial holder of pre-allocated ledger balance
///
/// The pool never decides *why* tokens leave; a trustee (the sale) asks
/// for a release and the pool forwards it to the ledger.
#[contract]
pub struct TgePool;

/// Storage keys
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Owner and ledger address (Instance storage)
    Config,
    /// Address allowed to release tokens (Persistent storage)
    Trustee(Address),
}

/// Pool configuration - immutable after initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct PoolConfig {
    pub owner: Address,
    pub token: Address,
}

// TTL constants
const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
const PERSISTENT_TTL_THRESHOLD: u32 = 17280;
const PERSISTENT_TTL_EXTEND: u32 = 518400;

#[contractimpl]
impl TgePool {
    /// Initialize the pool over `token`
    pub fn initialize(env: Env, owner: Address, token: Address) -> Result<(), Error> {
        if env.storage().instance().has(&DataKey::Config) {
            return Err(Error::AlreadyInitialized);
        }

        env.storage()
            .instance()
            .set(&DataKey::Config, &PoolConfig { owner, token });
        extend_instance_ttl(&env);
        Ok(())
    }

    /// Grant or revoke the right to release tokens
    pub fn set_trustee(
        env: Env,
        caller: Address,
        trustee: Address,
        allowed: bool,
    ) -> Result<(), Error> {
        let config = get_config(&env)?;
        caller.require_auth();
        if caller != config.owner {
            return Err(Error::Permission);
        }

        let key = DataKey::Trustee(trustee.clone());
        if allowed {
            env.storage().persistent().set(&key, &true);
            extend_persistent_ttl(&env, &key);
        } else {
            env.storage().persistent().remove(&key);
        }

        env.events()
            .publish((Symbol::new(&env, "trustee"), trustee), allowed);
        Ok(())
    }

    /// Send `amount` ledger units from the pool to `to`
    ///
    /// Ledger failures (`Locked`, `InsufficientBalance`) abort the call
    /// unchanged.
    pub fn release(env: Env, trustee: Address, to: Address, amount: i128) -> Result<(), Error> {
        trustee.require_auth();
        let config = get_config(&env)?;

        if !is_trustee(&env, &trustee) {
            return Err(Error::Permission);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        invoke_transfer(&env, &config.token, &env.current_contract_address(), &to, amount);

        env.events()
            .publish((Symbol::new(&env, "release"), trustee, to), amount);
        Ok(())
    }

    // === View Functions ===

    pub fn is_trustee(env: Env, address: Address) -> bool {
        is_trustee(&env, &address)
    }

    pub fn token(env: Env) -> Result<Address, Error> {
        Ok(get_config(&env)?.token)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(get_config(&env)?.owner)
    }

    /// Ledger balance held by the pool
    pub fn balance(env: Env) -> Result<i128, Error> {
        let config = get_config(&env)?;
        Ok(invoke_balance_of(&env, &config.token, &env.current_contract_address()))
    }

    // === Cost Estimates ===

    /// Footprint of `release`, including the ledger transfer
    pub fn estimate_release(env: Env, to: Address) -> Result<CostEstimate, Error> {
        let config = get_config(&env)?;
        let own = price_footprint(2, 0, 1, 1);
        let transfer = invoke_estimate_transfer(
            &env,
            &config.token,
            &env.current_contract_address(),
            &to,
        );
        Ok(combine(&own, &transfer))
    }

    /// Footprint of `set_trustee`
    pub fn estimate_set_trustee(env: Env) -> Result<CostEstimate, Error> {
        get_config(&env)?;
        Ok(price_footprint(1, 1, 0, 1))
    }
}

// === Helper Functions ===

fn extend_instance_ttl(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_TTL_THRESHOLD, INSTANCE_TTL_EXTEND);
}

fn extend_persistent_ttl(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_TTL_THRESHOLD, PERSISTENT_TTL_EXTEND);
}

fn get_config(env: &Env) -> Result<PoolConfig, Error> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

fn is_trustee(env: &Env, address: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Trustee(address.clone()))
}

fn invoke_transfer(env: &Env, token: &Address, from: &Address, to: &Address, amount: i128) {
    env.invoke_contract::<()>(
        token,
        &Symbol::new(env, "transfer"),
        (from, to, amount).into_val(env),
    );
}

fn invoke_balance_of(env: &Env, token: &Address, holder: &Address) -> i128 {
    env.invoke_contract(
        token,
        &Symbol::new(env, "balance_of"),
        (holder,).into_val(env),
    )
}

fn invoke_estimate_transfer(env: &Env, token: &Address, from: &Address, to: &Address) -> CostEstimate {
    env.invoke_contract(
        token,
        &Symbol::new(env, "estimate_transfer"),
        (from, to).into_val(env),
    )
}
