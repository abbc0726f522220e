#![no_std]

mod storage;

use soroban_sdk::{contract, contractimpl, log, Address, Env, IntoVal, Symbol};
use storage::{
    add_participant, get_config, get_formula, get_participant_count, get_reserved, has_config,
    is_manager, is_participant, set_config, set_formula, set_manager, set_participant_count,
    set_reserved, RestrictionConfig,
};
use tge_math::{combine, price_footprint};
use tge_types::{CostEstimate, Error};

/// Participation limits for a sale
///
/// Counts distinct participants against a hard maximum and rejects
/// contributions below a minimum. Only managers (the sale) may register
/// participants.
#[contract]
pub struct TgeRestrictions;

#[contractimpl]
impl TgeRestrictions {
    /// Initialize the limits
    ///
    /// # Arguments
    /// * `min_contribution` - Smallest accepted value, payment base units
    /// * `max_participants` - Distinct participants allowed, at least 1
    pub fn initialize(
        env: Env,
        owner: Address,
        min_contribution: i128,
        max_participants: u32,
    ) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if max_participants == 0 || min_contribution < 0 {
            return Err(Error::InvalidConfig);
        }

        set_config(
            &env,
            &RestrictionConfig {
                owner,
                min_contribution,
                max_participants,
            },
        );
        set_participant_count(&env, 0);
        Ok(())
    }

    /// Validate a contribution and count `participant` on first sight
    ///
    /// Repeat contributions from a known participant pass without touching
    /// the count.
    pub fn check_and_register(
        env: Env,
        manager: Address,
        participant: Address,
        value: i128,
    ) -> Result<(), Error> {
        manager.require_auth();
        if !is_manager(&env, &manager) {
            return Err(Error::Permission);
        }
        register(&env, &participant, value)
    }

    /// Register `participant` and reserve the tokens `value` buys through the formula
    pub fn reserve_for(
        env: Env,
        caller: Address,
        participant: Address,
        value: i128,
    ) -> Result<i128, Error> {
        require_owner(&env, &caller)?;
        let formula = get_formula(&env).ok_or(Error::InvalidConfig)?;

        register(&env, &participant, value)?;

        let tokens: i128 = env.invoke_contract(
            &formula,
            &Symbol::new(&env, "tokens_for_value"),
            (value,).into_val(&env),
        );
        let reserved = get_reserved(&env, &participant)
            .checked_add(tokens)
            .ok_or(Error::Overflow)?;
        set_reserved(&env, &participant, reserved);

        env.events()
            .publish((Symbol::new(&env, "reserved"), participant), tokens);
        Ok(tokens)
    }

    pub fn set_manager(
        env: Env,
        caller: Address,
        manager: Address,
        allowed: bool,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_manager(&env, &manager, allowed);

        env.events()
            .publish((Symbol::new(&env, "manager"), manager), allowed);
        Ok(())
    }

    /// Set the contract that converts value to tokens (the sale)
    pub fn set_formula(env: Env, caller: Address, formula: Address) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_formula(&env, &formula);

        env.events()
            .publish((Symbol::new(&env, "formula"),), formula);
        Ok(())
    }

    // === View Functions ===

    pub fn participant_count(env: Env) -> u32 {
        get_participant_count(&env)
    }

    pub fn max_participants(env: Env) -> Result<u32, Error> {
        Ok(get_config(&env)?.max_participants)
    }

    pub fn min_contribution(env: Env) -> Result<i128, Error> {
        Ok(get_config(&env)?.min_contribution)
    }

    pub fn is_participant(env: Env, participant: Address) -> bool {
        is_participant(&env, &participant)
    }

    pub fn is_manager(env: Env, address: Address) -> bool {
        is_manager(&env, &address)
    }

    pub fn formula(env: Env) -> Option<Address> {
        get_formula(&env)
    }

    pub fn reserved_tokens(env: Env, participant: Address) -> i128 {
        get_reserved(&env, &participant)
    }

    /// Whether `check_and_register` would accept this contribution
    pub fn can_participate(env: Env, participant: Address, value: i128) -> Result<bool, Error> {
        let config = get_config(&env)?;
        Ok(check(&env, &config, &participant, value).is_ok())
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(get_config(&env)?.owner)
    }

    // === Cost Estimates ===

    /// Footprint of `check_and_register` for this participant and value
    pub fn estimate_check_and_register(
        env: Env,
        participant: Address,
        value: i128,
    ) -> Result<CostEstimate, Error> {
        let config = get_config(&env)?;
        let (estimate, _) = register_footprint(&env, &config, &participant, value);
        Ok(estimate)
    }

    /// Footprint of `reserve_for`, including the formula call
    pub fn estimate_reserve_for(
        env: Env,
        participant: Address,
        value: i128,
    ) -> Result<CostEstimate, Error> {
        let config = get_config(&env)?;
        if get_formula(&env).is_none() {
            return Ok(price_footprint(2, 0, 0, 0));
        }

        let (registration, accepted) = register_footprint(&env, &config, &participant, value);
        if !accepted {
            return Ok(registration);
        }
        // Formula invocation, then the reserved balance entry
        Ok(combine(&registration, &price_footprint(2, 1, 1, 1)))
    }

    /// Footprint of `set_manager`
    pub fn estimate_set_manager(env: Env, manager: Address) -> CostEstimate {
        let existing = if is_manager(&env, &manager) { 1 } else { 0 };
        price_footprint(1 + existing, 1, 0, 1)
    }

    /// Footprint of `set_formula`
    pub fn estimate_set_formula(env: Env) -> CostEstimate {
        let existing = if get_formula(&env).is_some() { 1 } else { 0 };
        price_footprint(1 + existing, 1, 0, 1)
    }
}

// === Helper Functions ===

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if get_config(env)?.owner != *caller {
        return Err(Error::Permission);
    }
    Ok(())
}

/// Minimum first, then the cap for newcomers
fn check(
    env: &Env,
    config: &RestrictionConfig,
    participant: &Address,
    value: i128,
) -> Result<bool, Error> {
    if value < config.min_contribution {
        return Err(Error::BelowMinimum);
    }
    if is_participant(env, participant) {
        return Ok(false);
    }
    if get_participant_count(env) >= config.max_participants {
        return Err(Error::CapReached);
    }
    Ok(true)
}

/// Footprint of `register` and whether it would succeed
fn register_footprint(
    env: &Env,
    config: &RestrictionConfig,
    participant: &Address,
    value: i128,
) -> (CostEstimate, bool) {
    // Config + role entry are read on every path
    match check(env, config, participant, value) {
        Err(Error::BelowMinimum) => (price_footprint(2, 0, 0, 0), false),
        Ok(false) => (price_footprint(3, 0, 0, 0), true),
        Ok(true) => (price_footprint(4, 2, 0, 1), true),
        Err(_) => (price_footprint(4, 0, 0, 0), false),
    }
}

fn register(env: &Env, participant: &Address, value: i128) -> Result<(), Error> {
    let config = get_config(env)?;
    if !check(env, &config, participant, value)? {
        return Ok(());
    }

    add_participant(env, participant);
    let count = get_participant_count(env) + 1;
    set_participant_count(env, count);

    log!(env, "participant registered", count);
    env.events()
        .publish((Symbol::new(env, "participant"), participant.clone()), count);
    Ok(())
}
