#![no_std]

mod storage;

use soroban_sdk::{contract, contractimpl, log, Address, Env, String, Symbol};
use storage::{
    get_allowance, get_balance, get_info, get_total_supply, has_info, is_locked, is_minter,
    is_transfer_allowed, set_allowance, set_balance, set_info, set_locked, set_minter,
    set_total_supply, set_transfer_allowed, TokenInfo,
};
use tge_math::invariants::lock_permits;
use tge_math::{combine, price_footprint, real_token_amount};
use tge_types::{CostEstimate, Error, MAX_DECIMALS};

/// Fungible ledger with a global transfer lock and per-address exemptions
#[contract]
pub struct TgeToken;

#[contractimpl]
impl TgeToken {
    /// Initialize the ledger and credit the whole initial supply to `owner`
    ///
    /// # Arguments
    /// * `decimals` - Ledger precision, at most 18
    /// * `initial_supply` - Supply in whole tokens, scaled by `10^decimals`
    pub fn initialize(
        env: Env,
        owner: Address,
        name: String,
        symbol: String,
        decimals: u32,
        initial_supply: i128,
    ) -> Result<(), Error> {
        if has_info(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if decimals > MAX_DECIMALS || initial_supply < 0 {
            return Err(Error::InvalidConfig);
        }

        let supply = real_token_amount(initial_supply, decimals)?;

        set_info(
            &env,
            &TokenInfo {
                owner: owner.clone(),
                name,
                symbol,
                decimals,
            },
        );
        set_total_supply(&env, supply);
        set_locked(&env, false);
        set_balance(&env, &owner, supply);

        env.events()
            .publish((Symbol::new(&env, "initialized"), owner), supply);
        Ok(())
    }

    /// Move `amount` ledger units from `from` to `to`
    ///
    /// Fails with `Locked` while the lock is on and `from` is not exempt.
    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        move_balance(&env, &from, &to, amount)
    }

    /// Allow `spender` to move up to `amount` of `from`'s balance
    pub fn approve(env: Env, from: Address, spender: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        if amount < 0 {
            return Err(Error::InvalidAmount);
        }
        set_allowance(&env, &from, &spender, amount);

        env.events()
            .publish((Symbol::new(&env, "approve"), from, spender), amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to` on behalf of `from`
    ///
    /// The lock applies to `from`, the effective source, not to `spender`.
    pub fn transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> Result<(), Error> {
        spender.require_auth();

        let allowance = get_allowance(&env, &from, &spender);
        if allowance < amount {
            return Err(Error::InsufficientBalance);
        }
        move_balance(&env, &from, &to, amount)?;
        set_allowance(&env, &from, &spender, allowance - amount);
        Ok(())
    }

    /// Issue `amount` new ledger units to `to`
    ///
    /// Issuance is not a transfer: the lock does not apply.
    pub fn mint(env: Env, minter: Address, to: Address, amount: i128) -> Result<(), Error> {
        minter.require_auth();
        get_info(&env)?;

        if !is_minter(&env, &minter) {
            return Err(Error::Permission);
        }
        if amount <= 0 {
            return Err(Error::InvalidAmount);
        }

        let supply = get_total_supply(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        let balance = get_balance(&env, &to)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;

        set_total_supply(&env, supply);
        set_balance(&env, &to, balance);

        env.events()
            .publish((Symbol::new(&env, "mint"), minter, to), amount);
        Ok(())
    }

    // === Owner Functions ===

    /// Turn the global transfer lock on or off (idempotent)
    pub fn set_locked_state(env: Env, caller: Address, locked: bool) -> Result<(), Error> {
        require_owner(&env, &caller)?;

        if is_locked(&env) == locked {
            return Ok(());
        }
        set_locked(&env, locked);

        log!(&env, "transfer lock changed", locked);
        env.events()
            .publish((Symbol::new(&env, "locked"),), locked);
        Ok(())
    }

    /// Exempt `address` from the lock, or revoke the exemption
    pub fn allow_transfer_for(
        env: Env,
        caller: Address,
        address: Address,
        allowed: bool,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_transfer_allowed(&env, &address, allowed);

        env.events()
            .publish((Symbol::new(&env, "transfer_allowed"), address), allowed);
        Ok(())
    }

    /// Grant or revoke the right to issue new supply
    pub fn set_minter(env: Env, caller: Address, minter: Address, allowed: bool) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        set_minter(&env, &minter, allowed);

        env.events()
            .publish((Symbol::new(&env, "minter"), minter), allowed);
        Ok(())
    }

    // === View Functions ===

    /// Scale a whole-token amount into ledger units
    pub fn get_real_token_amount(env: Env, amount: i128) -> Result<i128, Error> {
        let info = get_info(&env)?;
        real_token_amount(amount, info.decimals)
    }

    pub fn balance_of(env: Env, holder: Address) -> i128 {
        get_balance(&env, &holder)
    }

    pub fn total_supply(env: Env) -> i128 {
        get_total_supply(&env)
    }

    pub fn transfer_locked(env: Env) -> bool {
        is_locked(&env)
    }

    /// True when `address` may currently send tokens
    pub fn can_transfer(env: Env, address: Address) -> bool {
        lock_permits(is_locked(&env), is_transfer_allowed(&env, &address))
    }

    pub fn is_minter(env: Env, address: Address) -> bool {
        is_minter(&env, &address)
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        get_allowance(&env, &from, &spender)
    }

    pub fn decimals(env: Env) -> Result<u32, Error> {
        Ok(get_info(&env)?.decimals)
    }

    pub fn name(env: Env) -> Result<String, Error> {
        Ok(get_info(&env)?.name)
    }

    pub fn symbol(env: Env) -> Result<String, Error> {
        Ok(get_info(&env)?.symbol)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(get_info(&env)?.owner)
    }

    // === Cost Estimates ===

    /// Footprint of `transfer` against the current state
    pub fn estimate_transfer(env: Env, from: Address, to: Address) -> CostEstimate {
        // Instance entry + both balances, plus the exemption entry while locked
        let lock_reads = if is_locked(&env) { 1 } else { 0 };
        let writes = if from == to { 1 } else { 2 };
        price_footprint(3 + lock_reads, writes, 0, 1)
    }

    /// Footprint of `approve`
    pub fn estimate_approve(env: Env, from: Address, spender: Address) -> CostEstimate {
        let existing = if get_allowance(&env, &from, &spender) > 0 { 1 } else { 0 };
        price_footprint(existing, 1, 0, 1)
    }

    /// Footprint of `transfer_from`; an uncovered amount fails on the allowance read
    pub fn estimate_transfer_from(
        env: Env,
        spender: Address,
        from: Address,
        to: Address,
        amount: i128,
    ) -> CostEstimate {
        if get_allowance(&env, &from, &spender) < amount {
            return price_footprint(1, 0, 0, 0);
        }
        let transfer = Self::estimate_transfer(env, from, to);
        combine(&transfer, &price_footprint(1, 1, 0, 0))
    }

    /// Footprint of `mint`; a non-minter fails after two reads
    pub fn estimate_mint(env: Env, minter: Address) -> CostEstimate {
        if is_minter(&env, &minter) {
            price_footprint(3, 2, 0, 1)
        } else {
            price_footprint(2, 0, 0, 0)
        }
    }

    /// Footprint of `set_locked_state`; an unchanged state writes nothing
    pub fn estimate_set_locked_state(env: Env, locked: bool) -> CostEstimate {
        if is_locked(&env) == locked {
            price_footprint(1, 0, 0, 0)
        } else {
            price_footprint(1, 1, 0, 1)
        }
    }

    /// Footprint of `allow_transfer_for`
    pub fn estimate_allow_transfer_for(env: Env, address: Address) -> CostEstimate {
        let existing = if is_transfer_allowed(&env, &address) { 1 } else { 0 };
        price_footprint(1 + existing, 1, 0, 1)
    }

    /// Footprint of `set_minter`
    pub fn estimate_set_minter(env: Env, minter: Address) -> CostEstimate {
        let existing = if is_minter(&env, &minter) { 1 } else { 0 };
        price_footprint(1 + existing, 1, 0, 1)
    }
}

// === Helper Functions ===

fn require_owner(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if get_info(env)?.owner != *caller {
        return Err(Error::Permission);
    }
    Ok(())
}

/// Lock check on the source, then an all-or-nothing debit and credit
fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) -> Result<(), Error> {
    get_info(env)?;

    if amount < 0 {
        return Err(Error::InvalidAmount);
    }
    if !lock_permits(is_locked(env), is_transfer_allowed(env, from)) {
        return Err(Error::Locked);
    }

    let from_balance = get_balance(env, from);
    if from_balance < amount {
        return Err(Error::InsufficientBalance);
    }

    set_balance(env, from, from_balance - amount);
    // Re-read so a self-transfer nets to zero
    let to_balance = get_balance(env, to)
        .checked_add(amount)
        .ok_or(Error::Overflow)?;
    set_balance(env, to, to_balance);

    env.events().publish(
        (Symbol::new(env, "transfer"), from.clone(), to.clone()),
        amount,
    );
    Ok(())
}
