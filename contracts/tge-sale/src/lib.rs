#![no_std]

mod storage;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, IntoVal, Symbol};
use storage::{
    get_config, get_investor_count, get_invested, get_raised, get_tokens_bought, has_config,
    set_config, set_invested, set_investor_count, set_raised, set_tokens_bought,
};
use tge_math::invariants::raised_monotonic;
use tge_math::{combine, price_footprint, tokens_for_value};
use tge_types::{CostEstimate, Error, SaleConfig, SaleParams, SaleState, SECONDS_PER_HOUR};

/// Rate-based crowdsale drawing tokens from a pool
///
/// Contributions are paid in `payment_token`, forwarded straight to the
/// beneficiary, and converted at a fixed rate. The sale must be a trustee
/// of its pool and, when restrictions are configured, one of their managers.
#[contract]
pub struct TgeSale;

#[contractimpl]
impl TgeSale {
    /// Initialize the sale
    ///
    /// # Arguments
    /// * `owner` - Sale owner
    /// * `params` - Pool, restrictions, payment routing, window and caps
    pub fn initialize(env: Env, owner: Address, params: SaleParams) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        if params.rate <= 0
            || params.value_unit <= 0
            || params.duration_hours == 0
            || params.min_cap < 0
            || params.max_cap < 0
            || (params.max_cap != 0 && params.max_cap < params.min_cap)
        {
            return Err(Error::InvalidConfig);
        }

        let start_time = if params.start_time == 0 {
            env.ledger().timestamp()
        } else {
            params.start_time
        };
        let end_time = params
            .duration_hours
            .checked_mul(SECONDS_PER_HOUR)
            .and_then(|duration| start_time.checked_add(duration))
            .ok_or(Error::InvalidConfig)?;

        let token = pool_token(&env, &params.pool);

        let config = SaleConfig {
            owner,
            pool: params.pool,
            token,
            restrictions: params.restrictions,
            payment_token: params.payment_token,
            beneficiary: params.beneficiary,
            start_time,
            end_time,
            min_cap: params.min_cap,
            rate: params.rate,
            max_cap: params.max_cap,
            value_unit: params.value_unit,
        };
        set_config(&env, &config);
        set_raised(&env, 0);
        set_investor_count(&env, 0);

        env.events().publish(
            (Symbol::new(&env, "sale_created"), config.pool),
            (start_time, end_time),
        );
        Ok(())
    }

    /// Contribute `value` payment base units and receive tokens from the pool
    ///
    /// Returns the number of ledger units released to `investor`.
    pub fn invest(env: Env, investor: Address, value: i128) -> Result<i128, Error> {
        investor.require_auth();

        if value <= 0 {
            return Err(Error::InvalidAmount);
        }

        let config = get_config(&env)?;
        let raised = get_raised(&env);
        if sale_state(&env, &config, raised) != SaleState::Open {
            return Err(Error::SaleClosed);
        }

        let tokens = convert(&env, &config, value)?;
        if tokens == 0 {
            return Err(Error::InvalidAmount);
        }

        let sale = env.current_contract_address();

        if let Some(restrictions) = &config.restrictions {
            env.invoke_contract::<()>(
                restrictions,
                &Symbol::new(&env, "check_and_register"),
                (sale.clone(), investor.clone(), value).into_val(&env),
            );
        }

        env.invoke_contract::<()>(
            &config.pool,
            &Symbol::new(&env, "release"),
            (sale, investor.clone(), tokens).into_val(&env),
        );

        token::Client::new(&env, &config.payment_token).transfer(
            &investor,
            &config.beneficiary,
            &value,
        );

        let new_raised = raised.checked_add(value).ok_or(Error::Overflow)?;
        debug_assert!(raised_monotonic(raised, new_raised));
        set_raised(&env, new_raised);

        let invested = get_invested(&env, &investor);
        if invested == 0 {
            set_investor_count(&env, get_investor_count(&env) + 1);
        }
        set_invested(
            &env,
            &investor,
            invested.checked_add(value).ok_or(Error::Overflow)?,
        );
        let bought = get_tokens_bought(&env, &investor)
            .checked_add(tokens)
            .ok_or(Error::Overflow)?;
        set_tokens_bought(&env, &investor, bought);

        if config.max_cap != 0 && new_raised >= config.max_cap {
            log!(&env, "sale cap reached", new_raised);
        }

        env.events()
            .publish((Symbol::new(&env, "invest"), investor), (value, tokens));
        Ok(tokens)
    }

    // === View Functions ===

    /// Ledger units `value` buys at the sale rate
    ///
    /// This is the formula restrictions use for reservations.
    pub fn tokens_for_value(env: Env, value: i128) -> Result<i128, Error> {
        let config = get_config(&env)?;
        convert(&env, &config, value)
    }

    pub fn raised(env: Env) -> i128 {
        get_raised(&env)
    }

    pub fn state(env: Env) -> Result<SaleState, Error> {
        let config = get_config(&env)?;
        Ok(sale_state(&env, &config, get_raised(&env)))
    }

    pub fn config(env: Env) -> Result<SaleConfig, Error> {
        get_config(&env)
    }

    pub fn invested(env: Env, investor: Address) -> i128 {
        get_invested(&env, &investor)
    }

    pub fn tokens_bought(env: Env, investor: Address) -> i128 {
        get_tokens_bought(&env, &investor)
    }

    pub fn investor_count(env: Env) -> u32 {
        get_investor_count(&env)
    }

    /// Tokens still held by the pool
    pub fn tokens_left(env: Env) -> Result<i128, Error> {
        let config = get_config(&env)?;
        Ok(env.invoke_contract(
            &config.pool,
            &Symbol::new(&env, "balance"),
            ().into_val(&env),
        ))
    }

    pub fn min_cap_reached(env: Env) -> Result<bool, Error> {
        let config = get_config(&env)?;
        Ok(get_raised(&env) >= config.min_cap)
    }

    // === Cost Estimates ===

    /// Footprint of `invest`, including restrictions, pool and payment legs
    pub fn estimate_invest(env: Env, investor: Address, value: i128) -> Result<CostEstimate, Error> {
        let config = get_config(&env)?;

        // Config, raised, count, invested, tokens bought
        let new_investor = get_invested(&env, &investor) == 0;
        let writes = if new_investor { 4 } else { 3 };
        // Rate lookup, release, payment
        let mut invocations = 3;
        if config.restrictions.is_some() {
            invocations += 1;
        }
        let mut estimate = price_footprint(5, writes, invocations, 1);

        if let Some(restrictions) = &config.restrictions {
            let inner: CostEstimate = env.invoke_contract(
                restrictions,
                &Symbol::new(&env, "estimate_check_and_register"),
                (investor.clone(), value).into_val(&env),
            );
            estimate = combine(&estimate, &inner);
        }

        let release: CostEstimate = env.invoke_contract(
            &config.pool,
            &Symbol::new(&env, "estimate_release"),
            (investor,).into_val(&env),
        );
        estimate = combine(&estimate, &release);

        // Payment token transfer: two balances and the transfer event
        Ok(combine(&estimate, &price_footprint(2, 2, 0, 1)))
    }
}

// === Helper Functions ===

fn sale_state(env: &Env, config: &SaleConfig, raised: i128) -> SaleState {
    let now = env.ledger().timestamp();
    if now < config.start_time {
        SaleState::BeforeStart
    } else if now > config.end_time || (config.max_cap != 0 && raised >= config.max_cap) {
        SaleState::Closed
    } else {
        SaleState::Open
    }
}

/// floor(value * real(rate) / value_unit)
fn convert(env: &Env, config: &SaleConfig, value: i128) -> Result<i128, Error> {
    let real_rate: i128 = env.invoke_contract(
        &config.token,
        &Symbol::new(env, "get_real_token_amount"),
        (config.rate,).into_val(env),
    );
    tokens_for_value(env, value, real_rate, config.value_unit)
}

fn pool_token(env: &Env, pool: &Address) -> Address {
    env.invoke_contract(pool, &Symbol::new(env, "token"), ().into_val(env))
}
