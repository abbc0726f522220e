#![no_std]

mod storage;

use soroban_sdk::{contract, contractimpl, log, Address, Env, IntoVal, String, Symbol};
use storage::{
    get_config, get_cursor, get_tier, get_total_claims, get_total_minted, has_claimed, has_config,
    set_claimed, set_config, set_cursor, set_tier, set_total_claims, set_total_minted, MAX_TIERS,
};
use tge_math::{combine, price_footprint, tier_amount, validate_schedule};
use tge_types::{AirdropConfig, AirdropParams, CostEstimate, Error, Tier};

/// Tiered airdrop minting decreasing grants to a bounded number of claimers
///
/// The campaign must be a minter on its ledger. Claims are served tier by
/// tier; a tier is exhausted before the next one opens.
#[contract]
pub struct TgeAirdrop;

#[contractimpl]
impl TgeAirdrop {
    /// Initialize the campaign and lay out its tier schedule
    ///
    /// Tier `i` grants `tier_amount` decayed `min(i, decay_steps)` times.
    pub fn initialize(env: Env, owner: Address, params: AirdropParams) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }
        validate_schedule(
            params.tier_amount,
            params.tier_capacity,
            params.tier_count,
            params.decay_factor,
        )?;
        if params.tier_count > MAX_TIERS {
            return Err(Error::InvalidConfig);
        }

        for index in 0..params.tier_count {
            let amount = tier_amount(
                params.tier_amount,
                params.decay_factor,
                params.decay_steps,
                index,
            )?;
            // A tier decayed to nothing could never be claimed
            if amount <= 0 {
                return Err(Error::InvalidConfig);
            }
            set_tier(&env, index, &Tier::new(amount, params.tier_capacity));
        }

        set_config(
            &env,
            &AirdropConfig {
                owner,
                token: params.token,
                label: params.label.clone(),
                tier_count: params.tier_count,
                total_cap: params.total_cap,
                per_address_limit: params.per_address_limit,
            },
        );
        set_cursor(&env, 0);
        set_total_claims(&env, 0);
        set_total_minted(&env, 0);

        env.events().publish(
            (Symbol::new(&env, "campaign_created"), params.label),
            params.tier_count,
        );
        Ok(())
    }

    /// Claim the current tier's grant
    ///
    /// Returns the ledger units minted to `claimer`.
    pub fn buy(env: Env, claimer: Address) -> Result<i128, Error> {
        claimer.require_auth();
        let config = get_config(&env)?;

        if config.per_address_limit && has_claimed(&env, &claimer) {
            return Err(Error::AlreadyClaimed);
        }

        let cursor = get_cursor(&env);
        let total_claims = get_total_claims(&env);
        if !is_open(&config, cursor, total_claims) {
            return Err(Error::CampaignClosed);
        }

        let mut tier = get_tier(&env, cursor).ok_or(Error::CampaignClosed)?;
        let amount = real_amount(&env, &config.token, tier.amount);

        env.invoke_contract::<()>(
            &config.token,
            &Symbol::new(&env, "mint"),
            (env.current_contract_address(), claimer.clone(), amount).into_val(&env),
        );

        set_claimed(&env, &claimer);
        tier.claimed += 1;
        set_tier(&env, cursor, &tier);

        if tier.is_exhausted() {
            let next = cursor + 1;
            set_cursor(&env, next);
            log!(&env, "tier exhausted", cursor);
            env.events().publish((Symbol::new(&env, "tier"),), next);
        }

        set_total_claims(&env, total_claims + 1);
        let minted = get_total_minted(&env)
            .checked_add(amount)
            .ok_or(Error::Overflow)?;
        set_total_minted(&env, minted);

        env.events()
            .publish((Symbol::new(&env, "claim"), claimer), (cursor, amount));
        Ok(amount)
    }

    // === View Functions ===

    pub fn current_tier(env: Env) -> u32 {
        get_cursor(&env)
    }

    pub fn tier(env: Env, index: u32) -> Option<Tier> {
        get_tier(&env, index)
    }

    pub fn tier_count(env: Env) -> Result<u32, Error> {
        Ok(get_config(&env)?.tier_count)
    }

    pub fn has_claimed(env: Env, claimer: Address) -> bool {
        has_claimed(&env, &claimer)
    }

    pub fn total_claims(env: Env) -> u32 {
        get_total_claims(&env)
    }

    pub fn total_minted(env: Env) -> i128 {
        get_total_minted(&env)
    }

    pub fn is_active(env: Env) -> Result<bool, Error> {
        let config = get_config(&env)?;
        Ok(is_open(&config, get_cursor(&env), get_total_claims(&env)))
    }

    /// Ledger units the next claim would mint, 0 once the campaign closed
    pub fn next_amount(env: Env) -> Result<i128, Error> {
        let config = get_config(&env)?;
        let cursor = get_cursor(&env);
        if !is_open(&config, cursor, get_total_claims(&env)) {
            return Ok(0);
        }
        match get_tier(&env, cursor) {
            Some(tier) => Ok(real_amount(&env, &config.token, tier.amount)),
            None => Ok(0),
        }
    }

    pub fn label(env: Env) -> Result<String, Error> {
        Ok(get_config(&env)?.label)
    }

    pub fn owner(env: Env) -> Result<Address, Error> {
        Ok(get_config(&env)?.owner)
    }

    // === Cost Estimates ===

    /// Footprint of `buy` for `claimer`
    ///
    /// The claim that fills a tier also writes the cursor and emits the
    /// tier event.
    pub fn estimate_buy(env: Env, claimer: Address) -> Result<CostEstimate, Error> {
        let config = get_config(&env)?;
        if config.per_address_limit && has_claimed(&env, &claimer) {
            return Ok(price_footprint(2, 0, 0, 0));
        }

        let cursor = get_cursor(&env);
        if !is_open(&config, cursor, get_total_claims(&env)) {
            return Ok(price_footprint(3, 0, 0, 0));
        }
        let tier = get_tier(&env, cursor).ok_or(Error::CampaignClosed)?;
        let boundary = tier.claimed + 1 >= tier.capacity;

        // Config, claimed flag, cursor, claims, tier, minted
        let own = if boundary {
            price_footprint(6, 5, 2, 2)
        } else {
            price_footprint(6, 4, 2, 1)
        };
        let mint: CostEstimate = env.invoke_contract(
            &config.token,
            &Symbol::new(&env, "estimate_mint"),
            (env.current_contract_address(),).into_val(&env),
        );
        Ok(combine(&own, &mint))
    }
}

// === Helper Functions ===

fn is_open(config: &AirdropConfig, cursor: u32, total_claims: u32) -> bool {
    cursor < config.tier_count && (config.total_cap == 0 || total_claims < config.total_cap)
}

fn real_amount(env: &Env, token: &Address, amount: i128) -> i128 {
    env.invoke_contract(
        token,
        &Symbol::new(env, "get_real_token_amount"),
        (amount,).into_val(env),
    )
}
