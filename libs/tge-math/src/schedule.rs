use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::Vec;
use tge_types::{BonusTier, Error, PERCENT_DENOMINATOR};

/// Amount granted by tier `index` of a decaying schedule
///
/// Tier 0 pays `base`. Each of the first `decay_steps` tiers after it removes
/// `decay_factor` percent of the previous amount (rounded down); later tiers
/// repeat the last decayed amount.
pub fn tier_amount(base: i128, decay_factor: u32, decay_steps: u32, index: u32) -> Result<i128, Error> {
    if decay_factor as i128 > PERCENT_DENOMINATOR {
        return Err(Error::InvalidConfig);
    }
    let mut amount = base;
    for _ in 0..index.min(decay_steps) {
        amount = decay(amount, decay_factor)?;
    }
    Ok(amount)
}

/// One decay step: floor(amount * (100 - decay_factor) / 100)
pub fn decay(amount: i128, decay_factor: u32) -> Result<i128, Error> {
    if decay_factor as i128 > PERCENT_DENOMINATOR {
        return Err(Error::InvalidConfig);
    }
    amount
        .fixed_mul_floor(PERCENT_DENOMINATOR - decay_factor as i128, PERCENT_DENOMINATOR)
        .ok_or(Error::Overflow)
}

/// Validate airdrop schedule parameters
pub fn validate_schedule(
    base: i128,
    tier_capacity: u32,
    tier_count: u32,
    decay_factor: u32,
) -> Result<(), Error> {
    if base <= 0 || tier_capacity == 0 || tier_count == 0 {
        return Err(Error::InvalidConfig);
    }
    if decay_factor as i128 > PERCENT_DENOMINATOR {
        return Err(Error::InvalidConfig);
    }
    Ok(())
}

/// Bonus percent active at `now`: the first tier whose window has not ended
pub fn bonus_percent(tiers: &Vec<BonusTier>, now: u64) -> u32 {
    for tier in tiers.iter() {
        if now <= tier.ends_at {
            return tier.percent;
        }
    }
    0
}

/// Bonus tiers must be strictly ordered by end time and stay within 100%
pub fn validate_bonus_tiers(tiers: &Vec<BonusTier>) -> Result<(), Error> {
    let mut previous: Option<u64> = None;
    for tier in tiers.iter() {
        if tier.percent as i128 > PERCENT_DENOMINATOR {
            return Err(Error::InvalidConfig);
        }
        if let Some(prev) = previous {
            if tier.ends_at <= prev {
                return Err(Error::InvalidConfig);
            }
        }
        previous = Some(tier.ends_at);
    }
    Ok(())
}
