use soroban_fixed_point_math::FixedPoint;
use soroban_sdk::{Env, U256};
use tge_types::{Error, MAX_DECIMALS, PERCENT_DENOMINATOR};

/// 10^decimals as an i128
pub fn pow10(decimals: u32) -> Result<i128, Error> {
    if decimals > MAX_DECIMALS {
        return Err(Error::InvalidConfig);
    }
    10i128.checked_pow(decimals).ok_or(Error::Overflow)
}

/// Scale a whole-token amount into ledger units
pub fn real_token_amount(amount: i128, decimals: u32) -> Result<i128, Error> {
    amount.checked_mul(pow10(decimals)?).ok_or(Error::Overflow)
}

/// Multiply and divide non-negative amounts with 256-bit intermediate
/// precision (rounds down). Returns (a * b) / denominator
pub fn mul_div_floor(env: &Env, a: i128, b: i128, denominator: i128) -> Result<i128, Error> {
    if denominator <= 0 {
        return Err(Error::InvalidConfig);
    }
    if a < 0 || b < 0 {
        return Err(Error::InvalidAmount);
    }

    let product = U256::from_u128(env, a as u128).mul(&U256::from_u128(env, b as u128));
    let result = product.div(&U256::from_u128(env, denominator as u128));

    let max_i128 = U256::from_u128(env, i128::MAX as u128);
    if result.gt(&max_i128) {
        return Err(Error::Overflow);
    }
    result
        .to_u128()
        .map(|r| r as i128)
        .ok_or(Error::Overflow)
}

/// Ledger units bought by `value` payment base units
///
/// `real_rate` is the rate already scaled into ledger units (tokens per whole
/// unit of value), `value_unit` the number of base units in one whole unit of
/// value. Rounds down.
pub fn tokens_for_value(
    env: &Env,
    value: i128,
    real_rate: i128,
    value_unit: i128,
) -> Result<i128, Error> {
    mul_div_floor(env, value, real_rate, value_unit)
}

/// Ledger units bought by `value` at `price` base units per whole token
///
/// `unit` is one whole token in ledger units. Rounds down.
pub fn tokens_for_price(env: &Env, value: i128, price: i128, unit: i128) -> Result<i128, Error> {
    mul_div_floor(env, value, unit, price)
}

/// floor(amount * percent / 100)
pub fn percent_of(amount: i128, percent: u32) -> Result<i128, Error> {
    amount
        .fixed_mul_floor(percent as i128, PERCENT_DENOMINATOR)
        .ok_or(Error::Overflow)
}

/// `base` plus `percent` of it, rounding the extra part down
pub fn with_bonus(base: i128, percent: u32) -> Result<i128, Error> {
    base.checked_add(percent_of(base, percent)?)
        .ok_or(Error::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::Env;

    const ETHER: i128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), Ok(1));
        assert_eq!(pow10(7), Ok(10_000_000));
        assert_eq!(pow10(18), Ok(ETHER));
        assert_eq!(pow10(19), Err(Error::InvalidConfig));
    }

    #[test]
    fn test_real_token_amount() {
        assert_eq!(real_token_amount(100, 18), Ok(100 * ETHER));
        assert_eq!(real_token_amount(1000, 0), Ok(1000));
        assert_eq!(real_token_amount(0, 18), Ok(0));
        assert_eq!(real_token_amount(i128::MAX, 1), Err(Error::Overflow));
    }

    #[test]
    fn test_mul_div_floor_wide_intermediate() {
        let env = Env::default();
        // 2e18 * 1e20 overflows i128 before the division
        assert_eq!(
            mul_div_floor(&env, 2 * ETHER, 100 * ETHER, ETHER),
            Ok(200 * ETHER)
        );
        assert_eq!(mul_div_floor(&env, 5, 1, 3), Ok(1));
        assert_eq!(mul_div_floor(&env, 0, 100, 7), Ok(0));
    }

    #[test]
    fn test_mul_div_floor_errors() {
        let env = Env::default();
        assert_eq!(mul_div_floor(&env, 1, 1, 0), Err(Error::InvalidConfig));
        assert_eq!(mul_div_floor(&env, -1, 1, 1), Err(Error::InvalidAmount));
        assert_eq!(
            mul_div_floor(&env, i128::MAX, 2, 1),
            Err(Error::Overflow)
        );
    }

    #[test]
    fn test_tokens_for_value_one_ether_at_rate_100() {
        let env = Env::default();
        let real_rate = real_token_amount(100, 18).unwrap();
        assert_eq!(
            tokens_for_value(&env, ETHER, real_rate, ETHER),
            Ok(100 * ETHER)
        );
        assert_eq!(
            tokens_for_value(&env, 2 * ETHER, real_rate, ETHER),
            Ok(200 * ETHER)
        );
    }

    #[test]
    fn test_tokens_for_value_rounds_down() {
        let env = Env::default();
        // 1 base unit of a 7-decimal asset at 3 tokens (0 decimals) per unit
        assert_eq!(tokens_for_value(&env, 1, 3, 10_000_000), Ok(0));
        // 0.5 units at 3 tokens per unit = 1.5 -> 1
        assert_eq!(tokens_for_value(&env, 5_000_000, 3, 10_000_000), Ok(1));
    }

    #[test]
    fn test_tokens_for_price() {
        let env = Env::default();
        // 10 base units at 2 units per token, 0 decimals
        assert_eq!(tokens_for_price(&env, 10, 2, 1), Ok(5));
        // 7 decimals on the token: 1 unit buys 0.5 token
        assert_eq!(tokens_for_price(&env, 1, 2, 10_000_000), Ok(5_000_000));
        assert_eq!(tokens_for_price(&env, 3, 2, 1), Ok(1));
        assert_eq!(tokens_for_price(&env, 1, 0, 1), Err(Error::InvalidConfig));
    }

    #[test]
    fn test_percent_helpers() {
        assert_eq!(percent_of(1000, 15), Ok(150));
        assert_eq!(percent_of(99, 10), Ok(9));
        assert_eq!(with_bonus(1000, 20), Ok(1200));
        assert_eq!(with_bonus(7, 50), Ok(10));
        assert_eq!(with_bonus(7, 0), Ok(7));
    }
}
