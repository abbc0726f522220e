#![no_std]

mod storage;

use soroban_sdk::{contract, contractimpl, log, token, Address, Env, IntoVal, String, Symbol, Vec};
use storage::{
    get_buyers, get_config, get_discount, get_product, get_product_count, get_product_id,
    get_sold, has_config, has_purchased, push_product, set_buyers, set_config, set_discount,
    set_product, set_purchased, set_sold,
};
use tge_math::{
    bonus_percent, combine, price_footprint, tokens_for_price, validate_bonus_tiers, with_bonus,
};
use tge_types::{
    CostEstimate, Error, Product, ProductParams, VendorConfig, VendorParams, MAX_PAGE_SIZE,
    PERCENT_DENOMINATOR, SECONDS_PER_DAY, SECONDS_PER_HOUR,
};

/// Catalog of token-backed products
///
/// The vendor contract holds the tokens it sells and must be exempt from
/// the ledger lock while the lock is on. Each product is an independent
/// bounded sale with its own window, price and bonus schedule.
#[contract]
pub struct TgeVendor;

#[contractimpl]
impl TgeVendor {
    /// Initialize the catalog
    pub fn initialize(env: Env, owner: Address, params: VendorParams) -> Result<(), Error> {
        if has_config(&env) {
            return Err(Error::AlreadyInitialized);
        }

        set_config(
            &env,
            &VendorConfig {
                owner: owner.clone(),
                name: params.name.clone(),
                token: params.token,
                payment_token: params.payment_token,
                beneficiary: params.beneficiary,
            },
        );

        env.events()
            .publish((Symbol::new(&env, "vendor_created"), owner), params.name);
        Ok(())
    }

    // ========================================================================
    // Catalog management
    // ========================================================================

    /// Register a product and return its id
    ///
    /// # Arguments
    /// * `params.total_tokens` - Allocation in whole tokens
    /// * `params.price` - Payment base units per whole token, 0 for a free product
    /// * `params.start_time` - Opening timestamp, 0 means now
    pub fn create_product(env: Env, caller: Address, params: ProductParams) -> Result<u32, Error> {
        let config = require_owner(&env, &caller)?;

        if get_product_id(&env, &params.name).is_some() {
            return Err(Error::DuplicateName);
        }
        if params.total_tokens <= 0
            || params.price < 0
            || params.free_amount < 0
            || (params.price == 0 && params.free_amount == 0)
            || params.duration_hours == 0
        {
            return Err(Error::InvalidConfig);
        }
        validate_bonus_tiers(&params.bonus_tiers)?;

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

        let product = Product {
            name: params.name.clone(),
            total_tokens: real_amount(&env, &config.token, params.total_tokens),
            price: params.price,
            free_amount: params.free_amount,
            start_time,
            end_time,
            bonus_enabled: params.bonus_enabled,
            bonus_tiers: params.bonus_tiers,
            single_purchase: params.single_purchase,
            active: true,
        };
        let id = push_product(&env, &product);

        log!(&env, "product created", id);
        env.events()
            .publish((Symbol::new(&env, "product_created"), id), params.name);
        Ok(id)
    }

    /// Register a free, single-purchase promotion
    pub fn quick_create_promo(
        env: Env,
        caller: Address,
        name: String,
        total_tokens: i128,
        free_amount: i128,
        duration_days: u64,
    ) -> Result<u32, Error> {
        let duration_hours = duration_days
            .checked_mul(SECONDS_PER_DAY / SECONDS_PER_HOUR)
            .ok_or(Error::InvalidConfig)?;
        let params = ProductParams {
            name,
            total_tokens,
            price: 0,
            free_amount,
            start_time: 0,
            duration_hours,
            bonus_enabled: false,
            bonus_tiers: Vec::new(&env),
            single_purchase: true,
        };
        Self::create_product(env, caller, params)
    }

    pub fn set_product_active(
        env: Env,
        caller: Address,
        id: u32,
        active: bool,
    ) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        let mut product = get_product(&env, id)?;
        product.active = active;
        set_product(&env, id, &product);

        env.events()
            .publish((Symbol::new(&env, "product_active"), id), active);
        Ok(())
    }

    /// Register a discount code; 0 percent removes it
    pub fn set_discount(env: Env, caller: Address, code: u32, percent: u32) -> Result<(), Error> {
        require_owner(&env, &caller)?;
        if percent as i128 > PERCENT_DENOMINATOR {
            return Err(Error::InvalidConfig);
        }
        set_discount(&env, code, percent);

        env.events()
            .publish((Symbol::new(&env, "discount"), code), percent);
        Ok(())
    }

    // ========================================================================
    // Purchases
    // ========================================================================

    /// Buy from product `id`, paying `value` payment base units
    ///
    /// Returns the ledger units delivered to `buyer`, bonus and discount
    /// included. Free products require `value == 0`.
    pub fn buy(
        env: Env,
        buyer: Address,
        id: u32,
        payment_method: Symbol,
        apply_bonus: bool,
        discount_code: u32,
        value: i128,
    ) -> Result<i128, Error> {
        buyer.require_auth();
        let config = get_config(&env)?;
        let product = get_product(&env, id)?;

        let now = env.ledger().timestamp();
        if !is_open(&product, now) {
            return Err(Error::ProductClosed);
        }
        let returning = has_purchased(&env, id, &buyer);
        if product.single_purchase && returning {
            return Err(Error::AlreadyClaimed);
        }

        let tokens = quote_tokens(
            &env,
            &config,
            &product,
            apply_bonus,
            discount_code,
            value,
            now,
        )?;
        if tokens == 0 {
            return Err(Error::InvalidAmount);
        }

        let new_sold = get_sold(&env, id)
            .checked_add(tokens)
            .ok_or(Error::Overflow)?;
        if new_sold > product.total_tokens {
            return Err(Error::SoldOut);
        }

        if value > 0 {
            token::Client::new(&env, &config.payment_token).transfer(
                &buyer,
                &config.beneficiary,
                &value,
            );
        }
        env.invoke_contract::<()>(
            &config.token,
            &Symbol::new(&env, "transfer"),
            (env.current_contract_address(), buyer.clone(), tokens).into_val(&env),
        );

        set_sold(&env, id, new_sold);
        if !returning {
            set_purchased(&env, id, &buyer);
            set_buyers(&env, id, get_buyers(&env, id) + 1);
        }
        if new_sold == product.total_tokens {
            log!(&env, "product sold out", id);
        }

        env.events().publish(
            (Symbol::new(&env, "purchase"), id, buyer),
            (payment_method, value, tokens),
        );
        Ok(tokens)
    }

    // === View Functions ===

    pub fn product(env: Env, id: u32) -> Result<Product, Error> {
        get_product(&env, id)
    }

    pub fn product_count(env: Env) -> u32 {
        get_product_count(&env)
    }

    pub fn product_id(env: Env, name: String) -> Option<u32> {
        get_product_id(&env, &name)
    }

    /// Get products with pagination
    /// Returns up to `limit` products starting from `start_index`
    /// Maximum limit is 50 to stay within Soroban's read entry limits
    pub fn products_paginated(env: Env, start_index: u32, limit: u32) -> Vec<Product> {
        let safe_limit = limit.min(MAX_PAGE_SIZE);
        let count = get_product_count(&env);
        let end_index = start_index.saturating_add(safe_limit).min(count);

        let mut products = Vec::new(&env);
        for id in start_index..end_index {
            if let Ok(product) = get_product(&env, id) {
                products.push_back(product);
            }
        }
        products
    }

    /// Ledger units sold by product `id`
    pub fn sold(env: Env, id: u32) -> i128 {
        get_sold(&env, id)
    }

    pub fn buyers(env: Env, id: u32) -> u32 {
        get_buyers(&env, id)
    }

    pub fn has_purchased(env: Env, id: u32, buyer: Address) -> bool {
        has_purchased(&env, id, &buyer)
    }

    pub fn discount(env: Env, code: u32) -> u32 {
        get_discount(&env, code)
    }

    pub fn config(env: Env) -> Result<VendorConfig, Error> {
        get_config(&env)
    }

    /// Ledger units a purchase of `value` would deliver right now
    ///
    /// Ignores the sale window, allocation and purchase history.
    pub fn quote(
        env: Env,
        id: u32,
        apply_bonus: bool,
        discount_code: u32,
        value: i128,
    ) -> Result<i128, Error> {
        let config = get_config(&env)?;
        let product = get_product(&env, id)?;
        quote_tokens(
            &env,
            &config,
            &product,
            apply_bonus,
            discount_code,
            value,
            env.ledger().timestamp(),
        )
    }

    // === Cost Estimates ===

    /// Footprint of `buy`, including the payment and ledger transfers
    pub fn estimate_buy(
        env: Env,
        buyer: Address,
        id: u32,
        value: i128,
    ) -> Result<CostEstimate, Error> {
        let config = get_config(&env)?;
        let product = get_product(&env, id)?;

        let returning = has_purchased(&env, id, &buyer);
        if product.single_purchase && returning {
            return Ok(price_footprint(3, 0, 0, 0));
        }

        // Config, product, purchased flag, discount, sold, buyers
        let writes = if returning { 1 } else { 3 };
        // Unit lookup and ledger transfer, plus the payment leg
        let invocations = if value > 0 { 3 } else { 2 };
        let own = price_footprint(6, writes, invocations, 1);

        let transfer: CostEstimate = env.invoke_contract(
            &config.token,
            &Symbol::new(&env, "estimate_transfer"),
            (env.current_contract_address(), buyer).into_val(&env),
        );
        let estimate = combine(&own, &transfer);

        if value > 0 {
            Ok(combine(&estimate, &price_footprint(2, 2, 0, 1)))
        } else {
            Ok(estimate)
        }
    }

    /// Footprint of `create_product`
    pub fn estimate_create_product(env: Env) -> Result<CostEstimate, Error> {
        get_config(&env)?;
        // Config, name index, count; product, name index, count
        Ok(price_footprint(3, 3, 1, 1))
    }

    /// Footprint of `quick_create_promo`; a taken name fails on the index read
    pub fn estimate_quick_create_promo(env: Env, name: String) -> Result<CostEstimate, Error> {
        get_config(&env)?;
        if get_product_id(&env, &name).is_some() {
            return Ok(price_footprint(2, 0, 0, 0));
        }
        Self::estimate_create_product(env)
    }

    /// Footprint of `set_product_active`
    pub fn estimate_set_product_active(env: Env, id: u32) -> Result<CostEstimate, Error> {
        get_config(&env)?;
        get_product(&env, id)?;
        Ok(price_footprint(2, 1, 0, 1))
    }

    /// Footprint of `set_discount`; an out-of-range percent writes nothing
    pub fn estimate_set_discount(env: Env, code: u32, percent: u32) -> Result<CostEstimate, Error> {
        get_config(&env)?;
        if percent as i128 > PERCENT_DENOMINATOR {
            return Ok(price_footprint(1, 0, 0, 0));
        }
        let existing = if get_discount(&env, code) > 0 { 1 } else { 0 };
        Ok(price_footprint(1 + existing, 1, 0, 1))
    }
}

// === Helper Functions ===

fn require_owner(env: &Env, caller: &Address) -> Result<VendorConfig, Error> {
    caller.require_auth();
    let config = get_config(env)?;
    if config.owner != *caller {
        return Err(Error::Permission);
    }
    Ok(config)
}

fn is_open(product: &Product, now: u64) -> bool {
    product.active && now >= product.start_time && now <= product.end_time
}

fn real_amount(env: &Env, token: &Address, amount: i128) -> i128 {
    env.invoke_contract(
        token,
        &Symbol::new(env, "get_real_token_amount"),
        (amount,).into_val(env),
    )
}

/// base + floor(base * (bonus + discount) / 100)
fn quote_tokens(
    env: &Env,
    config: &VendorConfig,
    product: &Product,
    apply_bonus: bool,
    discount_code: u32,
    value: i128,
    now: u64,
) -> Result<i128, Error> {
    let base = if product.price == 0 {
        if value != 0 {
            return Err(Error::InvalidAmount);
        }
        real_amount(env, &config.token, product.free_amount)
    } else {
        if value <= 0 {
            return Err(Error::InvalidAmount);
        }
        let unit = real_amount(env, &config.token, 1);
        tokens_for_price(env, value, product.price, unit)?
    };

    let bonus = if apply_bonus && product.bonus_enabled {
        bonus_percent(&product.bonus_tiers, now)
    } else {
        0
    };
    with_bonus(base, bonus + get_discount(env, discount_code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::testutils::{Address as _, Ledger};
    use soroban_sdk::token::StellarAssetClient;
    use soroban_sdk::{symbol_short, vec, Address, Env, String};
    use tge_token::{TgeToken, TgeTokenClient};
    use tge_types::BonusTier;

    const TOKEN: i128 = 1_000_000_000_000_000_000;
    const UNIT: i128 = 10_000_000;
    const START: u64 = 10_000;

    struct Harness<'a> {
        env: Env,
        owner: Address,
        beneficiary: Address,
        token: TgeTokenClient<'a>,
        vendor: TgeVendorClient<'a>,
        payment: token::Client<'a>,
        payment_admin: StellarAssetClient<'a>,
    }

    impl<'a> Harness<'a> {
        fn buyer(&self, funds: i128) -> Address {
            let buyer = Address::generate(&self.env);
            if funds > 0 {
                self.payment_admin.mint(&buyer, &funds);
            }
            buyer
        }

        fn name(&self, name: &str) -> String {
            String::from_str(&self.env, name)
        }

        /// One whole token per unit of value, 100 tokens, open for a day
        fn params(&self, name: &str) -> ProductParams {
            ProductParams {
                name: self.name(name),
                total_tokens: 100,
                price: UNIT,
                free_amount: 0,
                start_time: 0,
                duration_hours: 24,
                bonus_enabled: false,
                bonus_tiers: Vec::new(&self.env),
                single_purchase: false,
            }
        }

        fn buy(&self, buyer: &Address, id: u32, value: i128) -> i128 {
            self.vendor
                .buy(buyer, &id, &symbol_short!("card"), &false, &0, &value)
        }
    }

    /// Unlocked ledger, vendor holding 500 tokens
    fn setup<'a>(env: &Env) -> Harness<'a> {
        env.mock_all_auths();
        env.ledger().set_timestamp(START);

        let owner = Address::generate(env);
        let beneficiary = Address::generate(env);
        let token = TgeTokenClient::new(env, &env.register(TgeToken, ()));
        token.initialize(
            &owner,
            &String::from_str(env, "BCS Token"),
            &String::from_str(env, "BCS"),
            &18,
            &1000,
        );

        let payment_id = env.register_stellar_asset_contract_v2(owner.clone()).address();

        let vendor = TgeVendorClient::new(env, &env.register(TgeVendor, ()));
        vendor.initialize(
            &owner,
            &VendorParams {
                name: String::from_str(env, "BCS Store"),
                token: token.address.clone(),
                payment_token: payment_id.clone(),
                beneficiary: beneficiary.clone(),
            },
        );
        token.transfer(&owner, &vendor.address, &(500 * TOKEN));

        Harness {
            env: env.clone(),
            owner,
            beneficiary,
            token,
            vendor,
            payment: token::Client::new(env, &payment_id),
            payment_admin: StellarAssetClient::new(env, &payment_id),
        }
    }

    // === Catalog Tests ===

    #[test]
    fn test_create_product() {
        let env = Env::default();
        let h = setup(&env);

        let id = h.vendor.create_product(&h.owner, &h.params("Founder pack"));
        assert_eq!(id, 0);
        assert_eq!(h.vendor.product_count(), 1);
        assert_eq!(h.vendor.product_id(&h.name("Founder pack")), Some(0));
        assert_eq!(h.vendor.product_id(&h.name("Unknown")), None);

        let product = h.vendor.product(&id);
        assert_eq!(product.total_tokens, 100 * TOKEN);
        assert_eq!(product.start_time, START);
        assert_eq!(product.end_time, START + 24 * 3600);
        assert!(product.active);
        assert_eq!(h.vendor.sold(&id), 0);

        let second = h.vendor.create_product(&h.owner, &h.params("Second pack"));
        assert_eq!(second, 1);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let env = Env::default();
        let h = setup(&env);

        h.vendor.create_product(&h.owner, &h.params("Founder pack"));
        assert_eq!(
            h.vendor.try_create_product(&h.owner, &h.params("Founder pack")),
            Err(Ok(Error::DuplicateName))
        );
        assert_eq!(h.vendor.product_count(), 1);
    }

    #[test]
    fn test_create_product_rejects_bad_params() {
        let env = Env::default();
        let h = setup(&env);

        let cases: [fn(&mut ProductParams); 5] = [
            |p| p.total_tokens = 0,
            |p| p.price = -1,
            |p| p.duration_hours = 0,
            // Free product granting nothing
            |p| {
                p.price = 0;
                p.free_amount = 0;
            },
            |p| p.free_amount = -1,
        ];
        for mutate in cases.iter() {
            let mut params = h.params("Broken");
            mutate(&mut params);
            assert_eq!(
                h.vendor.try_create_product(&h.owner, &params),
                Err(Ok(Error::InvalidConfig))
            );
        }

        let mut unordered = h.params("Unordered");
        unordered.bonus_tiers = vec![
            &env,
            BonusTier { ends_at: START + 200, percent: 10 },
            BonusTier { ends_at: START + 100, percent: 5 },
        ];
        assert_eq!(
            h.vendor.try_create_product(&h.owner, &unordered),
            Err(Ok(Error::InvalidConfig))
        );

        let mut generous = h.params("Generous");
        generous.bonus_tiers = vec![&env, BonusTier { ends_at: START, percent: 101 }];
        assert_eq!(
            h.vendor.try_create_product(&h.owner, &generous),
            Err(Ok(Error::InvalidConfig))
        );
        assert_eq!(h.vendor.product_count(), 0);
    }

    #[test]
    fn test_catalog_management_owner_only() {
        let env = Env::default();
        let h = setup(&env);
        let stranger = Address::generate(&env);

        assert_eq!(
            h.vendor.try_create_product(&stranger, &h.params("Founder pack")),
            Err(Ok(Error::Permission))
        );
        let id = h.vendor.create_product(&h.owner, &h.params("Founder pack"));
        assert_eq!(
            h.vendor.try_set_product_active(&stranger, &id, &false),
            Err(Ok(Error::Permission))
        );
        assert_eq!(
            h.vendor.try_set_discount(&stranger, &1, &10),
            Err(Ok(Error::Permission))
        );
        assert_eq!(
            h.vendor.try_set_product_active(&h.owner, &9, &false),
            Err(Ok(Error::ProductNotFound))
        );
    }

    #[test]
    fn test_products_paginated() {
        let env = Env::default();
        let h = setup(&env);
        for name in ["One", "Two", "Three"] {
            h.vendor.create_product(&h.owner, &h.params(name));
        }

        let page = h.vendor.products_paginated(&1, &10);
        assert_eq!(page.len(), 2);
        assert_eq!(page.get(0).unwrap().name, h.name("Two"));
        assert_eq!(h.vendor.products_paginated(&0, &100).len(), 3);
        assert_eq!(h.vendor.products_paginated(&5, &10).len(), 0);
        assert_eq!(h.vendor.products_paginated(&0, &0).len(), 0);
    }

    // === Purchase Tests ===

    #[test]
    fn test_buy_paid_product() {
        let env = Env::default();
        let h = setup(&env);
        let id = h.vendor.create_product(&h.owner, &h.params("Founder pack"));
        let buyer = h.buyer(10 * UNIT);

        let tokens = h.buy(&buyer, id, 2 * UNIT);
        assert_eq!(tokens, 2 * TOKEN);
        assert_eq!(h.token.balance_of(&buyer), 2 * TOKEN);
        assert_eq!(h.token.balance_of(&h.vendor.address), 498 * TOKEN);
        assert_eq!(h.payment.balance(&h.beneficiary), 2 * UNIT);
        assert_eq!(h.vendor.sold(&id), 2 * TOKEN);
        assert!(h.vendor.has_purchased(&id, &buyer));

        assert_eq!(h.buy(&buyer, id, UNIT / 2), TOKEN / 2);
        // One base unit of value buys 10^-7 of a token
        assert_eq!(h.buy(&buyer, id, 1), TOKEN / UNIT);
        assert_eq!(h.vendor.buyers(&id), 1);
    }

    #[test]
    fn test_buy_unknown_product() {
        let env = Env::default();
        let h = setup(&env);
        let buyer = h.buyer(UNIT);

        assert_eq!(
            h.vendor
                .try_buy(&buyer, &3, &symbol_short!("card"), &false, &0, &UNIT),
            Err(Ok(Error::ProductNotFound))
        );
    }

    #[test]
    fn test_buy_rejects_bad_value() {
        let env = Env::default();
        let h = setup(&env);
        let id = h.vendor.create_product(&h.owner, &h.params("Founder pack"));
        let buyer = h.buyer(UNIT);

        assert_eq!(
            h.vendor
                .try_buy(&buyer, &id, &symbol_short!("card"), &false, &0, &0),
            Err(Ok(Error::InvalidAmount))
        );
    }

    #[test]
    fn test_bonus_follows_schedule() {
        let env = Env::default();
        let h = setup(&env);
        let mut params = h.params("Early bird");
        params.bonus_enabled = true;
        params.bonus_tiers = vec![
            &env,
            BonusTier { ends_at: START + 3600, percent: 20 },
            BonusTier { ends_at: START + 7200, percent: 10 },
        ];
        let id = h.vendor.create_product(&h.owner, &params);
        let buyer = h.buyer(10 * UNIT);
        let card = symbol_short!("card");

        assert_eq!(h.vendor.quote(&id, &false, &0, &UNIT), TOKEN);
        assert_eq!(
            h.vendor.buy(&buyer, &id, &card, &true, &0, &UNIT),
            TOKEN + TOKEN / 5
        );

        env.ledger().set_timestamp(START + 5000);
        assert_eq!(
            h.vendor.buy(&buyer, &id, &card, &true, &0, &UNIT),
            TOKEN + TOKEN / 10
        );

        env.ledger().set_timestamp(START + 7201);
        assert_eq!(h.vendor.buy(&buyer, &id, &card, &true, &0, &UNIT), TOKEN);
    }

    #[test]
    fn test_discount_codes() {
        let env = Env::default();
        let h = setup(&env);
        let id = h.vendor.create_product(&h.owner, &h.params("Founder pack"));
        let buyer = h.buyer(10 * UNIT);

        assert_eq!(
            h.vendor.try_set_discount(&h.owner, &7, &101),
            Err(Ok(Error::InvalidConfig))
        );
        h.vendor.set_discount(&h.owner, &7, &5);
        assert_eq!(h.vendor.discount(&7), 5);

        // Unknown code grants nothing
        assert_eq!(h.vendor.quote(&id, &false, &8, &UNIT), TOKEN);
        let tokens = h
            .vendor
            .buy(&buyer, &id, &symbol_short!("card"), &false, &7, &UNIT);
        assert_eq!(tokens, TOKEN + TOKEN / 20);

        h.vendor.set_discount(&h.owner, &7, &0);
        assert_eq!(h.vendor.discount(&7), 0);
    }

    #[test]
    fn test_bonus_and_discount_stack() {
        let env = Env::default();
        let h = setup(&env);
        let mut params = h.params("Stacked");
        params.bonus_enabled = true;
        params.bonus_tiers = vec![&env, BonusTier { ends_at: START + 60, percent: 20 }];
        let id = h.vendor.create_product(&h.owner, &params);
        h.vendor.set_discount(&h.owner, &1, &10);

        assert_eq!(h.vendor.quote(&id, &true, &1, &UNIT), TOKEN + TOKEN * 3 / 10);
        // Bonus needs both the product flag and the buyer's request
        assert_eq!(h.vendor.quote(&id, &false, &1, &UNIT), TOKEN + TOKEN / 10);
    }

    #[test]
    fn test_sold_out() {
        let env = Env::default();
        let h = setup(&env);
        let mut params = h.params("Limited");
        params.total_tokens = 3;
        let id = h.vendor.create_product(&h.owner, &params);
        let buyer = h.buyer(10 * UNIT);

        h.buy(&buyer, id, 2 * UNIT);
        assert_eq!(
            h.vendor
                .try_buy(&buyer, &id, &symbol_short!("card"), &false, &0, &(2 * UNIT)),
            Err(Ok(Error::SoldOut))
        );
        assert_eq!(h.buy(&buyer, id, UNIT), TOKEN);
        assert_eq!(h.vendor.sold(&id), 3 * TOKEN);
        assert_eq!(h.payment.balance(&buyer), 7 * UNIT);
    }

    #[test]
    fn test_sale_window_and_active_flag() {
        let env = Env::default();
        let h = setup(&env);
        let mut params = h.params("Later");
        params.start_time = START + 100;
        params.duration_hours = 1;
        let id = h.vendor.create_product(&h.owner, &params);
        let buyer = h.buyer(10 * UNIT);
        let card = symbol_short!("card");

        assert_eq!(
            h.vendor.try_buy(&buyer, &id, &card, &false, &0, &UNIT),
            Err(Ok(Error::ProductClosed))
        );

        env.ledger().set_timestamp(START + 100);
        h.buy(&buyer, id, UNIT);

        h.vendor.set_product_active(&h.owner, &id, &false);
        assert_eq!(
            h.vendor.try_buy(&buyer, &id, &card, &false, &0, &UNIT),
            Err(Ok(Error::ProductClosed))
        );
        h.vendor.set_product_active(&h.owner, &id, &true);

        env.ledger().set_timestamp(START + 100 + 3601);
        assert_eq!(
            h.vendor.try_buy(&buyer, &id, &card, &false, &0, &UNIT),
            Err(Ok(Error::ProductClosed))
        );
    }

    #[test]
    fn test_quick_promo() {
        let env = Env::default();
        let h = setup(&env);
        let id = h
            .vendor
            .quick_create_promo(&h.owner, &h.name("Launch gift"), &10, &2, &1);
        let product = h.vendor.product(&id);
        assert_eq!(product.price, 0);
        assert!(product.single_purchase);
        assert_eq!(product.end_time, START + 86400);

        let buyer = h.buyer(UNIT);
        let gift = symbol_short!("gift");
        assert_eq!(
            h.vendor.try_buy(&buyer, &id, &gift, &false, &0, &UNIT),
            Err(Ok(Error::InvalidAmount))
        );
        assert_eq!(h.vendor.buy(&buyer, &id, &gift, &false, &0, &0), 2 * TOKEN);
        assert_eq!(
            h.vendor.try_buy(&buyer, &id, &gift, &false, &0, &0),
            Err(Ok(Error::AlreadyClaimed))
        );
        // Nothing was charged
        assert_eq!(h.payment.balance(&buyer), UNIT);
        assert_eq!(h.payment.balance(&h.beneficiary), 0);
    }

    #[test]
    fn test_vendor_needs_lock_exemption() {
        let env = Env::default();
        let h = setup(&env);
        let id = h.vendor.create_product(&h.owner, &h.params("Founder pack"));
        let buyer = h.buyer(10 * UNIT);

        h.token.set_locked_state(&h.owner, &true);
        assert_eq!(
            h.vendor
                .try_buy(&buyer, &id, &symbol_short!("card"), &false, &0, &UNIT),
            Err(Ok(Error::Locked))
        );
        assert_eq!(h.vendor.sold(&id), 0);
        assert_eq!(h.payment.balance(&buyer), 10 * UNIT);

        h.token.allow_transfer_for(&h.owner, &h.vendor.address, &true);
        assert_eq!(h.buy(&buyer, id, UNIT), TOKEN);
    }

    // === Cost Estimate Tests ===

    #[test]
    fn test_estimates() {
        let env = Env::default();
        let h = setup(&env);
        let create = h.vendor.estimate_create_product();
        assert_eq!(h.vendor.product_count(), 0);
        assert_eq!(create.writes, 3);

        let paid = h.vendor.create_product(&h.owner, &h.params("Founder pack"));
        let free = h
            .vendor
            .quick_create_promo(&h.owner, &h.name("Launch gift"), &10, &2, &1);
        let buyer = h.buyer(UNIT);

        let paid_estimate = h.vendor.estimate_buy(&buyer, &paid, &UNIT);
        let free_estimate = h.vendor.estimate_buy(&buyer, &free, &0);
        assert!(paid_estimate.total > free_estimate.total);
        assert_eq!(h.vendor.sold(&paid), 0);

        h.vendor.buy(&buyer, &free, &symbol_short!("gift"), &false, &0, &0);
        let repeat = h.vendor.estimate_buy(&buyer, &free, &0);
        assert!(repeat.total < free_estimate.total);

        assert_eq!(
            h.vendor.try_estimate_buy(&buyer, &42, &0),
            Err(Ok(Error::ProductNotFound))
        );
    }

    #[test]
    fn test_catalog_estimates_do_not_mutate() {
        let env = Env::default();
        let h = setup(&env);

        let promo = h.vendor.estimate_quick_create_promo(&h.name("Launch gift"));
        assert_eq!(promo, h.vendor.estimate_create_product());
        assert_eq!(h.vendor.product_count(), 0);

        let id = h
            .vendor
            .quick_create_promo(&h.owner, &h.name("Launch gift"), &10, &2, &1);
        let taken = h.vendor.estimate_quick_create_promo(&h.name("Launch gift"));
        assert_eq!(taken.writes, 0);
        assert_eq!(h.vendor.product_count(), 1);

        let toggle = h.vendor.estimate_set_product_active(&id);
        assert_eq!(toggle.writes, 1);
        assert!(h.vendor.product(&id).active);
        assert_eq!(
            h.vendor.try_estimate_set_product_active(&42),
            Err(Ok(Error::ProductNotFound))
        );

        let fresh = h.vendor.estimate_set_discount(&7, &10);
        assert_eq!(fresh.writes, 1);
        assert_eq!(h.vendor.estimate_set_discount(&7, &101).writes, 0);
        assert_eq!(h.vendor.discount(&7), 0);

        h.vendor.set_discount(&h.owner, &7, &10);
        assert!(h.vendor.estimate_set_discount(&7, &0).reads > fresh.reads);
        assert_eq!(h.vendor.discount(&7), 10);
    }
}
