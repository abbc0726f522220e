use soroban_sdk::{contracttype, Address, Env, String};
use tge_types::{Error, Product, VendorConfig};

// ============================================================================
// SOROBAN RESOURCE LIMITS - Catalog layout:
// ============================================================================
// - Products are indexed entries (ProductAt(i) + ProductCount) so the
//   catalog grows without any entry growing
// - Per-product counters and purchase flags are separate entries; a purchase
//   never rewrites the product record itself
// - Paginated reads are capped at MAX_PAGE_SIZE entries
// ============================================================================

/// Storage keys for the vendor contract
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Vendor configuration (Instance storage)
    Config,
    /// Number of products created (Instance storage)
    ProductCount,
    /// Product record by id (Persistent storage)
    ProductAt(u32),
    /// Product name -> id (Persistent storage)
    ProductByName(String),
    /// Ledger units sold by a product (Persistent storage)
    ProductSold(u32),
    /// Distinct buyers of a product (Persistent storage)
    ProductBuyers(u32),
    /// (product id, buyer) already purchased (Persistent storage)
    Purchased(u32, Address),
    /// Discount code -> percent (Persistent storage)
    Discount(u32),
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

pub fn get_config(env: &Env) -> Result<VendorConfig, Error> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &VendorConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

// === Products ===

pub fn get_product_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ProductCount)
        .unwrap_or(0)
}

pub fn get_product(env: &Env, id: u32) -> Result<Product, Error> {
    let key = DataKey::ProductAt(id);
    let product = env
        .storage()
        .persistent()
        .get(&key)
        .ok_or(Error::ProductNotFound)?;
    extend_persistent_ttl(env, &key);
    Ok(product)
}

pub fn set_product(env: &Env, id: u32, product: &Product) {
    let key = DataKey::ProductAt(id);
    env.storage().persistent().set(&key, product);
    extend_persistent_ttl(env, &key);
}

/// Append a product and index its name, returning the new id
pub fn push_product(env: &Env, product: &Product) -> u32 {
    let id = get_product_count(env);
    set_product(env, id, product);

    let name_key = DataKey::ProductByName(product.name.clone());
    env.storage().persistent().set(&name_key, &id);
    extend_persistent_ttl(env, &name_key);

    env.storage()
        .instance()
        .set(&DataKey::ProductCount, &(id + 1));
    id
}

pub fn get_product_id(env: &Env, name: &String) -> Option<u32> {
    env.storage()
        .persistent()
        .get(&DataKey::ProductByName(name.clone()))
}

// === Sales counters ===

pub fn get_sold(env: &Env, id: u32) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::ProductSold(id))
        .unwrap_or(0)
}

pub fn set_sold(env: &Env, id: u32, sold: i128) {
    let key = DataKey::ProductSold(id);
    env.storage().persistent().set(&key, &sold);
    extend_persistent_ttl(env, &key);
}

pub fn get_buyers(env: &Env, id: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ProductBuyers(id))
        .unwrap_or(0)
}

pub fn set_buyers(env: &Env, id: u32, buyers: u32) {
    let key = DataKey::ProductBuyers(id);
    env.storage().persistent().set(&key, &buyers);
    extend_persistent_ttl(env, &key);
}

pub fn has_purchased(env: &Env, id: u32, buyer: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Purchased(id, buyer.clone()))
}

pub fn set_purchased(env: &Env, id: u32, buyer: &Address) {
    let key = DataKey::Purchased(id, buyer.clone());
    env.storage().persistent().set(&key, &true);
    extend_persistent_ttl(env, &key);
}

// === Discounts ===

pub fn get_discount(env: &Env, code: u32) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Discount(code))
        .unwrap_or(0)
}

pub fn set_discount(env: &Env, code: u32, percent: u32) {
    let key = DataKey::Discount(code);
    if percent == 0 {
        env.storage().persistent().remove(&key);
    } else {
        env.storage().persistent().set(&key, &percent);
        extend_persistent_ttl(env, &key);
    }
}
