use soroban_sdk::{contracttype, Address, Env};
use tge_types::Error;

/// Storage keys for the restriction formula
#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    /// Owner and limits (Instance storage)
    Config,
    /// Distinct participants registered so far (Instance storage)
    ParticipantCount,
    /// Value-to-token formula contract (Instance storage)
    Formula,
    /// Participant already counted (Persistent storage)
    Participant(Address),
    /// Address allowed to register participants (Persistent storage)
    Manager(Address),
    /// Tokens reserved for a participant (Persistent storage)
    Reserved(Address),
}

/// Participation limits - immutable after initialization
#[contracttype]
#[derive(Clone, Debug)]
pub struct RestrictionConfig {
    pub owner: Address,
    /// Smallest accepted contribution in payment base units
    pub min_contribution: i128,
    pub max_participants: u32,
}

const INSTANCE_TTL_THRESHOLD: u32 = 17280;
const INSTANCE_TTL_EXTEND: u32 = 518400;
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

pub fn get_config(env: &Env) -> Result<RestrictionConfig, Error> {
    extend_instance_ttl(env);
    env.storage()
        .instance()
        .get(&DataKey::Config)
        .ok_or(Error::NotInitialized)
}

pub fn set_config(env: &Env, config: &RestrictionConfig) {
    env.storage().instance().set(&DataKey::Config, config);
    extend_instance_ttl(env);
}

pub fn get_participant_count(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&DataKey::ParticipantCount)
        .unwrap_or(0)
}

pub fn set_participant_count(env: &Env, count: u32) {
    env.storage()
        .instance()
        .set(&DataKey::ParticipantCount, &count);
}

pub fn get_formula(env: &Env) -> Option<Address> {
    env.storage().instance().get(&DataKey::Formula)
}

pub fn set_formula(env: &Env, formula: &Address) {
    env.storage().instance().set(&DataKey::Formula, formula);
}

// === Participants and managers ===

pub fn is_participant(env: &Env, participant: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Participant(participant.clone()))
}

pub fn add_participant(env: &Env, participant: &Address) {
    let key = DataKey::Participant(participant.clone());
    env.storage().persistent().set(&key, &true);
    extend_persistent_ttl(env, &key);
}

pub fn is_manager(env: &Env, manager: &Address) -> bool {
    env.storage()
        .persistent()
        .has(&DataKey::Manager(manager.clone()))
}

pub fn set_manager(env: &Env, manager: &Address, allowed: bool) {
    let key = DataKey::Manager(manager.clone());
    if allowed {
        env.storage().persistent().set(&key, &true);
        extend_persistent_ttl(env, &key);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// === Reservations ===

pub fn get_reserved(env: &Env, participant: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Reserved(participant.clone()))
        .unwrap_or(0)
}

pub fn set_reserved(env: &Env, participant: &Address, amount: i128) {
    let key = DataKey::Reserved(participant.clone());
    env.storage().persistent().set(&key, &amount);
    extend_persistent_ttl(env, &key);
}
