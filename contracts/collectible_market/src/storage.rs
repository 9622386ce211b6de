use soroban_sdk::{contracttype, Address, Env, String, Vec};

/// Collectibles a single creator may list.
pub const MAX_COLLECTIBLES: u32 = 10;

pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;
pub const PERSISTENT_BUMP_THRESHOLD: u32 = PERSISTENT_BUMP_LEDGERS - 17_280;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,                 // -> Address
    Registry,              // -> Address
    Token,                 // -> Address (payment token)
    NextTokenId,           // -> u64
    Collectibles(Address), // creator -> Vec<Collectible>
    Owner(u64),            // token_id -> Address
}

/// A listed item. `token_id` is 0 and `owner` is `None` until it is sold.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collectible {
    pub uri: String,
    pub price: i128,
    pub token_id: u64,
    pub owner: Option<Address>,
}

pub fn get_collectibles(env: &Env, creator: &Address) -> Vec<Collectible> {
    env.storage()
        .persistent()
        .get(&DataKey::Collectibles(creator.clone()))
        .unwrap_or_else(|| Vec::new(env))
}

pub fn set_collectibles(env: &Env, creator: &Address, collectibles: &Vec<Collectible>) {
    let key = DataKey::Collectibles(creator.clone());
    env.storage().persistent().set(&key, collectibles);
    bump(env, &key);
}

pub fn bump(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_BUMP_THRESHOLD, PERSISTENT_BUMP_LEDGERS);
}

pub fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(PERSISTENT_BUMP_THRESHOLD, PERSISTENT_BUMP_LEDGERS);
}
