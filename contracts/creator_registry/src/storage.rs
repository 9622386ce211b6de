use soroban_sdk::{contracttype, Address, Env, String, Vec};

/// Milestones a single creator may issue.
pub const MAX_MILESTONES: u32 = 5;

/// ~30 days of ledgers at 5s per ledger.
pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;
pub const PERSISTENT_BUMP_THRESHOLD: u32 = PERSISTENT_BUMP_LEDGERS - 17_280;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,                          // -> Address
    Token,                          // -> Address (payment token)
    NextTokenId,                    // -> u64
    Creator(Address),               // -> CreatorData
    Donation(Address, Address),     // (creator, donor) -> i128
    DonatorsCount(Address),         // creator -> u32
    Claim(Address, u32, Address),   // (creator, milestone_index, donor) -> bool
    Balance(u64, Address),          // (token_id, holder) -> u32
    TokenUri(u64),                  // token_id -> String
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Milestone {
    pub uri: String,
    pub price: i128,
    pub badge_id: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatorData {
    pub address: Address,
    pub name: String,
    pub pic: String,
    pub funds: i128,
    pub total_raised: i128,
    pub total_withdrawn: i128,
    pub milestones: Vec<Milestone>,
    pub registered_at: u64,
}

pub fn get_creator(env: &Env, creator: &Address) -> Option<CreatorData> {
    env.storage()
        .persistent()
        .get(&DataKey::Creator(creator.clone()))
}

pub fn set_creator(env: &Env, data: &CreatorData) {
    let key = DataKey::Creator(data.address.clone());
    env.storage().persistent().set(&key, data);
    bump(env, &key);
}

pub fn donation_of(env: &Env, creator: &Address, donor: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Donation(creator.clone(), donor.clone()))
        .unwrap_or(0)
}

pub fn has_claimed(env: &Env, creator: &Address, index: u32, donor: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Claim(creator.clone(), index, donor.clone()))
        .unwrap_or(false)
}

pub fn balance_of(env: &Env, token_id: u64, holder: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(token_id, holder.clone()))
        .unwrap_or(0)
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
