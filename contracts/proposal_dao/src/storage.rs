use soroban_sdk::{contracttype, Address, Env, String};

/// Seconds a proposal stays open for voting after creation.
pub const VOTING_WINDOW_SECS: u64 = 1800;

/// Most proposals returned by one `get_proposals` page
pub const MAX_PAGE_SIZE: u32 = 50;

pub const PERSISTENT_BUMP_LEDGERS: u32 = 518_400;
pub const PERSISTENT_BUMP_THRESHOLD: u32 = PERSISTENT_BUMP_LEDGERS - 17_280;

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Admin,                            // -> Address
    Registry,                         // -> Address
    ProposalCount(Address),           // creator -> u32
    Proposal(Address, u32),           // (creator, index) -> Proposal
    Voted(Address, u32, Address),     // (creator, index, voter) -> bool
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Proposal {
    pub index: u32,
    pub creator: Address,
    pub option1: String,
    pub option2: String,
    pub votes_opt1: u32,
    pub votes_opt2: u32,
    pub created_at: u64,
    pub deadline: u64,
    pub executed: bool,
    pub result: Option<String>,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ProposalStatus {
    Active,
    ExpiredUnexecuted,
    Executed,
}

impl Proposal {
    pub fn status(&self, now: u64) -> ProposalStatus {
        if self.executed {
            ProposalStatus::Executed
        } else if now < self.deadline {
            ProposalStatus::Active
        } else {
            ProposalStatus::ExpiredUnexecuted
        }
    }

    /// Option with the strictly higher tally; a tie resolves to `option1`.
    pub fn winning_option(&self) -> String {
        if self.votes_opt2 > self.votes_opt1 {
            self.option2.clone()
        } else {
            self.option1.clone()
        }
    }
}

pub fn proposal_count(env: &Env, creator: &Address) -> u32 {
    env.storage()
        .persistent()
        .get(&DataKey::ProposalCount(creator.clone()))
        .unwrap_or(0)
}

pub fn get_proposal(env: &Env, creator: &Address, index: u32) -> Option<Proposal> {
    env.storage()
        .persistent()
        .get(&DataKey::Proposal(creator.clone(), index))
}

pub fn set_proposal(env: &Env, proposal: &Proposal) {
    let key = DataKey::Proposal(proposal.creator.clone(), proposal.index);
    env.storage().persistent().set(&key, proposal);
    bump(env, &key);
}

pub fn has_voted(env: &Env, creator: &Address, index: u32, voter: &Address) -> bool {
    env.storage()
        .persistent()
        .get(&DataKey::Voted(creator.clone(), index, voter.clone()))
        .unwrap_or(false)
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
