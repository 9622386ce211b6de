use soroban_sdk::{contractevent, Address, BytesN, String};

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CreatorRegisteredEvent {
    #[topic]
    pub creator: Address,
    pub name: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProfileUpdatedEvent {
    #[topic]
    pub creator: Address,
    pub name: String,
    pub pic: String,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DonationEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub donor: Address,
    pub amount: i128,
    pub total_donated: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    #[topic]
    pub creator: Address,
    pub amount: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MilestoneMintedEvent {
    #[topic]
    pub creator: Address,
    pub index: u32,
    pub badge_id: u64,
    pub price: i128,
}

#[contractevent]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EligibilityClaimedEvent {
    #[topic]
    pub creator: Address,
    #[topic]
    pub donor: Address,
    pub index: u32,
    pub token_id: u64,
}

/// Emitted when the contract WASM is upgraded to a new hash.
#[contractevent]
pub struct UpgradedEvent {
    #[topic]
    pub admin: Address,
    pub new_wasm_hash: BytesN<32>,
}

/// Emitted when the admin role is transferred to a new address.
#[contractevent]
pub struct AdminChangedEvent {
    #[topic]
    pub old_admin: Address,
    pub new_admin: Address,
}
