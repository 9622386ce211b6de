use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CreatorRegistryError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    AlreadyRegistered = 4,
    NotRegistered = 5,
    InvalidAmount = 6,
    NoFunds = 7,
    LimitReached = 8,
    MilestoneNotFound = 9,
    NotEligible = 10,
    AlreadyClaimed = 11,
    Overflow = 12,
}
