use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum MarketError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotRegistered = 4,
    InvalidAmount = 5,
    LimitReached = 6,
    CollectibleNotAvailable = 7,
    PriceMismatch = 8,
    Overflow = 9,
}
