use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ProposalError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    NotRegistered = 4,
    NoMilestone = 5,
    ProposalNotFound = 6,
    NotEligible = 7,
    DeadlineExceeded = 8,
    DeadlineNotExceeded = 9,
    AlreadyVoted = 10,
    AlreadyExecuted = 11,
    InvalidOption = 12,
    Overflow = 13,
}
