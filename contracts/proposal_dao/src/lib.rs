#![no_std]

//! Binary proposals put to a creator's eligible donors.
//!
//! Registration, milestone count and eligibility are read from the creator
//! registry this contract is initialized with; nothing here writes to it.
//! A proposal accepts votes until `created_at + VOTING_WINDOW_SECS` and may be
//! executed exactly once after that.

mod errors;
mod events;
mod storage;

pub use errors::ProposalError;
use events::{
    AdminChangedEvent, ProposalCreatedEvent, ProposalExecutedEvent, UpgradedEvent, VoteCastEvent,
};
use registry_interface::CreatorRegistryClient;
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};
use storage::DataKey;
pub use storage::{Proposal, ProposalStatus, MAX_PAGE_SIZE, VOTING_WINDOW_SECS};

#[contract]
pub struct ProposalDaoContract;

fn registry(env: &Env) -> Result<CreatorRegistryClient<'_>, ProposalError> {
    let address: Address = env
        .storage()
        .instance()
        .get(&DataKey::Registry)
        .ok_or(ProposalError::NotInitialized)?;
    Ok(CreatorRegistryClient::new(env, &address))
}

fn load_proposal(env: &Env, creator: &Address, index: u32) -> Result<Proposal, ProposalError> {
    storage::get_proposal(env, creator, index).ok_or(ProposalError::ProposalNotFound)
}

#[contractimpl]
impl ProposalDaoContract {
    /// Wire the DAO to an already deployed creator registry
    pub fn initialize(env: Env, admin: Address, registry: Address) -> Result<(), ProposalError> {
        // Check if already initialized
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(ProposalError::AlreadyInitialized);
        }

        // Require admin authorization
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Registry, &registry);
        storage::bump_instance(&env);

        Ok(())
    }

    /// Open a proposal for the creator's donors. Returns its index.
    pub fn create_proposal(
        env: Env,
        creator: Address,
        option1: String,
        option2: String,
    ) -> Result<u32, ProposalError> {
        let registry = registry(&env)?;
        creator.require_auth();

        // Only registered creators with a milestone may open proposals
        if !registry.is_registered(&creator) {
            return Err(ProposalError::NotRegistered);
        }
        if registry.milestone_count(&creator) == 0 {
            return Err(ProposalError::NoMilestone);
        }

        // Voting window starts now
        let index = storage::proposal_count(&env, &creator);
        let created_at = env.ledger().timestamp();
        let deadline = created_at
            .checked_add(VOTING_WINDOW_SECS)
            .ok_or(ProposalError::Overflow)?;

        storage::set_proposal(
            &env,
            &Proposal {
                index,
                creator: creator.clone(),
                option1,
                option2,
                votes_opt1: 0,
                votes_opt2: 0,
                created_at,
                deadline,
                executed: false,
                result: None,
            },
        );

        // Bump the per-creator counter
        let next = index.checked_add(1).ok_or(ProposalError::Overflow)?;
        let count_key = DataKey::ProposalCount(creator.clone());
        env.storage().persistent().set(&count_key, &next);
        storage::bump(&env, &count_key);
        storage::bump_instance(&env);

        ProposalCreatedEvent {
            creator,
            index,
            deadline,
        }
        .publish(&env);

        Ok(index)
    }

    /// Vote for `option` 0 (`option1`) or 1 (`option2`) while the proposal is active
    pub fn vote_on_proposal(
        env: Env,
        voter: Address,
        creator: Address,
        proposal_index: u32,
        option: u32,
    ) -> Result<(), ProposalError> {
        let registry = registry(&env)?;
        // Require voter authorization
        voter.require_auth();

        // Validate option
        if option > 1 {
            return Err(ProposalError::InvalidOption);
        }

        let mut proposal = load_proposal(&env, &creator, proposal_index)?;

        // Check eligibility, deadline and double voting
        if !registry.is_eligible(&creator, &voter) {
            return Err(ProposalError::NotEligible);
        }
        if env.ledger().timestamp() >= proposal.deadline {
            return Err(ProposalError::DeadlineExceeded);
        }
        if storage::has_voted(&env, &creator, proposal_index, &voter) {
            return Err(ProposalError::AlreadyVoted);
        }

        // Record the vote
        let tally = if option == 0 {
            &mut proposal.votes_opt1
        } else {
            &mut proposal.votes_opt2
        };
        *tally = tally.checked_add(1).ok_or(ProposalError::Overflow)?;
        storage::set_proposal(&env, &proposal);

        let voted_key = DataKey::Voted(creator.clone(), proposal_index, voter.clone());
        env.storage().persistent().set(&voted_key, &true);
        storage::bump(&env, &voted_key);

        VoteCastEvent {
            creator,
            voter,
            index: proposal_index,
            option,
        }
        .publish(&env);

        Ok(())
    }

    /// Seal an expired proposal and record the winning option.
    ///
    /// Only donors eligible to vote on the creator's proposals may execute.
    /// Ties resolve to `option1`.
    pub fn execute_proposal(
        env: Env,
        caller: Address,
        creator: Address,
        proposal_index: u32,
    ) -> Result<String, ProposalError> {
        let registry = registry(&env)?;
        caller.require_auth();

        let mut proposal = load_proposal(&env, &creator, proposal_index)?;

        // Only eligible donors, only after the deadline, only once
        if !registry.is_eligible(&creator, &caller) {
            return Err(ProposalError::NotEligible);
        }
        if env.ledger().timestamp() < proposal.deadline {
            return Err(ProposalError::DeadlineNotExceeded);
        }
        if proposal.executed {
            return Err(ProposalError::AlreadyExecuted);
        }

        // Seal the result
        let result = proposal.winning_option();
        proposal.executed = true;
        proposal.result = Some(result.clone());
        storage::set_proposal(&env, &proposal);

        ProposalExecutedEvent {
            creator,
            index: proposal_index,
            result: result.clone(),
            votes_opt1: proposal.votes_opt1,
            votes_opt2: proposal.votes_opt2,
        }
        .publish(&env);

        Ok(result)
    }

    pub fn get_num_proposals(env: Env, creator: Address) -> u32 {
        storage::proposal_count(&env, &creator)
    }

    pub fn get_proposal(
        env: Env,
        creator: Address,
        proposal_index: u32,
    ) -> Result<Proposal, ProposalError> {
        load_proposal(&env, &creator, proposal_index)
    }

    /// Up to `limit` proposals of a creator starting at index `start`, in
    /// creation order. `limit` is capped at [`MAX_PAGE_SIZE`].
    pub fn get_proposals(env: Env, creator: Address, start: u32, limit: u32) -> Vec<Proposal> {
        let count = storage::proposal_count(&env, &creator);
        let end = start
            .saturating_add(limit.min(MAX_PAGE_SIZE))
            .min(count);

        let mut proposals = Vec::new(&env);
        for index in start..end {
            if let Some(proposal) = storage::get_proposal(&env, &creator, index) {
                proposals.push_back(proposal);
            }
        }
        proposals
    }

    pub fn get_proposal_status(
        env: Env,
        creator: Address,
        proposal_index: u32,
    ) -> Result<ProposalStatus, ProposalError> {
        let proposal = load_proposal(&env, &creator, proposal_index)?;
        Ok(proposal.status(env.ledger().timestamp()))
    }

    pub fn has_voted(env: Env, creator: Address, proposal_index: u32, voter: Address) -> bool {
        storage::has_voted(&env, &creator, proposal_index, &voter)
    }

    /// Get the registry address this DAO reads from
    pub fn get_registry(env: Env) -> Result<Address, ProposalError> {
        env.storage()
            .instance()
            .get(&DataKey::Registry)
            .ok_or(ProposalError::NotInitialized)
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, ProposalError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(ProposalError::NotInitialized)
    }

    /// Upgrade the contract WASM to a new hash.
    ///
    /// Only the stored admin may call this. Emits [`UpgradedEvent`] on success.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), ProposalError> {
        let admin = Self::get_admin(env.clone())?;
        // Caller must be the stored admin
        if caller != admin {
            return Err(ProposalError::Unauthorized);
        }
        caller.require_auth();
        env.deployer()
            .update_current_contract_wasm(new_wasm_hash.clone());
        UpgradedEvent {
            admin: caller,
            new_wasm_hash,
        }
        .publish(&env);
        Ok(())
    }

    /// Hand the admin role to `new_admin`. Emits [`AdminChangedEvent`].
    pub fn set_admin(env: Env, current_admin: Address, new_admin: Address) -> Result<(), ProposalError> {
        let stored_admin = Self::get_admin(env.clone())?;
        // Caller must be the stored admin
        if current_admin != stored_admin {
            return Err(ProposalError::Unauthorized);
        }
        current_admin.require_auth();
        env.storage().instance().set(&DataKey::Admin, &new_admin);
        AdminChangedEvent {
            old_admin: current_admin,
            new_admin,
        }
        .publish(&env);
        Ok(())
    }
}
