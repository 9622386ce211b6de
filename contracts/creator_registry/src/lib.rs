#![no_std]

mod errors;
mod events;
mod storage;
mod token;

pub use errors::CreatorRegistryError;
use events::{
    AdminChangedEvent, CreatorRegisteredEvent, DonationEvent, EligibilityClaimedEvent,
    MilestoneMintedEvent, ProfileUpdatedEvent, UpgradedEvent, WithdrawEvent,
};
use soroban_sdk::{contract, contractimpl, log, Address, BytesN, Env, String, Vec};
pub use storage::{CreatorData, Milestone, MAX_MILESTONES};
use storage::DataKey;

#[contract]
pub struct CreatorRegistryContract;

fn payment_token(env: &Env) -> Result<Address, CreatorRegistryError> {
    env.storage()
        .instance()
        .get(&DataKey::Token)
        .ok_or(CreatorRegistryError::NotInitialized)
}

fn require_creator(env: &Env, creator: &Address) -> Result<CreatorData, CreatorRegistryError> {
    storage::get_creator(env, creator).ok_or(CreatorRegistryError::NotRegistered)
}

/// Credit one unit of `token_id` to `holder`.
fn mint_unit(env: &Env, token_id: u64, holder: &Address) -> Result<(), CreatorRegistryError> {
    let balance = storage::balance_of(env, token_id, holder)
        .checked_add(1)
        .ok_or(CreatorRegistryError::Overflow)?;
    let key = DataKey::Balance(token_id, holder.clone());
    env.storage().persistent().set(&key, &balance);
    storage::bump(env, &key);
    Ok(())
}

#[contractimpl]
impl CreatorRegistryContract {
    /// Initialize the registry with an admin and the token accepted for donations
    pub fn initialize(env: Env, admin: Address, token: Address) -> Result<(), CreatorRegistryError> {
        // Check if already initialized
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(CreatorRegistryError::AlreadyInitialized);
        }

        // Require admin authorization
        admin.require_auth();

        // Store admin and payment token, token ids start at 1
        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::NextTokenId, &1u64);
        storage::bump_instance(&env);

        Ok(())
    }

    /// Register the caller as a creator
    pub fn register(
        env: Env,
        creator: Address,
        name: String,
        pic: String,
    ) -> Result<(), CreatorRegistryError> {
        creator.require_auth();

        // One profile per address
        if storage::get_creator(&env, &creator).is_some() {
            return Err(CreatorRegistryError::AlreadyRegistered);
        }

        let data = CreatorData {
            address: creator.clone(),
            name: name.clone(),
            pic,
            funds: 0,
            total_raised: 0,
            total_withdrawn: 0,
            milestones: Vec::new(&env),
            registered_at: env.ledger().timestamp(),
        };
        storage::set_creator(&env, &data);

        CreatorRegisteredEvent { creator, name }.publish(&env);
        Ok(())
    }

    /// Overwrite the name and picture of a registered creator
    pub fn update_profile(
        env: Env,
        creator: Address,
        name: String,
        pic: String,
    ) -> Result<(), CreatorRegistryError> {
        creator.require_auth();

        let mut data = require_creator(&env, &creator)?;
        data.name = name.clone();
        data.pic = pic.clone();
        storage::set_creator(&env, &data);

        ProfileUpdatedEvent { creator, name, pic }.publish(&env);
        Ok(())
    }

    /// Donate `amount` of the payment token to a registered creator
    pub fn donate(
        env: Env,
        donor: Address,
        creator: Address,
        amount: i128,
    ) -> Result<(), CreatorRegistryError> {
        // Require donor authorization
        donor.require_auth();

        // Validate amount
        if amount <= 0 {
            return Err(CreatorRegistryError::InvalidAmount);
        }

        let mut data = require_creator(&env, &creator)?;
        let token = payment_token(&env)?;

        // Transfer tokens from donor to contract
        token::transfer(&env, &token, &donor, &env.current_contract_address(), &amount);

        data.funds = data
            .funds
            .checked_add(amount)
            .ok_or(CreatorRegistryError::Overflow)?;
        data.total_raised = data
            .total_raised
            .checked_add(amount)
            .ok_or(CreatorRegistryError::Overflow)?;
        storage::set_creator(&env, &data);

        // First donation from this donor counts them
        let previous = storage::donation_of(&env, &creator, &donor);
        if previous == 0 {
            let count_key = DataKey::DonatorsCount(creator.clone());
            let count: u32 = env.storage().persistent().get(&count_key).unwrap_or(0);
            let count = count
                .checked_add(1)
                .ok_or(CreatorRegistryError::Overflow)?;
            env.storage().persistent().set(&count_key, &count);
            storage::bump(&env, &count_key);
        }

        // Cumulative donation drives eligibility
        let total_donated = previous
            .checked_add(amount)
            .ok_or(CreatorRegistryError::Overflow)?;
        let donation_key = DataKey::Donation(creator.clone(), donor.clone());
        env.storage().persistent().set(&donation_key, &total_donated);
        storage::bump(&env, &donation_key);
        storage::bump_instance(&env);

        log!(&env, "donation received", amount, total_donated);
        DonationEvent {
            creator,
            donor,
            amount,
            total_donated,
        }
        .publish(&env);

        Ok(())
    }

    /// Withdraw the creator's whole balance.
    ///
    /// The zeroed balance is written before the token leaves the contract, so a
    /// second withdrawal can only succeed after new donations arrive.
    pub fn withdraw_funds(env: Env, creator: Address) -> Result<i128, CreatorRegistryError> {
        creator.require_auth();

        let mut data = require_creator(&env, &creator)?;
        if data.funds == 0 {
            return Err(CreatorRegistryError::NoFunds);
        }
        let token = payment_token(&env)?;

        // Clear the balance first
        let amount = data.funds;
        data.funds = 0;
        data.total_withdrawn = data
            .total_withdrawn
            .checked_add(amount)
            .ok_or(CreatorRegistryError::Overflow)?;
        storage::set_creator(&env, &data);

        // Transfer tokens from contract to creator
        token::transfer(&env, &token, &env.current_contract_address(), &creator, &amount);

        log!(&env, "funds withdrawn", amount);
        WithdrawEvent { creator, amount }.publish(&env);

        Ok(amount)
    }

    /// Append a milestone and credit its badge to the creator. Returns the badge id.
    pub fn mint_milestone(
        env: Env,
        creator: Address,
        uri: String,
        price: i128,
    ) -> Result<u64, CreatorRegistryError> {
        creator.require_auth();

        let mut data = require_creator(&env, &creator)?;

        // Validate price
        if price <= 0 {
            return Err(CreatorRegistryError::InvalidAmount);
        }

        // Check milestone cap
        if data.milestones.len() >= MAX_MILESTONES {
            return Err(CreatorRegistryError::LimitReached);
        }

        // Allocate the badge id
        let badge_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .ok_or(CreatorRegistryError::NotInitialized)?;
        let next_id = badge_id
            .checked_add(1)
            .ok_or(CreatorRegistryError::Overflow)?;
        env.storage().instance().set(&DataKey::NextTokenId, &next_id);
        storage::bump_instance(&env);

        let uri_key = DataKey::TokenUri(badge_id);
        env.storage().persistent().set(&uri_key, &uri);
        storage::bump(&env, &uri_key);

        // Append milestone and credit the badge to the creator
        let index = data.milestones.len();
        data.milestones.push_back(Milestone {
            uri,
            price,
            badge_id,
        });
        storage::set_creator(&env, &data);
        mint_unit(&env, badge_id, &creator)?;

        MilestoneMintedEvent {
            creator,
            index,
            badge_id,
            price,
        }
        .publish(&env);

        Ok(badge_id)
    }

    /// Claim the eligibility token of a milestone whose price the donor's
    /// cumulative donation has reached. Returns the token id.
    pub fn claim_eligibility(
        env: Env,
        donor: Address,
        creator: Address,
        milestone_index: u32,
    ) -> Result<u64, CreatorRegistryError> {
        donor.require_auth();

        let data = require_creator(&env, &creator)?;
        let milestone = data
            .milestones
            .get(milestone_index)
            .ok_or(CreatorRegistryError::MilestoneNotFound)?;

        // Cumulative donation must reach the milestone price
        if storage::donation_of(&env, &creator, &donor) < milestone.price {
            return Err(CreatorRegistryError::NotEligible);
        }
        if storage::has_claimed(&env, &creator, milestone_index, &donor) {
            return Err(CreatorRegistryError::AlreadyClaimed);
        }

        // Record the claim and mint the eligibility token
        let claim_key = DataKey::Claim(creator.clone(), milestone_index, donor.clone());
        env.storage().persistent().set(&claim_key, &true);
        storage::bump(&env, &claim_key);
        mint_unit(&env, milestone.badge_id, &donor)?;

        EligibilityClaimedEvent {
            creator,
            donor,
            index: milestone_index,
            token_id: milestone.badge_id,
        }
        .publish(&env);

        Ok(milestone.badge_id)
    }

    pub fn is_registered(env: Env, creator: Address) -> bool {
        env.storage()
            .persistent()
            .has(&DataKey::Creator(creator))
    }

    /// Whether `donor` holds an eligibility token for any of `creator`'s milestones
    pub fn is_eligible(env: Env, creator: Address, donor: Address) -> bool {
        let count = Self::milestone_count(env.clone(), creator.clone());
        (0..count).any(|index| storage::has_claimed(&env, &creator, index, &donor))
    }

    pub fn milestone_count(env: Env, creator: Address) -> u32 {
        storage::get_creator(&env, &creator)
            .map(|data| data.milestones.len())
            .unwrap_or(0)
    }

    pub fn milestone_price(env: Env, creator: Address, index: u32) -> Option<i128> {
        storage::get_creator(&env, &creator)
            .and_then(|data| data.milestones.get(index))
            .map(|milestone| milestone.price)
    }

    /// Get creator profile data
    pub fn get_creator(env: Env, creator: Address) -> Result<CreatorData, CreatorRegistryError> {
        require_creator(&env, &creator)
    }

    pub fn get_milestones(env: Env, creator: Address) -> Result<Vec<Milestone>, CreatorRegistryError> {
        Ok(require_creator(&env, &creator)?.milestones)
    }

    /// Withdrawable balance of a creator
    pub fn get_funds(env: Env, creator: Address) -> Result<i128, CreatorRegistryError> {
        Ok(require_creator(&env, &creator)?.funds)
    }

    /// Number of distinct donors a creator has received funds from
    pub fn get_donators_count(env: Env, creator: Address) -> u32 {
        env.storage()
            .persistent()
            .get(&DataKey::DonatorsCount(creator))
            .unwrap_or(0)
    }

    /// Cumulative amount `donor` has given to `creator`
    pub fn get_donation(env: Env, creator: Address, donor: Address) -> i128 {
        storage::donation_of(&env, &creator, &donor)
    }

    pub fn has_claimed(env: Env, creator: Address, milestone_index: u32, donor: Address) -> bool {
        storage::has_claimed(&env, &creator, milestone_index, &donor)
    }

    /// Token id backing milestone `milestone_index` of `creator`
    pub fn get_token_id(
        env: Env,
        creator: Address,
        milestone_index: u32,
    ) -> Result<u64, CreatorRegistryError> {
        require_creator(&env, &creator)?
            .milestones
            .get(milestone_index)
            .map(|milestone| milestone.badge_id)
            .ok_or(CreatorRegistryError::MilestoneNotFound)
    }

    pub fn balance_of(env: Env, holder: Address, token_id: u64) -> u32 {
        storage::balance_of(&env, token_id, &holder)
    }

    pub fn token_uri(env: Env, token_id: u64) -> Option<String> {
        env.storage().persistent().get(&DataKey::TokenUri(token_id))
    }

    /// Get the payment token address
    pub fn get_token(env: Env) -> Result<Address, CreatorRegistryError> {
        payment_token(&env)
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, CreatorRegistryError> {
        env.storage()
            .instance()
            .get(&DataKey::Admin)
            .ok_or(CreatorRegistryError::NotInitialized)
    }

    /// Upgrade the contract WASM to a new hash.
    ///
    /// Only the stored admin may call this. Emits [`UpgradedEvent`] on success.
    pub fn upgrade(
        env: Env,
        caller: Address,
        new_wasm_hash: BytesN<32>,
    ) -> Result<(), CreatorRegistryError> {
        let admin = Self::get_admin(env.clone())?;
        // Caller must be the stored admin
        if caller != admin {
            return Err(CreatorRegistryError::Unauthorized);
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
    pub fn set_admin(
        env: Env,
        current_admin: Address,
        new_admin: Address,
    ) -> Result<(), CreatorRegistryError> {
        let stored_admin = Self::get_admin(env.clone())?;
        // Caller must be the stored admin
        if current_admin != stored_admin {
            return Err(CreatorRegistryError::Unauthorized);
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
