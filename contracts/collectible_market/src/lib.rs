#![no_std]

mod errors;
mod events;
mod storage;
mod token;

pub use errors::MarketError;
use events::{AdminChangedEvent, CollectibleAddedEvent, CollectibleSoldEvent, UpgradedEvent};
use registry_interface::CreatorRegistryClient;
use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, String, Vec};
use storage::DataKey;
pub use storage::{Collectible, MAX_COLLECTIBLES};

#[contract]
pub struct CollectibleMarketContract;

fn instance_address(env: &Env, key: &DataKey) -> Result<Address, MarketError> {
    env.storage()
        .instance()
        .get(key)
        .ok_or(MarketError::NotInitialized)
}

#[contractimpl]
impl CollectibleMarketContract {
    /// Initialize with an admin, the creator registry and the payment token
    pub fn initialize(
        env: Env,
        admin: Address,
        registry: Address,
        token: Address,
    ) -> Result<(), MarketError> {
        // Check if already initialized
        if env.storage().instance().has(&DataKey::Admin) {
            return Err(MarketError::AlreadyInitialized);
        }

        // Require admin authorization
        admin.require_auth();

        env.storage().instance().set(&DataKey::Admin, &admin);
        env.storage().instance().set(&DataKey::Registry, &registry);
        env.storage().instance().set(&DataKey::Token, &token);
        env.storage().instance().set(&DataKey::NextTokenId, &1u64);
        storage::bump_instance(&env);

        Ok(())
    }

    /// List a collectible for sale. Returns its index in the creator's list.
    pub fn add_collectible(
        env: Env,
        creator: Address,
        uri: String,
        price: i128,
    ) -> Result<u32, MarketError> {
        let registry = CreatorRegistryClient::new(&env, &instance_address(&env, &DataKey::Registry)?);
        creator.require_auth();

        // Only registered creators list, at a positive price
        if !registry.is_registered(&creator) {
            return Err(MarketError::NotRegistered);
        }
        if price <= 0 {
            return Err(MarketError::InvalidAmount);
        }

        // Check collectible cap
        let mut collectibles = storage::get_collectibles(&env, &creator);
        if collectibles.len() >= MAX_COLLECTIBLES {
            return Err(MarketError::LimitReached);
        }

        let index = collectibles.len();
        collectibles.push_back(Collectible {
            uri,
            price,
            token_id: 0,
            owner: None,
        });
        storage::set_collectibles(&env, &creator, &collectibles);

        CollectibleAddedEvent {
            creator,
            index,
            price,
        }
        .publish(&env);

        Ok(index)
    }

    /// Buy collectible `index` of `creator`; `payment` must equal its price.
    /// The payment goes straight to the creator. Returns the minted token id.
    pub fn mint_token(
        env: Env,
        buyer: Address,
        creator: Address,
        index: u32,
        payment: i128,
    ) -> Result<u64, MarketError> {
        let token = instance_address(&env, &DataKey::Token)?;
        // Require buyer authorization
        buyer.require_auth();

        // Collectible must exist and be unsold
        let mut collectibles = storage::get_collectibles(&env, &creator);
        let mut collectible = collectibles
            .get(index)
            .filter(|collectible| collectible.owner.is_none())
            .ok_or(MarketError::CollectibleNotAvailable)?;

        // Payment must match the listed price exactly
        if payment != collectible.price {
            return Err(MarketError::PriceMismatch);
        }

        // Allocate the token id
        let token_id: u64 = env
            .storage()
            .instance()
            .get(&DataKey::NextTokenId)
            .ok_or(MarketError::NotInitialized)?;
        let next_id = token_id.checked_add(1).ok_or(MarketError::Overflow)?;
        env.storage().instance().set(&DataKey::NextTokenId, &next_id);
        storage::bump_instance(&env);

        // Record ownership
        collectible.token_id = token_id;
        collectible.owner = Some(buyer.clone());
        collectibles.set(index, collectible);
        storage::set_collectibles(&env, &creator, &collectibles);

        let owner_key = DataKey::Owner(token_id);
        env.storage().persistent().set(&owner_key, &buyer);
        storage::bump(&env, &owner_key);

        // Transfer payment from buyer straight to creator
        token::transfer(&env, &token, &buyer, &creator, &payment);

        CollectibleSoldEvent {
            creator,
            buyer,
            index,
            token_id,
            price: payment,
        }
        .publish(&env);

        Ok(token_id)
    }

    pub fn get_collectible_at(env: Env, creator: Address, index: u32) -> Option<Collectible> {
        storage::get_collectibles(&env, &creator).get(index)
    }

    pub fn get_collectibles(env: Env, creator: Address) -> Vec<Collectible> {
        storage::get_collectibles(&env, &creator)
    }

    pub fn get_collectible_count(env: Env, creator: Address) -> u32 {
        storage::get_collectibles(&env, &creator).len()
    }

    pub fn owner_of(env: Env, token_id: u64) -> Option<Address> {
        env.storage().persistent().get(&DataKey::Owner(token_id))
    }

    /// Get admin address
    pub fn get_admin(env: Env) -> Result<Address, MarketError> {
        instance_address(&env, &DataKey::Admin)
    }

    /// Upgrade the contract WASM to a new hash.
    ///
    /// Only the stored admin may call this. Emits [`UpgradedEvent`] on success.
    pub fn upgrade(env: Env, caller: Address, new_wasm_hash: BytesN<32>) -> Result<(), MarketError> {
        let admin = instance_address(&env, &DataKey::Admin)?;
        // Caller must be the stored admin
        if caller != admin {
            return Err(MarketError::Unauthorized);
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
    pub fn set_admin(env: Env, current_admin: Address, new_admin: Address) -> Result<(), MarketError> {
        let stored_admin = instance_address(&env, &DataKey::Admin)?;
        // Caller must be the stored admin
        if current_admin != stored_admin {
            return Err(MarketError::Unauthorized);
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
