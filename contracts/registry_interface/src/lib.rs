#![no_std]

//! Read-only view of the creator registry shared by the contracts that gate on it.
//!
//! The registry contract exports these functions with the same names and
//! signatures; dependents only ever build a [`CreatorRegistryClient`] against the
//! registry address they were initialized with.

use soroban_sdk::{contractclient, Address, Env};

#[contractclient(name = "CreatorRegistryClient")]
pub trait CreatorRegistryInterface {
    /// Whether `creator` has a registered profile.
    fn is_registered(env: Env, creator: Address) -> bool;

    /// Whether `donor` has claimed at least one of `creator`'s milestones.
    fn is_eligible(env: Env, creator: Address, donor: Address) -> bool;

    /// Number of milestones `creator` has minted (0 when unregistered).
    fn milestone_count(env: Env, creator: Address) -> u32;

    /// Price threshold of milestone `index`, if it exists.
    fn milestone_price(env: Env, creator: Address, index: u32) -> Option<i128>;
}
