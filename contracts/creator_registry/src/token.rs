use soroban_sdk::{token::TokenClient, Address, Env};

/// Move `amount` of `token` between two accounts. `from` must have authorized the
/// call unless it is this contract.
pub fn transfer(env: &Env, token: &Address, from: &Address, to: &Address, amount: &i128) {
    TokenClient::new(env, token).transfer(from, to, amount);
}
