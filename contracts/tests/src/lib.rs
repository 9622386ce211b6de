#![cfg(test)]
extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Ledger},
    token::{StellarAssetClient, TokenClient},
    Address, Env, String,
};

use collectible_market::{CollectibleMarketContract, CollectibleMarketContractClient as MarketClient};
use creator_registry::{
    CreatorRegistryContract, CreatorRegistryContractClient as RegistryClient, CreatorRegistryError,
};
use proposal_dao::{
    ProposalDaoContract, ProposalDaoContractClient as DaoClient, ProposalError, ProposalStatus,
    VOTING_WINDOW_SECS,
};
use registry_interface::CreatorRegistryClient;

const PRICE: i128 = 2_000_000;

struct Protocol<'a> {
    env: Env,
    token: TokenClient<'a>,
    token_admin: StellarAssetClient<'a>,
    registry: RegistryClient<'a>,
    dao: DaoClient<'a>,
    market: MarketClient<'a>,
}

/// Deploys the registry first, then the DAO and the market wired to it.
fn deploy<'a>() -> Protocol<'a> {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(1_700_000_000);

    let admin = Address::generate(&env);
    let token_id = env.register_stellar_asset_contract_v2(admin.clone()).address();

    let registry_id = env.register(CreatorRegistryContract, ());
    let dao_id = env.register(ProposalDaoContract, ());
    let market_id = env.register(CollectibleMarketContract, ());

    let registry = RegistryClient::new(&env, &registry_id);
    let dao = DaoClient::new(&env, &dao_id);
    let market = MarketClient::new(&env, &market_id);

    registry.initialize(&admin, &token_id);
    dao.initialize(&admin, &registry_id);
    market.initialize(&admin, &registry_id, &token_id);

    Protocol {
        token: TokenClient::new(&env, &token_id),
        token_admin: StellarAssetClient::new(&env, &token_id),
        registry,
        dao,
        market,
        env,
    }
}

impl Protocol<'_> {
    fn text(&self, value: &str) -> String {
        String::from_str(&self.env, value)
    }

    fn funded_account(&self, amount: i128) -> Address {
        let account = Address::generate(&self.env);
        self.token_admin.mint(&account, &amount);
        account
    }
}

#[test]
fn test_creator_proposal_lifecycle() {
    let p = deploy();
    let creator = Address::generate(&p.env);
    let donor = p.funded_account(PRICE);

    // Scenario A: register, mint a milestone, open a proposal
    p.registry.register(&creator, &p.text("N"), &p.text("P"));
    p.registry.mint_milestone(&creator, &p.text("ipfs://milestone"), &PRICE);
    p.dao.create_proposal(&creator, &p.text("A"), &p.text("B"));

    assert_eq!(p.dao.get_num_proposals(&creator), 1);
    assert_eq!(p.dao.get_proposal(&creator, &0).option1, p.text("A"));

    // Scenario B: donate exactly the threshold, claim, vote for the first option
    p.registry.donate(&donor, &creator, &PRICE);
    p.registry.claim_eligibility(&donor, &creator, &0);
    p.dao.vote_on_proposal(&donor, &creator, &0, &0);

    let proposal = p.dao.get_proposal(&creator, &0);
    assert_eq!(proposal.votes_opt1, 1);
    assert_eq!(proposal.votes_opt2, 0);

    // Scenario C: execute once after the window closes
    let created_at = proposal.created_at;
    p.env
        .ledger()
        .set_timestamp(created_at + VOTING_WINDOW_SECS + 1);
    assert_eq!(
        p.dao.get_proposal_status(&creator, &0),
        ProposalStatus::ExpiredUnexecuted
    );

    let result = p.dao.execute_proposal(&donor, &creator, &0);
    assert_eq!(result, p.text("A"));
    assert!(p.dao.get_proposal(&creator, &0).executed);

    let again = p.dao.try_execute_proposal(&donor, &creator, &0);
    assert_eq!(again, Err(Ok(ProposalError::AlreadyExecuted)));
    assert_eq!(
        p.dao.get_proposal_status(&creator, &0),
        ProposalStatus::Executed
    );
}

#[test]
fn test_withdrawal_flow() {
    let p = deploy();
    let creator = Address::generate(&p.env);
    let donor = p.funded_account(PRICE);

    // Scenario D
    p.registry.register(&creator, &p.text("N"), &p.text("P"));
    let empty = p.registry.try_withdraw_funds(&creator);
    assert_eq!(empty, Err(Ok(CreatorRegistryError::NoFunds)));

    p.registry.donate(&donor, &creator, &PRICE);
    assert_eq!(p.registry.get_funds(&creator), PRICE);

    assert_eq!(p.registry.withdraw_funds(&creator), PRICE);
    assert_eq!(p.registry.get_funds(&creator), 0);
    assert_eq!(p.token.balance(&creator), PRICE);

    let repeat = p.registry.try_withdraw_funds(&creator);
    assert_eq!(repeat, Err(Ok(CreatorRegistryError::NoFunds)));
    assert_eq!(p.token.balance(&creator), PRICE);
    assert_eq!(p.token.balance(&p.registry.address), 0);
}

#[test]
fn test_interface_client_reads_registry() {
    let p = deploy();
    let creator = Address::generate(&p.env);
    let donor = p.funded_account(PRICE);
    let view = CreatorRegistryClient::new(&p.env, &p.registry.address);

    assert!(!view.is_registered(&creator));
    assert_eq!(view.milestone_count(&creator), 0);

    p.registry.register(&creator, &p.text("N"), &p.text("P"));
    p.registry.mint_milestone(&creator, &p.text("ipfs://milestone"), &PRICE);
    p.registry.donate(&donor, &creator, &PRICE);

    assert!(view.is_registered(&creator));
    assert_eq!(view.milestone_count(&creator), 1);
    assert_eq!(view.milestone_price(&creator, &0), Some(PRICE));
    assert!(!view.is_eligible(&creator, &donor));

    p.registry.claim_eligibility(&donor, &creator, &0);
    assert!(view.is_eligible(&creator, &donor));
}

#[test]
fn test_collectible_sale_pays_creator_outside_ledger() {
    let p = deploy();
    let creator = Address::generate(&p.env);
    let buyer = p.funded_account(PRICE);

    p.registry.register(&creator, &p.text("N"), &p.text("P"));
    p.market.add_collectible(&creator, &p.text("ipfs://collectible"), &PRICE);
    let token_id = p.market.mint_token(&buyer, &creator, &0, &PRICE);

    assert_eq!(token_id, 1);
    assert_eq!(p.market.owner_of(&token_id), Some(buyer.clone()));
    assert_eq!(p.token.balance(&creator), PRICE);
    // Sales do not touch donation accounting or eligibility
    assert_eq!(p.registry.get_funds(&creator), 0);
    assert_eq!(p.registry.get_donators_count(&creator), 0);
    assert!(!p.registry.is_eligible(&creator, &buyer));
}

#[test]
fn test_many_donors_govern_one_creator() {
    let p = deploy();
    let creator = Address::generate(&p.env);

    p.registry.register(&creator, &p.text("N"), &p.text("P"));
    p.registry.mint_milestone(&creator, &p.text("bronze"), &PRICE);
    p.registry.mint_milestone(&creator, &p.text("silver"), &(PRICE * 2));
    p.dao.create_proposal(&creator, &p.text("tour"), &p.text("album"));

    // Silver donors claim the higher milestone only; both tiers vote
    let choices = [(PRICE, 0u32, 1u32), (PRICE * 2, 1, 1), (PRICE * 2, 1, 0)];
    let mut voters = std::vec::Vec::new();
    for (amount, milestone, choice) in choices.iter() {
        let donor = p.funded_account(*amount);
        p.registry.donate(&donor, &creator, amount);
        p.registry.claim_eligibility(&donor, &creator, milestone);
        p.dao.vote_on_proposal(&donor, &creator, &0, choice);
        voters.push(donor);
    }

    let outsider = p.funded_account(PRICE / 2);
    p.registry.donate(&outsider, &creator, &(PRICE / 2));
    let denied = p.dao.try_vote_on_proposal(&outsider, &creator, &0, &0);
    assert_eq!(denied, Err(Ok(ProposalError::NotEligible)));

    assert_eq!(p.registry.get_donators_count(&creator), 4);
    assert_eq!(p.registry.get_funds(&creator), PRICE * 5 + PRICE / 2);

    p.env
        .ledger()
        .set_timestamp(p.dao.get_proposal(&creator, &0).deadline);
    let result = p.dao.execute_proposal(&voters[0], &creator, &0);
    assert_eq!(result, p.text("album"));

    let withdrawn = p.registry.withdraw_funds(&creator);
    let data = p.registry.get_creator(&creator);
    assert_eq!(withdrawn, PRICE * 5 + PRICE / 2);
    assert_eq!(data.total_raised, data.total_withdrawn);
    assert_eq!(p.token.balance(&creator), withdrawn);
}
