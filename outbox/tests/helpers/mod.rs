//! Shared cw-multi-test setup for the outbox integration tests.

#![allow(dead_code)]

use cosmwasm_std::{coins, Addr, Binary, Coin, Empty, Uint128};
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};

use outbox::msg::{ClaimHashResponse, ExecuteMsg, InstantiateMsg, QueryMsg, StatusResponse};
use outbox::{Claim, Party};

pub const DENOM: &str = "uluna";
pub const DEPOSIT: u128 = 1_000_000;
pub const INITIAL_BALANCE: u128 = 10_000_000_000;
pub const EPOCH_PERIOD: u64 = 3_600;
pub const CHALLENGE_PERIOD: u64 = 1_800;
pub const CLAIM_DELAY: u64 = 3_600;
pub const TIMEOUT_EPOCHS: u64 = 24;
pub const MAX_MISSING_BLOCKS: u64 = 10;
pub const SLOT_TIME: u64 = 5;
pub const ROUTER: &str = "0x5fbdb2315678afecb367f032d93f642f64180aa3";

pub fn contract_outbox() -> Box<dyn Contract<Empty>> {
    let contract = ContractWrapper::new(
        outbox::contract::execute,
        outbox::contract::instantiate,
        outbox::contract::query,
    )
    .with_reply(outbox::contract::reply);
    Box::new(contract)
}

pub struct TestEnv {
    pub app: App,
    pub outbox: Addr,
    pub claimer: Addr,
    pub challenger: Addr,
    pub relayer: Addr,
    pub channel: Addr,
}

pub fn default_instantiate_msg(channel: &Addr) -> InstantiateMsg {
    InstantiateMsg {
        deposit: Uint128::from(DEPOSIT),
        stake_denom: DENOM.to_string(),
        epoch_period: EPOCH_PERIOD,
        challenge_period: CHALLENGE_PERIOD,
        claim_delay: CLAIM_DELAY,
        timeout_epochs: TIMEOUT_EPOCHS,
        max_missing_blocks: MAX_MISSING_BLOCKS,
        slot_time: SLOT_TIME,
        router: ROUTER.to_string(),
        channel: channel.to_string(),
    }
}

pub fn setup() -> TestEnv {
    let claimer = Addr::unchecked("terra1claimer");
    let challenger = Addr::unchecked("terra1challenger");
    let relayer = Addr::unchecked("terra1relayer");
    let channel = Addr::unchecked("terra1channel");

    let mut app = App::new(|router, _, storage| {
        for account in [&claimer, &challenger, &relayer] {
            router
                .bank
                .init_balance(storage, account, coins(INITIAL_BALANCE, DENOM))
                .unwrap();
        }
    });

    let code_id = app.store_code(contract_outbox());
    let outbox = app
        .instantiate_contract(
            code_id,
            Addr::unchecked("terra1deployer"),
            &default_instantiate_msg(&channel),
            &[],
            "cl8y-outbox",
            None,
        )
        .unwrap();

    TestEnv {
        app,
        outbox,
        claimer,
        challenger,
        relayer,
        channel,
    }
}

/// Advance block time, producing blocks at the expected slot rate.
pub fn advance(env: &mut TestEnv, seconds: u64) {
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
        block.height += seconds / SLOT_TIME;
    });
}

/// Advance block time without producing blocks (stalled source chain).
pub fn advance_time_only(env: &mut TestEnv, seconds: u64) {
    env.app.update_block(|block| {
        block.time = block.time.plus_seconds(seconds);
    });
}

/// Advance far enough that the bridge times out.
pub fn shut_down(env: &mut TestEnv) {
    advance(env, (TIMEOUT_EPOCHS + 2) * EPOCH_PERIOD);
    assert!(!status(env).running);
}

pub fn root(byte: u8) -> [u8; 32] {
    [byte; 32]
}

pub fn binary(bytes: &[u8; 32]) -> Binary {
    Binary::from(bytes.to_vec())
}

pub fn status(env: &TestEnv) -> StatusResponse {
    env.app
        .wrap()
        .query_wasm_smart(&env.outbox, &QueryMsg::Status {})
        .unwrap()
}

pub fn stored_hash(env: &TestEnv, epoch: u64) -> Option<Binary> {
    let res: ClaimHashResponse = env
        .app
        .wrap()
        .query_wasm_smart(&env.outbox, &QueryMsg::ClaimHash { epoch })
        .unwrap();
    res.hash
}

pub fn balance(env: &TestEnv, addr: &Addr) -> u128 {
    env.app
        .wrap()
        .query_balance(addr, DENOM)
        .unwrap()
        .amount
        .u128()
}

/// Claim `state_root` for the claimable epoch and return the resulting record.
pub fn claim(env: &mut TestEnv, state_root: [u8; 32]) -> (u64, Claim) {
    let epoch = status(env).claimable_epoch;
    let claimer = env.claimer.clone();
    env.app
        .execute_contract(
            claimer.clone(),
            env.outbox.clone(),
            &ExecuteMsg::Claim {
                epoch,
                state_root: binary(&state_root),
            },
            &coins(DEPOSIT, DENOM),
        )
        .unwrap();

    let block = env.app.block_info();
    let claim = Claim {
        state_root: binary(&state_root),
        claimer: Some(claimer),
        timestamp: block.time.seconds(),
        block_number: block.height,
        honest: Party::Unresolved,
        challenger: None,
    };
    (epoch, claim)
}

/// Challenge `claim` and return the updated record.
pub fn challenge(env: &mut TestEnv, epoch: u64, claim: &Claim) -> Claim {
    let challenger = env.challenger.clone();
    env.app
        .execute_contract(
            challenger.clone(),
            env.outbox.clone(),
            &ExecuteMsg::Challenge {
                epoch,
                claim: claim.clone(),
            },
            &coins(DEPOSIT, DENOM),
        )
        .unwrap();

    Claim {
        challenger: Some(challenger),
        ..claim.clone()
    }
}

/// Run the optimistic path for `claim` and return the updated record.
pub fn validate(env: &mut TestEnv, epoch: u64, claim: &Claim) -> Claim {
    let relayer = env.relayer.clone();
    env.app
        .execute_contract(
            relayer,
            env.outbox.clone(),
            &ExecuteMsg::ValidateSnapshot {
                epoch,
                claim: claim.clone(),
            },
            &[],
        )
        .unwrap();

    Claim {
        honest: Party::Claimer,
        ..claim.clone()
    }
}

/// Deliver an arbitrated root through the resolver channel.
pub fn resolve(
    env: &mut TestEnv,
    epoch: u64,
    state_root: [u8; 32],
    claim: Option<&Claim>,
) -> Result<AppResponse, String> {
    let channel = env.channel.clone();
    let msg = ExecuteMsg::ResolveDisputedClaim {
        epoch,
        state_root: binary(&state_root),
        claim: claim.cloned(),
        sender: ROUTER.to_string(),
    };
    execute(env, &channel, &msg)
}

/// Execute without funds; errors are reduced to their root cause message.
pub fn execute(env: &mut TestEnv, sender: &Addr, msg: &ExecuteMsg) -> Result<AppResponse, String> {
    execute_with_funds(env, sender, msg, &[])
}

pub fn execute_with_funds(
    env: &mut TestEnv,
    sender: &Addr,
    msg: &ExecuteMsg,
    funds: &[Coin],
) -> Result<AppResponse, String> {
    env.app
        .execute_contract(sender.clone(), env.outbox.clone(), msg, funds)
        .map_err(|err| err.root_cause().to_string())
}

/// Value of the first attribute named `key` in a response.
pub fn attribute(res: &AppResponse, key: &str) -> Option<String> {
    res.events
        .iter()
        .flat_map(|e| &e.attributes)
        .find(|a| a.key == key)
        .map(|a| a.value.clone())
}
