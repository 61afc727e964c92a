use nftmarket_core::action::{itob, BUY, DEPLOY, INITIALIZE_ESCROW, MAKE_SELL_OFFER, STOP_SELL_OFFER};
use nftmarket_core::{
    ActionRequest, Address, Configuration, GroupError, Market, MarketError, MemoryStore, Phase,
    Result, Transfer,
};

const ADMIN: Address = Address([0xad; 32]);
const ESCROW: Address = Address([0xe5; 32]);
const BUYER: Address = Address([0xb0; 32]);
const ASSET: u64 = 15_000_001;

fn assert_err<T, E>(res: Result<T>, expected: E)
where
    E: std::fmt::Debug + PartialEq<E>,
    MarketError: Into<E> + PartialEq<E>,
{
    match res {
        Err(e) => assert_eq!(e.into(), expected),
        Ok(_) => panic!("Expected error, got Ok"),
    }
}

fn call(action: &str, caller: Address, args: Vec<Vec<u8>>, transfers: Vec<Transfer>) -> ActionRequest {
    ActionRequest {
        action: action.to_string(),
        caller,
        args,
        transfers,
    }
}

fn purchase(buyer: Address, config: &Configuration) -> Vec<Transfer> {
    vec![
        Transfer::payment(buyer, config.owner, config.price),
        Transfer::asset(ESCROW, buyer, ASSET, 1),
    ]
}

/// Submits `request`, expecting rejection, and checks the store is untouched.
fn assert_rejected(market: &mut Market<MemoryStore>, request: &ActionRequest) -> MarketError {
    let before = market.configuration();
    let err = market.submit(request).unwrap_err();
    assert_eq!(market.configuration(), before);
    err
}

#[test]
fn marketplace_lifecycle() {
    let mut market = Market::new(MemoryStore::new());

    let config = market
        .submit(&call(DEPLOY, ADMIN, vec![itob(ASSET)], vec![]))
        .unwrap();
    assert_eq!(config.phase, Phase::Uninitialized);
    assert_eq!(config.admin, ADMIN);

    // deploy is legal exactly once
    assert_rejected(&mut market, &call(DEPLOY, ADMIN, vec![itob(ASSET)], vec![]));

    let config = market
        .submit(&call(INITIALIZE_ESCROW, ADMIN, vec![ESCROW.0.to_vec()], vec![]))
        .unwrap();
    assert_eq!(config.phase, Phase::Ready);
    assert_eq!(config.escrow_address, ESCROW);

    let config = market
        .submit(&call(MAKE_SELL_OFFER, ADMIN, vec![itob(5)], vec![]))
        .unwrap();
    assert_eq!(config.phase, Phase::Listed);
    assert_eq!(config.price, 5_000_000);

    let config = market
        .submit(&call(BUY, BUYER, vec![], purchase(BUYER, &config)))
        .unwrap();
    assert_eq!(config.owner, BUYER);
    assert_eq!(config.phase, Phase::Ready);

    // the new owner cannot buy again while nothing is listed
    let err = assert_rejected(&mut market, &call(BUY, BUYER, vec![], purchase(BUYER, &config)));
    assert_eq!(
        err,
        MarketError::InvalidPhase {
            action: BUY,
            phase: Some(Phase::Ready),
        }
    );

    // nor from themselves once listed
    let config = market
        .submit(&call(MAKE_SELL_OFFER, BUYER, vec![itob(5)], vec![]))
        .unwrap();
    let err = assert_rejected(&mut market, &call(BUY, BUYER, vec![], purchase(BUYER, &config)));
    assert_eq!(err, MarketError::MalformedGroup(GroupError::SelfPurchase));

    // the previous owner lost every right over the asset
    let err = assert_rejected(&mut market, &call(STOP_SELL_OFFER, ADMIN, vec![], vec![]));
    assert_eq!(
        err,
        MarketError::Unauthorized {
            caller: ADMIN,
            expected: BUYER,
        }
    );

    let config = market
        .submit(&call(STOP_SELL_OFFER, BUYER, vec![], vec![]))
        .unwrap();
    assert_eq!(config.phase, Phase::Ready);
    assert_eq!(config.owner, BUYER);
}

#[test]
fn rejected_actions_leave_state_unchanged() {
    let mut market = Market::new(MemoryStore::new());
    market
        .submit(&call(DEPLOY, ADMIN, vec![itob(ASSET)], vec![]))
        .unwrap();

    let bad_calls = [
        call(INITIALIZE_ESCROW, BUYER, vec![ESCROW.0.to_vec()], vec![]),
        call(INITIALIZE_ESCROW, ADMIN, vec![], vec![]),
        call(MAKE_SELL_OFFER, ADMIN, vec![itob(5)], vec![]),
        call(STOP_SELL_OFFER, ADMIN, vec![], vec![]),
        call("auction", ADMIN, vec![], vec![]),
    ];
    for request in &bad_calls {
        assert_rejected(&mut market, request);
    }

    market
        .submit(&call(INITIALIZE_ESCROW, ADMIN, vec![ESCROW.0.to_vec()], vec![]))
        .unwrap();
    let config = market
        .submit(&call(MAKE_SELL_OFFER, ADMIN, vec![itob(2)], vec![]))
        .unwrap();

    let valid = purchase(BUYER, &config);
    let mut underpaid = valid.clone();
    underpaid[0] = Transfer::payment(BUYER, ADMIN, config.price - 1);
    let mut wrong_escrow = valid.clone();
    wrong_escrow[1] = Transfer::asset(BUYER, BUYER, ASSET, 1);

    for transfers in [underpaid, wrong_escrow, vec![valid[1], valid[0]], vec![valid[0]]] {
        assert_rejected(&mut market, &call(BUY, BUYER, vec![], transfers));
    }

    assert_err(
        market.submit(&call(MAKE_SELL_OFFER, ADMIN, vec![itob(u64::MAX)], vec![])),
        MarketError::InvalidPhase {
            action: MAKE_SELL_OFFER,
            phase: Some(Phase::Listed),
        },
    );
    assert_eq!(market.configuration(), Some(config));
}

#[test]
fn relisting_yields_same_price() {
    let mut market = Market::new(MemoryStore::new());
    for request in [
        call(DEPLOY, ADMIN, vec![itob(ASSET)], vec![]),
        call(INITIALIZE_ESCROW, ADMIN, vec![ESCROW.0.to_vec()], vec![]),
    ] {
        market.submit(&request).unwrap();
    }

    let first = market
        .submit(&call(MAKE_SELL_OFFER, ADMIN, vec![itob(12)], vec![]))
        .unwrap();
    market
        .submit(&call(STOP_SELL_OFFER, ADMIN, vec![], vec![]))
        .unwrap();
    let second = market
        .submit(&call(MAKE_SELL_OFFER, ADMIN, vec![itob(12)], vec![]))
        .unwrap();
    assert_eq!(first.price, second.price);
    assert_eq!(first.price, 12_000_000);
}

#[test]
fn snapshot_survives_store_swap() {
    let mut market = Market::new(MemoryStore::new());
    market
        .submit(&call(DEPLOY, ADMIN, vec![itob(ASSET)], vec![]))
        .unwrap();
    let bytes = market.configuration().unwrap().to_bytes();

    let restored = Configuration::from_bytes(&bytes).unwrap();
    let mut market = Market::new(MemoryStore::with_config(restored));
    let config = market
        .submit(&call(INITIALIZE_ESCROW, ADMIN, vec![ESCROW.0.to_vec()], vec![]))
        .unwrap();
    assert_eq!(config.escrow_address, ESCROW);
}
