use thorcore_amm::{add_stake, double_swap, swap, withdraw_stake, SwapDirection};
use thorcore_events::{complete_events, upsert_event};
use thorcore_keeper::{KVStore, Keeper};
use thorcore_txout::TxOutStore;
use thorcore_types::{
    Asset, Chain, Coin, ConstantValues, Event, EventStatus, MsgAdd, MsgBond, MsgLeave, MsgNoOp,
    MsgOutboundTx, MsgRefundTx, MsgReserveContributor, MsgSetPoolData, MsgSetStakeData,
    MsgSetUnStake, MsgSwap, MsgYggdrasil, Pool, ThorError, ThorMsg, TxOutItem
};
use thorcore_validator::{leave, on_bond_received};
use tracing::instrument;

/// Execute one memo-derived inner message against state, staging any
/// outbound items on `txout_store` and recording an event. A direct match
/// over the closed [`ThorMsg`] set stands in for a handler-map lookup -
/// there is no subtype to look up through.
#[instrument(skip(keeper, txout_store, msg, constants))]
pub fn dispatch_inner_msg<S: KVStore>(
    keeper: &mut Keeper<S>,
    txout_store: &mut TxOutStore,
    msg: ThorMsg,
    height: i64,
    constants: &ConstantValues
) -> Result<(), ThorError> {
    msg.validate_basic()?;
    match msg {
        ThorMsg::SetPoolData(m) => handle_set_pool_data(keeper, m),
        ThorMsg::SetStakeData(m) => handle_stake(keeper, m, height),
        ThorMsg::SetUnStake(m) => handle_unstake(keeper, txout_store, m, height),
        ThorMsg::Swap(m) => handle_swap(keeper, txout_store, m, height, constants),
        ThorMsg::Add(m) => handle_add(keeper, m, height),
        ThorMsg::NoOp(m) => handle_noop(m),
        ThorMsg::RefundTx(m) => handle_refund_ack(keeper, m),
        ThorMsg::OutboundTx(m) => handle_outbound_ack(keeper, m),
        ThorMsg::Bond(m) => handle_bond(keeper, m, constants, height),
        ThorMsg::Leave(m) => handle_leave(keeper, m, height),
        ThorMsg::Yggdrasil(m) => handle_yggdrasil(keeper, m),
        ThorMsg::ReserveContributor(m) => handle_reserve(m)
    }
}

fn handle_set_pool_data<S: KVStore>(keeper: &mut Keeper<S>, m: MsgSetPoolData) -> Result<(), ThorError> {
    let mut pool = Pool::new(m.asset);
    pool.status = m.status;
    keeper.set_pool(&pool);
    Ok(())
}

fn handle_stake<S: KVStore>(keeper: &mut Keeper<S>, m: MsgSetStakeData, height: i64) -> Result<(), ThorError> {
    let mut pool = keeper.get_pool(&m.asset)?;
    let mut pool_staker = keeper.get_pool_staker(&m.asset)?;
    let mut staker_pool = keeper.get_staker_pool(&m.rune_address)?;

    let units = add_stake(&mut pool, &mut pool_staker, &mut staker_pool, m.rune_address.clone(), m.asset_address, m.rune_amount, m.asset_amount, height as u64)?;

    keeper.set_pool(&pool);
    keeper.set_pool_staker(&m.asset, &pool_staker);
    keeper.set_staker_pool(&staker_pool);

    let event = Event::new(0, "stake", height as u64, m.tx, serde_json::json!({"units": units.to_string()}), EventStatus::Success, 0);
    upsert_event(keeper, event)?;
    Ok(())
}

fn handle_unstake<S: KVStore>(keeper: &mut Keeper<S>, txout_store: &mut TxOutStore, m: MsgSetUnStake, height: i64) -> Result<(), ThorError> {
    let mut pool = keeper.get_pool(&m.asset)?;
    let mut pool_staker = keeper.get_pool_staker(&m.asset)?;
    let mut staker_pool = keeper.get_staker_pool(&m.rune_address)?;
    let asset_address = pool_staker.get(&m.rune_address).map(|s| s.asset_address.clone()).unwrap_or_else(|| m.rune_address.clone());

    let (rune_out, asset_out) = withdraw_stake(&mut pool, &mut pool_staker, &mut staker_pool, &m.rune_address, m.withdraw_basis_points)?;

    keeper.set_pool(&pool);
    keeper.set_pool_staker(&m.asset, &pool_staker);
    keeper.set_staker_pool(&staker_pool);

    let mut expected_outbound_count = 0u32;
    if !rune_out.is_zero() {
        let item = TxOutItem::new(Chain::thor(), m.rune_address.clone(), m.tx.id.clone(), Coin::new(Asset::rune(), rune_out), format!("OUTBOUND:{}", m.tx.id));
        txout_store.try_add_tx_out_item(keeper, item)?;
        expected_outbound_count += 1;
    }
    if !asset_out.is_zero() {
        let item = TxOutItem::new(m.asset.chain.clone(), asset_address, m.tx.id.clone(), Coin::new(m.asset.clone(), asset_out), format!("OUTBOUND:{}", m.tx.id));
        txout_store.try_add_tx_out_item(keeper, item)?;
        expected_outbound_count += 1;
    }

    let body = serde_json::json!({"rune_out": rune_out.to_string(), "asset_out": asset_out.to_string()});
    let event = Event::new(0, "unstake", height as u64, m.tx, body, EventStatus::Pending, expected_outbound_count.max(1));
    upsert_event(keeper, event)?;
    Ok(())
}

fn handle_swap<S: KVStore>(keeper: &mut Keeper<S>, txout_store: &mut TxOutStore, m: MsgSwap, height: i64, constants: &ConstantValues) -> Result<(), ThorError> {
    let source = m.tx.coins[0].clone();

    let emit = if source.asset.is_rune() {
        let mut pool = keeper.get_pool(&m.target_asset)?;
        let result = swap(&mut pool, SwapDirection::RuneToAsset, source.amount, m.trade_target, constants.global_slip_limit)?;
        keeper.set_pool(&pool);
        result.emit
    } else if m.target_asset.is_rune() {
        let mut pool = keeper.get_pool(&source.asset)?;
        let result = swap(&mut pool, SwapDirection::AssetToRune, source.amount, m.trade_target, constants.global_slip_limit)?;
        keeper.set_pool(&pool);
        result.emit
    } else {
        let mut pool_in = keeper.get_pool(&source.asset)?;
        let mut pool_out = keeper.get_pool(&m.target_asset)?;
        let (_, leg2) = double_swap(&mut pool_in, &mut pool_out, source.amount, m.trade_target, constants.global_slip_limit)?;
        keeper.set_pool(&pool_in);
        keeper.set_pool(&pool_out);
        leg2.emit
    };

    let item = TxOutItem::new(m.target_asset.chain.clone(), m.destination, m.tx.id.clone(), Coin::new(m.target_asset.clone(), emit), format!("OUTBOUND:{}", m.tx.id));
    txout_store.try_add_tx_out_item(keeper, item)?;

    let body = serde_json::json!({"target_asset": m.target_asset.to_string(), "emit": emit.to_string()});
    let event = Event::new(0, "swap", height as u64, m.tx, body, EventStatus::Pending, 1);
    upsert_event(keeper, event)?;
    Ok(())
}

fn handle_add<S: KVStore>(keeper: &mut Keeper<S>, m: MsgAdd, height: i64) -> Result<(), ThorError> {
    let mut pool = keeper.get_pool(&m.asset)?;
    pool.balance_rune = pool.balance_rune.add(m.rune_amount);
    pool.balance_asset = pool.balance_asset.add(m.asset_amount);
    keeper.set_pool(&pool);

    let event = Event::new(0, "add", height as u64, m.tx, serde_json::json!({}), EventStatus::Success, 0);
    upsert_event(keeper, event)?;
    Ok(())
}

fn handle_noop(_m: MsgNoOp) -> Result<(), ThorError> {
    Ok(())
}

fn handle_refund_ack<S: KVStore>(keeper: &mut Keeper<S>, m: MsgRefundTx) -> Result<(), ThorError> {
    complete_events(keeper, &m.in_tx_id, &[m.tx.tx], EventStatus::Refund)
}

fn handle_outbound_ack<S: KVStore>(keeper: &mut Keeper<S>, m: MsgOutboundTx) -> Result<(), ThorError> {
    complete_events(keeper, &m.in_tx_id, &[m.tx.tx], EventStatus::Success)
}

fn handle_bond<S: KVStore>(keeper: &mut Keeper<S>, m: MsgBond, constants: &ConstantValues, height: i64) -> Result<(), ThorError> {
    on_bond_received(keeper, &m.node_address, m.bond_address, m.bond, constants.minimum_bond, height)
}

fn handle_leave<S: KVStore>(keeper: &mut Keeper<S>, m: MsgLeave, height: i64) -> Result<(), ThorError> {
    leave(keeper, &m.tx.from_address, height)
}

fn handle_yggdrasil<S: KVStore>(keeper: &mut Keeper<S>, m: MsgYggdrasil) -> Result<(), ThorError> {
    let mut vault = keeper.get_vault(&m.pub_key)?;
    if m.add_funds {
        vault.add_funds(&m.coins);
    } else {
        vault.sub_funds(&m.coins);
    }
    keeper.set_vault(&vault);
    Ok(())
}

fn handle_reserve(_m: MsgReserveContributor) -> Result<(), ThorError> {
    // No standalone reserve ledger is kept in this port; the original's
    // VaultData.TotalReserve accumulator is out of scope here the same
    // way AddGasFees drops the matching Gas accumulator.
    Ok(())
}
