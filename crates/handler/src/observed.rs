use thorcore_consensus::{add_observation, get_consensus_tx, set_done};
use thorcore_keeper::{KVStore, Keeper};
use thorcore_txout::TxOutStore;
use thorcore_types::{Address, MsgObservedTxIn, MsgObservedTxOut, ThorError, ValidateBasic};
use thorcore_vault::add_gas_fees;

use crate::{inner::dispatch_inner_msg, memo_dispatch::build_inner_msg, refund::execute_refund, version::{gate_version, is_authorized_observer}};

/// Feed every observed tx in `msg` to its voter and, for any that newly
/// cross the supermajority threshold, dispatch the memo-derived inner
/// message - falling back to the refund path on any validation or
/// execution failure.
pub fn handle_observed_tx_in<S: KVStore>(
    keeper: &mut Keeper<S>,
    txout_store: &mut TxOutStore,
    msg: MsgObservedTxIn,
    height: i64,
    version: (u64, u64, u64)
) -> Result<(), ThorError> {
    gate_version(version)?;
    msg.validate_basic()?;
    process_observed_txs(keeper, txout_store, msg.signer, msg.txs, height, version)
}

/// Outbound-chain observations flow through the identical
/// observe-vote-dispatch pipeline: a signer relaying an `OUTBOUND`/
/// `REFUND` memo on the external chain is itself an observed tx whose
/// memo names the acknowledgement to apply once consensus is reached.
pub fn handle_observed_tx_out<S: KVStore>(
    keeper: &mut Keeper<S>,
    txout_store: &mut TxOutStore,
    msg: MsgObservedTxOut,
    height: i64,
    version: (u64, u64, u64)
) -> Result<(), ThorError> {
    gate_version(version)?;
    msg.validate_basic()?;
    process_observed_txs(keeper, txout_store, msg.signer, msg.txs, height, version)
}

fn process_observed_txs<S: KVStore>(
    keeper: &mut Keeper<S>,
    txout_store: &mut TxOutStore,
    signer: Address,
    txs: Vec<thorcore_types::ObservedTx>,
    height: i64,
    version: (u64, u64, u64)
) -> Result<(), ThorError> {
    let constants = gate_version(version)?;
    if !is_authorized_observer(keeper, &signer) {
        return Err(ThorError::Validation("signer is not an active observer".into()));
    }
    for observed in txs {
        let mut voter = keeper.get_observed_tx_voter(&observed.tx.id)?;
        if voter.is_done() {
            continue;
        }
        add_observation(&mut voter, observed);

        let active_nodes: Vec<Address> = keeper.list_active_node_accounts().into_iter().map(|n| n.node_address).collect();
        let Some(consensus_tx) = get_consensus_tx(&voter, &active_nodes).cloned() else {
            keeper.set_observed_tx_voter(&voter);
            continue;
        };

        set_done(&mut voter, consensus_tx.tx.id.clone());
        keeper.set_observed_tx_voter(&voter);

        add_gas_fees(keeper, &consensus_tx.tx)?;

        let outcome = build_inner_msg(keeper, &consensus_tx, signer.clone())
            .and_then(|inner| dispatch_inner_msg(keeper, txout_store, inner, height, &constants));
        if let Err(cause) = outcome {
            execute_refund(keeper, txout_store, &consensus_tx.tx, height, &cause)?;
        }
    }
    Ok(())
}
