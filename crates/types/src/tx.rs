use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{
    address::{Address, PubKey, TxId},
    asset::Chain,
    coin::Coins
};

/// The external-chain transaction body carried by an observation: what
/// actually happened on the source chain, independent of how many
/// observers reported it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tx {
    pub id: TxId,
    pub chain: Chain,
    pub from_address: Address,
    pub to_address: Address,
    pub coins: Coins,
    pub gas: Coins,
    pub memo: String
}

impl Tx {
    pub fn new(id: TxId, chain: Chain, from: Address, to: Address, coins: Coins, memo: String) -> Self {
        Tx { id, chain, from_address: from, to_address: to, coins, gas: Vec::new(), memo }
    }
}

/// A single node's observation of an inbound or outbound external
/// transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedTx {
    pub tx: Tx,
    pub observed_at_height: u64,
    pub observed_pub_key: PubKey,
    pub signers: BTreeSet<Address>,
    pub done: Option<TxId>
}

impl ObservedTx {
    pub fn new(tx: Tx, observed_at_height: u64, observed_pub_key: PubKey, signer: Address) -> Self {
        let mut signers = BTreeSet::new();
        signers.insert(signer);
        ObservedTx { tx, observed_at_height, observed_pub_key, signers, done: None }
    }

    /// Equality for voter aggregation purposes ignores `signers`/`done` -
    /// distinct observers reporting the identical tx body are the *same*
    /// entry.
    pub fn same_body(&self, other: &ObservedTx) -> bool {
        self.tx == other.tx
            && self.observed_at_height == other.observed_at_height
            && self.observed_pub_key == other.observed_pub_key
    }
}

/// All distinct tx-body variants ever submitted for one external tx id,
/// each with its own signer set, plus the consensus-reached id once one
/// variant crosses the supermajority threshold.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedTxVoter {
    pub tx_id: TxId,
    pub txs: Vec<ObservedTx>,
    pub done: Option<TxId>
}

impl ObservedTxVoter {
    pub fn new(tx_id: TxId) -> Self {
        ObservedTxVoter { tx_id, txs: Vec::new(), done: None }
    }

    pub fn is_done(&self) -> bool {
        self.done.is_some()
    }
}
