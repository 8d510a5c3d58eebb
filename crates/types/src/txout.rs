use serde::{Deserialize, Serialize};

use crate::{
    address::{Address, PubKey, TxId},
    asset::Chain,
    coin::Coin
};

/// A single queued outbound instruction for an external signer.
/// `gas_rate` is opaque fee guidance for the signer; the core never
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutItem {
    pub chain: Chain,
    pub to_address: Address,
    pub vault_pub_key: PubKey,
    pub in_hash: TxId,
    pub coin: Coin,
    pub memo: String,
    pub gas_rate: u64
}

impl TxOutItem {
    pub fn new(chain: Chain, to_address: Address, in_hash: TxId, coin: Coin, memo: String) -> Self {
        TxOutItem { chain, to_address, vault_pub_key: PubKey::default(), in_hash, coin, memo, gas_rate: 0 }
    }
}

/// The outbound queue for a single block height.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOut {
    pub height: u64,
    pub items: Vec<TxOutItem>
}
