use serde::{Deserialize, Serialize};

use crate::{
    address::{Address, PubKey, TxId},
    asset::Asset,
    coin::{Coin, Coins},
    error::ThorError,
    pool::PoolStatus,
    tx::{ObservedTx, Tx}
};

/// Every message implements stateless validation (`validate_basic`) and
/// reports its stable wire type name (`msg_type`), without depending on
/// any particular cosmos-sdk-shaped trait hierarchy.
pub trait ValidateBasic {
    fn msg_type(&self) -> &'static str;
    fn signer(&self) -> &Address;
    fn validate_basic(&self) -> Result<(), ThorError>;
}

macro_rules! reject_if_empty {
    ($cond:expr, $msg:literal) => {
        if $cond {
            return Err(ThorError::InvalidMessage($msg.into()));
        }
    };
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgObservedTxIn {
    pub txs: Vec<ObservedTx>,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgObservedTxOut {
    pub txs: Vec<ObservedTx>,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSwap {
    pub tx: Tx,
    pub target_asset: Asset,
    pub destination: Address,
    pub trade_target: crate::uint::Uint,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetStakeData {
    pub tx: Tx,
    pub asset: Asset,
    pub rune_amount: crate::uint::Uint,
    pub asset_amount: crate::uint::Uint,
    pub rune_address: Address,
    pub asset_address: Address,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetUnStake {
    pub tx: Tx,
    pub rune_address: Address,
    pub withdraw_basis_points: u64,
    pub asset: Asset,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgSetPoolData {
    pub asset: Asset,
    pub status: PoolStatus,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgBond {
    pub tx: Tx,
    pub node_address: Address,
    pub bond: crate::uint::Uint,
    pub bond_address: Address,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgLeave {
    pub tx: Tx,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgYggdrasil {
    pub tx: Tx,
    pub pub_key: PubKey,
    pub add_funds: bool,
    pub coins: Coins,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgReserveContributor {
    pub contributor_address: Address,
    pub amount: crate::uint::Uint,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgNoOp {
    pub tx: Tx,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgAdd {
    pub tx: Tx,
    pub asset: Asset,
    pub rune_amount: crate::uint::Uint,
    pub asset_amount: crate::uint::Uint,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgRefundTx {
    pub tx: ObservedTx,
    pub in_tx_id: TxId,
    pub signer: Address
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgOutboundTx {
    pub tx: ObservedTx,
    pub in_tx_id: TxId,
    pub signer: Address
}

macro_rules! impl_validate_basic {
    ($ty:ty, $name:literal, |$self:ident| $body:block) => {
        impl ValidateBasic for $ty {
            fn msg_type(&self) -> &'static str {
                $name
            }

            fn signer(&self) -> &Address {
                &self.signer
            }

            fn validate_basic(&$self) -> Result<(), ThorError> {
                $body
            }
        }
    };
}

impl_validate_basic!(MsgObservedTxIn, "observed_tx_in", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.txs.is_empty(), "no observed txs");
    Ok(())
});

impl_validate_basic!(MsgObservedTxOut, "observed_tx_out", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.txs.is_empty(), "no observed txs");
    Ok(())
});

impl_validate_basic!(MsgSwap, "swap", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.tx.id.is_empty(), "request tx hash is empty");
    reject_if_empty!(self.tx.coins.is_empty(), "no coin found");
    reject_if_empty!(self.destination.is_empty(), "destination is empty");
    Ok(())
});

impl_validate_basic!(MsgSetStakeData, "set_stake_data", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.rune_address.is_empty(), "rune address is empty");
    Ok(())
});

impl_validate_basic!(MsgSetUnStake, "set_unstake", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.rune_address.is_empty(), "rune address is empty");
    reject_if_empty!(self.withdraw_basis_points == 0 || self.withdraw_basis_points > 10_000,
        "withdraw basis points out of range");
    Ok(())
});

impl_validate_basic!(MsgSetPoolData, "set_pool_data", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    Ok(())
});

impl_validate_basic!(MsgBond, "bond", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.node_address.is_empty(), "node address is empty");
    reject_if_empty!(self.bond.is_zero(), "RUNE amount is 0");
    Ok(())
});

impl_validate_basic!(MsgLeave, "leave", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    Ok(())
});

impl_validate_basic!(MsgYggdrasil, "yggdrasil", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.pub_key.is_empty(), "pub key is empty");
    Ok(())
});

impl_validate_basic!(MsgReserveContributor, "reserve_contributor", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.amount.is_zero(), "reserve contribution amount is 0");
    Ok(())
});

impl_validate_basic!(MsgNoOp, "no_op", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    Ok(())
});

impl_validate_basic!(MsgAdd, "add", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    Ok(())
});

impl_validate_basic!(MsgRefundTx, "refund_tx", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.in_tx_id.is_empty(), "in tx id is empty");
    Ok(())
});

impl_validate_basic!(MsgOutboundTx, "outbound_tx", |self| {
    reject_if_empty!(self.signer.is_empty(), "signer is empty");
    reject_if_empty!(self.in_tx_id.is_empty(), "in tx id is empty");
    Ok(())
});

/// Inner messages produced by memo dispatch, folded into one tagged enum
/// for the handler dispatcher's routing table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThorMsg {
    SetPoolData(MsgSetPoolData),
    SetStakeData(MsgSetStakeData),
    SetUnStake(MsgSetUnStake),
    Swap(MsgSwap),
    Add(MsgAdd),
    NoOp(MsgNoOp),
    RefundTx(MsgRefundTx),
    OutboundTx(MsgOutboundTx),
    Bond(MsgBond),
    Leave(MsgLeave),
    Yggdrasil(MsgYggdrasil),
    ReserveContributor(MsgReserveContributor)
}

impl ThorMsg {
    pub fn validate_basic(&self) -> Result<(), ThorError> {
        match self {
            ThorMsg::SetPoolData(m) => m.validate_basic(),
            ThorMsg::SetStakeData(m) => m.validate_basic(),
            ThorMsg::SetUnStake(m) => m.validate_basic(),
            ThorMsg::Swap(m) => m.validate_basic(),
            ThorMsg::Add(m) => m.validate_basic(),
            ThorMsg::NoOp(m) => m.validate_basic(),
            ThorMsg::RefundTx(m) => m.validate_basic(),
            ThorMsg::OutboundTx(m) => m.validate_basic(),
            ThorMsg::Bond(m) => m.validate_basic(),
            ThorMsg::Leave(m) => m.validate_basic(),
            ThorMsg::Yggdrasil(m) => m.validate_basic(),
            ThorMsg::ReserveContributor(m) => m.validate_basic()
        }
    }
}

/// Helper used by memo dispatch to build a `TxOutItem`-independent coin
/// lookup: find the RUNE-denominated coin among a tx's coins, if any.
pub fn rune_coin(coins: &[Coin]) -> Option<&Coin> {
    coins.iter().find(|c| c.asset.is_rune())
}
