//! Domain types shared by every crate in the workspace: assets, coins,
//! the fixed-point amount type, pools, stakers, node accounts, vaults,
//! observed transactions, outbound items, events and the message
//! envelopes that carry them across the wire.

pub mod address;
pub mod asset;
pub mod coin;
pub mod constants;
pub mod error;
pub mod event;
pub mod msg;
pub mod node_account;
pub mod pool;
pub mod staker;
pub mod tx;
pub mod txout;
pub mod uint;
pub mod vault;

pub use address::{Address, PubKey, TxId};
pub use asset::{Asset, Chain};
pub use coin::{Coin, Coins};
pub use constants::ConstantValues;
pub use error::{ErrorCode, ThorError};
pub use event::{Event, EventStatus};
pub use msg::{
    MsgAdd, MsgBond, MsgLeave, MsgNoOp, MsgObservedTxIn, MsgObservedTxOut, MsgOutboundTx,
    MsgRefundTx, MsgReserveContributor, MsgSetPoolData, MsgSetStakeData, MsgSetUnStake, MsgSwap,
    MsgYggdrasil, ThorMsg, ValidateBasic
};
pub use node_account::{NodeAccount, NodeStatus};
pub use pool::{Pool, PoolStatus};
pub use staker::{PoolStaker, StakerPool, StakerUnit};
pub use tx::{ObservedTx, ObservedTxVoter, Tx};
pub use txout::{TxOut, TxOutItem};
pub use uint::Uint;
pub use vault::{Vault, VaultSet, VaultStatus, VaultType};
