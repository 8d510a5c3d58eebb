//! Fluent builders for the domain fixtures every crate's tests need:
//! pools, node accounts, vaults and observed txs. Mirrors the
//! `...Builder::new().field(x).build()` shape used for constructing
//! test inputs throughout the workspace, so a test reads as a sentence
//! about the scenario it sets up rather than a struct literal.

pub mod node_account;
pub mod observed_tx;
pub mod pool;
pub mod vault;

pub use node_account::NodeAccountBuilder;
pub use observed_tx::ObservedTxBuilder;
pub use pool::PoolBuilder;
pub use vault::VaultBuilder;
