//! Per-tx-id observation voting: nodes report what they saw on an
//! external chain, and once a supermajority agrees on the same body the
//! tx is handed to the handler dispatcher for execution.

pub mod voter;

pub use voter::{add_observation, get_consensus_tx, set_done};
