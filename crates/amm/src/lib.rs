//! Constant-product AMM math: swap emission/fee/slip, stake unit
//! issuance and withdrawal. Pure functions over [`thorcore_types::Pool`]
//! and the staker indexes; no I/O, no kv-store access.

pub mod stake;
pub mod swap;

pub use stake::{add_stake, calc_stake_units, withdraw_stake};
pub use swap::{double_swap, swap, SwapDirection, SwapResult};
