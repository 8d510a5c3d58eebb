//! Asgard rotation, yggdrasil fund/return, chain ragnarok and the other
//! end-of-block vault bookkeeping (gas reimbursement, pool promotion).

pub mod gas;
pub mod pool_status;
pub mod ragnarok;
pub mod rotation;
pub mod yggdrasil;

pub use gas::add_gas_fees;
pub use pool_status::enable_next_pool;
pub use ragnarok::{empty_retiring_vaults_for_chain, ragnarok_chain_pools, RagnarokPayout};
pub use rotation::{is_rotation_window_open, rotate_asgard};
pub use yggdrasil::{yggdrasil_fund, yggdrasil_return};
