//! The memo-dispatched handler layer: turns consensus-reached observed
//! txs into inner messages and executes them, with a refund fallback for
//! anything that fails along the way.

pub mod inner;
pub mod memo_dispatch;
pub mod observed;
pub mod refund;
pub mod version;

pub use inner::dispatch_inner_msg;
pub use memo_dispatch::build_inner_msg;
pub use observed::{handle_observed_tx_in, handle_observed_tx_out};
pub use refund::execute_refund;
pub use version::gate_version;
