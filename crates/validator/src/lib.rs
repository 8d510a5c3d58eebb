//! Node account lifecycle: bond accounting, status transitions, and
//! rotation-priority ordering.

pub mod lifecycle;
pub mod rotation;

pub use lifecycle::{leave, on_bond_received, on_keys_registered, on_observer_seen, rotate_in, rotate_out, slash};
pub use rotation::{rotate_in_candidates, rotate_out_candidates};
