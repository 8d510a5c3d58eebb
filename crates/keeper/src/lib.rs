//! Versioned key/value storage and typed accessors for every persisted
//! domain entity. The store itself is a pluggable trait; the keeper is
//! the only thing downstream crates should touch.

pub mod keeper;
pub mod keys;
pub mod store;

pub use keeper::Keeper;
pub use store::{KVStore, MemStore};
