//! Key prefixes, one per component, each ending in `/` so that no prefix
//! can ever be a prefix of a sibling.

pub const POOL: &str = "pool/";
pub const NODE_ACCOUNT: &str = "nodeaccount/";
pub const VAULT: &str = "vault/";
pub const POOL_STAKER: &str = "poolstaker/";
pub const STAKER_POOL: &str = "stakerpool/";
pub const OBSERVED_TX_VOTER: &str = "observedtxvoter/";
pub const TX_OUT: &str = "txout/";
pub const EVENT: &str = "event/";
pub const TX_EVENTS_INDEX: &str = "tx_events/";
pub const EVENT_ID_COUNTER: &str = "event_id_counter/";

/// Build a full key as `prefix/<minor_version>/<UPPERCASE_ID>`.
pub fn make_key(prefix: &str, minor_version: u64, id: &str) -> String {
    format!("{prefix}{minor_version}/{}", id.to_uppercase())
}
