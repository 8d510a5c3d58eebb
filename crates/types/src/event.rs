use serde::{Deserialize, Serialize};
use strum::Display;

use crate::tx::Tx;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
pub enum EventStatus {
    Pending,
    Success,
    Refund
}

/// One line of the event ledger consumed by external indexers. `id` is a
/// monotone counter assigned by the keeper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub event_type: String,
    pub height: u64,
    pub in_tx: Tx,
    pub out_txs: Vec<Tx>,
    pub body: serde_json::Value,
    pub status: EventStatus,
    /// How many outbound acknowledgements complete this event: the
    /// number of inbound coins for a Refund, or the handler's known
    /// outbound count for a Success (usually 1, 2 for a double swap).
    pub expected_outbound_count: u32
}

impl Event {
    pub fn new(
        id: u64,
        event_type: impl Into<String>,
        height: u64,
        in_tx: Tx,
        body: serde_json::Value,
        status: EventStatus,
        expected_outbound_count: u32
    ) -> Self {
        Event { id, event_type: event_type.into(), height, in_tx, out_txs: Vec::new(), body, status, expected_outbound_count }
    }
}
