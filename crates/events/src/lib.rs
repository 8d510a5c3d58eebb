//! The event ledger: a monotonically-id'd, append-mostly log of pool
//! mutations consumed by external indexers. Every event starts life
//! `Pending` and flips to its final status once enough outbound
//! acknowledgements have arrived.

use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{Event, EventStatus, ThorError, Tx, TxId};

/// Assign the event an id if it doesn't have one, persist it, and index
/// it under its inbound tx id so `complete_events` can find it later.
pub fn upsert_event<S: KVStore>(keeper: &mut Keeper<S>, mut event: Event) -> Result<u64, ThorError> {
    if event.in_tx.id.is_empty() {
        return Err(ThorError::Validation("event in_tx id must not be empty".into()));
    }
    if event.id == 0 {
        event.id = keeper.next_event_id();
    }
    let id = event.id;
    let in_tx_id = event.in_tx.id.clone();
    keeper.set_event(&event);
    keeper.append_event_id_by_tx(&in_tx_id, id);
    Ok(id)
}

/// Append `out_txs` to every pending event indexed under `tx_id`, and
/// flip status to `final_status` once the outbound count reaches the
/// event's expectation.
pub fn complete_events<S: KVStore>(keeper: &mut Keeper<S>, tx_id: &TxId, out_txs: &[Tx], final_status: EventStatus) -> Result<(), ThorError> {
    for event_id in keeper.get_event_ids_by_tx(tx_id) {
        let Some(mut event) = keeper.get_event(event_id)? else { continue };
        if event.status != EventStatus::Pending {
            continue;
        }
        event.out_txs.extend_from_slice(out_txs);
        if event.out_txs.len() as u32 >= event.expected_outbound_count {
            event.status = final_status;
        }
        keeper.set_event(&event);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use thorcore_keeper::MemStore;
    use thorcore_types::{Address, Asset, Chain, Coin, Uint};

    use super::*;

    fn in_tx(id: &str) -> Tx {
        Tx::new(
            TxId::new(id),
            Chain::new("BNB"),
            Address::new("from"),
            Address::new("to"),
            vec![Coin::new(Asset::rune(), Uint::new(100))],
            "SWAP:BNB.BNB".into()
        )
    }

    #[test]
    fn completes_once_expected_outbound_count_is_reached() {
        let mut keeper = Keeper::new(MemStore::new());
        let tx_id = TxId::new("TX1");
        let event = Event::new(0, "swap", 1, in_tx("TX1"), serde_json::json!({}), EventStatus::Pending, 2);
        let id = upsert_event(&mut keeper, event).unwrap();

        complete_events(&mut keeper, &tx_id, &[in_tx("OUT1")], EventStatus::Success).unwrap();
        let event = keeper.get_event(id).unwrap().unwrap();
        assert_eq!(event.status, EventStatus::Pending);

        complete_events(&mut keeper, &tx_id, &[in_tx("OUT2")], EventStatus::Success).unwrap();
        let event = keeper.get_event(id).unwrap().unwrap();
        assert_eq!(event.status, EventStatus::Success);
        assert_eq!(event.out_txs.len(), 2);
    }

    #[test]
    fn rejects_event_with_empty_in_tx_id() {
        let mut keeper = Keeper::new(MemStore::new());
        let event = Event::new(0, "swap", 1, in_tx(""), serde_json::json!({}), EventStatus::Pending, 1);
        assert!(upsert_event(&mut keeper, event).is_err());
    }
}
