use thorcore_events::upsert_event;
use thorcore_keeper::{KVStore, Keeper};
use thorcore_txout::TxOutStore;
use thorcore_types::{Event, EventStatus, ThorError, Tx, TxOutItem};

/// The fallback path for any tx that fails memo parsing or inner-message
/// validation/execution: every coin with a known pool (or RUNE, which
/// always has a destination) is queued back to the sender; coins for
/// assets the network has no pool for are dropped and logged rather than
/// refunded, since there is no vault to source them from.
pub fn execute_refund<S: KVStore>(keeper: &mut Keeper<S>, txout_store: &mut TxOutStore, tx: &Tx, height: i64, cause: &ThorError) -> Result<(), ThorError> {
    tracing::warn!(tx_id = %tx.id, error = %cause, "refunding tx");

    let mut queued = 0u32;
    for coin in &tx.coins {
        let has_pool = coin.asset.is_rune() || keeper.list_pools().iter().any(|p| p.asset == coin.asset);
        if !has_pool {
            tracing::warn!(asset = %coin.asset, tx_id = %tx.id, "dropping coin with no matching pool on refund");
            continue;
        }
        let item = TxOutItem::new(coin.asset.chain.clone(), tx.from_address.clone(), tx.id.clone(), coin.clone(), format!("REFUND:{}", tx.id));
        if txout_store.try_add_tx_out_item(keeper, item)? {
            queued += 1;
        }
    }

    let status = if queued == 0 { EventStatus::Refund } else { EventStatus::Pending };
    let body = serde_json::json!({"reason": cause.to_string()});
    let event = Event::new(0, "refund", height as u64, tx.clone(), body, status, queued);
    upsert_event(keeper, event)?;
    Ok(())
}
