use serde::Deserialize;
use thorcore_keeper::{KVStore, Keeper};
use thorcore_txout::TxOutStore;
use thorcore_types::{Address, MsgObservedTxIn, MsgObservedTxOut, ObservedTx};
use thorcore_vault::enable_next_pool;

use crate::config::parse_version;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Direction {
    In,
    Out
}

/// One line of a batch replay file: an observed-tx submission at a given
/// block height, optionally overriding the run's default protocol
/// version.
#[derive(Debug, Deserialize)]
pub struct BatchEntry {
    direction: Direction,
    height: i64,
    version: Option<String>,
    signer: Address,
    txs: Vec<ObservedTx>
}

/// Parse a newline-delimited batch file: one JSON [`BatchEntry`] object
/// per line, blank lines ignored. `#`-prefixed lines are comments.
pub fn parse_batch(raw: &str) -> eyre::Result<Vec<BatchEntry>> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| Ok(serde_json::from_str(line)?))
        .collect()
}

/// Feed every entry in `batch` through the observed-tx pipeline in order,
/// falling back to `default_version` when an entry doesn't name its own.
/// Entries are grouped by height: once every entry for a height has run,
/// that height's end-of-block tasks fire before moving on - committing
/// the outbound buffer into `TxOut[height]` and promoting the next
/// bootstrap pool, if one qualifies. Returns every height touched, in
/// the order first seen, so the caller can look up what each committed.
pub fn run_batch<S: KVStore>(
    keeper: &mut Keeper<S>,
    txout_store: &mut TxOutStore,
    batch: Vec<BatchEntry>,
    default_version: (u64, u64, u64)
) -> eyre::Result<Vec<i64>> {
    let mut current_height: Option<i64> = None;
    let mut heights = Vec::new();

    for entry in batch {
        if let Some(height) = current_height {
            if height != entry.height {
                run_end_of_block(keeper, txout_store, height)?;
            }
        }
        if current_height != Some(entry.height) {
            heights.push(entry.height);
        }
        current_height = Some(entry.height);

        let version = match &entry.version {
            Some(v) => parse_version(v)?,
            None => default_version
        };
        let outcome = match entry.direction {
            Direction::In => thorcore_handler::handle_observed_tx_in(
                keeper,
                txout_store,
                MsgObservedTxIn { txs: entry.txs, signer: entry.signer },
                entry.height,
                version
            ),
            Direction::Out => thorcore_handler::handle_observed_tx_out(
                keeper,
                txout_store,
                MsgObservedTxOut { txs: entry.txs, signer: entry.signer },
                entry.height,
                version
            )
        };
        if let Err(err) = outcome {
            tracing::error!(height = entry.height, error = %err, "batch entry failed");
        }
    }

    if let Some(height) = current_height {
        run_end_of_block(keeper, txout_store, height)?;
    }
    Ok(heights)
}

/// Tasks that run once per block boundary, after every entry at that
/// height has been processed: flush the outbound buffer and check
/// whether a bootstrap pool has accumulated enough balance to enable.
/// Asgard rotation and validator rotation are not driven here - both
/// require a vault or quorum produced by an out-of-band threshold
/// key-gen round this replay tool has no message path for (see
/// DESIGN.md).
fn run_end_of_block<S: KVStore>(keeper: &mut Keeper<S>, txout_store: &mut TxOutStore, height: i64) -> eyre::Result<()> {
    txout_store.commit(keeper, height as u64)?;
    if let Some(asset) = enable_next_pool(keeper) {
        tracing::info!(%asset, height, "pool enabled");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use thorcore_keeper::MemStore;
    use thorcore_types::{Asset, Chain, Coin, NodeAccount, NodeStatus, PubKey, Tx, TxId, Uint};

    use super::*;

    #[test]
    fn parse_batch_skips_blank_lines_and_comments() {
        let raw = "\n# a comment\n{\"direction\":\"in\",\"height\":1,\"version\":null,\"signer\":\"a\",\"txs\":[]}\n   \n";
        let entries = parse_batch(raw).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn run_batch_executes_an_in_direction_entry() {
        let mut keeper = Keeper::new(MemStore::new());
        let mut node = NodeAccount::new(Address::new("a"), Address::new("a"), Uint::new(1000), 0);
        node.status = NodeStatus::Active;
        node.observer_active = true;
        keeper.set_node_account(&node);
        let mut txout_store = TxOutStore::new();

        let tx = Tx::new(
            TxId::new("TX1"),
            Chain::new("BNB"),
            Address::new("from1"),
            Address::new("to1"),
            vec![Coin::new(Asset::parse("BNB.BNB").unwrap(), Uint::new(1))],
            "GAS".into()
        );
        let observed = ObservedTx::new(tx, 1, PubKey::new("pk"), Address::new("a"));
        let entry = BatchEntry { direction: Direction::In, height: 1, version: None, signer: Address::new("a"), txs: vec![observed] };

        let heights = run_batch(&mut keeper, &mut txout_store, vec![entry], (0, 1, 0)).unwrap();

        assert_eq!(heights, vec![1]);
        assert!(txout_store.get_outbound_items().is_empty());
        assert!(keeper.list_events().is_empty());
    }

    #[test]
    fn run_batch_commits_outbound_items_into_tx_out_at_height_boundary() {
        let mut keeper = Keeper::new(MemStore::new());
        let mut node = NodeAccount::new(Address::new("a"), Address::new("a"), Uint::new(1000), 0);
        node.status = NodeStatus::Active;
        node.observer_active = true;
        keeper.set_node_account(&node);

        let asset = Asset::rune();
        let mut vault = thorcore_types::Vault::new_asgard(PubKey::new("vault1"), vec![Chain::new("THOR")]);
        vault.add_funds(&[Coin::new(asset.clone(), Uint::new(1000))]);
        keeper.set_vault(&vault);

        let mut txout_store = TxOutStore::new();
        let tx = Tx::new(
            TxId::new("TX1"),
            Chain::new("BNB"),
            Address::new("from1"),
            Address::new("to1"),
            vec![Coin::new(asset, Uint::new(100))],
            "invalid-memo".into()
        );
        let observed = ObservedTx::new(tx, 1, PubKey::new("pk"), Address::new("a"));
        let entry_one = BatchEntry { direction: Direction::In, height: 5, version: None, signer: Address::new("a"), txs: vec![observed] };
        let entry_two =
            BatchEntry { direction: Direction::In, height: 6, version: None, signer: Address::new("a"), txs: vec![] };

        let heights = run_batch(&mut keeper, &mut txout_store, vec![entry_one, entry_two], (0, 1, 0)).unwrap();

        assert_eq!(heights, vec![5, 6]);
        assert!(txout_store.get_outbound_items().is_empty());
        assert_eq!(keeper.get_tx_out(5).unwrap().items.len(), 1);
        assert!(keeper.get_tx_out(6).unwrap().items.is_empty());
    }
}
