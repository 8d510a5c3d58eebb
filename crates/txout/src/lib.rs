//! The outbound queue. Handlers stage [`TxOutItem`]s here during a
//! block; the buffer is committed to `TxOut[height]` once at end-of-block
//! so other handlers in the same block see each other's additions via
//! [`TxOutStore::get_outbound_items`].

use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{Asset, PubKey, ThorError, TxOutItem, Uint, VaultSet};

/// The in-progress block buffer of outbound items, plus the logic that
/// picks which vault will sign each one.
#[derive(Debug, Default)]
pub struct TxOutStore {
    buffer: Vec<TxOutItem>
}

impl TxOutStore {
    pub fn new() -> Self {
        TxOutStore::default()
    }

    pub fn get_outbound_items(&self) -> &[TxOutItem] {
        &self.buffer
    }

    pub fn clear_outbound_items(&mut self) {
        self.buffer.clear();
    }

    /// Select a vault, deduct its balance for the remainder of the block
    /// and stage the item. Returns `false` (item dropped, not staged) if
    /// no vault can cover the coin.
    pub fn try_add_tx_out_item<S: KVStore>(&mut self, keeper: &mut Keeper<S>, mut item: TxOutItem) -> Result<bool, ThorError> {
        let Some(vault_pub_key) = select_vault(keeper, &item.coin.asset, item.coin.amount)? else {
            return Ok(false);
        };

        item.vault_pub_key = vault_pub_key.clone();
        let mut vault = keeper.get_vault(&vault_pub_key)?;
        vault.deduct(&item.coin.asset, item.coin.amount);
        keeper.set_vault(&vault);

        self.buffer.push(item);
        Ok(true)
    }

    /// Flush the buffer into `TxOut[height]`. Called once at end-of-block.
    pub fn commit<S: KVStore>(&mut self, keeper: &mut Keeper<S>, height: u64) -> Result<(), ThorError> {
        let mut tx_out = keeper.get_tx_out(height)?;
        tx_out.items.append(&mut self.buffer);
        keeper.set_tx_out(&tx_out);
        Ok(())
    }
}

/// Prefer a yggdrasil vault belonging to an active node that already
/// holds enough of `asset`; otherwise fall back to the active asgard
/// vault currently holding the least of it, to spread load.
fn select_vault<S: KVStore>(keeper: &Keeper<S>, asset: &Asset, amount: Uint) -> Result<Option<PubKey>, ThorError> {
    for node in keeper.list_active_node_accounts() {
        for pub_key in &node.pub_keys {
            let vault = keeper.get_vault(pub_key)?;
            if vault.is_yggdrasil() && vault.coin_amount(asset) >= amount {
                return Ok(Some(pub_key.clone()));
            }
        }
    }

    let asgard = keeper.list_active_asgard_vaults();
    Ok(asgard.select_by_min_coin(asset).map(|v| v.pub_key.clone()))
}
