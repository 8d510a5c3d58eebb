use thorcore_types::{
    Address, Asset, Event, NodeAccount, Pool, PoolStaker, StakerPool, ThorError, TxId, TxOut,
    TxOutItem, Vault
};
use thorcore_types::tx::ObservedTxVoter;

use crate::{keys, store::KVStore};

fn encode<T: serde::Serialize>(value: &T) -> Vec<u8> {
    bincode::serialize(value).expect("in-memory types are always encodable")
}

fn decode<T: serde::de::DeserializeOwned>(key: &str, bytes: &[u8]) -> Result<T, ThorError> {
    bincode::deserialize(bytes).map_err(|e| ThorError::kv(key, ThorError::Decode(e.to_string())))
}

/// Typed access to the underlying [`KVStore`]. Every accessor derives its
/// key from the current minor version, so a reader never has to think
/// about versioning.
pub struct Keeper<S: KVStore> {
    store: S
}

impl<S: KVStore> Keeper<S> {
    pub fn new(store: S) -> Self {
        Keeper { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// The minor version the next write should be keyed under: the lowest
    /// `version` field among currently active nodes, defaulting to `0`
    /// when there are none yet (genesis).
    pub fn current_minor_version(&self) -> u64 {
        self.list_active_node_accounts()
            .iter()
            .filter_map(|n| n.version.split('.').nth(1).and_then(|v| v.parse::<u64>().ok()))
            .min()
            .unwrap_or(0)
    }

    fn get<T: serde::de::DeserializeOwned>(&self, prefix: &str, id: &str) -> Result<Option<T>, ThorError> {
        let key = keys::make_key(prefix, self.current_minor_version(), id);
        match self.store.get_raw(&key) {
            Some(bytes) => decode(&key, &bytes).map(Some),
            None => Ok(None)
        }
    }

    fn set<T: serde::Serialize>(&mut self, prefix: &str, id: &str, value: &T) {
        let key = keys::make_key(prefix, self.current_minor_version(), id);
        self.store.set_raw(&key, encode(value));
    }

    fn list<T: serde::de::DeserializeOwned>(&self, prefix: &str) -> Vec<T> {
        let versioned = format!("{prefix}{}/", self.current_minor_version());
        self.store
            .iterate_prefix(&versioned)
            .into_iter()
            .filter_map(|(k, v)| decode(&k, &v).ok())
            .collect()
    }

    // -- pools ---------------------------------------------------------

    pub fn get_pool(&self, asset: &Asset) -> Result<Pool, ThorError> {
        Ok(self.get(keys::POOL, &asset.to_string())?.unwrap_or_else(|| Pool::new(asset.clone())))
    }

    pub fn set_pool(&mut self, pool: &Pool) {
        let id = pool.asset.to_string();
        self.set(keys::POOL, &id, pool);
    }

    pub fn list_pools(&self) -> Vec<Pool> {
        self.list(keys::POOL)
    }

    // -- node accounts ---------------------------------------------------

    pub fn get_node_account(&self, addr: &Address) -> Result<NodeAccount, ThorError> {
        Ok(self.get(keys::NODE_ACCOUNT, addr.as_str())?.unwrap_or_default())
    }

    pub fn set_node_account(&mut self, node: &NodeAccount) {
        let id = node.node_address.as_str().to_string();
        self.set(keys::NODE_ACCOUNT, &id, node);
    }

    pub fn list_node_accounts(&self) -> Vec<NodeAccount> {
        self.list(keys::NODE_ACCOUNT)
    }

    pub fn list_active_node_accounts(&self) -> Vec<NodeAccount> {
        self.list_node_accounts().into_iter().filter(|n| n.is_active()).collect()
    }

    // -- vaults ----------------------------------------------------------

    pub fn get_vault(&self, pub_key: &thorcore_types::PubKey) -> Result<Vault, ThorError> {
        Ok(self.get(keys::VAULT, &pub_key.0)?.unwrap_or_default())
    }

    pub fn set_vault(&mut self, vault: &Vault) {
        let id = vault.pub_key.0.clone();
        self.set(keys::VAULT, &id, vault);
    }

    pub fn list_vaults(&self) -> Vec<Vault> {
        self.list(keys::VAULT)
    }

    pub fn list_active_asgard_vaults(&self) -> Vec<Vault> {
        self.list_vaults()
            .into_iter()
            .filter(|v| !v.is_yggdrasil() && matches!(v.status, thorcore_types::VaultStatus::ActiveVault))
            .collect()
    }

    // -- staker indexes ----------------------------------------------------

    pub fn get_pool_staker(&self, asset: &Asset) -> Result<PoolStaker, ThorError> {
        Ok(self.get(keys::POOL_STAKER, &asset.to_string())?.unwrap_or_default())
    }

    pub fn set_pool_staker(&mut self, asset: &Asset, ps: &PoolStaker) {
        self.set(keys::POOL_STAKER, &asset.to_string(), ps);
    }

    pub fn get_staker_pool(&self, rune_address: &Address) -> Result<StakerPool, ThorError> {
        Ok(self
            .get(keys::STAKER_POOL, rune_address.as_str())?
            .unwrap_or_else(|| StakerPool::new(rune_address.clone())))
    }

    pub fn set_staker_pool(&mut self, sp: &StakerPool) {
        let id = sp.rune_address.as_str().to_string();
        self.set(keys::STAKER_POOL, &id, sp);
    }

    // -- observed tx voters ------------------------------------------------

    pub fn get_observed_tx_voter(&self, tx_id: &thorcore_types::TxId) -> Result<ObservedTxVoter, ThorError> {
        Ok(self
            .get(keys::OBSERVED_TX_VOTER, &tx_id.0)?
            .unwrap_or_else(|| ObservedTxVoter::new(tx_id.clone())))
    }

    pub fn set_observed_tx_voter(&mut self, voter: &ObservedTxVoter) {
        let id = voter.tx_id.0.clone();
        self.set(keys::OBSERVED_TX_VOTER, &id, voter);
    }

    // -- tx out ------------------------------------------------------------

    pub fn get_tx_out(&self, height: u64) -> Result<TxOut, ThorError> {
        Ok(self
            .get(keys::TX_OUT, &height.to_string())?
            .unwrap_or(TxOut { height, items: Vec::new() }))
    }

    pub fn set_tx_out(&mut self, tx_out: &TxOut) {
        self.set(keys::TX_OUT, &tx_out.height.to_string(), tx_out);
    }

    pub fn append_tx_out_item(&mut self, height: u64, item: TxOutItem) -> Result<(), ThorError> {
        let mut tx_out = self.get_tx_out(height)?;
        tx_out.items.push(item);
        self.set_tx_out(&tx_out);
        Ok(())
    }

    // -- events --------------------------------------------------------

    pub fn next_event_id(&mut self) -> u64 {
        let key = keys::make_key(keys::EVENT_ID_COUNTER, self.current_minor_version(), "COUNTER");
        let next = self
            .store
            .get_raw(&key)
            .and_then(|b| decode::<u64>(&key, &b).ok())
            .unwrap_or(0)
            + 1;
        self.store.set_raw(&key, encode(&next));
        next
    }

    pub fn get_event(&self, id: u64) -> Result<Option<Event>, ThorError> {
        self.get(keys::EVENT, &id.to_string())
    }

    pub fn set_event(&mut self, event: &Event) {
        self.set(keys::EVENT, &event.id.to_string(), event);
    }

    pub fn list_events(&self) -> Vec<Event> {
        self.list(keys::EVENT)
    }

    /// Event ids indexed under an inbound tx id (`tx_events/<in_tx.id>`).
    pub fn get_event_ids_by_tx(&self, tx_id: &TxId) -> Vec<u64> {
        self.get(keys::TX_EVENTS_INDEX, &tx_id.0).ok().flatten().unwrap_or_default()
    }

    pub fn append_event_id_by_tx(&mut self, tx_id: &TxId, event_id: u64) {
        let mut ids = self.get_event_ids_by_tx(tx_id);
        ids.push(event_id);
        self.set(keys::TX_EVENTS_INDEX, &tx_id.0, &ids);
    }
}
