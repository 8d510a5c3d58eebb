use thorcore_keeper::{KVStore, Keeper};
use thorcore_txout::TxOutStore;
use thorcore_types::{Asset, Chain, Coin, NodeAccount, NodeStatus, PubKey, ThorError, TxId, TxOutItem, Uint, Vault};

/// Seed a freshly-activated node's yggdrasil vault and queue the outbound
/// items that actually move the coins to it.
pub fn yggdrasil_fund<S: KVStore>(
    keeper: &mut Keeper<S>,
    txout_store: &mut TxOutStore,
    node: &NodeAccount,
    seed_coins: &[Coin]
) -> Result<(), ThorError> {
    let pub_key = node
        .pub_keys
        .first()
        .cloned()
        .ok_or_else(|| ThorError::InvalidVault("node has no pub key to seed a yggdrasil vault".into()))?;

    let chains: Vec<Chain> = seed_coins.iter().map(|c| c.asset.chain.clone()).collect();
    let mut vault = Vault::new_yggdrasil(pub_key.clone(), chains);
    vault.membership = vec![pub_key];
    keeper.set_vault(&vault);

    for coin in seed_coins {
        let item = TxOutItem::new(coin.asset.chain.clone(), node.bond_address.clone(), TxId::new(""), coin.clone(), String::new());
        txout_store.try_add_tx_out_item(keeper, item)?;
    }
    Ok(())
}

/// Return a leaving or disabled node's yggdrasil vault. Any residual
/// balance still sitting in the vault (it should have been emptied by
/// the inbound `YggdrasilReturn` tx already) is valued in rune at each
/// pool's spot price and treated as a shortfall: it is subtracted from
/// the bond refund rather than paid out twice. The node's entire
/// remaining bond is then refunded and the node is disabled.
pub fn yggdrasil_return<S: KVStore>(
    keeper: &mut Keeper<S>,
    txout_store: &mut TxOutStore,
    node_address: &thorcore_types::Address,
    pub_key: &PubKey,
    height: i64
) -> Result<Uint, ThorError> {
    let vault = keeper.get_vault(pub_key)?;
    let mut residual_rune = Uint::ZERO;
    for coin in &vault.coins {
        if coin.asset.is_rune() {
            residual_rune = residual_rune.add(coin.amount);
        } else {
            let pool = keeper.get_pool(&coin.asset)?;
            residual_rune = residual_rune.add(pool.asset_value_in_rune(coin.amount));
        }
    }

    let mut node = keeper.get_node_account(node_address)?;
    let original_bond = node.bond;
    let refund = original_bond.safe_sub(residual_rune);

    node.bond = Uint::ZERO;
    node.update_status(NodeStatus::Disabled, height);
    keeper.set_node_account(&node);

    if !refund.is_zero() {
        let item = TxOutItem::new(Chain::thor(), node.bond_address.clone(), TxId::new(""), Coin::new(Asset::rune(), refund), String::new());
        txout_store.try_add_tx_out_item(keeper, item)?;
    }

    Ok(refund)
}

#[cfg(test)]
mod tests {
    use thorcore_keeper::MemStore;
    use thorcore_types::{Address, Pool};

    use super::*;

    #[test]
    fn yggdrasil_return_with_shortfall_matches_worked_example() {
        let mut keeper = Keeper::new(MemStore::new());
        let mut pool = Pool::new(Asset::parse("BNB.BNB").unwrap());
        pool.balance_rune = Uint::new(500);
        pool.balance_asset = Uint::new(100); // 5 RUNE/BNB
        keeper.set_pool(&pool);

        let node_address = Address::new("node1");
        let mut node = NodeAccount::new(node_address.clone(), Address::new("bond_addr"), Uint::new(100), 0);
        node.pub_keys = vec![PubKey::new("pk1")];
        keeper.set_node_account(&node);

        let mut vault = Vault::new_yggdrasil(PubKey::new("pk1"), vec![Chain::new("BNB")]);
        vault.add_funds(&[Coin::new(Asset::parse("BNB.BNB").unwrap(), Uint::new(10))]);
        keeper.set_vault(&vault);

        let mut txout_store = TxOutStore::new();
        let refund = yggdrasil_return(&mut keeper, &mut txout_store, &node_address, &PubKey::new("pk1"), 10).unwrap();

        assert_eq!(refund, Uint::new(50));
        let updated_node = keeper.get_node_account(&node_address).unwrap();
        assert!(updated_node.bond.is_zero());
        assert_eq!(updated_node.status, NodeStatus::Disabled);
        assert_eq!(txout_store.get_outbound_items().len(), 0, "no asgard vault is funded to cover the refund in this fixture");
    }
}
