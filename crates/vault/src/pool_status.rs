use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{Asset, PoolStatus};

/// Promote the single Bootstrap pool with the largest rune balance to
/// Enabled, provided both its balances are nonzero. Pools are scanned in
/// keeper iteration order (lexicographic by asset key) and only a
/// strictly larger balance replaces the current pick, so a tie keeps the
/// earliest pool in that order - this mirrors `enableNextPool` exactly.
pub fn enable_next_pool<S: KVStore>(keeper: &mut Keeper<S>) -> Option<Asset> {
    let mut candidate = None;
    for pool in keeper.list_pools() {
        if pool.status != PoolStatus::Bootstrap {
            continue;
        }
        match &candidate {
            None => candidate = Some(pool),
            Some(current) if current.balance_rune < pool.balance_rune => candidate = Some(pool),
            _ => {}
        }
    }

    let mut pool = candidate?;
    if pool.balance_asset.is_zero() || pool.balance_rune.is_zero() {
        return None;
    }
    pool.status = PoolStatus::Enabled;
    let asset = pool.asset.clone();
    keeper.set_pool(&pool);
    Some(asset)
}

#[cfg(test)]
mod tests {
    use thorcore_keeper::MemStore;
    use thorcore_types::{Pool, Uint};

    use super::*;

    fn bootstrap_pool(sym: &str, rune: u64, asset: u64) -> Pool {
        let mut pool = Pool::new(Asset::parse(sym).unwrap());
        pool.balance_rune = Uint::new(rune);
        pool.balance_asset = Uint::new(asset);
        pool
    }

    #[test]
    fn enables_bootstrap_pool_with_largest_rune_balance() {
        let mut keeper = Keeper::new(MemStore::new());
        keeper.set_pool(&bootstrap_pool("BNB.BNB", 100, 50));
        keeper.set_pool(&bootstrap_pool("BTC.BTC", 300, 10));
        keeper.set_pool(&bootstrap_pool("ETH.ETH", 50, 5));

        let enabled = enable_next_pool(&mut keeper).unwrap();
        assert_eq!(enabled, Asset::parse("BTC.BTC").unwrap());
        assert_eq!(keeper.get_pool(&enabled).unwrap().status, PoolStatus::Enabled);
        assert_eq!(keeper.get_pool(&Asset::parse("BNB.BNB").unwrap()).unwrap().status, PoolStatus::Bootstrap);
    }

    #[test]
    fn skips_pools_with_a_zero_balance() {
        let mut keeper = Keeper::new(MemStore::new());
        keeper.set_pool(&bootstrap_pool("BNB.BNB", 500, 0));
        assert!(enable_next_pool(&mut keeper).is_none());
    }

    #[test]
    fn tie_keeps_earliest_pool_in_iteration_order() {
        let mut keeper = Keeper::new(MemStore::new());
        keeper.set_pool(&bootstrap_pool("BNB.BNB", 100, 50));
        keeper.set_pool(&bootstrap_pool("BTC.BTC", 100, 10));

        let enabled = enable_next_pool(&mut keeper).unwrap();
        assert_eq!(enabled, Asset::parse("BNB.BNB").unwrap());
    }
}
