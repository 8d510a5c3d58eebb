use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{Address, Asset, Chain, Uint, VaultStatus};

/// One staker's pro-rata share of a chain ragnarok drain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagnarokPayout {
    pub rune_address: Address,
    pub asset_address: Address,
    pub asset: Asset,
    pub rune_out: Uint,
    pub asset_out: Uint
}

/// Drain `basis_points` of every pool on `chain` pro-rata across its
/// stakers, decaying `pool_units` toward zero over however many blocks
/// the caller calls this with a full 10_000 bp total. Pools outside
/// `chain` are untouched.
pub fn ragnarok_chain_pools<S: KVStore>(keeper: &mut Keeper<S>, chain: &Chain, basis_points: u64) -> Vec<RagnarokPayout> {
    let mut payouts = Vec::new();

    for mut pool in keeper.list_pools().into_iter().filter(|p| &p.asset.chain == chain) {
        if pool.pool_units.is_zero() {
            continue;
        }
        let asset = pool.asset.clone();
        let mut pool_staker = match keeper.get_pool_staker(&asset) {
            Ok(ps) => ps,
            Err(_) => continue
        };

        for staker in pool_staker.stakers.iter_mut() {
            let share_units = staker.units.mul_bp(basis_points);
            if share_units.is_zero() {
                continue;
            }
            let rune_out = share_units.mul_div(pool.balance_rune, pool.pool_units);
            let asset_out = share_units.mul_div(pool.balance_asset, pool.pool_units);

            staker.units = staker.units.safe_sub(share_units);
            pool.balance_rune = pool.balance_rune.safe_sub(rune_out);
            pool.balance_asset = pool.balance_asset.safe_sub(asset_out);
            pool.pool_units = pool.pool_units.safe_sub(share_units);

            payouts.push(RagnarokPayout {
                rune_address: staker.rune_address.clone(),
                asset_address: staker.asset_address.clone(),
                asset: asset.clone(),
                rune_out,
                asset_out
            });
        }

        pool_staker.total_units = pool_staker.stakers.iter().fold(Uint::ZERO, |acc, s| acc.add(s.units));
        pool_staker.remove_empty();
        keeper.set_pool_staker(&asset, &pool_staker);
        keeper.set_pool(&pool);
    }

    payouts
}

/// Empty every retiring vault's coins on `chain` - they have nowhere
/// left to go once the chain is no longer supported.
pub fn empty_retiring_vaults_for_chain<S: KVStore>(keeper: &mut Keeper<S>, chain: &Chain) {
    for mut vault in keeper.list_vaults() {
        if matches!(vault.status, VaultStatus::RetiringVault) && vault.supports_chain(chain) {
            vault.coins.retain(|c| &c.asset.chain != chain);
            keeper.set_vault(&vault);
        }
    }
}

#[cfg(test)]
mod tests {
    use thorcore_keeper::MemStore;
    use thorcore_types::{Pool, PoolStaker, StakerUnit};

    use super::*;

    #[test]
    fn full_ragnarok_drains_pool_to_zero_and_pays_stakers_pro_rata() {
        let mut keeper = Keeper::new(MemStore::new());
        let asset = Asset::parse("BNB.BNB").unwrap();
        let mut pool = Pool::new(asset.clone());
        pool.balance_rune = Uint::new(200);
        pool.balance_asset = Uint::new(100);
        pool.pool_units = Uint::new(300);
        keeper.set_pool(&pool);

        let mut pool_staker = PoolStaker { total_units: Uint::new(300), stakers: Vec::new() };
        pool_staker.stakers.push(StakerUnit {
            rune_address: Address::new("r1"),
            asset_address: Address::new("a1"),
            units: Uint::new(200),
            height: 1,
            pending_rune: Uint::ZERO
        });
        pool_staker.stakers.push(StakerUnit {
            rune_address: Address::new("r2"),
            asset_address: Address::new("a2"),
            units: Uint::new(100),
            height: 1,
            pending_rune: Uint::ZERO
        });
        keeper.set_pool_staker(&asset, &pool_staker);

        let payouts = ragnarok_chain_pools(&mut keeper, &Chain::new("BNB"), 10_000);

        assert_eq!(payouts.len(), 2);
        let pool_after = keeper.get_pool(&asset).unwrap();
        assert!(pool_after.pool_units.is_zero());
        assert!(pool_after.balance_rune.is_zero());
        assert!(pool_after.balance_asset.is_zero());
    }
}
