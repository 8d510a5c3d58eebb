use thorcore_types::{Asset, Pool, PoolStatus, Uint};

/// Builds a [`Pool`] for a test scenario, defaulting to an empty
/// `Bootstrap` pool the way [`Pool::new`] does.
pub struct PoolBuilder {
    asset: Asset,
    balance_rune: Uint,
    balance_asset: Uint,
    pool_units: Uint,
    status: PoolStatus
}

impl PoolBuilder {
    pub fn new(asset: Asset) -> Self {
        PoolBuilder {
            asset,
            balance_rune: Uint::ZERO,
            balance_asset: Uint::ZERO,
            pool_units: Uint::ZERO,
            status: PoolStatus::Bootstrap
        }
    }

    pub fn with_balances(mut self, rune: u64, asset: u64) -> Self {
        self.balance_rune = Uint::new(rune);
        self.balance_asset = Uint::new(asset);
        self
    }

    pub fn with_units(mut self, units: u64) -> Self {
        self.pool_units = Uint::new(units);
        self
    }

    pub fn enabled(mut self) -> Self {
        self.status = PoolStatus::Enabled;
        self
    }

    pub fn status(mut self, status: PoolStatus) -> Self {
        self.status = status;
        self
    }

    pub fn build(self) -> Pool {
        Pool {
            asset: self.asset,
            balance_rune: self.balance_rune,
            balance_asset: self.balance_asset,
            pool_units: self.pool_units,
            status: self.status,
            pool_address: Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use thorcore_types::Asset;

    use super::*;

    #[test]
    fn defaults_match_pool_new() {
        let asset = Asset::parse("BNB.BNB").unwrap();
        let built = PoolBuilder::new(asset.clone()).build();
        assert_eq!(built, Pool::new(asset));
    }

    #[test]
    fn enabled_with_balances_sets_every_field() {
        let asset = Asset::parse("BTC.BTC").unwrap();
        let pool = PoolBuilder::new(asset).with_balances(1000, 10).with_units(500).enabled().build();
        assert_eq!(pool.balance_rune, Uint::new(1000));
        assert_eq!(pool.balance_asset, Uint::new(10));
        assert_eq!(pool.pool_units, Uint::new(500));
        assert!(pool.is_enabled());
    }
}
