use thorcore_types::{Address, Pool, PoolStaker, StakerPool, StakerUnit, ThorError, Uint};

/// Units granted for staking `(r, a)` into `pool`. The first staker into
/// an empty pool receives `r + a` directly and sets the initial price.
/// Later stakers use the THORChain slip-adjusted formula
/// `((R + a*P)*(r*A + R*a))/(4*R*A)`, `P = R/A`; algebraically cancelling
/// `R` (valid whenever `R > 0`, which the pool invariant guarantees once
/// `pool_units != 0`) gives `(A+a)*(r*A+R*a)/(4*A^2)`, which never
/// divides by anything but `A`.
pub fn calc_stake_units(pool: &Pool, r: Uint, a: Uint) -> Uint {
    if pool.pool_units.is_zero() {
        return r.add(a);
    }
    let big_r = pool.balance_rune;
    let big_a = pool.balance_asset;
    let numerator = big_a.add(a).mul(r.mul(big_a).add(big_r.mul(a)));
    let denominator = Uint::new(4).mul(big_a).mul(big_a);
    numerator.div(denominator)
}

/// Apply a stake contribution to `pool` and both staker indexes, in
/// place. Returns the units granted.
pub fn add_stake(
    pool: &mut Pool,
    pool_staker: &mut PoolStaker,
    staker_pool: &mut StakerPool,
    rune_address: Address,
    asset_address: Address,
    r: Uint,
    a: Uint,
    height: u64
) -> Result<Uint, ThorError> {
    if r.is_zero() && a.is_zero() {
        return Err(ThorError::StakeFailValidation("stake amounts are both zero".into()));
    }

    let units = calc_stake_units(pool, r, a);

    pool.balance_rune = pool.balance_rune.add(r);
    pool.balance_asset = pool.balance_asset.add(a);
    pool.pool_units = pool.pool_units.add(units);

    let existing_units = pool_staker.get(&rune_address).map(|s| s.units).unwrap_or(Uint::ZERO);
    pool_staker.upsert(StakerUnit {
        rune_address: rune_address.clone(),
        asset_address,
        units: existing_units.add(units),
        height,
        pending_rune: Uint::ZERO
    });
    pool_staker.total_units = pool_staker.total_units.add(units);

    let existing = staker_pool.get(&pool.asset);
    staker_pool.set(pool.asset.clone(), existing.add(units));

    Ok(units)
}

/// Withdraw `basis_points` (1..=10000) of the caller's units from `pool`.
/// Returns `(rune_out, asset_out)`. If the staker is left with zero units
/// their entry is pruned from both indexes.
pub fn withdraw_stake(
    pool: &mut Pool,
    pool_staker: &mut PoolStaker,
    staker_pool: &mut StakerPool,
    rune_address: &Address,
    basis_points: u64
) -> Result<(Uint, Uint), ThorError> {
    if basis_points == 0 || basis_points > 10_000 {
        return Err(ThorError::UnstakeFailValidation(format!("basis points {basis_points} out of range")));
    }

    let staker_units = pool_staker
        .get(rune_address)
        .map(|s| s.units)
        .ok_or_else(|| ThorError::NoStakeUnitLeft(pool.asset.to_string()))?;
    if staker_units.is_zero() {
        return Err(ThorError::NoStakeUnitLeft(pool.asset.to_string()));
    }

    let units_out = staker_units.mul_bp(basis_points);
    if units_out.is_zero() {
        return Err(ThorError::NoStakeUnitLeft(pool.asset.to_string()));
    }

    let rune_out = units_out.mul_div(pool.balance_rune, pool.pool_units);
    let asset_out = units_out.mul_div(pool.balance_asset, pool.pool_units);

    pool.balance_rune = pool.balance_rune.safe_sub(rune_out);
    pool.balance_asset = pool.balance_asset.safe_sub(asset_out);
    pool.pool_units = pool.pool_units.safe_sub(units_out);

    let remaining = staker_units.safe_sub(units_out);
    if let Some(unit) = pool_staker.get_mut(rune_address) {
        unit.units = remaining;
    }
    pool_staker.total_units = pool_staker.total_units.safe_sub(units_out);
    pool_staker.remove_empty();

    staker_pool.set(pool.asset.clone(), remaining);

    Ok((rune_out, asset_out))
}

#[cfg(test)]
mod tests {
    use thorcore_types::Asset;

    use super::*;

    fn bnb_pool() -> Pool {
        Pool::new(Asset::parse("BNB.BNB").unwrap())
    }

    #[test]
    fn first_staker_sets_initial_price_and_units() {
        let mut pool = bnb_pool();
        let mut pool_staker = PoolStaker::default();
        let mut staker_pool = StakerPool::new(Address::new("rune1"));

        let units = add_stake(
            &mut pool,
            &mut pool_staker,
            &mut staker_pool,
            Address::new("rune1"),
            Address::new("bnb1"),
            Uint::new(100),
            Uint::new(50),
            1
        )
        .unwrap();

        assert_eq!(units, Uint::new(150));
        assert_eq!(pool.balance_rune, Uint::new(100));
        assert_eq!(pool.balance_asset, Uint::new(50));
        assert_eq!(pool.pool_units, Uint::new(150));
    }

    #[test]
    fn full_withdraw_returns_all_staked_coins_and_zeroes_pool() {
        let mut pool = bnb_pool();
        let mut pool_staker = PoolStaker::default();
        let mut staker_pool = StakerPool::new(Address::new("rune1"));
        let rune_addr = Address::new("rune1");

        add_stake(&mut pool, &mut pool_staker, &mut staker_pool, rune_addr.clone(), Address::new("bnb1"), Uint::new(100), Uint::new(50), 1)
            .unwrap();

        let (rune_out, asset_out) = withdraw_stake(&mut pool, &mut pool_staker, &mut staker_pool, &rune_addr, 10_000).unwrap();

        assert_eq!(rune_out, Uint::new(100));
        assert_eq!(asset_out, Uint::new(50));
        assert!(pool.pool_units.is_zero());
        assert!(pool.balance_rune.is_zero());
        assert!(pool.balance_asset.is_zero());
        assert!(pool_staker.get(&rune_addr).is_none());
    }

    #[test]
    fn withdraw_rejects_basis_points_out_of_range() {
        let mut pool = bnb_pool();
        let mut pool_staker = PoolStaker::default();
        let mut staker_pool = StakerPool::new(Address::new("rune1"));
        assert!(withdraw_stake(&mut pool, &mut pool_staker, &mut staker_pool, &Address::new("rune1"), 0).is_err());
        assert!(withdraw_stake(&mut pool, &mut pool_staker, &mut staker_pool, &Address::new("rune1"), 20_000).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;
    use thorcore_types::Asset;

    use super::*;

    proptest! {
        #[test]
        fn pool_units_zero_iff_both_balances_zero(
            r1 in 1u64..1_000_000, a1 in 1u64..1_000_000,
            bp in 1u64..=10_000
        ) {
            let mut pool = Pool::new(Asset::parse("BNB.BNB").unwrap());
            let mut pool_staker = PoolStaker::default();
            let mut staker_pool = StakerPool::new(Address::new("rune1"));
            let rune_addr = Address::new("rune1");

            add_stake(&mut pool, &mut pool_staker, &mut staker_pool, rune_addr.clone(), Address::new("bnb1"), Uint::new(r1), Uint::new(a1), 1).unwrap();
            prop_assert!(pool.invariant_holds());

            withdraw_stake(&mut pool, &mut pool_staker, &mut staker_pool, &rune_addr, bp).unwrap();
            prop_assert!(pool.invariant_holds());
        }

        #[test]
        fn staker_total_units_track_pool_staker_sum(
            r1 in 1u64..1_000_000, a1 in 1u64..1_000_000,
            r2 in 1u64..1_000_000, a2 in 1u64..1_000_000
        ) {
            let mut pool = Pool::new(Asset::parse("BNB.BNB").unwrap());
            let mut pool_staker = PoolStaker::default();
            let mut staker_pool = StakerPool::new(Address::new("rune1"));

            add_stake(&mut pool, &mut pool_staker, &mut staker_pool, Address::new("rune1"), Address::new("bnb1"), Uint::new(r1), Uint::new(a1), 1).unwrap();
            add_stake(&mut pool, &mut pool_staker, &mut staker_pool, Address::new("rune2"), Address::new("bnb2"), Uint::new(r2), Uint::new(a2), 1).unwrap();

            let summed: Uint = pool_staker.stakers.iter().fold(Uint::ZERO, |acc, s| acc.add(s.units));
            prop_assert_eq!(summed, pool_staker.total_units);
            prop_assert_eq!(pool_staker.total_units, pool.pool_units);
        }
    }
}
