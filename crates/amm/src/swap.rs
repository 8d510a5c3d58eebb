use thorcore_types::{Pool, ThorError, Uint};

/// Which side of the pool the input amount lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwapDirection {
    RuneToAsset,
    AssetToRune
}

/// The outcome of a single successful swap leg. The slip ratios are
/// transient `f64` figures for event reporting only - never written back
/// into the pool.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapResult {
    pub emit: Uint,
    pub liquidity_fee: Uint,
    pub trade_slip: f64,
    pub pool_slip: f64,
    pub price_slip: f64
}

/// Execute one constant-product swap leg against `pool`, mutating its
/// balances on success and leaving it untouched on any failure.
pub fn swap(pool: &mut Pool, direction: SwapDirection, x: Uint, trade_target: Uint, global_slip_limit: f64) -> Result<SwapResult, ThorError> {
    if x.is_zero() {
        return Err(ThorError::SwapFailInvalidAmount);
    }

    let (big_x, big_y) = match direction {
        SwapDirection::RuneToAsset => (pool.balance_rune, pool.balance_asset),
        SwapDirection::AssetToRune => (pool.balance_asset, pool.balance_rune)
    };
    if big_x.is_zero() || big_y.is_zero() {
        return Err(ThorError::SwapFailInvalidBalance);
    }

    let denom = x.add(big_x).mul(x.add(big_x));
    let emit = x.mul(big_x).mul_div(big_y, denom);
    let liquidity_fee = x.mul(x).mul_div(big_y, denom);

    if emit.is_zero() {
        return Err(ThorError::SwapFailZeroEmitAsset);
    }
    if emit > big_y {
        return Err(ThorError::SwapFailNotEnoughBalance);
    }

    let xf = x.to_f64_units();
    let big_xf = big_x.to_f64_units();
    let emitf = emit.to_f64_units();
    let trade_slip = xf * (2.0 * big_xf + xf) / (big_xf * big_xf);
    let pool_slip = xf * (xf * xf + 2.0 * xf * big_xf + 2.0 * big_xf * big_xf) / (big_xf * (xf * xf + xf * big_xf + big_xf * big_xf));
    let price_slip = xf / emitf;

    if pool_slip > global_slip_limit {
        return Err(ThorError::SwapFail(format!("pool slip {pool_slip:.4} exceeds limit {global_slip_limit:.4}")));
    }
    if !trade_target.is_zero() && emit < trade_target {
        return Err(ThorError::SwapFailTradeTarget);
    }

    match direction {
        SwapDirection::RuneToAsset => {
            pool.balance_rune = pool.balance_rune.add(x);
            pool.balance_asset = pool.balance_asset.safe_sub(emit);
        }
        SwapDirection::AssetToRune => {
            pool.balance_asset = pool.balance_asset.add(x);
            pool.balance_rune = pool.balance_rune.safe_sub(emit);
        }
    }

    Ok(SwapResult { emit, liquidity_fee, trade_slip, pool_slip, price_slip })
}

/// A non-RUNE -> non-RUNE swap, executed as two legs through RUNE. Both
/// pools are staged on clones first so a failure in the second leg
/// leaves `pool_in` untouched too.
pub fn double_swap(
    pool_in: &mut Pool,
    pool_out: &mut Pool,
    x: Uint,
    trade_target: Uint,
    global_slip_limit: f64
) -> Result<(SwapResult, SwapResult), ThorError> {
    let mut staged_in = pool_in.clone();
    let first = swap(&mut staged_in, SwapDirection::AssetToRune, x, Uint::ZERO, global_slip_limit)?;

    let mut staged_out = pool_out.clone();
    let second = swap(&mut staged_out, SwapDirection::RuneToAsset, first.emit, trade_target, global_slip_limit)?;

    *pool_in = staged_in;
    *pool_out = staged_out;
    Ok((first, second))
}

#[cfg(test)]
mod tests {
    use thorcore_types::Asset;

    use super::*;

    fn bnb_pool(rune: u64, asset: u64) -> Pool {
        let mut pool = Pool::new(Asset::parse("BNB.BNB").unwrap());
        pool.balance_rune = Uint::new(rune);
        pool.balance_asset = Uint::new(asset);
        pool.status = thorcore_types::PoolStatus::Enabled;
        pool
    }

    #[test]
    fn single_swap_matches_worked_example() {
        let mut pool = bnb_pool(200, 300);
        let result = swap(&mut pool, SwapDirection::AssetToRune, Uint::new(100), Uint::ZERO, 0.30).unwrap();
        assert_eq!(result.emit, Uint::new(37));
        assert_eq!(pool.balance_asset, Uint::new(400));
        assert_eq!(pool.balance_rune, Uint::new(163));
        assert!(result.pool_slip < 0.30);
    }

    #[test]
    fn zero_input_is_rejected() {
        let mut pool = bnb_pool(200, 300);
        assert!(matches!(
            swap(&mut pool, SwapDirection::AssetToRune, Uint::ZERO, Uint::ZERO, 0.30),
            Err(ThorError::SwapFailInvalidAmount)
        ));
    }

    #[test]
    fn empty_pool_is_rejected() {
        let mut pool = Pool::new(Asset::parse("BNB.BNB").unwrap());
        assert!(matches!(
            swap(&mut pool, SwapDirection::AssetToRune, Uint::new(10), Uint::ZERO, 0.30),
            Err(ThorError::SwapFailInvalidBalance)
        ));
    }

    #[test]
    fn slip_above_limit_refunds_pool_untouched() {
        let mut pool = bnb_pool(200, 300);
        let before = pool.clone();
        let err = swap(&mut pool, SwapDirection::AssetToRune, Uint::new(10_000), Uint::ZERO, 0.01).unwrap_err();
        assert!(matches!(err, ThorError::SwapFail(_)));
        assert_eq!(pool, before);
    }

    #[test]
    fn below_trade_target_fails_and_leaves_pool_untouched() {
        let mut pool = bnb_pool(200, 300);
        let before = pool.clone();
        let err = swap(&mut pool, SwapDirection::AssetToRune, Uint::new(100), Uint::new(1_000_000), 0.30).unwrap_err();
        assert!(matches!(err, ThorError::SwapFailTradeTarget));
        assert_eq!(pool, before);
    }

    #[test]
    fn double_swap_failure_in_second_leg_leaves_first_pool_untouched() {
        let mut pool_a = bnb_pool(200, 300);
        let mut pool_b = bnb_pool(100, 50);
        let before_a = pool_a.clone();
        let err = double_swap(&mut pool_a, &mut pool_b, Uint::new(100), Uint::new(10_000_000), 0.30).unwrap_err();
        assert!(matches!(err, ThorError::SwapFailTradeTarget));
        assert_eq!(pool_a, before_a);
    }
}
