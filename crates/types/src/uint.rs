use std::fmt;

use ruint::aliases::U256;
use serde::{Deserialize, Serialize};

/// Fixed-point, nonnegative amount. One unit of any asset (the 8-decimal
/// convention shared by every supported chain) is represented as
/// [`Uint::ONE`] raw units.
///
/// Backed by a 256-bit integer so intermediate swap-math products
/// (`x * X * Y`) never overflow for realistic pool sizes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint(U256);

impl Uint {
    /// 1 unit of any token, under the 8-decimal convention.
    pub const ONE: Uint = Uint(U256::from_limbs([100_000_000, 0, 0, 0]));
    pub const ZERO: Uint = Uint(U256::ZERO);

    pub fn new(v: u64) -> Self {
        Uint(U256::from(v))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(&self, other: Uint) -> Option<Uint> {
        self.0.checked_add(other.0).map(Uint)
    }

    pub fn add(&self, other: Uint) -> Uint {
        self.checked_add(other)
            .expect("pool balance overflowed u256, consensus-breaking bug")
    }

    /// Saturating subtraction: never goes below zero. This is THORChain's
    /// `SafeSub` - used anywhere a shortfall must not panic or underflow
    /// (e.g. bond debited by a yggdrasil return that exceeds it).
    pub fn safe_sub(&self, other: Uint) -> Uint {
        if self.0 < other.0 {
            Uint::ZERO
        } else {
            Uint(self.0 - other.0)
        }
    }

    /// Checked subtraction; `None` on underflow. Used where an underflow
    /// indicates a logic error rather than an expected shortfall.
    pub fn checked_sub(&self, other: Uint) -> Option<Uint> {
        self.0.checked_sub(other.0).map(Uint)
    }

    pub fn checked_mul(&self, other: Uint) -> Option<Uint> {
        self.0.checked_mul(other.0).map(Uint)
    }

    pub fn mul(&self, other: Uint) -> Uint {
        self.checked_mul(other)
            .expect("pool balance overflowed u256, consensus-breaking bug")
    }

    /// Integer division, truncating. Division by zero returns zero rather
    /// than panicking: every call site in the AMM engine already checked
    /// the denominator is nonzero before reaching here, but a keeper
    /// replay of historical state should never panic regardless.
    pub fn div(&self, other: Uint) -> Uint {
        if other.is_zero() {
            Uint::ZERO
        } else {
            Uint(self.0 / other.0)
        }
    }

    pub fn min(&self, other: Uint) -> Uint {
        if self.0 < other.0 {
            *self
        } else {
            other
        }
    }

    /// Multiply by `numerator`, divide by `denominator`, without
    /// overflowing where `self * numerator` alone would (256-bit
    /// intermediate, as swap math requires).
    pub fn mul_div(&self, numerator: Uint, denominator: Uint) -> Uint {
        self.mul(numerator).div(denominator)
    }

    /// Basis-point share of `self`, e.g. `bp = 10_000` returns `self`
    /// unchanged, `bp = 5_000` returns half.
    pub fn mul_bp(&self, bp: u64) -> Uint {
        self.mul(Uint::new(bp)).div(Uint::new(10_000))
    }

    /// Convert to `f64` by dividing out the 8-decimal scale. Used only in
    /// the transient slip-ratio comparisons of the AMM engine; the result
    /// is never stored back into the kv-store (see DESIGN.md determinism
    /// note).
    pub fn to_f64_units(&self) -> f64 {
        // U256 -> f64 is lossy above 2^53 but slip ratios only need the
        // ratio of two pool balances, which stays well within range for
        // realistic liquidity; reth/alloy U256 provides the same
        // `as u128`-then-cast path for this purpose.
        let truncated: u128 = self.0.try_into().unwrap_or(u128::MAX);
        (truncated as f64) / 100_000_000.0
    }

    pub fn as_u128(&self) -> u128 {
        self.0.try_into().unwrap_or(u128::MAX)
    }
}

impl From<u64> for Uint {
    fn from(v: u64) -> Self {
        Uint::new(v)
    }
}

impl fmt::Display for Uint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Uint {
    type Err = ruint::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        U256::from_str_radix(s, 10).map(Uint)
    }
}

impl Serialize for Uint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer
    {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for Uint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>
    {
        let s = String::deserialize(deserializer)?;
        U256::from_str_radix(&s, 10)
            .map(Uint)
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn safe_sub_saturates_at_zero() {
        let a = Uint::new(5);
        let b = Uint::new(10);
        assert_eq!(a.safe_sub(b), Uint::ZERO);
        assert_eq!(b.safe_sub(a), Uint::new(5));
    }

    #[test]
    fn mul_div_matches_fee_formula_shape() {
        // (x^2 * Y) / (x + X)^2 style computation shouldn't overflow u64
        // range intermediates.
        let x = Uint::new(100);
        let capital_x = Uint::new(300);
        let y = Uint::new(200);
        let denom = x.add(capital_x).mul(x.add(capital_x));
        let got = x.mul(x).mul_div(y, denom);
        assert_eq!(got, Uint::new(12)); // 100*100*200 / 160000 = 12.5 -> 12
    }

    #[test]
    fn display_and_parse_roundtrip() {
        let v = Uint::new(123_456_789);
        let s = v.to_string();
        assert_eq!(s.parse::<Uint>().unwrap(), v);
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    proptest! {
        #[test]
        fn safe_sub_never_panics_and_never_underflows(a in any::<u64>(), b in any::<u64>()) {
            let got = Uint::new(a).safe_sub(Uint::new(b));
            let expected = a.saturating_sub(b);
            prop_assert_eq!(got, Uint::new(expected));
        }

        #[test]
        fn add_then_safe_sub_is_identity(a in any::<u32>(), b in any::<u32>()) {
            let sum = Uint::new(a as u64).add(Uint::new(b as u64));
            prop_assert_eq!(sum.safe_sub(Uint::new(b as u64)), Uint::new(a as u64));
        }

        #[test]
        fn display_parse_roundtrips_for_any_value(v in any::<u64>()) {
            let u = Uint::new(v);
            prop_assert_eq!(u.to_string().parse::<Uint>().unwrap(), u);
        }

        #[test]
        fn mul_bp_of_full_basis_points_is_identity(v in any::<u32>()) {
            prop_assert_eq!(Uint::new(v as u64).mul_bp(10_000), Uint::new(v as u64));
        }
    }
}
