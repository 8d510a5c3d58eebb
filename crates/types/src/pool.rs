use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{address::Address, asset::Asset, uint::Uint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum PoolStatus {
    Enabled,
    Bootstrap,
    Suspended
}

/// A single asset/RUNE liquidity pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    pub asset: Asset,
    pub balance_rune: Uint,
    pub balance_asset: Uint,
    pub pool_units: Uint,
    pub status: PoolStatus,
    pub pool_address: Address
}

impl Pool {
    pub fn new(asset: Asset) -> Self {
        Pool {
            asset,
            balance_rune: Uint::ZERO,
            balance_asset: Uint::ZERO,
            pool_units: Uint::ZERO,
            status: PoolStatus::Bootstrap,
            pool_address: Address::default()
        }
    }

    /// `pool_units = 0 <=> both balances zero`.
    pub fn invariant_holds(&self) -> bool {
        if self.pool_units.is_zero() {
            self.balance_rune.is_zero() && self.balance_asset.is_zero()
        } else {
            true
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self.status, PoolStatus::Enabled)
    }

    /// Value an asset-denominated amount in RUNE terms, at the pool's
    /// current spot price. Used by the yggdrasil-return bond-shortfall
    /// calculation.
    pub fn asset_value_in_rune(&self, asset_amount: Uint) -> Uint {
        if self.balance_asset.is_zero() {
            return Uint::ZERO;
        }
        asset_amount.mul_div(self.balance_rune, self.balance_asset)
    }
}
