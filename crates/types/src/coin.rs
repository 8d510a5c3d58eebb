use serde::{Deserialize, Serialize};

use crate::{asset::Asset, uint::Uint};

/// An amount of a specific asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub asset: Asset,
    pub amount: Uint
}

impl Coin {
    pub fn new(asset: Asset, amount: Uint) -> Self {
        Coin { asset, amount }
    }

    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }
}

/// An ordered list of coins attached to a transaction.
pub type Coins = Vec<Coin>;
