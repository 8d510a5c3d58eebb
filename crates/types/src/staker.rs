use serde::{Deserialize, Serialize};

use crate::{address::Address, asset::Asset, uint::Uint};

/// A single staker's position within one pool. Mirrored on both sides of
/// the `PoolStaker`/`StakerPool` index - the two indexes are plain
/// kv-store entries keyed by disjoint prefixes and by logical key
/// `(asset, rune_address)`, never by pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerUnit {
    pub rune_address: Address,
    pub asset_address: Address,
    pub units: Uint,
    pub height: u64,
    pub pending_rune: Uint
}

/// Index of all stakers for one pool, keyed by `asset`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStaker {
    pub total_units: Uint,
    pub stakers: Vec<StakerUnit>
}

impl PoolStaker {
    pub fn get(&self, rune_address: &Address) -> Option<&StakerUnit> {
        self.stakers.iter().find(|s| &s.rune_address == rune_address)
    }

    pub fn get_mut(&mut self, rune_address: &Address) -> Option<&mut StakerUnit> {
        self.stakers.iter_mut().find(|s| &s.rune_address == rune_address)
    }

    pub fn upsert(&mut self, unit: StakerUnit) {
        if let Some(existing) = self.get_mut(&unit.rune_address) {
            *existing = unit;
        } else {
            self.stakers.push(unit);
        }
    }

    /// Remove a staker whose units have gone to zero. A prior revision of
    /// this index filtered into a scratch list but then wrote back the
    /// unfiltered original instead - we write back the filtered list.
    pub fn remove_empty(&mut self) {
        self.stakers.retain(|s| !s.units.is_zero());
    }
}

/// Per-staker index across all pools, keyed by `rune_address`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakerPool {
    pub rune_address: Address,
    pub units_by_asset: Vec<(Asset, Uint)>
}

impl StakerPool {
    pub fn new(rune_address: Address) -> Self {
        StakerPool { rune_address, units_by_asset: Vec::new() }
    }

    pub fn get(&self, asset: &Asset) -> Uint {
        self.units_by_asset
            .iter()
            .find(|(a, _)| a == asset)
            .map(|(_, u)| *u)
            .unwrap_or(Uint::ZERO)
    }

    pub fn set(&mut self, asset: Asset, units: Uint) {
        if let Some(entry) = self.units_by_asset.iter_mut().find(|(a, _)| *a == asset) {
            entry.1 = units;
        } else {
            self.units_by_asset.push((asset, units));
        }
        self.units_by_asset.retain(|(_, u)| !u.is_zero());
    }
}
