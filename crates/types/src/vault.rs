use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{address::PubKey, asset::Chain, coin::Coin, uint::Uint};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum VaultType {
    Asgard,
    Yggdrasil
}

impl Default for VaultType {
    fn default() -> Self {
        VaultType::Asgard
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
pub enum VaultStatus {
    ActiveVault,
    RetiringVault,
    InactiveVault
}

impl Default for VaultStatus {
    fn default() -> Self {
        VaultStatus::InactiveVault
    }
}

/// A network-owned (asgard) or per-node (yggdrasil) multi-sig vault.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vault {
    pub pub_key: PubKey,
    pub vault_type: VaultType,
    pub status: VaultStatus,
    pub chains: Vec<Chain>,
    pub coins: Vec<Coin>,
    pub membership: Vec<PubKey>
}

impl Vault {
    pub fn new_asgard(pub_key: PubKey, chains: Vec<Chain>) -> Self {
        Vault {
            pub_key,
            vault_type: VaultType::Asgard,
            status: VaultStatus::ActiveVault,
            chains,
            coins: Vec::new(),
            membership: Vec::new()
        }
    }

    pub fn new_yggdrasil(pub_key: PubKey, chains: Vec<Chain>) -> Self {
        Vault {
            pub_key,
            vault_type: VaultType::Yggdrasil,
            status: VaultStatus::ActiveVault,
            chains,
            coins: Vec::new(),
            membership: Vec::new()
        }
    }

    pub fn is_yggdrasil(&self) -> bool {
        matches!(self.vault_type, VaultType::Yggdrasil)
    }

    pub fn is_empty(&self) -> bool {
        self.pub_key.is_empty()
    }

    pub fn supports_chain(&self, chain: &Chain) -> bool {
        self.chains.iter().any(|c| c == chain)
    }

    pub fn coin_amount(&self, asset: &crate::asset::Asset) -> Uint {
        self.coins
            .iter()
            .find(|c| &c.asset == asset)
            .map(|c| c.amount)
            .unwrap_or(Uint::ZERO)
    }

    pub fn add_funds(&mut self, coins: &[Coin]) {
        for coin in coins {
            if let Some(existing) = self.coins.iter_mut().find(|c| c.asset == coin.asset) {
                existing.amount = existing.amount.add(coin.amount);
            } else {
                self.coins.push(coin.clone());
            }
        }
    }

    pub fn sub_funds(&mut self, coins: &[Coin]) {
        for coin in coins {
            if let Some(existing) = self.coins.iter_mut().find(|c| c.asset == coin.asset) {
                existing.amount = existing.amount.safe_sub(coin.amount);
            }
        }
        self.coins.retain(|c| !c.amount.is_zero());
    }

    /// Deduct `amount` of `asset` for the remainder of the current block,
    /// used by the txout store while staging items before the vault
    /// balance is actually moved.
    pub fn deduct(&mut self, asset: &crate::asset::Asset, amount: Uint) {
        if let Some(existing) = self.coins.iter_mut().find(|c| &c.asset == asset) {
            existing.amount = existing.amount.safe_sub(amount);
        }
    }
}

/// A set of asgard vaults, queryable by coin balance.
pub trait VaultSet {
    fn vaults(&self) -> &[Vault];

    /// The vault currently holding the *least* of `asset`, for
    /// load-spreading outbound selection (`SelectByMinCoin`).
    fn select_by_min_coin(&self, asset: &crate::asset::Asset) -> Option<&Vault> {
        self.vaults().iter().min_by_key(|v| v.coin_amount(asset))
    }
}

impl VaultSet for Vec<Vault> {
    fn vaults(&self) -> &[Vault] {
        self
    }
}
