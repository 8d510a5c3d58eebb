use thorcore_types::{Chain, Coin, PubKey, Vault};

/// Builds a funded asgard [`Vault`] for a test scenario - the common case
/// across the handler/txout/refund tests, which need a vault actually
/// able to cover an outbound item, not just a pool for it to price
/// against.
pub struct VaultBuilder {
    pub_key: PubKey,
    chains: Vec<Chain>,
    funds: Vec<Coin>
}

impl VaultBuilder {
    pub fn new(pub_key: &str) -> Self {
        VaultBuilder { pub_key: PubKey::new(pub_key), chains: Vec::new(), funds: Vec::new() }
    }

    pub fn for_chain(mut self, chain: &str) -> Self {
        self.chains.push(Chain::new(chain));
        self
    }

    pub fn funded_with(mut self, coin: Coin) -> Self {
        self.funds.push(coin);
        self
    }

    pub fn build_asgard(self) -> Vault {
        let mut vault = Vault::new_asgard(self.pub_key, self.chains);
        vault.add_funds(&self.funds);
        vault
    }

    pub fn build_yggdrasil(self) -> Vault {
        let mut vault = Vault::new_yggdrasil(self.pub_key, self.chains);
        vault.add_funds(&self.funds);
        vault
    }
}

#[cfg(test)]
mod tests {
    use thorcore_types::{Asset, Uint};

    use super::*;

    #[test]
    fn funded_asgard_vault_can_cover_its_coin() {
        let vault = VaultBuilder::new("vault1")
            .for_chain("BNB")
            .funded_with(Coin::new(Asset::rune(), Uint::new(1000)))
            .build_asgard();

        assert!(!vault.is_yggdrasil());
        assert_eq!(vault.coin_amount(&Asset::rune()), Uint::new(1000));
        assert!(vault.supports_chain(&Chain::new("BNB")));
    }
}
