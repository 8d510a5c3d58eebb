use thorcore_types::{Address, Chain, Coin, ObservedTx, PubKey, Tx, TxId};

/// Builds an [`ObservedTx`] for a test scenario: one signer's report of
/// an inbound tx with a given memo and coins.
pub struct ObservedTxBuilder {
    tx_id: TxId,
    chain: Chain,
    from_address: Address,
    to_address: Address,
    coins: Vec<Coin>,
    memo: String,
    observed_at_height: u64,
    observed_pub_key: PubKey,
    signer: Address
}

impl ObservedTxBuilder {
    pub fn new(tx_id: &str) -> Self {
        ObservedTxBuilder {
            tx_id: TxId::new(tx_id),
            chain: Chain::new("BNB"),
            from_address: Address::new("from"),
            to_address: Address::new("to"),
            coins: Vec::new(),
            memo: String::new(),
            observed_at_height: 1,
            observed_pub_key: PubKey::new("vault-pk"),
            signer: Address::new("signer")
        }
    }

    pub fn chain(mut self, chain: &str) -> Self {
        self.chain = Chain::new(chain);
        self
    }

    pub fn from(mut self, address: &str) -> Self {
        self.from_address = Address::new(address);
        self
    }

    pub fn memo(mut self, memo: &str) -> Self {
        self.memo = memo.to_string();
        self
    }

    pub fn coin(mut self, coin: Coin) -> Self {
        self.coins.push(coin);
        self
    }

    pub fn signer(mut self, signer: &str) -> Self {
        self.signer = Address::new(signer);
        self
    }

    pub fn at_height(mut self, height: u64) -> Self {
        self.observed_at_height = height;
        self
    }

    pub fn build(self) -> ObservedTx {
        let tx = Tx::new(self.tx_id, self.chain, self.from_address, self.to_address, self.coins, self.memo);
        ObservedTx::new(tx, self.observed_at_height, self.observed_pub_key, self.signer)
    }
}

#[cfg(test)]
mod tests {
    use thorcore_types::{Asset, Uint};

    use super::*;

    #[test]
    fn build_attaches_a_single_signer() {
        let observed = ObservedTxBuilder::new("TX1")
            .memo("SWAP:BNB.BNB")
            .coin(Coin::new(Asset::rune(), Uint::new(100)))
            .signer("node-0")
            .build();

        assert_eq!(observed.tx.id, TxId::new("TX1"));
        assert_eq!(observed.tx.memo, "SWAP:BNB.BNB");
        assert!(observed.signers.contains(&Address::new("node-0")));
    }
}
