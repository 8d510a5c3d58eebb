use thorcore_keeper::{KVStore, Keeper};
use thorcore_memo::{parse_memo, Memo};
use thorcore_types::{
    Address, Chain, MsgAdd, MsgBond, MsgLeave, MsgNoOp, MsgOutboundTx, MsgRefundTx,
    MsgReserveContributor, MsgSetPoolData, MsgSetStakeData, MsgSetUnStake, MsgSwap, MsgYggdrasil,
    ObservedTx, PoolStatus, ThorError, ThorMsg, Uint
};

/// Turn one observed tx into the inner message its memo names. Stateless
/// validation beyond what the memo grammar already enforces - checking
/// amounts, coin counts, and pool existence against `keeper` - happens
/// here; `ThorMsg::validate_basic` runs after.
pub fn build_inner_msg<S: KVStore>(keeper: &Keeper<S>, observed: &ObservedTx, signer: Address) -> Result<ThorMsg, ThorError> {
    let tx = &observed.tx;
    if tx.coins.is_empty() {
        return Err(ThorError::InvalidMessage("no coin found".into()));
    }
    let memo = parse_memo(&tx.memo)?;

    match memo {
        Memo::Create { asset } => {
            if keeper.list_pools().iter().any(|p| p.asset == asset) {
                return Err(ThorError::InvalidMemo("pool already exists".into()));
            }
            Ok(ThorMsg::SetPoolData(MsgSetPoolData { asset, status: PoolStatus::Bootstrap, signer }))
        }
        Memo::Stake { asset, dest } => {
            if tx.coins.len() > 2 {
                return Err(ThorError::InvalidMemo("not expecting more than two coins in a stake".into()));
            }
            if asset.is_rune() {
                return Err(ThorError::StakeInvalidPoolAsset);
            }
            let mut rune_amount = Uint::ZERO;
            let mut asset_amount = Uint::ZERO;
            for coin in &tx.coins {
                if coin.asset.is_rune() {
                    rune_amount = coin.amount;
                }
                if coin.asset == asset {
                    asset_amount = coin.amount;
                }
            }
            if rune_amount.is_zero() && asset_amount.is_zero() {
                return Err(ThorError::StakeFailValidation("did not find any valid coins for stake".into()));
            }
            if asset_amount.is_zero() && tx.coins.len() == 2 {
                return Err(ThorError::StakeMismatchAssetAddr);
            }

            let (rune_address, asset_address) = if tx.chain == Chain::new("BNB") {
                let rune_address = tx.from_address.clone();
                let asset_address = dest.unwrap_or_else(|| rune_address.clone());
                (rune_address, asset_address)
            } else {
                let rune_address = dest.ok_or_else(|| ThorError::StakeFailValidation("destination address required".into()))?;
                (rune_address, tx.from_address.clone())
            };

            Ok(ThorMsg::SetStakeData(MsgSetStakeData { tx: tx.clone(), asset, rune_amount, asset_amount, rune_address, asset_address, signer }))
        }
        Memo::Withdraw { asset, basis_points } => {
            Ok(ThorMsg::SetUnStake(MsgSetUnStake { tx: tx.clone(), rune_address: tx.from_address.clone(), withdraw_basis_points: basis_points, asset, signer }))
        }
        Memo::Swap { asset, dest, limit } => {
            if tx.coins.len() > 1 {
                return Err(ThorError::InvalidMemo("not expecting multiple coins in a swap".into()));
            }
            let destination = dest.unwrap_or_else(|| tx.from_address.clone());
            let coin = &tx.coins[0];
            if asset == coin.asset {
                return Err(ThorError::InvalidMemo(format!("swap from {asset} to {} is a noop", coin.asset)));
            }
            Ok(ThorMsg::Swap(MsgSwap { tx: tx.clone(), target_asset: asset, destination, trade_target: limit.unwrap_or(Uint::ZERO), signer }))
        }
        Memo::Add { asset } => {
            let mut rune_amount = Uint::ZERO;
            let mut asset_amount = Uint::ZERO;
            for coin in &tx.coins {
                if coin.asset.is_rune() {
                    rune_amount = coin.amount;
                } else if coin.asset == asset {
                    asset_amount = coin.amount;
                }
            }
            Ok(ThorMsg::Add(MsgAdd { tx: tx.clone(), asset, rune_amount, asset_amount, signer }))
        }
        Memo::Gas => {
            if tx.coins.iter().any(|c| !c.asset.is_bnb()) {
                return Err(ThorError::InvalidMessage("gas memo only accepts BNB coins".into()));
            }
            Ok(ThorMsg::NoOp(MsgNoOp { tx: tx.clone(), signer }))
        }
        Memo::Refund { tx_id } => Ok(ThorMsg::RefundTx(MsgRefundTx { tx: observed.clone(), in_tx_id: tx_id, signer })),
        Memo::Outbound { tx_id } => Ok(ThorMsg::OutboundTx(MsgOutboundTx { tx: observed.clone(), in_tx_id: tx_id, signer })),
        Memo::Bond { node_address } => {
            let bond = tx.coins.iter().find(|c| c.asset.is_rune()).map(|c| c.amount).unwrap_or(Uint::ZERO);
            if bond.is_zero() {
                return Err(ThorError::Validation("RUNE amount is 0".into()));
            }
            Ok(ThorMsg::Bond(MsgBond { tx: tx.clone(), node_address, bond, bond_address: tx.from_address.clone(), signer }))
        }
        Memo::Leave => Ok(ThorMsg::Leave(MsgLeave { tx: tx.clone(), signer })),
        Memo::YggdrasilFund => Ok(ThorMsg::Yggdrasil(MsgYggdrasil {
            tx: tx.clone(),
            pub_key: observed.observed_pub_key.clone(),
            add_funds: true,
            coins: tx.coins.clone(),
            signer
        })),
        Memo::YggdrasilReturn => Ok(ThorMsg::Yggdrasil(MsgYggdrasil {
            tx: tx.clone(),
            pub_key: observed.observed_pub_key.clone(),
            add_funds: false,
            coins: tx.coins.clone(),
            signer
        })),
        Memo::Reserve => Ok(ThorMsg::ReserveContributor(MsgReserveContributor {
            contributor_address: tx.from_address.clone(),
            amount: tx.coins[0].amount,
            signer
        }))
    }
}

#[cfg(test)]
mod tests {
    use thorcore_keeper::MemStore;
    use thorcore_types::{Asset, Coin, PubKey, Tx, TxId};

    use super::*;

    fn observed(memo: &str, coins: Vec<Coin>, chain: &str) -> ObservedTx {
        let tx = Tx::new(TxId::new("TX1"), Chain::new(chain), Address::new("from1"), Address::new("to1"), coins, memo.into());
        ObservedTx::new(tx, 1, PubKey::new("pk"), Address::new("signer1"))
    }

    #[test]
    fn swap_memo_defaults_destination_to_sender() {
        let keeper = Keeper::new(MemStore::new());
        let obs = observed("SWAP:BNB.BNB", vec![Coin::new(Asset::rune(), Uint::new(100))], "BNB");
        let msg = build_inner_msg(&keeper, &obs, Address::new("signer1")).unwrap();
        match msg {
            ThorMsg::Swap(m) => assert_eq!(m.destination, Address::new("from1")),
            other => panic!("expected Swap, got {other:?}")
        }
    }

    #[test]
    fn stake_on_bnb_chain_uses_sender_as_rune_address() {
        let keeper = Keeper::new(MemStore::new());
        let coins = vec![Coin::new(Asset::rune(), Uint::new(100)), Coin::new(Asset::parse("BNB.BNB").unwrap(), Uint::new(50))];
        let obs = observed("STAKE:BNB.BNB", coins, "BNB");
        let msg = build_inner_msg(&keeper, &obs, Address::new("signer1")).unwrap();
        match msg {
            ThorMsg::SetStakeData(m) => {
                assert_eq!(m.rune_address, Address::new("from1"));
                assert_eq!(m.asset_address, Address::new("from1"));
            }
            other => panic!("expected SetStakeData, got {other:?}")
        }
    }

    #[test]
    fn create_memo_rejects_existing_pool() {
        let mut keeper = Keeper::new(MemStore::new());
        let asset = Asset::parse("BNB.BNB").unwrap();
        keeper.set_pool(&thorcore_types::Pool::new(asset.clone()));
        let obs = observed("CREATE:BNB.BNB", vec![Coin::new(Asset::rune(), Uint::new(1))], "BNB");
        assert!(build_inner_msg(&keeper, &obs, Address::new("signer1")).is_err());
    }

    #[test]
    fn swap_to_the_same_asset_is_rejected_as_a_noop() {
        let keeper = Keeper::new(MemStore::new());
        let obs = observed("SWAP:RUNE", vec![Coin::new(Asset::rune(), Uint::new(100))], "BNB");
        assert!(build_inner_msg(&keeper, &obs, Address::new("signer1")).is_err());
    }
}
