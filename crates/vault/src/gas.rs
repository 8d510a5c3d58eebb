use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{ThorError, Tx};

/// Debit each gas coin's pool by the amount an external signer actually
/// spent on gas for `tx`. Called once per consensus-reached inbound tx,
/// before its memo is dispatched. The network reimburses pools with rune
/// at end-of-block; that reimbursement step is out of scope here, same
/// as the rest of the network's treasury accounting.
pub fn add_gas_fees<S: KVStore>(keeper: &mut Keeper<S>, tx: &Tx) -> Result<(), ThorError> {
    for gas in &tx.gas {
        let mut pool = keeper.get_pool(&gas.asset)?;
        pool.balance_asset = pool.balance_asset.safe_sub(gas.amount);
        keeper.set_pool(&pool);
    }
    Ok(())
}
