use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{Address, NodeAccount, NodeStatus, ThorError, Uint};

/// Add `amount` to a node's bond (creating the account on first
/// contribution) and whitelist it once the bond clears `minimum_bond`.
pub fn on_bond_received<S: KVStore>(
    keeper: &mut Keeper<S>,
    node_address: &Address,
    bond_address: Address,
    amount: Uint,
    minimum_bond: Uint,
    height: i64
) -> Result<(), ThorError> {
    if amount.is_zero() {
        return Err(ThorError::Validation("bond amount must be nonzero".into()));
    }
    let mut node = keeper.get_node_account(node_address)?;
    if node.is_empty() {
        node = NodeAccount::new(node_address.clone(), bond_address, Uint::ZERO, height);
    }
    node.add_bond(amount);
    if matches!(node.status, NodeStatus::Unknown) && node.bond >= minimum_bond {
        node.update_status(NodeStatus::WhiteListed, height);
    }
    keeper.set_node_account(&node);
    Ok(())
}

/// A whitelisted node finishes registering its observer/signer keys and
/// becomes eligible to be seen observing.
pub fn on_keys_registered<S: KVStore>(keeper: &mut Keeper<S>, node_address: &Address, height: i64) -> Result<(), ThorError> {
    let mut node = keeper.get_node_account(node_address)?;
    if matches!(node.status, NodeStatus::WhiteListed) {
        node.update_status(NodeStatus::Standby, height);
        keeper.set_node_account(&node);
    }
    Ok(())
}

/// A standby node's observer is seen voting for the first time.
pub fn on_observer_seen<S: KVStore>(keeper: &mut Keeper<S>, node_address: &Address, height: i64) -> Result<(), ThorError> {
    let mut node = keeper.get_node_account(node_address)?;
    node.observer_active = true;
    if matches!(node.status, NodeStatus::Standby) {
        node.update_status(NodeStatus::Ready, height);
    }
    keeper.set_node_account(&node);
    Ok(())
}

/// Rotate a ready node into the active validator set.
pub fn rotate_in<S: KVStore>(keeper: &mut Keeper<S>, node_address: &Address, height: i64) -> Result<(), ThorError> {
    let mut node = keeper.get_node_account(node_address)?;
    node.update_status(NodeStatus::Active, height);
    node.active_block_height = height;
    keeper.set_node_account(&node);
    Ok(())
}

/// Rotate an active node back out to standby (normal rotation, not a
/// leave or slash-driven removal).
pub fn rotate_out<S: KVStore>(keeper: &mut Keeper<S>, node_address: &Address, height: i64) -> Result<(), ThorError> {
    let mut node = keeper.get_node_account(node_address)?;
    node.update_status(NodeStatus::Standby, height);
    keeper.set_node_account(&node);
    Ok(())
}

/// A node requests to leave the network; it is disabled immediately and
/// its bond is returned by the caller (the ragnarok/bond-return path).
pub fn leave<S: KVStore>(keeper: &mut Keeper<S>, node_address: &Address, height: i64) -> Result<(), ThorError> {
    let mut node = keeper.get_node_account(node_address)?;
    node.requested_to_leave = true;
    node.update_status(NodeStatus::Disabled, height);
    keeper.set_node_account(&node);
    Ok(())
}

/// Add slash points to a node, used for missed signing deadlines and
/// other observed misbehavior. Slash points never expire here; decay
/// policy (if any) lives outside this crate.
pub fn slash<S: KVStore>(keeper: &mut Keeper<S>, node_address: &Address, points: i64) -> Result<(), ThorError> {
    let mut node = keeper.get_node_account(node_address)?;
    node.slash_points += points;
    keeper.set_node_account(&node);
    Ok(())
}
