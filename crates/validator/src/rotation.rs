use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{node_account::{sort_by_slash_points, sort_by_status_since}, NodeAccount, NodeStatus};

/// Ready nodes in rotate-in priority order: longest-waiting first.
pub fn rotate_in_candidates<S: KVStore>(keeper: &Keeper<S>) -> Vec<NodeAccount> {
    let mut nodes: Vec<NodeAccount> = keeper.list_node_accounts().into_iter().filter(|n| matches!(n.status, NodeStatus::Ready)).collect();
    sort_by_status_since(&mut nodes);
    nodes
}

/// Active nodes in rotate-out priority order: most slash points first.
pub fn rotate_out_candidates<S: KVStore>(keeper: &Keeper<S>) -> Vec<NodeAccount> {
    let mut nodes = keeper.list_active_node_accounts();
    sort_by_slash_points(&mut nodes);
    nodes
}

#[cfg(test)]
mod tests {
    use thorcore_keeper::MemStore;
    use thorcore_types::{Address, Uint};

    use super::*;

    #[test]
    fn rotate_in_candidates_are_ordered_by_wait_time() {
        let mut keeper = Keeper::new(MemStore::new());
        for (addr, since) in [("b", 5), ("a", 5), ("c", 1)] {
            let mut node = NodeAccount::new(Address::new(addr), Address::new("bond"), Uint::ZERO, since);
            node.status = NodeStatus::Ready;
            node.status_since = since;
            keeper.set_node_account(&node);
        }
        let candidates = rotate_in_candidates(&keeper);
        let addrs: Vec<_> = candidates.iter().map(|n| n.node_address.0.clone()).collect();
        assert_eq!(addrs, vec!["c", "a", "b"]);
    }
}
