use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{address::Address, address::PubKey, uint::Uint};

/// Node account lifecycle status. `Unknown` -> `WhiteListed` once bond
/// reaches the minimum -> `Standby` once keys are registered -> `Ready`
/// once the node's observer has been seen voting -> `Active` once
/// rotated in -> `Standby` or `Disabled` on rotate-out or leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
pub enum NodeStatus {
    Unknown,
    #[strum(serialize = "whitelisted")]
    WhiteListed,
    Standby,
    Ready,
    Active,
    Disabled
}

impl Default for NodeStatus {
    fn default() -> Self {
        NodeStatus::Unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAccount {
    pub node_address: Address,
    pub status: NodeStatus,
    pub pub_keys: Vec<PubKey>,
    pub validator_cons_pub_key: String,
    pub bond: Uint,
    pub bond_address: Address,
    pub active_block_height: i64,
    pub slash_points: i64,
    pub status_since: i64,
    pub observer_active: bool,
    pub signer_active: bool,
    pub signer_membership: Vec<PubKey>,
    pub requested_to_leave: bool,
    pub version: String
}

impl NodeAccount {
    pub fn new(node_address: Address, bond_address: Address, bond: Uint, height: i64) -> Self {
        NodeAccount {
            node_address,
            status: NodeStatus::WhiteListed,
            pub_keys: Vec::new(),
            validator_cons_pub_key: String::new(),
            bond,
            bond_address,
            active_block_height: 0,
            slash_points: 0,
            status_since: height,
            observer_active: false,
            signer_active: false,
            signer_membership: Vec::new(),
            requested_to_leave: false,
            version: String::new()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.node_address.is_empty()
    }

    pub fn update_status(&mut self, status: NodeStatus, height: i64) {
        self.status = status;
        self.status_since = height;
    }

    pub fn is_active(&self) -> bool {
        matches!(self.status, NodeStatus::Active)
    }

    /// An active observer: active status and observer role enabled.
    pub fn is_active_observer(&self) -> bool {
        self.is_active() && self.observer_active
    }

    pub fn add_bond(&mut self, amount: Uint) {
        self.bond = self.bond.add(amount);
    }

    pub fn sub_bond(&mut self, amount: Uint) {
        self.bond = self.bond.safe_sub(amount);
    }

    /// Bond-weighted time-in-service units, used to score validator
    /// rotation-in priority.
    pub fn bond_units(&self, height: i64) -> Uint {
        if height < 0 || self.active_block_height < 0 || self.slash_points < 0 {
            return Uint::ZERO;
        }
        let block_count = height - (self.active_block_height + self.slash_points);
        Uint::new(block_count.max(0) as u64)
    }

    pub fn try_add_signer_pub_key(&mut self, key: PubKey) {
        if key.is_empty() || self.signer_membership.contains(&key) {
            return;
        }
        self.signer_membership.push(key);
    }

    pub fn try_remove_signer_pub_key(&mut self, key: &PubKey) {
        self.signer_membership.retain(|k| k != key);
    }
}

/// Sort by `(status_since asc, node_address asc)` - the rotation-in
/// ordering.
pub fn sort_by_status_since(nodes: &mut [NodeAccount]) {
    nodes.sort_by(|a, b| {
        a.status_since
            .cmp(&b.status_since)
            .then_with(|| a.node_address.cmp(&b.node_address))
    });
}

/// Sort by `(slash_points desc, status_since asc, node_address asc)` - the
/// rotation-out / slashing ordering.
pub fn sort_by_slash_points(nodes: &mut [NodeAccount]) {
    nodes.sort_by(|a, b| {
        b.slash_points
            .cmp(&a.slash_points)
            .then_with(|| a.status_since.cmp(&b.status_since))
            .then_with(|| a.node_address.cmp(&b.node_address))
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(addr: &str, since: i64, slash: i64) -> NodeAccount {
        let mut n = NodeAccount::new(Address::new(addr), Address::new("bond"), Uint::ZERO, since);
        n.status_since = since;
        n.slash_points = slash;
        n
    }

    #[test]
    fn status_since_ordering_is_ascending_then_address() {
        let mut nodes = vec![node("b", 5, 0), node("a", 5, 0), node("c", 1, 0)];
        sort_by_status_since(&mut nodes);
        let addrs: Vec<_> = nodes.iter().map(|n| n.node_address.0.clone()).collect();
        assert_eq!(addrs, vec!["c", "a", "b"]);
    }

    #[test]
    fn slash_point_ordering_is_descending_then_status_since_then_address() {
        let mut nodes = vec![node("a", 1, 1), node("b", 1, 5), node("c", 0, 5)];
        sort_by_slash_points(&mut nodes);
        let addrs: Vec<_> = nodes.iter().map(|n| n.node_address.0.clone()).collect();
        assert_eq!(addrs, vec!["c", "b", "a"]);
    }
}
