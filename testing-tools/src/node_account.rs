use rand::Rng;
use thorcore_types::{Address, NodeAccount, NodeStatus, Uint};

/// Builds a [`NodeAccount`] for a test scenario, defaulting to a
/// freshly-whitelisted node the way [`NodeAccount::new`] does.
pub struct NodeAccountBuilder {
    node_address: Address,
    bond: Uint,
    status: NodeStatus,
    status_since: i64,
    observer_active: bool,
    slash_points: i64
}

impl NodeAccountBuilder {
    pub fn new(address: &str) -> Self {
        NodeAccountBuilder {
            node_address: Address::new(address),
            bond: Uint::new(100),
            status: NodeStatus::WhiteListed,
            status_since: 0,
            observer_active: false,
            slash_points: 0
        }
    }

    pub fn with_bond(mut self, bond: u64) -> Self {
        self.bond = Uint::new(bond);
        self
    }

    pub fn at_height(mut self, height: i64) -> Self {
        self.status_since = height;
        self
    }

    pub fn active(mut self) -> Self {
        self.status = NodeStatus::Active;
        self.observer_active = true;
        self
    }

    pub fn with_slash_points(mut self, points: i64) -> Self {
        self.slash_points = points;
        self
    }

    pub fn build(self) -> NodeAccount {
        let mut node = NodeAccount::new(self.node_address.clone(), self.node_address, self.bond, self.status_since);
        node.status = self.status;
        node.observer_active = self.observer_active;
        node.slash_points = self.slash_points;
        node
    }
}

/// `count` distinct active, bonded observer nodes, addressed `node-0`..,
/// for tests that need a quorum without caring who's in it.
pub fn random_active_node_set(rng: &mut impl Rng, count: usize) -> Vec<NodeAccount> {
    (0..count)
        .map(|i| {
            let bond = rng.gen_range(100..10_000);
            NodeAccountBuilder::new(&format!("node-{i}")).with_bond(bond).active().build()
        })
        .collect()
}
