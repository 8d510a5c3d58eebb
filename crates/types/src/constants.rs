use serde::{Deserialize, Serialize};

/// The version-gated constant table consulted by every handler; the
/// lowest active version is read fresh per message, never cached across
/// blocks. A new entry is added whenever the network needs to retune a
/// knob without a code upgrade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstantValues {
    /// Minimum semver this table applies to (inclusive).
    pub min_version: (u64, u64, u64),
    /// Upper bound on pool impact of a single swap.
    pub global_slip_limit: f64,
    /// Default withdraw basis points when a `Withdraw` memo omits one.
    pub default_withdraw_basis_points: u64,
    /// Minimum bond required to whitelist a node.
    pub minimum_bond: crate::uint::Uint,
    /// Blocks an outbound item may go unacknowledged before the assigned
    /// signer is slashed.
    pub signing_deadline_blocks: u64,
    /// Height window between asgard vault rotations.
    pub rotate_every_blocks: u64
}

impl ConstantValues {
    /// The only published constant table so far; additional versions are
    /// appended here as the network upgrades.
    pub fn v0_1_0() -> Self {
        ConstantValues {
            min_version: (0, 1, 0),
            global_slip_limit: 0.30,
            default_withdraw_basis_points: 10_000,
            minimum_bond: crate::uint::Uint::new(100).mul(crate::uint::Uint::ONE),
            signing_deadline_blocks: 300,
            rotate_every_blocks: 43_200
        }
    }

    /// Look up the table matching `version`, or `None` if outside every
    /// known range - the caller converts that into `ThorError::BadVersion`.
    pub fn for_version(version: (u64, u64, u64)) -> Option<ConstantValues> {
        let table = ConstantValues::v0_1_0();
        if version >= table.min_version {
            Some(table)
        } else {
            None
        }
    }
}
