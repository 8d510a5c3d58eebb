use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{ConstantValues, ThorError};

/// Resolve the constant table for `version`, or `ThorError::BadVersion` if
/// no published table covers it. The lowest active node's minor version
/// already gates key storage (`Keeper::current_minor_version`); this is
/// the analogous gate for message handling itself.
pub fn gate_version(version: (u64, u64, u64)) -> Result<ConstantValues, ThorError> {
    ConstantValues::for_version(version).ok_or(ThorError::BadVersion)
}

/// True once `signer` is an active observer and therefore allowed to
/// submit observations at all.
pub fn is_authorized_observer<S: KVStore>(keeper: &Keeper<S>, signer: &thorcore_types::Address) -> bool {
    keeper.get_node_account(signer).map(|n| n.is_active_observer()).unwrap_or(false)
}
