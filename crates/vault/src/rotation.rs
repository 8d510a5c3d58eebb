use thorcore_keeper::{KVStore, Keeper};
use thorcore_types::{Vault, VaultStatus};

/// True when `height` lands on an asgard-rotation boundary.
pub fn is_rotation_window_open(height: u64, rotate_every_blocks: u64) -> bool {
    rotate_every_blocks != 0 && height % rotate_every_blocks == 0
}

/// Retire every currently active asgard vault and activate `new_vault` in
/// their place. The threshold key-gen round that produces `new_vault`'s
/// key runs entirely among the external signer/observer nodes; by the
/// time this is called consensus on the new key has already been
/// reached, so there's nothing left to validate here beyond the rotation
/// itself.
pub fn rotate_asgard<S: KVStore>(keeper: &mut Keeper<S>, mut new_vault: Vault) {
    for mut vault in keeper.list_active_asgard_vaults() {
        vault.status = VaultStatus::RetiringVault;
        keeper.set_vault(&vault);
    }
    new_vault.status = VaultStatus::ActiveVault;
    keeper.set_vault(&new_vault);
}

#[cfg(test)]
mod tests {
    use thorcore_keeper::MemStore;
    use thorcore_types::{Chain, PubKey};

    use super::*;

    #[test]
    fn rotation_window_opens_on_schedule_boundary() {
        assert!(is_rotation_window_open(43_200, 43_200));
        assert!(!is_rotation_window_open(43_199, 43_200));
        assert!(!is_rotation_window_open(100, 0));
    }

    #[test]
    fn rotate_asgard_retires_old_and_activates_new() {
        let mut keeper = Keeper::new(MemStore::new());
        let old = Vault::new_asgard(PubKey::new("old"), vec![Chain::new("BNB")]);
        keeper.set_vault(&old);

        let new_vault = Vault::new_asgard(PubKey::new("new"), vec![Chain::new("BNB")]);
        rotate_asgard(&mut keeper, new_vault);

        assert_eq!(keeper.get_vault(&PubKey::new("old")).unwrap().status, VaultStatus::RetiringVault);
        assert_eq!(keeper.get_vault(&PubKey::new("new")).unwrap().status, VaultStatus::ActiveVault);
    }
}
