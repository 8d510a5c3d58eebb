use std::collections::HashSet;

use thorcore_types::{Address, ObservedTx, ObservedTxVoter, TxId};

/// Record one node's observation against the voter for its tx id.
/// Idempotent: re-adding the same signer/body pair is a no-op. A signer
/// that already voted for a *different* body variant of the same id is
/// ignored (anti-flip-flop) - the signer doesn't get to retract a vote.
pub fn add_observation(voter: &mut ObservedTxVoter, obs: ObservedTx) {
    let signer = match obs.signers.iter().next() {
        Some(s) => s.clone(),
        None => return
    };

    if voter.txs.iter().any(|existing| !existing.same_body(&obs) && existing.signers.contains(&signer)) {
        return;
    }

    if let Some(existing) = voter.txs.iter_mut().find(|existing| existing.same_body(&obs)) {
        existing.signers.insert(signer);
        return;
    }

    voter.txs.push(obs);
}

/// The body variant whose valid (currently-active) signer set strictly
/// exceeds two thirds of `active_nodes`, if any. A variant with even one
/// inactive signer never qualifies - it must wait for that signer's vote
/// to be superseded by an active one, or simply never reach consensus.
pub fn get_consensus_tx<'a>(voter: &'a ObservedTxVoter, active_nodes: &[Address]) -> Option<&'a ObservedTx> {
    if active_nodes.is_empty() {
        return None;
    }
    let active_set: HashSet<&Address> = active_nodes.iter().collect();
    voter.txs.iter().find(|tx| {
        let all_active = tx.signers.iter().all(|s| active_set.contains(s));
        all_active && tx.signers.len() * 3 > active_nodes.len() * 2
    })
}

/// Mark the id dispatched. Subsequent observations are still recorded
/// (for audit/slashing purposes) but must not trigger re-dispatch; that
/// check lives with the caller via [`ObservedTxVoter::is_done`].
pub fn set_done(voter: &mut ObservedTxVoter, out_hash: TxId) {
    voter.done = Some(out_hash);
}

#[cfg(test)]
mod tests {
    use thorcore_types::{Asset, Coin, PubKey, Tx, Uint};

    use super::*;

    fn tx(id: &str, signer: &str) -> ObservedTx {
        let body = Tx::new(
            TxId::new(id),
            thorcore_types::Chain::new("BNB"),
            Address::new("from"),
            Address::new("to"),
            vec![Coin::new(Asset::rune(), Uint::new(100))],
            "SWAP:BNB.BNB".into()
        );
        ObservedTx::new(body, 1, PubKey::new("pk"), Address::new(signer))
    }

    #[test]
    fn three_node_threshold_dispatches_once_on_third_vote() {
        let mut voter = ObservedTxVoter::new(TxId::new("TX1"));
        let active = vec![Address::new("a"), Address::new("b"), Address::new("c")];

        add_observation(&mut voter, tx("TX1", "a"));
        assert!(get_consensus_tx(&voter, &active).is_none());

        add_observation(&mut voter, tx("TX1", "b"));
        assert!(get_consensus_tx(&voter, &active).is_none(), "2 of 3 is not strictly more than 2/3");

        add_observation(&mut voter, tx("TX1", "c"));
        assert!(get_consensus_tx(&voter, &active).is_some());

        // Re-adding an already-counted signer changes nothing.
        add_observation(&mut voter, tx("TX1", "a"));
        assert_eq!(voter.txs[0].signers.len(), 3);
    }

    #[test]
    fn flip_flopping_signer_is_ignored() {
        let mut voter = ObservedTxVoter::new(TxId::new("TX1"));
        add_observation(&mut voter, tx("TX1", "a"));

        let mut different_body = tx("TX1", "a");
        different_body.tx.memo = "SWAP:BNB.RUNE".into();
        add_observation(&mut voter, different_body);

        assert_eq!(voter.txs.len(), 1);
        assert_eq!(voter.txs[0].signers.len(), 1);
    }

    #[test]
    fn inactive_signer_blocks_consensus() {
        let mut voter = ObservedTxVoter::new(TxId::new("TX1"));
        let active = vec![Address::new("a"), Address::new("b"), Address::new("c")];

        add_observation(&mut voter, tx("TX1", "a"));
        add_observation(&mut voter, tx("TX1", "b"));
        add_observation(&mut voter, tx("TX1", "retired"));

        assert!(get_consensus_tx(&voter, &active).is_none());
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use super::*;

    fn tx(id: &str, signer: &str) -> ObservedTx {
        let body = thorcore_types::Tx::new(
            TxId::new(id),
            thorcore_types::Chain::new("BNB"),
            Address::new("from"),
            Address::new("to"),
            vec![thorcore_types::Coin::new(thorcore_types::Asset::rune(), thorcore_types::Uint::new(100))],
            "SWAP:BNB.BNB".into()
        );
        ObservedTx::new(body, 1, thorcore_types::PubKey::new("pk"), Address::new(signer))
    }

    proptest! {
        /// Observing the same signer/body pair any number of extra times
        /// never changes the signer set size - the anti-flip-flop /
        /// re-vote path is idempotent.
        #[test]
        fn repeated_observation_is_idempotent(repeats in 1usize..20) {
            let mut voter = ObservedTxVoter::new(TxId::new("TX1"));
            for _ in 0..repeats {
                add_observation(&mut voter, tx("TX1", "a"));
            }
            prop_assert_eq!(voter.txs.len(), 1);
            prop_assert_eq!(voter.txs[0].signers.len(), 1);
        }

        /// Consensus never fires below a strict two-thirds majority of
        /// the active set, and always fires at or above it once every
        /// signer is active.
        #[test]
        fn consensus_threshold_is_strictly_two_thirds(n in 3usize..12) {
            let active: Vec<Address> = (0..n).map(|i| Address::new(&format!("node-{i}"))).collect();
            let mut voter = ObservedTxVoter::new(TxId::new("TX1"));

            let needed = n * 2 / 3 + 1;
            for i in 0..n {
                add_observation(&mut voter, tx("TX1", &format!("node-{i}")));
                let got_consensus = get_consensus_tx(&voter, &active).is_some();
                prop_assert_eq!(got_consensus, i + 1 >= needed);
            }
        }
    }
}
