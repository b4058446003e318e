//! Selection of one representative per symmetric family of matches.

use symgraph_common::Node;

use crate::bijection::Match;
use crate::symmetry::SymmetryGroup;

/// Returns true when the initiator's image is the lowest image of the
/// initiator cycle.
///
/// Relabelings of one embedding along the initiator cycle move the
/// initiator onto each cycle member in turn; only one of them places it on
/// the smallest image.
pub fn is_lowest_initiator<N: Node, T: Node>(
    initiator: &N,
    initiator_cycle: &[N],
    candidate: &Match<N, T>,
) -> bool {
    let Some(image) = candidate.destination(initiator) else {
        return false;
    };
    initiator_cycle
        .iter()
        .filter_map(|node| candidate.destination(node))
        .min()
        .is_some_and(|lowest| lowest == image)
}

/// Images of `nodes`, in order. `None` when some node is unmapped.
pub fn orbit_key<'m, N: Node, T: Node>(
    nodes: &[N],
    candidate: &'m Match<N, T>,
) -> Option<Vec<&'m T>> {
    nodes.iter().map(|node| candidate.destination(node)).collect()
}

/// Returns true when no relabeling of `candidate` under `symmetries` has a
/// smaller key over `nodes`.
pub fn is_orbit_minimum<N: Node, T: Node>(
    nodes: &[N],
    symmetries: &SymmetryGroup<N>,
    candidate: &Match<N, T>,
) -> bool {
    let Some(key) = orbit_key(nodes, candidate) else {
        return false;
    };
    symmetries.permutations().all(|symmetry| {
        let Ok(relabeled) = candidate.compose_after(symmetry) else {
            return true;
        };
        orbit_key(nodes, &relabeled).is_none_or(|other| other >= key)
    })
}

/// The smallest key over `nodes` among the relabelings of `candidate`.
///
/// Two complete matches share this key exactly when one is a relabeling of
/// the other under `symmetries`, i.e. when they are the same embedding.
pub fn orbit_min_key<N: Node, T: Node>(
    nodes: &[N],
    symmetries: &SymmetryGroup<N>,
    candidate: &Match<N, T>,
) -> Option<Vec<T>> {
    symmetries
        .permutations()
        .filter_map(|symmetry| candidate.compose_after(symmetry).ok())
        .filter_map(|relabeled| {
            orbit_key(nodes, &relabeled).map(|key| key.into_iter().cloned().collect::<Vec<T>>())
        })
        .min()
}

/// Target things covered by a match, sorted.
///
/// Two matches share a signature exactly when they embed the pattern onto
/// the same set of things.
#[must_use]
pub fn embedding_signature<N: Node, T: Node>(candidate: &Match<N, T>) -> Vec<&T> {
    let mut things: Vec<&T> = candidate.destinations().collect();
    things.sort_unstable();
    things
}
