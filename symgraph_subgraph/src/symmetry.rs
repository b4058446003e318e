//! Symmetry group and cycle set of a pattern graph.

use std::collections::HashSet;

use indexmap::IndexMap;
use symgraph_common::Node;

use crate::permutation::{Cycle, Permutation, Signature};

/// Ordered collection of distinct cycles, with constant-time membership.
///
/// Every cycle lists nodes that some symmetry interchanges, so the nodes of
/// one cycle are equivalent to each other.
#[derive(Clone, Debug)]
pub struct CycleSet<N: Node> {
    cycles: Vec<Cycle<N>>,
    lookup: HashSet<Cycle<N>>,
}

impl<N: Node> Default for CycleSet<N> {
    fn default() -> Self {
        Self {
            cycles: Vec::new(),
            lookup: HashSet::new(),
        }
    }
}

impl<N: Node> CycleSet<N> {
    /// Add a cycle unless it is already present. Returns true when added.
    pub fn insert(&mut self, cycle: Cycle<N>) -> bool {
        if !self.lookup.insert(cycle.clone()) {
            return false;
        }
        self.cycles.push(cycle);
        true
    }

    /// Returns true when `sequence` is exactly one of the known cycles.
    #[must_use]
    pub fn contains(&self, sequence: &[N]) -> bool {
        self.lookup.contains(sequence)
    }

    /// Length of the longest prefix of `sequence` that is a known cycle, or 0.
    #[must_use]
    pub fn prefix_len(&self, sequence: &[N]) -> usize {
        (1..=sequence.len())
            .rev()
            .find(|&len| self.contains(&sequence[..len]))
            .unwrap_or(0)
    }

    /// Cycles in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Cycle<N>> {
        self.cycles.iter()
    }

    /// Cycles in discovery order, as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Cycle<N>] {
        &self.cycles
    }

    /// Number of distinct cycles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Returns true when no cycle was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Symmetries of a pattern graph keyed by their cycle signature.
///
/// Iteration follows discovery order, which is reproducible for a given
/// edge list.
#[derive(Clone, Debug)]
pub struct SymmetryGroup<N: Node> {
    by_signature: IndexMap<Signature<N>, Permutation<N>>,
    cycles: CycleSet<N>,
}

impl<N: Node> Default for SymmetryGroup<N> {
    fn default() -> Self {
        Self {
            by_signature: IndexMap::new(),
            cycles: CycleSet::default(),
        }
    }
}

impl<N: Node> SymmetryGroup<N> {
    /// Record a symmetry unless one with the same signature is known.
    ///
    /// Returns true when recorded; the cycles of a newly recorded signature
    /// are appended to the cycle set.
    pub fn record(&mut self, symmetry: Permutation<N>) -> bool {
        let signature = symmetry.signature();
        if self.by_signature.contains_key(&signature) {
            return false;
        }
        for cycle in &signature {
            self.cycles.insert(cycle.clone());
        }
        tracing::trace!(
            "SymmetryGroup::record #{} cycles={:?}",
            self.by_signature.len(),
            signature
        );
        self.by_signature.insert(signature, symmetry);
        true
    }

    /// Returns true when a symmetry with this signature is known.
    #[must_use]
    pub fn contains(&self, signature: &Signature<N>) -> bool {
        self.by_signature.contains_key(signature)
    }

    /// The symmetry recorded for `signature`.
    #[must_use]
    pub fn get(&self, signature: &Signature<N>) -> Option<&Permutation<N>> {
        self.by_signature.get(signature)
    }

    /// Signatures and symmetries in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature<N>, &Permutation<N>)> {
        self.by_signature.iter()
    }

    /// Symmetries in discovery order.
    pub fn permutations(&self) -> impl Iterator<Item = &Permutation<N>> {
        self.by_signature.values()
    }

    /// Cycles accumulated across all recorded symmetries.
    #[must_use]
    pub const fn cycles(&self) -> &CycleSet<N> {
        &self.cycles
    }

    /// Number of symmetries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_signature.len()
    }

    /// Returns true when nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_signature.is_empty()
    }
}
