//! Permutations and their cycle decomposition.

use std::collections::{BTreeSet, HashSet};

use itertools::Itertools;
use symgraph_common::Node;

use crate::bijection::Bijection;

/// A bijection whose sources and destinations are drawn from one label set.
pub type Permutation<N> = Bijection<N, N>;

/// One orbit of a permutation, listed in traversal order from its smallest node.
pub type Cycle<N> = Vec<N>;

/// The cycle set of a permutation; two permutations with equal signatures are equal.
pub type Signature<N> = BTreeSet<Cycle<N>>;

impl<N: Node> Bijection<N, N> {
    /// The permutation fixing every node in `nodes`.
    #[must_use]
    pub fn identity(nodes: impl IntoIterator<Item = N>) -> Self {
        nodes.into_iter().map(|n| (n.clone(), n)).collect()
    }

    /// Returns true when every source is also a destination.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sources().all(|s| self.contains_destination(s))
    }

    /// Returns true when every recorded node maps onto itself.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.forward().iter().all(|(s, d)| s == d)
    }

    /// Partition the sources into closed orbits.
    ///
    /// Traversal always starts from the smallest unvisited source, so each
    /// cycle begins with its minimum node and the result is sorted by that
    /// node. Fixed points are omitted, and so are chains that leave the
    /// source set (only possible when the permutation is not closed).
    #[must_use]
    pub fn cycle_decomposition(&self) -> Vec<Cycle<N>> {
        let mut visited: HashSet<&N> = HashSet::with_capacity(self.len());
        let mut cycles = Vec::new();

        for start in self.sources().sorted() {
            if !visited.insert(start) {
                continue;
            }
            let mut cycle = vec![start.clone()];
            let mut current = self.destination(start);
            let closed = loop {
                match current {
                    None => break false,
                    Some(next) if next == start => break true,
                    Some(next) => {
                        if !visited.insert(next) {
                            break false;
                        }
                        cycle.push(next.clone());
                        current = self.destination(next);
                    }
                }
            };
            if closed && cycle.len() > 1 {
                cycles.push(cycle);
            }
        }
        cycles
    }

    /// The order-independent cycle set used as a symmetry key.
    #[must_use]
    pub fn signature(&self) -> Signature<N> {
        self.cycle_decomposition().into_iter().collect()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use quickcheck::quickcheck;

    fn shuffled(keys: &[u8]) -> Permutation<usize> {
        let n = keys.len().min(10);
        let order: Vec<usize> = (0..n).sorted_by_key(|&i| (keys[i], i)).collect();
        (0..n).map(|i| (i, order[i])).collect()
    }

    quickcheck! {
        fn prop_cycles_partition_moved_nodes(keys: Vec<u8>) -> bool {
            let p = shuffled(&keys);
            let cycles = p.cycle_decomposition();
            let mut seen = HashSet::new();
            for cycle in &cycles {
                for node in cycle {
                    if !seen.insert(*node) {
                        return false;
                    }
                }
            }
            let moved: HashSet<usize> = p.iter().filter(|(s, d)| s != d).map(|(s, _)| *s).collect();
            p.is_closed() && seen == moved
        }

        fn prop_cycles_follow_forward(keys: Vec<u8>) -> bool {
            let p = shuffled(&keys);
            p.cycle_decomposition().iter().all(|cycle| {
                cycle.iter().zip(cycle.iter().cycle().skip(1)).all(|(a, b)| p.destination(a) == Some(b))
                    && cycle.iter().min() == cycle.first()
            })
        }

        fn prop_inverse_reverses_cycles(keys: Vec<u8>) -> bool {
            let p = shuffled(&keys);
            p.inverse().cycle_decomposition().len() == p.cycle_decomposition().len()
        }
    }
}
