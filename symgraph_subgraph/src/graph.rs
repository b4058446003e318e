//! Pattern graphs: symmetry discovery and whole-target match enumeration.

use std::collections::HashSet;
use std::ops::ControlFlow;

use itertools::Itertools;
use symgraph_common::{Config, Dedupe, Node};
use tracing::{debug, trace};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::adjacency::Adjacency;
use crate::bijection::Match;
use crate::cancel::CancelToken;
use crate::dedupe::{is_lowest_initiator, is_orbit_minimum, orbit_min_key};
use crate::error::GraphError;
use crate::match_set::MatchSet;
use crate::permutation::{Cycle, Permutation};
use crate::search::MatchSearch;
use crate::symmetry::{CycleSet, SymmetryGroup};

/// A small connected graph, analysed once for its symmetries and then
/// searched for in target graphs.
///
/// The first endpoint of the first edge is the initiator: every search
/// starts by mapping it onto a target thing.
#[derive(Clone, Debug)]
pub struct PatternGraph<N: Node> {
    edges: Vec<(N, N)>,
    adjacency: Adjacency<N>,
    ordered_nodes: Vec<N>,
    initiator: N,
    symmetries: SymmetryGroup<N>,
    initiator_cycle: Cycle<N>,
}

impl<N: Node> PatternGraph<N> {
    /// Build a pattern from its edges and discover its symmetries.
    ///
    /// # Errors
    ///
    /// Fails when `edges` is empty, contains a self-loop, or does not form a
    /// connected graph.
    pub fn new(edges: impl IntoIterator<Item = (N, N)>) -> Result<Self, GraphError> {
        let edges: Vec<(N, N)> = edges.into_iter().collect();
        let Some((initiator, _)) = edges.first().cloned() else {
            return Err(GraphError::EmptyEdgeList);
        };
        if let Some((node, _)) = edges.iter().find(|(a, b)| a == b) {
            return Err(GraphError::self_loop(node));
        }

        let adjacency = Adjacency::from_edges(edges.iter().cloned());
        let reached = adjacency.reachable_from(&initiator);
        if reached != adjacency.len() {
            return Err(GraphError::Disconnected {
                reached,
                total: adjacency.len(),
            });
        }

        let symmetries = discover_symmetries(&adjacency, &initiator);
        let initiator_cycle = longest_cycle_through(symmetries.cycles(), &initiator);
        let ordered_nodes = adjacency.things().sorted().cloned().collect();

        debug!(
            "PatternGraph::new {} nodes, {} symmetries, {} cycles, initiator cycle {:?}",
            adjacency.len(),
            symmetries.len(),
            symmetries.cycles().len(),
            initiator_cycle
        );

        Ok(Self {
            edges,
            adjacency,
            ordered_nodes,
            initiator,
            symmetries,
            initiator_cycle,
        })
    }

    /// Edges as given at construction.
    #[must_use]
    pub fn edges(&self) -> &[(N, N)] {
        &self.edges
    }

    /// Symmetric neighbour table of the pattern.
    #[must_use]
    pub const fn adjacency(&self) -> &Adjacency<N> {
        &self.adjacency
    }

    /// Nodes in first-appearance order.
    pub fn nodes(&self) -> impl Iterator<Item = &N> {
        self.adjacency.things()
    }

    /// Neighbours of `node`, in edge order.
    #[must_use]
    pub fn neighbors(&self, node: &N) -> &[N] {
        self.adjacency.neighbors(node)
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    /// Always false: construction rejects empty edge lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// The node every search is seeded from.
    #[must_use]
    pub const fn initiator(&self) -> &N {
        &self.initiator
    }

    /// The longest cycle through the initiator, or just the initiator.
    #[must_use]
    pub fn initiator_cycle(&self) -> &[N] {
        &self.initiator_cycle
    }

    /// Automorphisms, identity included, in discovery order.
    #[must_use]
    pub const fn symmetries(&self) -> &SymmetryGroup<N> {
        &self.symmetries
    }

    /// Every cycle of every discovered symmetry.
    #[must_use]
    pub const fn cycles(&self) -> &CycleSet<N> {
        self.symmetries.cycles()
    }

    /// Length of the longest prefix of `sequence` that is a known cycle.
    #[must_use]
    pub fn cycle_prefix_len(&self, sequence: &[N]) -> usize {
        self.cycles().prefix_len(sequence)
    }

    /// Returns true when the initiator's image is the lowest image over the
    /// initiator cycle.
    #[must_use]
    pub fn is_lowest_initiator<T: Node>(&self, candidate: &Match<N, T>) -> bool {
        is_lowest_initiator(&self.initiator, &self.initiator_cycle, candidate)
    }

    /// Returns true when `candidate` is the smallest of its relabelings,
    /// comparing images of the nodes in sorted order.
    #[must_use]
    pub fn is_orbit_minimum<T: Node>(&self, candidate: &Match<N, T>) -> bool {
        is_orbit_minimum(&self.ordered_nodes, &self.symmetries, candidate)
    }

    /// Complete matches extending `partial` with `node -> thing`, without
    /// any canonical selection.
    #[must_use]
    pub fn matches_from<T: Node>(
        &self,
        node: &N,
        thing: &T,
        target: &Adjacency<T>,
        partial: Match<N, T>,
        config: &Config,
    ) -> Vec<Match<N, T>> {
        self.search(target, config).run(node, thing, partial)
    }

    /// Lazily enumerate matches in `target`, one seed thing at a time.
    pub fn matches<'a, T: Node>(
        &'a self,
        target: &'a Adjacency<T>,
        config: &Config,
    ) -> impl Iterator<Item = Match<N, T>> + use<'a, N, T> {
        let search = self.search(target, config);
        let dedupe = config.dedupe;
        let mut seen = HashSet::new();
        target
            .things()
            .flat_map(move |thing| self.seed_matches(&search, thing, dedupe))
            .filter(move |found| self.first_report(&mut seen, found, dedupe))
    }

    /// Feed matches to `visit` until it breaks, the target is exhausted, or
    /// `cancel` is set.
    pub fn for_each_match<T: Node>(
        &self,
        target: &Adjacency<T>,
        config: &Config,
        cancel: &CancelToken,
        mut visit: impl FnMut(Match<N, T>) -> ControlFlow<()>,
    ) -> ControlFlow<()> {
        let search = self.search(target, config).with_cancel(cancel);
        let mut seen = HashSet::new();
        for thing in target.things() {
            if cancel.is_cancelled() {
                debug!("PatternGraph::for_each_match cancelled before seed {:?}", thing);
                break;
            }
            for found in self.seed_matches(&search, thing, config.dedupe) {
                if self.first_report(&mut seen, &found, config.dedupe) {
                    visit(found)?;
                }
            }
        }
        ControlFlow::Continue(())
    }

    /// Every match in `target`, in seed order.
    ///
    /// With the `rayon` feature the seeds are searched in parallel; the
    /// result order is the same as the sequential one.
    #[must_use]
    pub fn find_matches<T: Node>(&self, target: &Adjacency<T>, config: &Config) -> MatchSet<N, T> {
        let search = self.search(target, config);
        let seeds: Vec<&T> = target.things().collect();

        #[cfg(feature = "rayon")]
        let items: Vec<Match<N, T>> = seeds
            .into_par_iter()
            .flat_map_iter(|thing| self.seed_matches(&search, thing, config.dedupe))
            .collect();

        #[cfg(not(feature = "rayon"))]
        let items: Vec<Match<N, T>> = seeds
            .into_iter()
            .flat_map(|thing| self.seed_matches(&search, thing, config.dedupe))
            .collect();

        let mut seen = HashSet::new();
        let items: Vec<Match<N, T>> = items
            .into_iter()
            .filter(|found| self.first_report(&mut seen, found, config.dedupe))
            .collect();

        debug!("PatternGraph::find_matches {} matches", items.len());
        MatchSet::new(items)
    }

    fn search<'a, T: Node>(
        &'a self,
        target: &'a Adjacency<T>,
        config: &Config,
    ) -> MatchSearch<'a, N, T> {
        MatchSearch::new(&self.adjacency, target, self.cycles(), config)
    }

    fn seed_matches<T: Node>(
        &self,
        search: &MatchSearch<'_, N, T>,
        thing: &T,
        dedupe: Dedupe,
    ) -> Vec<Match<N, T>> {
        let found = search.run(&self.initiator, thing, Match::new());
        let total = found.len();
        let kept: Vec<Match<N, T>> = found
            .into_iter()
            .filter(|candidate| self.is_canonical(candidate, dedupe))
            .collect();
        trace!(
            "Seed {:?} -> {:?}: kept {} of {} matches",
            self.initiator,
            thing,
            kept.len(),
            total
        );
        kept
    }

    /// Returns true unless an earlier match covered the same embedding.
    ///
    /// The cycle-prefix ordering can let two relabelings of one embedding
    /// through; `None` keeps them on purpose and `Orbit` never produces them.
    fn first_report<T: Node>(
        &self,
        seen: &mut HashSet<Vec<T>>,
        candidate: &Match<N, T>,
        dedupe: Dedupe,
    ) -> bool {
        if dedupe != Dedupe::Symmetric {
            return true;
        }
        let fresh = orbit_min_key(&self.ordered_nodes, &self.symmetries, candidate)
            .is_none_or(|key| seen.insert(key));
        if !fresh {
            trace!("Skipping repeated embedding {}", candidate);
        }
        fresh
    }

    fn is_canonical<T: Node>(&self, candidate: &Match<N, T>, dedupe: Dedupe) -> bool {
        match dedupe {
            Dedupe::None => true,
            Dedupe::Symmetric => self.is_lowest_initiator(candidate),
            Dedupe::Orbit => self.is_orbit_minimum(candidate),
        }
    }
}

/// Find the automorphisms of `adjacency` by matching it against itself.
fn discover_symmetries<N: Node>(adjacency: &Adjacency<N>, initiator: &N) -> SymmetryGroup<N> {
    let config = Config::builder().exact_length().none().build();
    let no_cycles = CycleSet::default();
    let search = MatchSearch::new(adjacency, adjacency, &no_cycles, &config);
    let mut group = SymmetryGroup::default();

    let mut record = |source: &N, destination: &N| {
        for symmetry in search.run(source, destination, Permutation::new()) {
            let inverse = symmetry.inverse();
            if group.record(symmetry) {
                group.record(inverse);
            }
        }
    };

    record(initiator, initiator);
    let nodes: Vec<&N> = adjacency.things().collect();
    for (source, destination) in nodes
        .iter()
        .cartesian_product(&nodes)
        .filter(|(source, destination)| source < destination)
    {
        record(*source, *destination);
    }
    group
}

fn longest_cycle_through<N: Node>(cycles: &CycleSet<N>, initiator: &N) -> Cycle<N> {
    let mut longest = vec![initiator.clone()];
    for cycle in cycles.iter() {
        if cycle.len() > longest.len() && cycle.contains(initiator) {
            longest.clone_from(cycle);
        }
    }
    longest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permutation::Signature;

    fn signature(cycles: &[&[u32]]) -> Signature<u32> {
        cycles.iter().map(|c| c.to_vec()).collect()
    }

    #[test]
    fn empty_edge_list_is_rejected() {
        let edges: Vec<(u32, u32)> = Vec::new();
        assert_eq!(PatternGraph::new(edges).unwrap_err(), GraphError::EmptyEdgeList);
    }

    #[test]
    fn self_loop_is_rejected() {
        assert_eq!(
            PatternGraph::new([(0, 1), (1, 1)]).unwrap_err(),
            GraphError::SelfLoop("1".into())
        );
    }

    #[test]
    fn disconnected_pattern_is_rejected() {
        assert_eq!(
            PatternGraph::new([(0, 1), (2, 3)]).unwrap_err(),
            GraphError::Disconnected {
                reached: 2,
                total: 4
            }
        );
    }

    #[test]
    fn path_symmetries() {
        let graph = PatternGraph::new([(0u32, 1), (1, 2)]).unwrap();
        assert_eq!(graph.symmetries().len(), 2);
        assert!(graph.symmetries().contains(&Signature::new()));
        assert!(graph.symmetries().contains(&signature(&[&[0, 2]])));
        assert_eq!(graph.cycles().as_slice(), &[vec![0, 2]]);
        assert_eq!(graph.initiator(), &0);
        assert_eq!(graph.initiator_cycle(), &[0, 2]);
    }

    #[test]
    fn triangle_symmetries() {
        let graph = PatternGraph::new([(0u32, 1), (1, 2), (2, 0)]).unwrap();
        assert_eq!(graph.symmetries().len(), 6);
        let expected: [&[&[u32]]; 6] = [
            &[],
            &[&[0, 1]],
            &[&[0, 2]],
            &[&[1, 2]],
            &[&[0, 1, 2]],
            &[&[0, 2, 1]],
        ];
        for cycles in expected {
            assert!(graph.symmetries().contains(&signature(cycles)), "{cycles:?}");
        }
        assert_eq!(graph.initiator_cycle().len(), 3);
    }

    #[test]
    fn only_interchangeable_branches_are_symmetric() {
        // Path 0-1-2-3 with a pendant on 1.
        let graph = PatternGraph::new([(0u32, 1), (1, 2), (2, 3), (1, 4)]).unwrap();
        assert_eq!(graph.symmetries().len(), 2);
        assert_eq!(graph.cycles().as_slice(), &[vec![0, 4]]);
        // Branches of length 2, 3 and 1 hang off node 2.
        let chain = PatternGraph::new([(0u32, 1), (1, 2), (2, 3), (3, 4), (4, 5), (2, 6)]).unwrap();
        assert_eq!(chain.symmetries().len(), 1);
        assert_eq!(chain.initiator_cycle(), &[0]);
    }

    #[test]
    fn cycle_prefix_len_uses_discovered_cycles() {
        let graph = PatternGraph::new([(0u32, 1), (1, 2)]).unwrap();
        assert_eq!(graph.cycle_prefix_len(&[0, 2]), 2);
        assert_eq!(graph.cycle_prefix_len(&[2, 0]), 0);
        assert_eq!(graph.cycle_prefix_len(&[1]), 0);
    }

    #[test]
    fn matches_from_keeps_every_relabeling() {
        let graph = PatternGraph::new([(0u32, 1), (1, 2)]).unwrap();
        let target = Adjacency::from_edges([(0u32, 1), (1, 2)]);
        let config = Config::builder().none().build();
        let found = graph.matches_from(&1, &1, &target, Match::new(), &config);
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn for_each_match_stops_on_break() {
        let graph = PatternGraph::new([(0u32, 1), (1, 2)]).unwrap();
        let target = Adjacency::from_edges([(0u32, 1), (0, 2), (0, 3), (0, 4)]);
        let mut seen = 0;
        let flow = graph.for_each_match(&target, &Config::default(), &CancelToken::new(), |_| {
            seen += 1;
            if seen == 2 {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(flow, ControlFlow::Break(()));
        assert_eq!(seen, 2);
    }
}
