//! Recursive extension of a partial match along pattern neighbourhoods.

mod relations;

use symgraph_common::{Config, MatchLength, Node};
use tracing::{debug, trace};

use crate::adjacency::Adjacency;
use crate::bijection::Match;
use crate::cancel::CancelToken;
use crate::symmetry::CycleSet;

use self::relations::{all_relations, symmetric_relations};

/// Borrowed state for one pattern/target search.
///
/// The search is pure: it never mutates the pattern or the target, and
/// every branch works on its own clone of the partial match.
pub struct MatchSearch<'a, N: Node, T: Node> {
    pattern: &'a Adjacency<N>,
    target: &'a Adjacency<T>,
    cycles: &'a CycleSet<N>,
    match_length: MatchLength,
    ordered: bool,
    cancel: Option<&'a CancelToken>,
}

impl<'a, N: Node, T: Node> MatchSearch<'a, N, T> {
    pub fn new(
        pattern: &'a Adjacency<N>,
        target: &'a Adjacency<T>,
        cycles: &'a CycleSet<N>,
        config: &Config,
    ) -> Self {
        Self {
            pattern,
            target,
            cycles,
            match_length: config.match_length,
            ordered: config.dedupe.ordered_enumeration(),
            cancel: None,
        }
    }

    pub const fn with_cancel(mut self, cancel: &'a CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_some_and(CancelToken::is_cancelled)
    }

    /// Complete matches extending `partial` with `node -> thing`.
    pub fn run(&self, node: &N, thing: &T, partial: Match<N, T>) -> Vec<Match<N, T>> {
        let size = self.pattern.len();
        let found = self.extend(node, thing, partial, 0);
        found.into_iter().filter(|m| m.len() == size).collect()
    }

    fn degree_compatible(&self, node: &N, thing: &T) -> bool {
        self.match_length
            .degree_compatible(self.pattern.degree(node), self.target.degree(thing))
    }

    fn extend(
        &self,
        node: &N,
        thing: &T,
        mut matched: Match<N, T>,
        depth: usize,
    ) -> Vec<Match<N, T>> {
        if self.is_cancelled() {
            return Vec::new();
        }
        if !self.degree_compatible(node, thing) {
            trace!("Depth {} degree mismatch {:?} -> {:?}", depth, node, thing);
            return Vec::new();
        }
        if !matched.add_relation(node.clone(), thing.clone()) {
            return Vec::new();
        }
        if matched.len() == self.pattern.len() {
            return vec![matched];
        }

        let neighbors = self.pattern.neighbors(node);
        let around_thing = self.target.neighbors(thing);
        if !keeps_matched_edges(neighbors, around_thing, &matched) {
            trace!("Depth {} {:?} -> {:?} breaks an edge", depth, node, thing);
            return Vec::new();
        }

        // Matched neighbours stay in the sequence so the cycle prefix is
        // taken over the whole neighbourhood; `worth_trying` pins them.
        let relation_sets = {
            let worth_trying = |n: &N, t: &T| self.worth_trying(&matched, n, t);
            if self.ordered {
                symmetric_relations(neighbors, around_thing, &worth_trying, &|seq: &[N]| {
                    self.cycles.prefix_len(seq)
                })
            } else {
                all_relations(neighbors, around_thing, &worth_trying)
            }
        };

        let mut results = Vec::new();
        for relation_set in relation_sets {
            let mut frontier = vec![matched.clone()];
            for (n, t) in &relation_set {
                frontier = frontier
                    .into_iter()
                    .flat_map(|former| {
                        if former.contains_relation(n, t) {
                            vec![former]
                        } else {
                            self.extend(n, t, former, depth + 1)
                        }
                    })
                    .collect();
                if frontier.is_empty() {
                    break;
                }
            }
            results.extend(frontier);
        }

        debug!("Depth {} returning {} results", depth, results.len());
        results
    }

    /// A matched neighbour is only worth its existing image; an unmatched one
    /// needs an unclaimed thing of compatible degree.
    fn worth_trying(&self, matched: &Match<N, T>, node: &N, thing: &T) -> bool {
        if let Some(existing) = matched.destination(node) {
            return existing == thing;
        }
        !matched.contains_destination(thing) && self.degree_compatible(node, thing)
    }
}

/// Every already-matched neighbour must have its image around `thing`.
fn keeps_matched_edges<N: Node, T: Node>(
    neighbors: &[N],
    around_thing: &[T],
    matched: &Match<N, T>,
) -> bool {
    neighbors.iter().all(|neighbor| {
        matched
            .destination(neighbor)
            .is_none_or(|image| around_thing.contains(image))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use symgraph_common::Dedupe;

    fn search<'a>(
        pattern: &'a Adjacency<u32>,
        target: &'a Adjacency<u32>,
        cycles: &'a CycleSet<u32>,
        config: Config,
    ) -> MatchSearch<'a, u32, u32> {
        MatchSearch::new(pattern, target, cycles, &config)
    }

    #[test]
    fn path_into_star_from_the_middle() {
        let pattern = Adjacency::from_edges([(0, 1), (1, 2)]);
        let target = Adjacency::from_edges([(0, 1), (0, 2), (0, 3), (0, 4)]);
        let cycles = CycleSet::default();
        let config = Config::new(MatchLength::PatternSubsetTarget, Dedupe::None);
        let found = search(&pattern, &target, &cycles, config).run(&1, &0, Match::new());
        // Ordered pairs of distinct leaves.
        assert_eq!(found.len(), 12);
        assert!(found.iter().all(|m| m.len() == 3));
    }

    #[test]
    fn cycle_prefix_halves_the_star() {
        let pattern = Adjacency::from_edges([(0, 1), (1, 2)]);
        let target = Adjacency::from_edges([(0, 1), (0, 2), (0, 3), (0, 4)]);
        let mut cycles = CycleSet::default();
        cycles.insert(vec![0, 2]);
        let config = Config::new(MatchLength::PatternSubsetTarget, Dedupe::Symmetric);
        let found = search(&pattern, &target, &cycles, config).run(&1, &0, Match::new());
        assert_eq!(found.len(), 6);
    }

    #[test]
    fn exact_length_rejects_larger_degrees() {
        let pattern = Adjacency::from_edges([(0, 1), (1, 2)]);
        let target = Adjacency::from_edges([(0, 1), (0, 2), (0, 3)]);
        let cycles = CycleSet::default();
        let config = Config::new(MatchLength::Exact, Dedupe::None);
        assert!(
            search(&pattern, &target, &cycles, config)
                .run(&1, &0, Match::new())
                .is_empty()
        );
    }

    #[test]
    fn partial_match_constrains_the_result() {
        let pattern = Adjacency::from_edges([(0, 1), (1, 2)]);
        let target = Adjacency::from_edges([(0, 1), (0, 2), (0, 3)]);
        let cycles = CycleSet::default();
        let config = Config::new(MatchLength::PatternSubsetTarget, Dedupe::None);
        let partial: Match<u32, u32> = [(0, 3)].into_iter().collect();
        let found = search(&pattern, &target, &cycles, config).run(&1, &0, partial);
        assert_eq!(found.len(), 2);
        assert!(found.iter().all(|m| m.contains_relation(&0, &3)));
    }

    #[test]
    fn already_matched_neighbours_must_stay_adjacent() {
        // Triangle pattern, path target: the closing edge is missing.
        let pattern = Adjacency::from_edges([(0, 1), (1, 2), (2, 0)]);
        let target = Adjacency::from_edges([(0, 1), (1, 2), (2, 3), (3, 0), (0, 2)]);
        let cycles = CycleSet::default();
        let config = Config::new(MatchLength::PatternSubsetTarget, Dedupe::None);
        let found = search(&pattern, &target, &cycles, config).run(&0, &1, Match::new());
        for m in &found {
            for (a, b) in [(0, 1), (1, 2), (2, 0)] {
                let (x, y) = (m.destination(&a).unwrap(), m.destination(&b).unwrap());
                assert!(target.are_adjacent(x, y), "{m} breaks {a}-{b}");
            }
        }
        // Thing 1 lies on exactly one triangle, {0, 1, 2}: two orientations.
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn matched_neighbours_keep_their_place_in_the_cycle_prefix() {
        // Square 0-1-2-3 with pendant 4 on 0; swapping 1 and 3 is the only
        // non-trivial symmetry.
        let pattern = Adjacency::from_edges([(0, 1), (1, 2), (2, 3), (0, 4), (0, 3)]);
        let mut cycles = CycleSet::default();
        cycles.insert(vec![1, 3]);
        let config = Config::new(MatchLength::PatternSubsetTarget, Dedupe::Symmetric);
        let found = search(&pattern, &pattern, &cycles, config).run(&0, &0, Match::new());
        assert_eq!(found.len(), 1);
        assert!(found[0].iter().all(|(source, destination)| source == destination));
    }

    #[test]
    fn cancelled_search_finds_nothing() {
        let pattern = Adjacency::from_edges([(0, 1)]);
        let target = Adjacency::from_edges([(0, 1)]);
        let cycles = CycleSet::default();
        let token = CancelToken::new();
        token.cancel();
        let found = search(&pattern, &target, &cycles, Config::default())
            .with_cancel(&token)
            .run(&0, &0, Match::new());
        assert!(found.is_empty());
    }
}
