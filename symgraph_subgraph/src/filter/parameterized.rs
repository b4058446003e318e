use std::collections::HashMap;

use symgraph_common::Node;

use crate::adjacency::UnorderedPair;
use crate::filter::MatchFilter;
use crate::graph::PatternGraph;

/// Predicate on the image of one pattern node.
pub type NodeCriterion<T> = Box<dyn Fn(&T) -> bool + Send + Sync>;

/// Predicate on the images of the two endpoints of a pattern edge.
pub type EdgeCriterion<T> = Box<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// A filter built from caller supplied predicates.
///
/// Nodes and edges without a predicate accept everything. Edge predicates
/// receive the images in the order the endpoints were given to
/// [`ParameterizedFilter::with_edge`].
pub struct ParameterizedFilter<'g, N: Node, T: Node> {
    pattern: &'g PatternGraph<N>,
    node_criteria: HashMap<N, NodeCriterion<T>>,
    edge_criteria: HashMap<UnorderedPair<N>, (N, EdgeCriterion<T>)>,
}

impl<'g, N: Node, T: Node> ParameterizedFilter<'g, N, T> {
    /// A filter over `pattern` that accepts every match.
    #[must_use]
    pub fn new(pattern: &'g PatternGraph<N>) -> Self {
        Self {
            pattern,
            node_criteria: HashMap::new(),
            edge_criteria: HashMap::new(),
        }
    }

    /// Require the image of `node` to satisfy `criterion`.
    #[must_use]
    pub fn with_node(
        mut self,
        node: N,
        criterion: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.node_criteria.insert(node, Box::new(criterion));
        self
    }

    /// Require the images of the edge `from - to` to satisfy `criterion`,
    /// called as `criterion(image(from), image(to))`.
    #[must_use]
    pub fn with_edge(
        mut self,
        from: N,
        to: N,
        criterion: impl Fn(&T, &T) -> bool + Send + Sync + 'static,
    ) -> Self {
        let key = UnorderedPair::new(from.clone(), to);
        self.edge_criteria.insert(key, (from, Box::new(criterion)));
        self
    }
}

impl<N: Node, T: Node> MatchFilter<N, T> for ParameterizedFilter<'_, N, T> {
    fn pattern(&self) -> &PatternGraph<N> {
        self.pattern
    }

    fn check_node(&self, node: &N, thing: &T) -> bool {
        self.node_criteria
            .get(node)
            .is_none_or(|criterion| criterion(thing))
    }

    fn check_edge(&self, (a, b): (&N, &N), (thing_a, thing_b): (&T, &T)) -> bool {
        let key = UnorderedPair::new(a.clone(), b.clone());
        match self.edge_criteria.get(&key) {
            None => true,
            Some((from, criterion)) if from == a => criterion(thing_a, thing_b),
            Some((_, criterion)) => criterion(thing_b, thing_a),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::bijection::Match;
    use crate::filter::filter_matches;

    fn path() -> PatternGraph<u32> {
        PatternGraph::new([(0, 1), (1, 2)]).unwrap()
    }

    fn forward() -> Match<u32, char> {
        [(0, 'a'), (1, 'b'), (2, 'c')].into_iter().collect()
    }

    #[test]
    fn no_criteria_accepts_the_match_as_is() {
        let pattern = path();
        let filter: ParameterizedFilter<'_, u32, char> = ParameterizedFilter::new(&pattern);
        assert_eq!(filter.parse(&forward()), Ok(Some(forward())));
    }

    #[test]
    fn node_criterion_picks_the_passing_relabeling() {
        let pattern = path();
        let filter = ParameterizedFilter::new(&pattern).with_node(0, |t: &char| *t == 'c');
        let parsed = filter.parse(&forward()).unwrap().unwrap();
        assert_eq!(parsed.destination(&0), Some(&'c'));
        assert_eq!(parsed.destination(&2), Some(&'a'));
    }

    #[test]
    fn rejecting_criterion_tries_every_symmetry() {
        let pattern = path();
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let filter = ParameterizedFilter::new(&pattern).with_node(1, move |_: &char| {
            counter.fetch_add(1, Ordering::Relaxed);
            false
        });
        assert_eq!(filter.parse(&forward()), Ok(None));
        assert_eq!(calls.load(Ordering::Relaxed), pattern.symmetries().len());
    }

    #[test]
    fn edge_criterion_follows_given_orientation() {
        let pattern = path();
        // image(1) must come right before image(0) in the alphabet
        let filter = ParameterizedFilter::new(&pattern)
            .with_edge(1, 0, |t1: &char, t0: &char| (*t1 as u32) + 1 == *t0 as u32);
        let parsed = filter.parse(&forward()).unwrap().unwrap();
        assert_eq!(parsed.destination(&0), Some(&'c'));
        assert_eq!(parsed.destination(&1), Some(&'b'));
    }

    #[test]
    fn incomplete_match_is_a_domain_error() {
        let pattern = path();
        let filter: ParameterizedFilter<'_, u32, char> = ParameterizedFilter::new(&pattern);
        let partial: Match<u32, char> = [(0, 'a')].into_iter().collect();
        assert!(filter.parse(&partial).is_err());
    }

    #[test]
    fn filter_matches_drops_rejected() {
        let pattern = path();
        let filter = ParameterizedFilter::new(&pattern).with_node(1, |t: &char| *t != 'x');
        let accepted: Match<u32, char> = forward();
        let rejected: Match<u32, char> = [(0, 'a'), (1, 'x'), (2, 'c')].into_iter().collect();
        let kept = filter_matches(&filter, [accepted.clone(), rejected]).unwrap();
        assert_eq!(kept, vec![accepted]);
    }
}
