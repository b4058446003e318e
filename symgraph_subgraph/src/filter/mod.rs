//! Attribute filters applied to matches after the structural search.
//!
//! The search only looks at adjacency. A filter adds per-node and per-edge
//! predicates on top; since a match is only found in one canonical
//! labeling, the filter retries it under every pattern symmetry and keeps
//! the first relabeling that passes.

mod molecular;
mod parameterized;

pub use molecular::{BondCriterion, MolecularFilter};
pub use parameterized::{EdgeCriterion, NodeCriterion, ParameterizedFilter};

use symgraph_common::Node;

use crate::bijection::Match;
use crate::error::BijectionError;
use crate::graph::PatternGraph;

/// Node and edge predicates over the matches of one pattern.
pub trait MatchFilter<N: Node, T: Node> {
    /// The pattern whose symmetries are tried.
    fn pattern(&self) -> &PatternGraph<N>;

    /// Whether `thing` is an acceptable image for `node`.
    fn check_node(&self, node: &N, thing: &T) -> bool;

    /// Whether the pattern edge `nodes` may be realised by `things`.
    fn check_edge(&self, nodes: (&N, &N), things: (&T, &T)) -> bool;

    /// Returns true when every node and every edge of the pattern passes
    /// under `candidate`.
    fn accepts(&self, candidate: &Match<N, T>) -> bool {
        self.pattern().adjacency().iter().all(|(node, neighbors)| {
            let Some(thing) = candidate.destination(node) else {
                return false;
            };
            self.check_node(node, thing)
                && neighbors.iter().all(|neighbor| {
                    candidate
                        .destination(neighbor)
                        .is_some_and(|other| self.check_edge((node, neighbor), (thing, other)))
                })
        })
    }

    /// The first relabeling of `candidate` under the pattern symmetries that
    /// passes every check, or `None`.
    ///
    /// # Errors
    ///
    /// Returns [`BijectionError::Domain`] when `candidate` does not cover
    /// the pattern nodes.
    fn parse(&self, candidate: &Match<N, T>) -> Result<Option<Match<N, T>>, BijectionError> {
        for symmetry in self.pattern().symmetries().permutations() {
            let relabeled = candidate.compose_after(symmetry)?;
            if self.accepts(&relabeled) {
                return Ok(Some(relabeled));
            }
        }
        tracing::trace!("MatchFilter::parse rejected {}", candidate);
        Ok(None)
    }
}

/// Parse every match, keeping the accepted relabelings in order.
///
/// # Errors
///
/// Stops at the first match whose domain does not cover the pattern.
pub fn filter_matches<N, T, F>(
    filter: &F,
    matches: impl IntoIterator<Item = Match<N, T>>,
) -> Result<Vec<Match<N, T>>, BijectionError>
where
    N: Node,
    T: Node,
    F: MatchFilter<N, T> + ?Sized,
{
    matches
        .into_iter()
        .filter_map(|candidate| filter.parse(&candidate).transpose())
        .collect()
}
