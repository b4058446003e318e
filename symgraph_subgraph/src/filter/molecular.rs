use std::collections::HashMap;

use symgraph_common::Node;

use crate::adjacency::UnorderedPair;
use crate::filter::MatchFilter;
use crate::filter::parameterized::NodeCriterion;
use crate::graph::PatternGraph;

/// Predicate on the payload of the bond realising a pattern edge.
pub type BondCriterion<B> = Box<dyn Fn(&B) -> bool + Send + Sync>;

/// A filter for molecule-like targets, where atoms are things and bonds
/// carry a payload looked up by unordered atom pair.
///
/// A pattern edge with a bond predicate is rejected when its images have no
/// entry in the bond table.
pub struct MolecularFilter<'g, N: Node, T: Node, B> {
    pattern: &'g PatternGraph<N>,
    bonds: &'g HashMap<UnorderedPair<T>, B>,
    atom_criteria: HashMap<N, NodeCriterion<T>>,
    bond_criteria: HashMap<UnorderedPair<N>, BondCriterion<B>>,
}

impl<'g, N: Node, T: Node, B> MolecularFilter<'g, N, T, B> {
    /// A filter over `pattern` reading bond payloads from `bonds`.
    #[must_use]
    pub fn new(pattern: &'g PatternGraph<N>, bonds: &'g HashMap<UnorderedPair<T>, B>) -> Self {
        Self {
            pattern,
            bonds,
            atom_criteria: HashMap::new(),
            bond_criteria: HashMap::new(),
        }
    }

    /// Require the atom matched to `node` to satisfy `criterion`.
    #[must_use]
    pub fn with_atom(
        mut self,
        node: N,
        criterion: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.atom_criteria.insert(node, Box::new(criterion));
        self
    }

    /// Require the bond matched to the edge `a - b` to satisfy `criterion`.
    #[must_use]
    pub fn with_bond(
        mut self,
        a: N,
        b: N,
        criterion: impl Fn(&B) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.bond_criteria
            .insert(UnorderedPair::new(a, b), Box::new(criterion));
        self
    }

    /// Payload of the bond between two atoms.
    #[must_use]
    pub fn bond(&self, a: &T, b: &T) -> Option<&B> {
        self.bonds.get(&UnorderedPair::new(a.clone(), b.clone()))
    }
}

impl<N: Node, T: Node, B> MatchFilter<N, T> for MolecularFilter<'_, N, T, B> {
    fn pattern(&self) -> &PatternGraph<N> {
        self.pattern
    }

    fn check_node(&self, node: &N, thing: &T) -> bool {
        self.atom_criteria
            .get(node)
            .is_none_or(|criterion| criterion(thing))
    }

    fn check_edge(&self, (a, b): (&N, &N), (thing_a, thing_b): (&T, &T)) -> bool {
        let Some(criterion) = self
            .bond_criteria
            .get(&UnorderedPair::new(a.clone(), b.clone()))
        else {
            return true;
        };
        self.bond(thing_a, thing_b).is_some_and(criterion)
    }
}
