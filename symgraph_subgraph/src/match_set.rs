use symgraph_common::Node;

use crate::bijection::Match;

/// Complete matches of one pattern in one target, in enumeration order.
#[derive(Clone, Debug)]
pub struct MatchSet<N: Node, T: Node> {
    /// Matches in seed order, then in search order within a seed.
    pub items: Vec<Match<N, T>>,
}

impl<N: Node, T: Node> Default for MatchSet<N, T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<N: Node, T: Node> MatchSet<N, T> {
    /// Wrap a list of matches.
    #[must_use]
    pub const fn new(items: Vec<Match<N, T>>) -> Self {
        Self { items }
    }

    /// Number of matches.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true when nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Matches in order.
    pub fn iter(&self) -> impl Iterator<Item = &Match<N, T>> {
        self.items.iter()
    }
}

impl<N: Node, T: Node> IntoIterator for MatchSet<N, T> {
    type Item = Match<N, T>;
    type IntoIter = std::vec::IntoIter<Match<N, T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}
