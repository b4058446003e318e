//! Neighbour tables for pattern and target graphs.

use std::collections::{HashSet, VecDeque};

use indexmap::IndexMap;
use symgraph_common::Node;

/// An unordered pair of two nodes, stored smallest first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnorderedPair<T> {
    low: T,
    high: T,
}

impl<T: Ord> UnorderedPair<T> {
    /// Build the pair `{a, b}`.
    pub fn new(a: T, b: T) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// The smaller endpoint.
    pub const fn low(&self) -> &T {
        &self.low
    }

    /// The larger endpoint.
    pub const fn high(&self) -> &T {
        &self.high
    }

    /// Returns true when `node` is one of the endpoints.
    pub fn contains(&self, node: &T) -> bool {
        self.low == *node || self.high == *node
    }
}

impl<T: Ord> From<(T, T)> for UnorderedPair<T> {
    fn from((a, b): (T, T)) -> Self {
        Self::new(a, b)
    }
}

/// Node to ordered neighbour list.
///
/// Keys and neighbours keep the order in which they first appeared, so the
/// search visits candidates in a reproducible order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Adjacency<T: Node> {
    neighbors: IndexMap<T, Vec<T>>,
}

impl<T: Node> Default for Adjacency<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Node> Adjacency<T> {
    /// An adjacency without nodes.
    #[must_use]
    pub fn new() -> Self {
        Self {
            neighbors: IndexMap::new(),
        }
    }

    /// Derive a symmetric adjacency from an edge list.
    ///
    /// Repeated edges add nothing; self-loops are skipped.
    pub fn from_edges(edges: impl IntoIterator<Item = (T, T)>) -> Self {
        let mut adjacency = Self::new();
        for (a, b) in edges {
            adjacency.add_edge(a, b);
        }
        adjacency
    }

    /// Take a neighbour table as given.
    ///
    /// The table is expected to be symmetric; it is not checked.
    pub fn from_map(map: impl IntoIterator<Item = (T, Vec<T>)>) -> Self {
        Self {
            neighbors: map.into_iter().collect(),
        }
    }

    /// Connect `a` and `b`. Returns true when the edge was new.
    pub fn add_edge(&mut self, a: T, b: T) -> bool {
        if a == b {
            tracing::debug!("Adjacency::add_edge skipping self-loop on {:?}", a);
            return false;
        }
        let forward = self.neighbors.entry(a.clone()).or_default();
        if forward.contains(&b) {
            return false;
        }
        forward.push(b.clone());
        self.neighbors.entry(b).or_default().push(a);
        true
    }

    /// Neighbours of `thing`; empty for unknown things.
    #[must_use]
    pub fn neighbors(&self, thing: &T) -> &[T] {
        self.neighbors
            .get(thing)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of neighbours of `thing`.
    #[must_use]
    pub fn degree(&self, thing: &T) -> usize {
        self.neighbors(thing).len()
    }

    /// Returns true when `thing` is a key of the table.
    #[must_use]
    pub fn contains(&self, thing: &T) -> bool {
        self.neighbors.contains_key(thing)
    }

    /// Returns true when `a` lists `b` as a neighbour.
    #[must_use]
    pub fn are_adjacent(&self, a: &T, b: &T) -> bool {
        self.neighbors(a).contains(b)
    }

    /// Keys in first-appearance order.
    pub fn things(&self) -> impl Iterator<Item = &T> {
        self.neighbors.keys()
    }

    /// Keys with their neighbour lists.
    pub fn iter(&self) -> impl Iterator<Item = (&T, &[T])> {
        self.neighbors.iter().map(|(t, n)| (t, n.as_slice()))
    }

    /// Every edge once, as unordered pairs, in first-appearance order.
    #[must_use]
    pub fn edges(&self) -> Vec<UnorderedPair<T>> {
        let mut seen = HashSet::new();
        self.iter()
            .flat_map(|(a, neighbors)| {
                neighbors
                    .iter()
                    .map(move |b| UnorderedPair::new(a.clone(), b.clone()))
            })
            .filter(|pair| seen.insert(pair.clone()))
            .collect()
    }

    /// Number of keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.neighbors.len()
    }

    /// Returns true when the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.neighbors.is_empty()
    }

    /// Number of things reachable from `start`, `start` included.
    #[must_use]
    pub fn reachable_from(&self, start: &T) -> usize {
        if !self.contains(start) {
            return 0;
        }
        let mut visited: HashSet<&T> = HashSet::from([start]);
        let mut queue: VecDeque<&T> = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            for next in self.neighbors(current) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        visited.len()
    }
}

impl<T: Node> FromIterator<(T, T)> for Adjacency<T> {
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}
