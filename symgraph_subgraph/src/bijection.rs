//! Partial one-to-one mapping between pattern nodes and target things.

use std::collections::HashMap;
use std::fmt;

use contracts::debug_ensures;
use itertools::Itertools;
use symgraph_common::Node;

use crate::error::BijectionError;

/// A discrete, partial, invertible mapping between two label sets.
///
/// The forward (source to destination) and backward tables are kept
/// consistent at all times: `forward[s] == d` exactly when `backward[d] == s`.
/// Cloning copies both tables, so a clone handed to a search branch never
/// observes extensions made by a sibling branch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bijection<S: Node, D: Node> {
    /// Source to destination table
    forward: HashMap<S, D>,
    /// Destination to source table
    backward: HashMap<D, S>,
}

/// A (possibly partial) embedding of pattern nodes into target things.
pub type Match<N, T> = Bijection<N, T>;

impl<S: Node, D: Node> Default for Bijection<S, D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Node, D: Node> Bijection<S, D> {
    /// Creates a new, empty bijection.
    #[debug_ensures(ret.is_consistent())]
    #[must_use]
    pub fn new() -> Self {
        Self {
            forward: HashMap::new(),
            backward: HashMap::new(),
        }
    }

    /// Checks that the forward and backward tables mirror each other.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.forward.len() == self.backward.len()
            && self
                .forward
                .iter()
                .all(|(s, d)| self.backward.get(d) == Some(s))
    }

    /// Extend the bijection with one relation.
    ///
    /// Returns true when the relation was added or was already present, and
    /// false when it conflicts with an existing relation. A conflict leaves
    /// the tables untouched.
    #[debug_ensures(self.is_consistent())]
    pub fn add_relation(&mut self, source: S, destination: D) -> bool {
        if let Some(existing) = self.forward.get(&source) {
            return *existing == destination;
        }
        if self.backward.contains_key(&destination) {
            tracing::event!(
                tracing::Level::TRACE,
                "Bijection::add_relation {:?} -> {:?} conflicts on destination",
                source,
                destination
            );
            return false;
        }
        self.forward.insert(source.clone(), destination.clone());
        self.backward.insert(destination, source);
        true
    }

    /// Destination of `source`, if recorded.
    #[must_use]
    pub fn destination(&self, source: &S) -> Option<&D> {
        self.forward.get(source)
    }

    /// Source of `destination`, if recorded.
    #[must_use]
    pub fn source(&self, destination: &D) -> Option<&S> {
        self.backward.get(destination)
    }

    /// Destination of `source`.
    ///
    /// # Errors
    ///
    /// Returns [`BijectionError::MissingSource`] when `source` is unmapped.
    pub fn get_destination(&self, source: &S) -> Result<&D, BijectionError> {
        self.destination(source)
            .ok_or_else(|| BijectionError::missing_source(source))
    }

    /// Source of `destination`.
    ///
    /// # Errors
    ///
    /// Returns [`BijectionError::MissingDestination`] when `destination` is unmapped.
    pub fn get_source(&self, destination: &D) -> Result<&S, BijectionError> {
        self.source(destination)
            .ok_or_else(|| BijectionError::missing_destination(destination))
    }

    /// Returns true when `source` has a destination.
    #[must_use]
    pub fn contains_source(&self, source: &S) -> bool {
        self.forward.contains_key(source)
    }

    /// Returns true when `destination` has a source.
    #[must_use]
    pub fn contains_destination(&self, destination: &D) -> bool {
        self.backward.contains_key(destination)
    }

    /// Returns true when `source` maps exactly onto `destination`.
    #[must_use]
    pub fn contains_relation(&self, source: &S, destination: &D) -> bool {
        self.forward.get(source) == Some(destination)
    }

    /// Returns the number of relations.
    #[must_use]
    pub fn len(&self) -> usize {
        debug_assert_eq!(self.forward.len(), self.backward.len());
        self.forward.len()
    }

    /// Returns true if no relation has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// The bijection with sources and destinations swapped.
    #[debug_ensures(ret.len() == self.len())]
    #[must_use]
    pub fn inverse(&self) -> Bijection<D, S> {
        Bijection {
            forward: self.backward.clone(),
            backward: self.forward.clone(),
        }
    }

    /// Apply `other`, then `self`.
    ///
    /// Every source `s` of `other` maps to `self[other[s]]`.
    ///
    /// # Errors
    ///
    /// Returns [`BijectionError::Domain`] when a destination of `other` is not
    /// a source of `self`.
    pub fn compose_after<M: Node>(
        &self,
        other: &Bijection<M, S>,
    ) -> Result<Bijection<M, D>, BijectionError> {
        let mut forward = HashMap::with_capacity(other.len());
        let mut backward = HashMap::with_capacity(other.len());
        for (source, mid) in &other.forward {
            let destination = self
                .forward
                .get(mid)
                .ok_or_else(|| BijectionError::domain(mid))?;
            forward.insert(source.clone(), destination.clone());
            backward.insert(destination.clone(), source.clone());
        }
        Ok(Bijection { forward, backward })
    }

    /// Relations ordered by source.
    pub fn iter(&self) -> impl Iterator<Item = (&S, &D)> {
        self.forward.iter().sorted_by(|a, b| a.0.cmp(b.0))
    }

    /// Recorded sources, in no particular order.
    pub fn sources(&self) -> impl Iterator<Item = &S> {
        self.forward.keys()
    }

    /// Recorded destinations, in no particular order.
    pub fn destinations(&self) -> impl Iterator<Item = &D> {
        self.backward.keys()
    }

    /// Access the raw source-to-destination table.
    #[must_use]
    pub const fn forward(&self) -> &HashMap<S, D> {
        &self.forward
    }

    /// Access the raw destination-to-source table.
    #[must_use]
    pub const fn backward(&self) -> &HashMap<D, S> {
        &self.backward
    }
}

impl<S: Node, D: Node> FromIterator<(S, D)> for Bijection<S, D> {
    /// Collect relations in order; a pair conflicting with an earlier one is skipped.
    fn from_iter<I: IntoIterator<Item = (S, D)>>(iter: I) -> Self {
        let mut bijection = Self::new();
        for (source, destination) in iter {
            bijection.add_relation(source, destination);
        }
        bijection
    }
}

impl<S: Node, D: Node> fmt::Display for Bijection<S, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "|")?;
        for (source, destination) in self.iter() {
            write!(f, " {source:?} -> {destination:?} |")?;
        }
        Ok(())
    }
}
