use std::fmt::Debug;
use std::hash::Hash;

/// Bound for pattern nodes and target identifiers ("things").
///
/// The engine never looks inside a node. It needs a total order (initiator
/// selection, cycle normalisation, canonical-minimum selection), hashing for
/// the bijection tables, and `Send + Sync` so independent searches can run on
/// separate threads. Composite keys such as `(usize, usize)` qualify.
pub trait Node: Ord + Hash + Clone + Debug + Send + Sync {}

impl<T> Node for T where T: Ord + Hash + Clone + Debug + Send + Sync {}
