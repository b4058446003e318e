//! Graph symmetry analysis and symmetry-aware subgraph matching.
//!
//! A [`PatternGraph`] is built from an edge list. Construction matches the
//! pattern against itself to collect its automorphisms ([`SymmetryGroup`])
//! and the cycles they are made of ([`CycleSet`]). Searching a target
//! [`Adjacency`] then uses those cycles to skip relabelings of matches
//! that were already produced.
//!
//! Only [`Dedupe::Orbit`] reports every embedding exactly once. The
//! default [`Dedupe::Symmetric`] ordering is a cheaper heuristic: it never
//! reports an embedding twice, but depending on the order the target lists
//! neighbours it can miss one entirely.
//!
//! ```
//! use symgraph_common::Config;
//! use symgraph_subgraph::{Adjacency, PatternGraph};
//!
//! let angle = PatternGraph::new([(0u32, 1), (1, 2)]).unwrap();
//! let star = Adjacency::from_edges([(0u32, 1), (0, 2), (0, 3), (0, 4)]);
//! let found = angle.find_matches(&star, &Config::default());
//! assert_eq!(found.len(), 6);
//! ```

mod adjacency;
mod bijection;
mod cancel;
mod dedupe;
mod error;
mod graph;
mod match_set;
mod permutation;
mod search;
mod symmetry;

pub mod filter;

pub use adjacency::{Adjacency, UnorderedPair};
pub use bijection::{Bijection, Match};
pub use cancel::CancelToken;
pub use dedupe::embedding_signature;
pub use error::{BijectionError, GraphError};
pub use filter::{MatchFilter, MolecularFilter, ParameterizedFilter, filter_matches};
pub use graph::PatternGraph;
pub use match_set::MatchSet;
pub use permutation::{Cycle, Permutation, Signature};
pub use symmetry::{CycleSet, SymmetryGroup};

pub use symgraph_common::{Config, ConfigBuilder, Dedupe, MatchLength, Node};
