//! Configuration for the pattern match search.
//!
//! The two main concepts are:
//! - match_length: whether a pattern node must have exactly as many
//!   neighbours as its image, or whether the target may have more.
//! - dedupe: how matches that are relabelings of each other under a pattern
//!   symmetry are collapsed.
//!
//! Quick examples
//!
//! Subgraph search with symmetry-aware dedupe (default behavior):
//! ```
//! use symgraph_common::{Config, Dedupe, MatchLength};
//! let cfg = Config::default();
//! assert_eq!(cfg.match_length, MatchLength::PatternSubsetTarget);
//! assert_eq!(cfg.dedupe, Dedupe::Symmetric);
//! ```
//!
//! Exact-degree matching that reports every relabeling:
//! ```
//! use symgraph_common::Config;
//! let cfg = Config::builder().exact_length().none().build();
//! assert!(!cfg.allows_more());
//! ```

/// How neighbour counts of a pattern node and its image are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MatchLength {
    /// The image must have exactly as many neighbours as the pattern node.
    Exact,
    /// The image may have more neighbours than the pattern node.
    #[default]
    PatternSubsetTarget,
}

impl MatchLength {
    /// Returns true when a target thing may carry extra neighbours.
    #[must_use]
    pub const fn allows_more(self) -> bool {
        matches!(self, Self::PatternSubsetTarget)
    }

    /// Degree check shared by the search and its candidate pruning.
    #[must_use]
    pub const fn degree_compatible(self, pattern_degree: usize, target_degree: usize) -> bool {
        match self {
            Self::Exact => pattern_degree == target_degree,
            Self::PatternSubsetTarget => pattern_degree <= target_degree,
        }
    }
}

/// Control how matches that differ only by a pattern symmetry are collapsed.
///
/// - None:
///     Enumerate every neighbour pairing and keep every complete match. A
///     pattern matched against itself yields one match per symmetry.
/// - Symmetric:
///     Use the cycle-prefix ordering during enumeration and keep a match
///     only when the initiator's image is the lowest among the images of
///     the initiator cycle; a relabeling of an embedding already reported
///     is dropped. Cheap, but not exact: the ordering follows the target's
///     neighbour order, so an embedding can be missed.
/// - Orbit:
///     Enumerate every pairing and keep a match only when it is the
///     smallest member of its orbit under the symmetry group. Exactly one
///     match per embedding, at the cost of one composition per symmetry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Dedupe {
    /// Keep every relabeling.
    None,
    /// Cycle-prefix ordering plus the lowest-initiator rule. A heuristic
    /// that can miss embeddings; use [`Dedupe::Orbit`] when every embedding
    /// must appear.
    #[default]
    Symmetric,
    /// Orbit-minimum selection over the full symmetry group.
    Orbit,
}

impl Dedupe {
    /// Whether candidate enumeration should use the cycle-prefix ordering.
    #[must_use]
    pub const fn ordered_enumeration(self) -> bool {
        matches!(self, Self::Symmetric)
    }
}

/// Global search configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Config {
    /// How neighbour counts are compared between a pattern node and its image.
    pub match_length: MatchLength,
    /// How symmetric duplicates are collapsed.
    pub dedupe: Dedupe,
}

impl Config {
    /// Create a new configuration.
    #[must_use]
    pub const fn new(match_length: MatchLength, dedupe: Dedupe) -> Self {
        Self {
            match_length,
            dedupe,
        }
    }

    /// Start a builder from the default configuration.
    #[must_use]
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Returns true when target things may have extra neighbours.
    #[must_use]
    pub const fn allows_more(&self) -> bool {
        self.match_length.allows_more()
    }
}

/// Fluent builder for [`Config`].
#[derive(Clone, Debug, Default)]
pub struct ConfigBuilder {
    match_length: MatchLength,
    dedupe: Dedupe,
}

impl ConfigBuilder {
    /// Set the match length mode.
    #[must_use]
    pub const fn match_length(mut self, match_length: MatchLength) -> Self {
        self.match_length = match_length;
        self
    }

    /// Require identical neighbour counts.
    #[must_use]
    pub const fn exact_length(self) -> Self {
        self.match_length(MatchLength::Exact)
    }

    /// Allow target things with extra neighbours.
    #[must_use]
    pub const fn pattern_subset_target(self) -> Self {
        self.match_length(MatchLength::PatternSubsetTarget)
    }

    /// Set the dedupe mode.
    #[must_use]
    pub const fn dedupe(mut self, dedupe: Dedupe) -> Self {
        self.dedupe = dedupe;
        self
    }

    /// Keep every relabeling.
    #[must_use]
    pub const fn none(self) -> Self {
        self.dedupe(Dedupe::None)
    }

    /// Cycle-prefix ordering plus the lowest-initiator rule. A heuristic
    /// that can miss embeddings; use [`Dedupe::Orbit`] when every embedding
    /// must appear.
    #[must_use]
    pub const fn symmetric(self) -> Self {
        self.dedupe(Dedupe::Symmetric)
    }

    /// Orbit-minimum selection.
    #[must_use]
    pub const fn orbit(self) -> Self {
        self.dedupe(Dedupe::Orbit)
    }

    /// Finish the builder.
    #[must_use]
    pub fn build(self) -> Config {
        tracing::trace!(
            "Config::build match_length={:?} dedupe={:?}",
            self.match_length,
            self.dedupe
        );
        Config::new(self.match_length, self.dedupe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn default_is_subset_and_symmetric() {
        let cfg = Config::default();
        assert_eq!(cfg, Config::builder().build());
        assert!(cfg.allows_more());
        assert!(cfg.dedupe.ordered_enumeration());
    }

    #[test]
    fn builder_overrides() {
        let cfg = Config::builder().exact_length().orbit().build();
        assert_eq!(cfg.match_length, MatchLength::Exact);
        assert_eq!(cfg.dedupe, Dedupe::Orbit);
        assert!(!cfg.dedupe.ordered_enumeration());
    }

    #[rstest]
    #[case(MatchLength::Exact, 2, 2, true)]
    #[case(MatchLength::Exact, 2, 3, false)]
    #[case(MatchLength::Exact, 3, 2, false)]
    #[case(MatchLength::PatternSubsetTarget, 2, 2, true)]
    #[case(MatchLength::PatternSubsetTarget, 2, 3, true)]
    #[case(MatchLength::PatternSubsetTarget, 3, 2, false)]
    fn degree_checks(
        #[case] mode: MatchLength,
        #[case] pattern: usize,
        #[case] target: usize,
        #[case] expected: bool,
    ) {
        assert_eq!(mode.degree_compatible(pattern, target), expected);
    }
}
