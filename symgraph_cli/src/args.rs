use std::num::ParseIntError;
use std::str::FromStr;

use clap::Parser;
use symgraph_common::{Config, Dedupe, MatchLength};
use thiserror::Error;

/// Graph symmetry analysis and symmetry-aware subgraph search
#[derive(Parser, Debug)]
#[command(name = "symgraph")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Pattern edges, e.g. "0-1,1-2". The first node is the initiator.
    #[arg(short = 'p', long)]
    pub pattern: EdgeList,

    /// Target edges to search; without it only the pattern is analysed
    #[arg(short = 't', long)]
    pub target: Option<EdgeList>,

    /// Set match length constraint
    #[arg(long, value_enum, default_value = "pattern-subset-target")]
    pub match_length: MatchLengthArg,

    /// How symmetric duplicates are collapsed
    #[arg(long, value_enum, default_value = "symmetric")]
    pub dedupe: DedupeArg,

    /// Stop after this many matches
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,
}

impl Args {
    /// Convert command-line arguments into internal configuration
    pub fn to_config(&self) -> Config {
        Config::builder()
            .match_length(self.match_length.clone().into())
            .dedupe(self.dedupe.clone().into())
            .build()
    }
}

/// Edges written as `a-b` pairs separated by commas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList(pub Vec<(u32, u32)>);

/// Malformed edge list on the command line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EdgeListError {
    /// An entry without a `-` between its endpoints.
    #[error("edge {0:?} is not of the form a-b")]
    MissingSeparator(String),

    /// An endpoint that is not a non-negative integer.
    #[error("node {0:?} is not a valid integer")]
    InvalidNode(String, #[source] ParseIntError),
}

fn parse_node(text: &str) -> Result<u32, EdgeListError> {
    let text = text.trim();
    text.parse()
        .map_err(|e| EdgeListError::InvalidNode(text.to_string(), e))
}

impl FromStr for EdgeList {
    type Err = EdgeListError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| -> Result<(u32, u32), EdgeListError> {
                let (a, b) = entry
                    .split_once('-')
                    .ok_or_else(|| EdgeListError::MissingSeparator(entry.to_string()))?;
                Ok((parse_node(a)?, parse_node(b)?))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

/// Command-line argument wrapper for MatchLength
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum MatchLengthArg {
    /// Pattern must be a subset of target
    #[value(name = "pattern-subset-target")]
    PatternSubsetTarget,
    /// Exact match required
    #[value(name = "exact")]
    Exact,
}

impl From<MatchLengthArg> for MatchLength {
    fn from(arg: MatchLengthArg) -> Self {
        match arg {
            MatchLengthArg::PatternSubsetTarget => Self::PatternSubsetTarget,
            MatchLengthArg::Exact => Self::Exact,
        }
    }
}

/// Command-line argument wrapper for Dedupe
#[derive(Debug, Clone, clap::ValueEnum)]
pub enum DedupeArg {
    /// Report every relabeling
    #[value(name = "none")]
    None,
    /// Cycle ordering plus lowest initiator (fast, can miss embeddings)
    #[value(name = "symmetric")]
    Symmetric,
    /// Smallest member of each symmetry orbit (exact)
    #[value(name = "orbit")]
    Orbit,
}

impl From<DedupeArg> for Dedupe {
    fn from(arg: DedupeArg) -> Self {
        match arg {
            DedupeArg::None => Self::None,
            DedupeArg::Symmetric => Self::Symmetric,
            DedupeArg::Orbit => Self::Orbit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::path("0-1,1-2", &[(0, 1), (1, 2)])]
    #[case::spaces(" 0 - 1 , 2-3 ", &[(0, 1), (2, 3)])]
    #[case::trailing_comma("4-5,", &[(4, 5)])]
    #[case::empty("", &[])]
    fn test_edge_list_parses(#[case] text: &str, #[case] expected: &[(u32, u32)]) {
        assert_eq!(text.parse::<EdgeList>(), Ok(EdgeList(expected.to_vec())));
    }

    #[test]
    fn malformed_edges_are_reported() {
        assert_eq!(
            "0-1,12".parse::<EdgeList>(),
            Err(EdgeListError::MissingSeparator("12".into()))
        );
        assert!(matches!(
            "0-x".parse::<EdgeList>(),
            Err(EdgeListError::InvalidNode(node, _)) if node == "x"
        ));
    }

    #[test]
    fn defaults_map_onto_default_config() {
        let args = Args::try_parse_from(["symgraph", "--pattern", "0-1"]).unwrap();
        assert_eq!(args.to_config(), Config::default());
        assert!(args.target.is_none());
    }

    #[test]
    fn flags_map_onto_config() {
        let args = Args::try_parse_from([
            "symgraph",
            "-p",
            "0-1,1-2",
            "-t",
            "0-1",
            "--match-length",
            "exact",
            "--dedupe",
            "orbit",
        ])
        .unwrap();
        assert_eq!(
            args.to_config(),
            Config::builder().exact_length().orbit().build()
        );
        assert_eq!(args.target, Some(EdgeList(vec![(0, 1)])));
    }
}
