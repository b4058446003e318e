//! symgraph CLI
//!
//! Analyses the symmetries of a pattern graph given on the command line and,
//! when a target is given, lists the pattern's matches in it.

mod args;

use std::io::{self, Write};
use std::ops::ControlFlow;

use clap::Parser;
use symgraph_subgraph::{Adjacency, CancelToken, Config, PatternGraph};
use tracing::info;

use args::Args;

/// Runs the symmetry analysis and the optional target search.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_thread_ids(true)
        .init();

    let args = Args::parse();
    let config = args.to_config();

    let pattern = PatternGraph::new(args.pattern.0.iter().copied())?;
    info!("Pattern has {} nodes", pattern.len());

    println!("=== Pattern ===");
    println!("initiator: {}", pattern.initiator());
    println!("initiator cycle: {:?}", pattern.initiator_cycle());

    println!("\n=== Symmetries ({}) ===", pattern.symmetries().len());
    for (i, symmetry) in pattern.symmetries().permutations().enumerate() {
        println!("{i}: {symmetry}");
    }

    println!("\n=== Cycles ({}) ===", pattern.cycles().len());
    for cycle in pattern.cycles().iter() {
        println!("{cycle:?}");
    }

    let Some(target) = &args.target else {
        return Ok(());
    };
    let target: Adjacency<u32> = target.0.iter().copied().collect();
    info!(
        "Searching {} target things with {:?}",
        target.len(),
        config
    );

    println!("\n=== Matches ===");
    let limit = args.limit.unwrap_or(usize::MAX);
    let (found, stopped) =
        write_matches(&mut io::stdout().lock(), &pattern, &target, &config, limit)?;
    if stopped {
        println!("stopped after {found} matches");
    } else {
        println!("{found} matches");
    }

    Ok(())
}

/// Write at most `limit` matches to `out`, one per line.
///
/// Returns how many were written and whether the limit ended the search.
fn write_matches(
    out: &mut impl Write,
    pattern: &PatternGraph<u32>,
    target: &Adjacency<u32>,
    config: &Config,
    limit: usize,
) -> io::Result<(usize, bool)> {
    let mut found = 0;
    let mut written = Ok(());
    let flow = pattern.for_each_match(target, config, &CancelToken::new(), |m| {
        if found >= limit {
            return ControlFlow::Break(());
        }
        if let Err(e) = writeln!(out, "{found}: {m}") {
            written = Err(e);
            return ControlFlow::Break(());
        }
        found += 1;
        if found >= limit {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    written?;
    Ok((found, flow.is_break()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::zero(0, 0, true)]
    #[case::two(2, 2, true)]
    #[case::unlimited(usize::MAX, 6, false)]
    fn test_write_matches_honours_the_limit(
        #[case] limit: usize,
        #[case] expected: usize,
        #[case] stopped: bool,
    ) {
        let pattern = PatternGraph::new([(0u32, 1), (1, 2)]).unwrap();
        let star: Adjacency<u32> = [(0u32, 1), (0, 2), (0, 3), (0, 4)].into_iter().collect();
        let mut out = Vec::new();

        let result = write_matches(&mut out, &pattern, &star, &Config::default(), limit).unwrap();

        assert_eq!(result, (expected, stopped));
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), expected);
    }
}
