//! Rank command handler.
//!
//! Implements the `rank` subcommand: order candidate replacements for one MPN.

use anyhow::{Context, Result};
use std::io::Write;

use super::exit_codes;
use crate::similarity::SimilarityEngine;

/// Score `candidates` against `mpn` and print the best `limit` of them.
pub fn run_rank(
    engine: &SimilarityEngine,
    mpn: &str,
    candidates: &[String],
    limit: Option<usize>,
    json: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    let mut ranked = engine.rank_candidates(mpn, candidates);
    if let Some(limit) = limit {
        ranked.truncate(limit);
    }
    tracing::debug!("Ranked {} candidates for {mpn}", candidates.len());

    if json {
        let text = serde_json::to_string_pretty(&ranked).context("failed to serialize ranking")?;
        writeln!(out, "{text}")?;
        return Ok(exit_codes::SUCCESS);
    }

    let width = ranked.iter().map(|r| r.mpn.len()).max().unwrap_or(0);
    for (idx, candidate) in ranked.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:.3}  {:<width$}  {}",
            idx + 1,
            candidate.score,
            candidate.mpn,
            candidate.calculator
        )?;
    }
    Ok(exit_codes::SUCCESS)
}
