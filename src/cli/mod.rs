//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler writes to the given writer and returns the process exit code.

mod classify;
mod compare;
mod rank;

pub use classify::run_classify;
pub use compare::{run_compare, CompareOptions};
pub use rank::run_rank;

use anyhow::Result;
use std::io::Write;

use crate::similarity::SimilarityEngine;

/// Process exit codes
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    /// `compare --fail-below-minimum` scored under the profile minimum
    pub const BELOW_MINIMUM: i32 = 1;
    /// Configuration or I/O failure
    pub const ERROR: i32 = 2;
}

/// List the registered calculators in dispatch order.
pub fn run_calculators(engine: &SimilarityEngine, out: &mut dyn Write) -> Result<i32> {
    for (idx, name) in engine.chain().names().iter().enumerate() {
        writeln!(out, "{:>2}. {name}", idx + 1)?;
    }
    writeln!(out, "    DefaultCalculator (fallback)")?;
    writeln!(out, "    LevenshteinCalculator (fallback)")?;
    Ok(exit_codes::SUCCESS)
}
