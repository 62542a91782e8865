//! Compare command handler.
//!
//! Implements the `compare` subcommand: score one MPN pair.

use anyhow::{Context, Result};
use serde_json::json;
use std::io::Write;

use super::exit_codes;
use crate::similarity::SimilarityEngine;

/// Compare command flags
#[derive(Debug, Clone, Copy, Default)]
pub struct CompareOptions {
    /// Print the per-spec breakdown
    pub explain: bool,
    pub json: bool,
    /// Exit with [`exit_codes::BELOW_MINIMUM`] when the score misses the
    /// profile's minimum
    pub fail_below_minimum: bool,
}

/// Run the compare command, returning the desired exit code.
pub fn run_compare(
    engine: &SimilarityEngine,
    mpn1: &str,
    mpn2: &str,
    options: CompareOptions,
    out: &mut dyn Write,
) -> Result<i32> {
    let explanation = engine.explain(mpn1, mpn2);
    let profile = explanation
        .profile
        .or(engine.profile_override())
        .unwrap_or_default();
    let acceptable = profile.accepts(explanation.score);

    tracing::debug!("{mpn1} vs {mpn2}: {}", explanation.summary());

    if options.json {
        let value = json!({
            "mpn1": mpn1,
            "mpn2": mpn2,
            "acceptable": acceptable,
            "minimum_score": profile.minimum_score(),
            "explanation": explanation,
        });
        let text = serde_json::to_string_pretty(&value).context("failed to serialize result")?;
        writeln!(out, "{text}")?;
    } else if options.explain {
        writeln!(out, "{}", explanation.detailed())?;
        writeln!(
            out,
            "Minimum for {profile}: {:.2} ({})",
            profile.minimum_score(),
            if acceptable { "acceptable" } else { "below minimum" }
        )?;
    } else {
        writeln!(out, "{:.3}", explanation.score)?;
    }

    if options.fail_below_minimum && !acceptable {
        return Ok(exit_codes::BELOW_MINIMUM);
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mpn1: &str, mpn2: &str, options: CompareOptions) -> (i32, String) {
        let engine = SimilarityEngine::new();
        let mut out = Vec::new();
        let code = run_compare(&engine, mpn1, mpn2, options, &mut out).unwrap();
        (code, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_plain_score() {
        let (code, text) = run("CRCW060310K0FKEA", "CRCW060310K0FKEA", CompareOptions::default());
        assert_eq!(code, exit_codes::SUCCESS);
        assert_eq!(text.trim(), "1.000");
    }

    #[test]
    fn test_explain_output() {
        let options = CompareOptions {
            explain: true,
            ..CompareOptions::default()
        };
        let (_, text) = run("CRCW060310K0FKEA", "CRCW080510K0FKEA", options);
        assert!(text.contains("ResistorCalculator"));
        assert!(text.contains("resistance"));
        assert!(text.contains("below minimum"));
    }

    #[test]
    fn test_json_output() {
        let options = CompareOptions {
            json: true,
            ..CompareOptions::default()
        };
        let (_, text) = run("1N4148", "1N914", options);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["acceptable"], true);
        assert_eq!(value["explanation"]["calculator"], "DiodeCalculator");
    }

    #[test]
    fn test_fail_below_minimum() {
        let options = CompareOptions {
            fail_below_minimum: true,
            ..CompareOptions::default()
        };
        let (code, _) = run("IRF530", "IRF9530", options);
        assert_eq!(code, exit_codes::BELOW_MINIMUM);
        let (code, _) = run("1N4148", "1N914", options);
        assert_eq!(code, exit_codes::SUCCESS);
    }
}
