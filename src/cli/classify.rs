//! Classify command handler.

use anyhow::{Context, Result};
use serde_json::json;
use std::io::Write;

use super::exit_codes;
use crate::similarity::SimilarityEngine;

/// Print the component type of each MPN.
pub fn run_classify(
    engine: &SimilarityEngine,
    mpns: &[String],
    json: bool,
    out: &mut dyn Write,
) -> Result<i32> {
    if json {
        let entries: Vec<_> = mpns
            .iter()
            .map(|mpn| {
                let ty = engine.classify(mpn);
                let normalized = mpn.trim().to_ascii_uppercase();
                json!({
                    "mpn": mpn,
                    "component_type": ty,
                    "base_type": ty.and_then(|t| t.base_type()),
                    "manufacturer": engine.handlers().find(&normalized).map(|h| h.name()),
                })
            })
            .collect();
        let text = serde_json::to_string_pretty(&entries).context("failed to serialize result")?;
        writeln!(out, "{text}")?;
        return Ok(exit_codes::SUCCESS);
    }

    let width = mpns.iter().map(String::len).max().unwrap_or(0);
    for mpn in mpns {
        match engine.classify(mpn) {
            Some(ty) => {
                let lineage: Vec<&str> = ty.lineage().map(|t| t.name()).collect();
                writeln!(out, "{mpn:<width$}  {}", lineage.join(" < "))?;
            }
            None => writeln!(out, "{mpn:<width$}  unclassified")?,
        }
    }
    Ok(exit_codes::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_text() {
        let engine = SimilarityEngine::new();
        let mut out = Vec::new();
        let mpns = vec!["CRCW060310K0FKEA".to_string(), "XYZZY".to_string()];
        run_classify(&engine, &mpns, false, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("RESISTOR_CHIP_VISHAY < RESISTOR < PASSIVE"));
        assert!(text.contains("XYZZY             unclassified"));
    }

    #[test]
    fn test_classify_json() {
        let engine = SimilarityEngine::new();
        let mut out = Vec::new();
        run_classify(&engine, &["IRF540N".to_string()], true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["component_type"], "MOSFET_INFINEON");
        assert_eq!(value[0]["base_type"], "MOSFET");
        assert_eq!(value[0]["manufacturer"], "Infineon");
    }
}
