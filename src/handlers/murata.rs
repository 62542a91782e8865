//! Murata: GRM/GCM ceramic capacitors, LQ inductors and BLM ferrite beads.

use regex::Regex;
use std::sync::LazyLock;

use super::ManufacturerHandler;
use crate::model::ComponentType;

static MURATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(G[RC][MJT]|LQ[MHWG]|BLM)(\d{2})").expect("static regex")
});

/// Murata two-digit dimension code to imperial size.
const SIZE_CODES: &[(&str, &str)] = &[
    ("03", "0201"),
    ("15", "0402"),
    ("18", "0603"),
    ("21", "0805"),
    ("31", "1206"),
    ("32", "1210"),
    ("43", "1812"),
    ("55", "2220"),
];

/// Imperial size for a Murata dimension code
#[must_use]
pub fn murata_size(code: &str) -> Option<&'static str> {
    SIZE_CODES.iter().find(|(c, _)| *c == code).map(|(_, s)| *s)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MurataHandler;

impl ManufacturerHandler for MurataHandler {
    fn name(&self) -> &'static str {
        "Murata"
    }

    fn handles(&self, mpn: &str) -> bool {
        MURATA.is_match(mpn)
    }

    fn supported_types(&self) -> &'static [ComponentType] {
        &[
            ComponentType::CapacitorCeramicMurata,
            ComponentType::Inductor,
            ComponentType::FerriteBead,
        ]
    }

    fn extract_series(&self, mpn: &str) -> Option<String> {
        MURATA.captures(mpn).map(|c| c[1].to_string())
    }

    fn extract_package_code(&self, mpn: &str) -> Option<String> {
        let caps = MURATA.captures(mpn)?;
        murata_size(&caps[2]).map(str::to_string)
    }

    fn family(&self, mpn: &str) -> Option<String> {
        let series = self.extract_series(mpn)?;
        let family = match series.as_str() {
            "GRM" => "general purpose MLCC",
            "GCM" => "automotive MLCC",
            "GRT" => "automotive MLCC",
            "GRJ" | "GCJ" => "soft termination MLCC",
            "BLM" => "chip ferrite bead",
            _ => "chip inductor",
        };
        Some(family.to_string())
    }

    /// Same part with a different packaging letter (`...01D` vs `...01J`).
    fn is_official_replacement(&self, original: &str, candidate: &str) -> bool {
        original != candidate
            && self.handles(original)
            && original.len() == candidate.len()
            && original.len() > 1
            && original.get(..original.len() - 1) == candidate.get(..candidate.len() - 1)
    }
}
