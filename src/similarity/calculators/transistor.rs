//! Bipolar junction transistors.

use regex::Regex;
use std::sync::LazyLock;

use super::{scoring_type, Tiers};
use crate::handlers::strip_ordering_suffix;
use crate::model::codes::match_part_prefix;
use crate::model::{ComponentType, SpecBag, SpecUnit};
use crate::similarity::equivalence::EquivalenceTables;
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const TIERS: Tiers = Tiers {
    high: 0.9,
    medium: 0.7,
    low: 0.3,
};

/// Polarity, collector-emitter voltage and package
type BjtRating = (&'static str, f64, &'static str);

const BJT_PARTS: &[(&str, BjtRating)] = &[
    ("2N2222A", ("NPN", 40.0, "TO-18")),
    ("2N2222", ("NPN", 30.0, "TO-18")),
    ("PN2222A", ("NPN", 40.0, "TO-92")),
    ("PN2222", ("NPN", 30.0, "TO-92")),
    ("MMBT2222A", ("NPN", 40.0, "SOT-23")),
    ("MMBT2222", ("NPN", 30.0, "SOT-23")),
    ("2N2907A", ("PNP", 60.0, "TO-18")),
    ("2N2907", ("PNP", 40.0, "TO-18")),
    ("PN2907A", ("PNP", 60.0, "TO-92")),
    ("MMBT2907A", ("PNP", 60.0, "SOT-23")),
    ("2N3904", ("NPN", 40.0, "TO-92")),
    ("2N3906", ("PNP", 40.0, "TO-92")),
    ("MMBT3904", ("NPN", 40.0, "SOT-23")),
    ("MMBT3906", ("PNP", 40.0, "SOT-23")),
    ("PN3904", ("NPN", 40.0, "TO-92")),
    ("PN3906", ("PNP", 40.0, "TO-92")),
    ("BC547", ("NPN", 45.0, "TO-92")),
    ("BC548", ("NPN", 30.0, "TO-92")),
    ("BC549", ("NPN", 30.0, "TO-92")),
    ("BC557", ("PNP", 45.0, "TO-92")),
    ("BC558", ("PNP", 30.0, "TO-92")),
    ("BC847", ("NPN", 45.0, "SOT-23")),
    ("BC857", ("PNP", 45.0, "SOT-23")),
    ("BC337", ("NPN", 45.0, "TO-92")),
    ("BC327", ("PNP", 45.0, "TO-92")),
    ("TIP120", ("NPN", 60.0, "TO-220")),
    ("TIP121", ("NPN", 80.0, "TO-220")),
    ("TIP122", ("NPN", 100.0, "TO-220")),
    ("TIP125", ("PNP", 60.0, "TO-220")),
    ("TIP126", ("PNP", 80.0, "TO-220")),
    ("TIP127", ("PNP", 100.0, "TO-220")),
    ("BD139", ("NPN", 80.0, "TO-126")),
    ("BD140", ("PNP", 80.0, "TO-126")),
    ("2N3055", ("NPN", 60.0, "TO-3")),
    ("MJ2955", ("PNP", 60.0, "TO-3")),
    ("MJE3055", ("NPN", 60.0, "TO-220")),
    ("MJE2955", ("PNP", 60.0, "TO-220")),
    ("2N5551", ("NPN", 160.0, "TO-92")),
    ("2N5401", ("PNP", 150.0, "TO-92")),
    ("S8050", ("NPN", 25.0, "TO-92")),
    ("S8550", ("PNP", 25.0, "TO-92")),
];

/// TIP31/TIP32 power pair; the letter selects the voltage grade
static TIP_PAIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^TIP3([12])([ABC]?)(?:\D|$)").expect("static regex"));
static BASE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d?[A-Z]+\d+A?").expect("static regex"));
/// Series prefix: `2N`, `PN`, `MMBT`, `BC`
static SERIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d?[A-Z]+").expect("static regex"));

#[derive(Debug, Clone, PartialEq)]
struct BjtSpecs {
    polarity: &'static str,
    vce: f64,
    package: &'static str,
    series: String,
}

fn decode(mpn: &str) -> Option<BjtSpecs> {
    let base = strip_ordering_suffix(mpn);

    if let Some(caps) = TIP_PAIR.captures(base) {
        let vce = match &caps[2] {
            "A" => 60.0,
            "B" => 80.0,
            "C" => 100.0,
            _ => 40.0,
        };
        return Some(BjtSpecs {
            polarity: if &caps[1] == "1" { "NPN" } else { "PNP" },
            vce,
            package: "TO-220",
            series: "TIP".to_string(),
        });
    }

    let &(key, (polarity, vce, package)) = match_part_prefix(BJT_PARTS, base)?;
    Some(BjtSpecs {
        polarity,
        vce,
        package,
        series: SERIES.find(key).map_or(key, |m| m.as_str()).to_string(),
    })
}

fn base_part(mpn: &str) -> Option<&str> {
    BASE_PART
        .find(strip_ordering_suffix(mpn))
        .map(|m| m.as_str())
}

/// BJT similarity; NPN and PNP never match
#[derive(Debug, Clone, Copy, Default)]
pub struct TransistorCalculator;

impl SpecFamily for TransistorCalculator {
    fn family_name(&self) -> &'static str {
        "TransistorCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Transistor, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, _ctx: &ScoringContext<'_>) -> SpecBag {
        let mut bag = SpecBag::new();
        if let Some(specs) = decode(mpn) {
            bag.insert_text("polarity", Some(specs.polarity));
            bag.insert_numeric("vce", Some(specs.vce), SpecUnit::Volts);
            bag.insert_text("package", Some(specs.package));
            bag.insert_text("series", Some(specs.series));
        }
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["polarity"]
    }

    fn low_similarity(&self) -> f64 {
        TIERS.low
    }

    fn high_similarity(&self) -> f64 {
        TIERS.high
    }

    fn known_equivalent(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> bool {
        match (base_part(mpn1), base_part(mpn2)) {
            (Some(a), Some(b)) => ctx.equivalent(EquivalenceTables::TRANSISTOR, a, b),
            _ => false,
        }
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        let same_base = base_part(mpn1).is_some() && base_part(mpn1) == base_part(mpn2);
        TIERS.score(mpn1, mpn2, same_base || self.known_equivalent(mpn1, mpn2, ctx))
    }
}

impl SimilarityCalculator for TransistorCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Transistor)
    }

    fn explain(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> SimilarityExplanation {
        evaluate(self, mpn1, mpn2, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::calculators::test_support::{assert_symmetric, explain};
    use crate::similarity::traits::ScorePath;

    #[test]
    fn test_decode_table_parts() {
        let specs = decode("2N2222A").unwrap();
        assert_eq!(specs.polarity, "NPN");
        assert_eq!(specs.vce, 40.0);
        assert_eq!(specs.series, "2N");

        assert_eq!(decode("BC547B").unwrap().vce, 45.0);
        assert_eq!(decode("MMBT3906LT1G").unwrap().package, "SOT-23");
        assert!(decode("XYZ123").is_none());
    }

    #[test]
    fn test_series_ignores_grade_letter() {
        assert_eq!(decode("PN2222A").unwrap().series, "PN");
        assert_eq!(decode("MMBT2222A").unwrap().series, "MMBT");
        assert_eq!(decode("MMBT3904").unwrap().series, "MMBT");

        let e = explain(&TransistorCalculator, "PN2222A", "PN3904");
        assert_eq!(e.path, ScorePath::Weighted);
        assert!((e.score - 1.0).abs() < 1e-9, "got {}", e.score);
        let s = assert_symmetric(&TransistorCalculator, "MMBT2222A", "MMBT3904");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_decode_tip_grades() {
        assert_eq!(decode("TIP31C").unwrap().vce, 100.0);
        assert_eq!(decode("TIP32A").unwrap().polarity, "PNP");
        assert_eq!(decode("TIP122").unwrap().vce, 100.0);
    }

    #[test]
    fn test_polarity_mismatch_short_circuits() {
        let e = explain(&TransistorCalculator, "2N3904", "2N3906");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - TIERS.low).abs() < 1e-12);
    }

    #[test]
    fn test_known_equivalents_are_boosted() {
        let s = assert_symmetric(&TransistorCalculator, "2N2222", "PN2222A");
        assert!(s >= 0.9, "got {s}");
        let s = assert_symmetric(&TransistorCalculator, "BC547", "BC847");
        assert!(s >= 0.9, "got {s}");
    }

    #[test]
    fn test_same_polarity_different_series() {
        let s = assert_symmetric(&TransistorCalculator, "2N3904", "BC547");
        assert!(s > 0.5 && s < 0.9, "got {s}");
    }
}
