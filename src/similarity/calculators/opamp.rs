//! Operational amplifiers.

use regex::Regex;
use std::sync::LazyLock;

use super::{handler_package, scoring_type, Tiers};
use crate::model::codes::{ic_package_from_suffix, match_part_prefix};
use crate::model::{ComponentType, SpecBag, SpecUnit};
use crate::similarity::equivalence::EquivalenceTables;
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const TIERS: Tiers = Tiers {
    high: 0.9,
    medium: 0.6,
    low: 0.3,
};

/// Channel count, input stage and application class
type OpAmpTraits = (u32, &'static str, &'static str);

const OPAMP_PARTS: &[(&str, OpAmpTraits)] = &[
    ("LM358", (2, "BIPOLAR", "GENERAL")),
    ("LM2904", (2, "BIPOLAR", "GENERAL")),
    ("LM324", (4, "BIPOLAR", "GENERAL")),
    ("LM2902", (4, "BIPOLAR", "GENERAL")),
    ("LM741", (1, "BIPOLAR", "GENERAL")),
    ("UA741", (1, "BIPOLAR", "GENERAL")),
    ("MC1458", (2, "BIPOLAR", "GENERAL")),
    ("RC4558", (2, "BIPOLAR", "GENERAL")),
    ("NJM4558", (2, "BIPOLAR", "GENERAL")),
    ("NE5532", (2, "BIPOLAR", "LOW_NOISE")),
    ("NE5534", (1, "BIPOLAR", "LOW_NOISE")),
    ("TL071", (1, "JFET", "LOW_NOISE")),
    ("TL072", (2, "JFET", "LOW_NOISE")),
    ("TL074", (4, "JFET", "LOW_NOISE")),
    ("TL081", (1, "JFET", "GENERAL")),
    ("TL082", (2, "JFET", "GENERAL")),
    ("TL084", (4, "JFET", "GENERAL")),
    ("OPA134", (1, "JFET", "AUDIO")),
    ("OPA2134", (2, "JFET", "AUDIO")),
    ("OPA4134", (4, "JFET", "AUDIO")),
    ("OPA340", (1, "CMOS", "RAIL_TO_RAIL")),
    ("OPA2340", (2, "CMOS", "RAIL_TO_RAIL")),
    ("LMV321", (1, "CMOS", "RAIL_TO_RAIL")),
    ("LMV358", (2, "CMOS", "RAIL_TO_RAIL")),
    ("LMV324", (4, "CMOS", "RAIL_TO_RAIL")),
    ("TLV2371", (1, "CMOS", "RAIL_TO_RAIL")),
    ("TLV2372", (2, "CMOS", "RAIL_TO_RAIL")),
    ("MCP6001", (1, "CMOS", "RAIL_TO_RAIL")),
    ("MCP6002", (2, "CMOS", "RAIL_TO_RAIL")),
    ("MCP6004", (4, "CMOS", "RAIL_TO_RAIL")),
];

/// TI precision families: the first digit after the prefix is the channel
/// count (`OPA2188`, `TLV4333`)
static TI_NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(OPA|TLV)([124])\d{3}").expect("static regex"));
/// Microchip MCP6xxx: the last digit is the channel count
static MICROCHIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^MCP6\d{2}([1-4])").expect("static regex"));
static BASE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+\d+").expect("static regex"));

#[derive(Debug, Default, PartialEq)]
struct OpAmpSpecs {
    channels: Option<u32>,
    input_type: Option<&'static str>,
    function: Option<&'static str>,
    package: Option<&'static str>,
}

fn decode(mpn: &str) -> OpAmpSpecs {
    if let Some(&(key, (channels, input_type, function))) = match_part_prefix(OPAMP_PARTS, mpn) {
        return OpAmpSpecs {
            channels: Some(channels),
            input_type: Some(input_type),
            function: Some(function),
            package: ic_package_from_suffix(&mpn[key.len()..]),
        };
    }

    let base_len = BASE_PART.find(mpn).map_or(0, |m| m.end());
    let package = ic_package_from_suffix(&mpn[base_len..]);
    if let Some(caps) = TI_NUMBERED.captures(mpn) {
        return OpAmpSpecs {
            channels: caps[2].parse().ok(),
            package,
            ..OpAmpSpecs::default()
        };
    }
    if let Some(caps) = MICROCHIP.captures(mpn) {
        let channels = match &caps[1] {
            "2" => 2,
            "4" => 4,
            _ => 1,
        };
        return OpAmpSpecs {
            channels: Some(channels),
            input_type: Some("CMOS"),
            package,
            ..OpAmpSpecs::default()
        };
    }

    OpAmpSpecs {
        package,
        ..OpAmpSpecs::default()
    }
}

fn base_part(mpn: &str) -> Option<&str> {
    BASE_PART.find(mpn).map(|m| m.as_str())
}

/// Op-amp similarity; the channel count has to match
#[derive(Debug, Clone, Copy, Default)]
pub struct OpAmpCalculator;

impl SpecFamily for OpAmpCalculator {
    fn family_name(&self) -> &'static str {
        "OpAmpCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::OpAmp, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, ctx: &ScoringContext<'_>) -> SpecBag {
        let specs = decode(mpn);
        let mut bag = SpecBag::new();
        bag.insert_numeric("channels", specs.channels.map(f64::from), SpecUnit::Count);
        bag.insert_text("input_type", specs.input_type);
        bag.insert_text("function", specs.function);
        let package = handler_package(mpn, ComponentType::OpAmp, ctx).or_else(|| specs.package.map(str::to_string));
        bag.insert_text("package", package);
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["channels"]
    }

    fn low_similarity(&self) -> f64 {
        TIERS.low
    }

    fn high_similarity(&self) -> f64 {
        TIERS.high
    }

    fn known_equivalent(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> bool {
        match (base_part(mpn1), base_part(mpn2)) {
            (Some(a), Some(b)) => ctx.equivalent(EquivalenceTables::OPAMP, a, b),
            _ => false,
        }
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        let same_base = base_part(mpn1).is_some() && base_part(mpn1) == base_part(mpn2);
        TIERS.score(mpn1, mpn2, same_base || self.known_equivalent(mpn1, mpn2, ctx))
    }
}

impl SimilarityCalculator for OpAmpCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::OpAmp)
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
    fn test_decode_table_and_suffix() {
        let specs = decode("LM358DR");
        assert_eq!(specs.channels, Some(2));
        assert_eq!(specs.input_type, Some("BIPOLAR"));
        assert_eq!(specs.package, Some("SOIC"));
        assert_eq!(decode("MCP6002-I/SN").package, Some("SOIC"));
        assert_eq!(decode("TL074CN").channels, Some(4));
    }

    #[test]
    fn test_decode_numbered_families() {
        assert_eq!(decode("OPA2188AIDR").channels, Some(2));
        assert_eq!(decode("MCP6024-I/P").channels, Some(4));
        assert_eq!(decode("MCP6024-I/P").input_type, Some("CMOS"));
    }

    #[test]
    fn test_second_source_is_identical() {
        let s = assert_symmetric(&OpAmpCalculator, "LM358DR", "LM2904DR");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_channel_mismatch_short_circuits() {
        let e = explain(&OpAmpCalculator, "LM358N", "LM324N");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - TIERS.low).abs() < 1e-12);
    }

    #[test]
    fn test_jfet_pair_boosted() {
        let e = explain(&OpAmpCalculator, "TL072CP", "TL082CP");
        assert!(e.boosted);
        assert!((e.score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_different_input_stage() {
        let s = assert_symmetric(&OpAmpCalculator, "LM358", "TL072");
        assert!(s < 0.7, "got {s}");
    }
}
