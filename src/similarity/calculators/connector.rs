//! Board connectors and pin headers.

use regex::Regex;
use std::sync::LazyLock;

use super::{both_equal, scoring_type};
use crate::handlers::MountingType;
use crate::model::{ComponentType, SpecBag, SpecUnit};
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const HIGH_SIMILARITY: f64 = 0.9;
const LOW_SIMILARITY: f64 = 0.3;

const LEGACY_PIN_WEIGHT: f64 = 0.5;
const LEGACY_PITCH_WEIGHT: f64 = 0.3;
const LEGACY_FAMILY_WEIGHT: f64 = 0.2;

const HEADER_PITCH_MM: f64 = 2.54;

/// Generic pin headers: `PINHD-1X10`, `HDR-2X05-2.00`, `HEADER-1X4`
static PIN_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:HDR|PINHD|HEADER)-?(\d)X(\d{1,2})(?:-(\d\.\d{1,2}))?").expect("static regex")
});

#[derive(Debug, Default, PartialEq)]
struct ConnectorSpecs {
    pins: Option<u32>,
    pitch: Option<f64>,
    mounting: Option<MountingType>,
    family: Option<String>,
}

fn decode(mpn: &str, ctx: &ScoringContext<'_>) -> ConnectorSpecs {
    if let Some(h) = ctx.handlers.find_for(mpn, ComponentType::Connector) {
        return ConnectorSpecs {
            pins: h.pin_count(mpn),
            pitch: h.pitch(mpn),
            mounting: h.mounting_type(mpn),
            family: h.family(mpn),
        };
    }

    let Some(caps) = PIN_HEADER.captures(mpn) else {
        return ConnectorSpecs::default();
    };
    let rows: Option<u32> = caps[1].parse().ok();
    let cols: Option<u32> = caps[2].parse().ok();
    ConnectorSpecs {
        pins: rows.zip(cols).map(|(r, c)| r * c),
        pitch: caps
            .get(3)
            .and_then(|m| m.as_str().parse().ok())
            .or(Some(HEADER_PITCH_MM)),
        mounting: Some(MountingType::ThroughHole),
        family: Some("PIN HEADER".to_string()),
    }
}

/// Connector similarity; the circuit count has to match
#[derive(Debug, Clone, Copy, Default)]
pub struct ConnectorCalculator;

impl SpecFamily for ConnectorCalculator {
    fn family_name(&self) -> &'static str {
        "ConnectorCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Connector, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, ctx: &ScoringContext<'_>) -> SpecBag {
        let specs = decode(mpn, ctx);
        let mut bag = SpecBag::new();
        bag.insert_numeric("pin_count", specs.pins.map(f64::from), SpecUnit::Count);
        bag.insert_numeric("pitch", specs.pitch, SpecUnit::Millimeters);
        bag.insert_text("mounting", specs.mounting.map(|m| m.code()));
        bag.insert_text("family", specs.family);
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["pin_count"]
    }

    fn low_similarity(&self) -> f64 {
        LOW_SIMILARITY
    }

    fn high_similarity(&self) -> f64 {
        HIGH_SIMILARITY
    }

    fn known_equivalent(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> bool {
        ctx.handlers.are_compatible(mpn1, mpn2)
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        if mpn1 == mpn2 {
            return 1.0;
        }
        let a = decode(mpn1, ctx);
        let b = decode(mpn2, ctx);
        let mut score = 0.0;
        if both_equal(a.pins, b.pins) {
            score += LEGACY_PIN_WEIGHT;
        }
        if both_equal(a.pitch, b.pitch) {
            score += LEGACY_PITCH_WEIGHT;
        }
        if both_equal(a.family, b.family) {
            score += LEGACY_FAMILY_WEIGHT;
        }
        score
    }
}

impl SimilarityCalculator for ConnectorCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Connector)
    }

    fn explain(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> SimilarityExplanation {
        evaluate(self, mpn1, mpn2, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::calculators::test_support::{assert_symmetric, explain, with_ctx};
    use crate::similarity::traits::ScorePath;

    #[test]
    fn test_decode_generic_header() {
        with_ctx(|ctx| {
            let specs = decode("PINHD-2X05", ctx);
            assert_eq!(specs.pins, Some(10));
            assert_eq!(specs.pitch, Some(2.54));
            assert_eq!(decode("HDR-1X04-2.00", ctx).pitch, Some(2.0));
        });
    }

    #[test]
    fn test_decode_through_handlers() {
        with_ctx(|ctx| {
            let kk = decode("22-23-2041", ctx);
            assert_eq!(kk.pins, Some(4));
            assert_eq!(kk.family.as_deref(), Some("KK 254"));
            let jst = decode("SM04B-SRSS-TB", ctx);
            assert_eq!(jst.mounting, Some(MountingType::SurfaceMount));
        });
    }

    #[test]
    fn test_pin_count_mismatch_short_circuits() {
        let e = explain(&ConnectorCalculator, "B4B-XH-A", "B5B-XH-A");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - LOW_SIMILARITY).abs() < 1e-12);
    }

    #[test]
    fn test_orientation_variants_are_compatible() {
        let s = assert_symmetric(&ConnectorCalculator, "53047-0410", "53261-0471");
        assert!((s - HIGH_SIMILARITY).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_pitch_mismatch() {
        let s = assert_symmetric(&ConnectorCalculator, "22-23-2041", "B4B-XH-A");
        assert!(s < 0.6, "got {s}");
    }

    #[test]
    fn test_kk_against_generic_header() {
        let s = assert_symmetric(&ConnectorCalculator, "22-23-2041", "PINHD-1X4");
        assert!(s > 0.85 && s < 1.0, "got {s}");
    }
}
