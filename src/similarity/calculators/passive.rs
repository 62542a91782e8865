//! Inductors, ferrite beads, crystals and oscillators.

use regex::Regex;
use std::sync::LazyLock;

use super::both_equal;
use crate::handlers::murata_size;
use crate::model::codes::{
    alpha_prefix, decode_eia, match_part_prefix, metric_to_imperial, parse_frequency,
    parse_inductance_code,
};
use crate::model::{ComponentType, SpecBag, SpecUnit};
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const HIGH_SIMILARITY: f64 = 0.9;
const LOW_SIMILARITY: f64 = 0.3;

const LEGACY_VALUE_WEIGHT: f64 = 0.5;
const LEGACY_PACKAGE_WEIGHT: f64 = 0.3;
const LEGACY_PREFIX_WEIGHT: f64 = 0.2;

/// Murata chip inductors: `LQM21PN2R2MC0`, `LQW18AN10NG00`
static MURATA_INDUCTOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^LQ[MHWG](\d{2})[A-Z]{2}(\d*[RN]\d*|\d{3})").expect("static regex")
});
/// Murata ferrite beads: impedance at 100 MHz as an EIA code, `BLM18PG221SN1D`
static MURATA_BEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^BLM(\d{2})[A-Z]{2}(\d{3})").expect("static regex"));
/// Bourns power inductors: `SRR1260-100M`
static BOURNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^SR[RNUP](\d{4})[A-Z]?-(\d{3}|\d*R\d*)").expect("static regex")
});
/// TDK multilayer inductors: `MLZ2012N100LT`
static TDK_MLZ: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^MLZ(\d{4})[A-Z](\d{3}|\d*R\d*)").expect("static regex"));
/// Coilcraft: the value is an EIA code in nanohenries, `XAL4020-222ME`
static COILCRAFT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:XAL|XFL|LPS)(\d{4})-(\d{3})").expect("static regex"));
/// ECS crystals write the frequency in tenths of MHz: `ECS-160-20-4X`
static ECS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ECS-(\d{3})-").expect("static regex"));
static FREQUENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)?(?:MHZ|KHZ)|\d+\.\d+M").expect("static regex")
});

/// Crystal and oscillator series to footprint
const FREQUENCY_PACKAGES: &[(&str, &str)] = &[
    ("ABM3", "5032"),
    ("ABM7", "6035"),
    ("ABM8", "3225"),
    ("ABM10", "2520"),
    ("NX3225", "3225"),
    ("NX2520", "2520"),
    ("FA-238", "3225"),
    ("FA-128", "2016"),
    ("HC49US", "HC-49/US"),
    ("HC49", "HC-49"),
    ("HC-49", "HC-49"),
    ("ASE", "3225"),
    ("ASV", "7050"),
    ("ECS-160", "HC-49/US"),
];

#[derive(Debug, Default, PartialEq)]
struct PassiveSpecs {
    value: Option<f64>,
    unit: Option<SpecUnit>,
    package: Option<String>,
    prefix: Option<String>,
}

impl PassiveSpecs {
    fn with(value: Option<f64>, unit: SpecUnit, package: Option<String>) -> Self {
        Self {
            value,
            unit: Some(unit),
            package,
            prefix: None,
        }
    }
}

fn decode(mpn: &str) -> PassiveSpecs {
    let mut specs = decode_value(mpn);
    specs.prefix = Some(alpha_prefix(mpn))
        .filter(|p| !p.is_empty())
        .map(str::to_string);
    specs
}

fn decode_value(mpn: &str) -> PassiveSpecs {
    if let Some(caps) = MURATA_INDUCTOR.captures(mpn) {
        return PassiveSpecs::with(
            parse_inductance_code(&caps[2]),
            SpecUnit::Henries,
            murata_size(&caps[1]).map(str::to_string),
        );
    }
    if let Some(caps) = MURATA_BEAD.captures(mpn) {
        return PassiveSpecs::with(
            decode_eia(&caps[2], false),
            SpecUnit::Ohms,
            murata_size(&caps[1]).map(str::to_string),
        );
    }
    if let Some(caps) = BOURNS.captures(mpn) {
        return PassiveSpecs::with(
            parse_inductance_code(&caps[2]),
            SpecUnit::Henries,
            Some(caps[1].to_string()),
        );
    }
    if let Some(caps) = TDK_MLZ.captures(mpn) {
        return PassiveSpecs::with(
            parse_inductance_code(&caps[2]),
            SpecUnit::Henries,
            metric_to_imperial(&caps[1]).map(str::to_string),
        );
    }
    if let Some(caps) = COILCRAFT.captures(mpn) {
        return PassiveSpecs::with(
            decode_eia(&caps[2], false).map(|nh| nh * 1e-9),
            SpecUnit::Henries,
            Some(caps[1].to_string()),
        );
    }

    let package = match_part_prefix(FREQUENCY_PACKAGES, mpn).map(|(_, p)| (*p).to_string());
    if let Some(caps) = ECS.captures(mpn) {
        let value = caps[1].parse::<f64>().ok().map(|tenths| tenths * 1e5);
        return PassiveSpecs::with(value, SpecUnit::Hertz, package);
    }
    if let Some(m) = FREQUENCY.find(mpn) {
        return PassiveSpecs::with(parse_frequency(m.as_str()), SpecUnit::Hertz, package);
    }

    PassiveSpecs {
        package,
        ..PassiveSpecs::default()
    }
}

/// Inductor, ferrite bead and frequency-control similarity
#[derive(Debug, Clone, Copy, Default)]
pub struct PassiveCalculator;

impl SpecFamily for PassiveCalculator {
    fn family_name(&self) -> &'static str {
        "PassiveCalculator"
    }

    /// Crystals and oscillators compare frequency exactly, so a pair only
    /// uses their metadata when both sides agree on the type.
    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        match (ctx.classify(mpn1), ctx.classify(mpn2)) {
            (Some(a), Some(b)) if a == b && self.is_applicable(a) => a,
            _ => ComponentType::Passive,
        }
    }

    fn extract_specs(&self, mpn: &str, _ctx: &ScoringContext<'_>) -> SpecBag {
        let specs = decode(mpn);
        let mut bag = SpecBag::new();
        if let Some(unit) = specs.unit {
            bag.insert_numeric("value", specs.value, unit);
        }
        bag.insert_text("package", specs.package);
        bag
    }

    fn low_similarity(&self) -> f64 {
        LOW_SIMILARITY
    }

    fn high_similarity(&self) -> f64 {
        HIGH_SIMILARITY
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, _ctx: &ScoringContext<'_>) -> f64 {
        if mpn1 == mpn2 {
            return 1.0;
        }
        let a = decode(mpn1);
        let b = decode(mpn2);
        let mut score = 0.0;
        if let (Some(x), Some(y)) = (a.value, b.value) {
            if a.unit == b.unit && (x - y).abs() <= x.abs().max(y.abs()) * 1e-9 {
                score += LEGACY_VALUE_WEIGHT;
            }
        }
        if both_equal(a.package, b.package) {
            score += LEGACY_PACKAGE_WEIGHT;
        }
        if both_equal(a.prefix, b.prefix) {
            score += LEGACY_PREFIX_WEIGHT;
        }
        score
    }
}

impl SimilarityCalculator for PassiveCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Passive) || ty == ComponentType::Oscillator
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

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() <= b.abs() * 1e-9)
    }

    #[test]
    fn test_decode_inductors() {
        let lqm = decode("LQM21PN2R2MC0");
        assert!(approx(lqm.value, 2.2e-6));
        assert_eq!(lqm.package.as_deref(), Some("0805"));
        assert!(approx(decode("LQW18AN10NG00").value, 10e-9));
        assert!(approx(decode("SRR1260-100M").value, 10e-6));
        assert_eq!(decode("MLZ2012N100LT").package.as_deref(), Some("0805"));
        assert!(approx(decode("XAL4020-222ME").value, 2.2e-6));
    }

    #[test]
    fn test_decode_bead_and_crystals() {
        let bead = decode("BLM18PG221SN1D");
        assert!(approx(bead.value, 220.0));
        assert_eq!(bead.unit, Some(SpecUnit::Ohms));

        let xtal = decode("ABM8-16.000MHZ-B2-T");
        assert_eq!(xtal.value, Some(16e6));
        assert_eq!(xtal.package.as_deref(), Some("3225"));
        assert_eq!(decode("NX3225SA-16.000M-STD-CSR-3").value, Some(16e6));
        assert_eq!(decode("ECS-160-20-4X").value, Some(16e6));
    }

    #[test]
    fn test_same_inductance_across_vendors() {
        let s = assert_symmetric(&PassiveCalculator, "LQM21PN2R2MC0", "MLZ2012N2R2LT");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_crystal_frequency_is_exact() {
        let s = assert_symmetric(&PassiveCalculator, "ABM8-16.000MHZ-B2-T", "NX3225SA-16.000M-STD-CSR-3");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");

        let e = explain(&PassiveCalculator, "ABM8-16.000MHZ-B2-T", "ABM8-12.000MHZ-B2-T");
        assert_eq!(e.path, ScorePath::Weighted);
        assert!(e.score < 0.4, "got {}", e.score);
    }

    #[test]
    fn test_inductance_mismatch() {
        let s = assert_symmetric(&PassiveCalculator, "SRR1260-100M", "SRR1260-4R7M");
        assert!(s < 0.4, "got {s}");
    }
}
