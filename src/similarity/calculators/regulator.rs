//! Linear, LDO and switching voltage regulators.

use regex::Regex;
use std::sync::LazyLock;

use super::{handler_package, scoring_type, Tiers};
use crate::handlers::strip_ordering_suffix;
use crate::model::codes::ic_package_from_suffix;
use crate::model::{ComponentType, SpecBag, SpecUnit, SpecValue};
use crate::similarity::equivalence::EquivalenceTables;
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const TIERS: Tiers = Tiers {
    high: 0.9,
    medium: 0.6,
    low: 0.3,
};

const LINEAR: &str = "LINEAR";
const LDO: &str = "LDO";
const SWITCHING: &str = "SWITCHING";
const POSITIVE: &str = "POSITIVE";
const NEGATIVE: &str = "NEGATIVE";

/// `L7805CV`, `LM7912CT`, `78L05`, `MC79M15`
static FIXED_78XX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:L|LM|MC|UA|KA)?(78|79)([LM]?)(\d{2})([A-Z]*)").expect("static regex")
});
static ADJUSTABLE_3XX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^LM3([13])7([LM]?)([A-Z]*)").expect("static regex"));
/// 1117 family: `AMS1117-3.3`, `LD1117V33`, `LM1117MPX-ADJ`
static LDO_1117: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(LM|AMS|LD|AZ)1117([A-Z]*)-?(ADJ|\d\.\d|\d{2})?").expect("static regex")
});
static LDO_108X: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^LM108([456])([A-Z]*)-?(ADJ|\d\.\d)?").expect("static regex")
});
/// `MCP1700T-3302E/TT`: two digits of output voltage in tenths after the dash
static MICROCHIP_LDO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^MCP(1[78]\d{2})[A-Z]*-(\d{2})").expect("static regex"));
static SIMPLE_SWITCHER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^LM(2596|2576|2575|2574)([A-Z]*)-?(ADJ|\d{1,2}\.\d|\d{1,2})?").expect("static regex")
});
static BASE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]*\d+").expect("static regex"));

const MICROCHIP_CURRENTS: &[(&str, f64)] = &[
    ("1700", 0.25),
    ("1702", 0.25),
    ("1703", 0.25),
    ("1711", 0.15),
    ("1725", 0.5),
    ("1825", 0.5),
    ("1826", 1.0),
];

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputVoltage {
    Fixed(f64),
    Adjustable,
}

impl OutputVoltage {
    /// `3.3`, `ADJ`, or a two-digit code in tenths (`33` is 3.3 V)
    fn parse_tenths(code: Option<&str>) -> Option<Self> {
        match code? {
            "ADJ" => Some(Self::Adjustable),
            c if c.contains('.') => c.parse().ok().map(Self::Fixed),
            c => c.parse::<f64>().ok().map(|v| Self::Fixed(v / 10.0)),
        }
    }

    /// `5.0`, `ADJ`, or whole volts (`12`)
    fn parse_volts(code: Option<&str>) -> Option<Self> {
        match code? {
            "ADJ" => Some(Self::Adjustable),
            c => c.parse().ok().map(Self::Fixed),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct RegulatorSpecs {
    regulator_type: &'static str,
    polarity: &'static str,
    output_voltage: Option<OutputVoltage>,
    current: Option<f64>,
    package: Option<&'static str>,
}

/// Through-hole and power package letters shared by most regulator vendors
fn package_from_letters(letters: &str) -> Option<&'static str> {
    if letters.contains("DT") {
        Some("DPAK")
    } else if letters.contains("MP") || (letters.ends_with('S') && !letters.ends_with("DS")) {
        Some("SOT-223")
    } else if letters.ends_with('V') || letters.ends_with('T') {
        Some("TO-220")
    } else {
        ic_package_from_suffix(letters)
    }
}

fn decode(mpn: &str) -> Option<RegulatorSpecs> {
    let base = strip_ordering_suffix(mpn);

    if let Some(caps) = FIXED_78XX.captures(base) {
        let volts: f64 = caps[3].parse().ok()?;
        let current = match &caps[2] {
            "L" => 0.1,
            "M" => 0.5,
            _ => 1.5,
        };
        return Some(RegulatorSpecs {
            regulator_type: LINEAR,
            polarity: if &caps[1] == "78" { POSITIVE } else { NEGATIVE },
            output_voltage: Some(OutputVoltage::Fixed(volts)),
            current: Some(current),
            package: package_from_letters(&caps[4]),
        });
    }
    if let Some(caps) = ADJUSTABLE_3XX.captures(base) {
        let current = match &caps[2] {
            "L" => 0.1,
            "M" => 0.5,
            _ => 1.5,
        };
        return Some(RegulatorSpecs {
            regulator_type: LINEAR,
            polarity: if &caps[1] == "1" { POSITIVE } else { NEGATIVE },
            output_voltage: Some(OutputVoltage::Adjustable),
            current: Some(current),
            package: package_from_letters(&caps[3]),
        });
    }
    if let Some(caps) = LDO_1117.captures(base) {
        let letters = &caps[2];
        let package = match (&caps[1], package_from_letters(letters)) {
            (_, Some(p)) => Some(p),
            ("AMS", None) => Some("SOT-223"),
            _ => None,
        };
        return Some(RegulatorSpecs {
            regulator_type: LDO,
            polarity: POSITIVE,
            output_voltage: OutputVoltage::parse_tenths(caps.get(3).map(|m| m.as_str())),
            current: Some(if &caps[1] == "LM" || &caps[1] == "LD" { 0.8 } else { 1.0 }),
            package,
        });
    }
    if let Some(caps) = LDO_108X.captures(base) {
        let current = match &caps[1] {
            "4" => 5.0,
            "5" => 3.0,
            _ => 1.5,
        };
        return Some(RegulatorSpecs {
            regulator_type: LDO,
            polarity: POSITIVE,
            output_voltage: OutputVoltage::parse_volts(caps.get(3).map(|m| m.as_str())),
            current: Some(current),
            package: package_from_letters(&caps[2]),
        });
    }
    if let Some(caps) = MICROCHIP_LDO.captures(base) {
        let series = &caps[1];
        return Some(RegulatorSpecs {
            regulator_type: LDO,
            polarity: POSITIVE,
            output_voltage: OutputVoltage::parse_tenths(Some(&caps[2])),
            current: MICROCHIP_CURRENTS
                .iter()
                .find(|(s, _)| *s == series)
                .map(|(_, a)| *a),
            package: if mpn.contains('/') {
                ic_package_from_suffix(mpn)
            } else {
                None
            },
        });
    }
    if let Some(caps) = SIMPLE_SWITCHER.captures(base) {
        let current = match &caps[1] {
            "2575" => 1.0,
            "2574" => 0.5,
            _ => 3.0,
        };
        let package = match &caps[2] {
            l if l.ends_with('S') => Some("TO-263"),
            l if l.ends_with('T') => Some("TO-220"),
            _ => None,
        };
        return Some(RegulatorSpecs {
            regulator_type: SWITCHING,
            polarity: POSITIVE,
            output_voltage: OutputVoltage::parse_volts(caps.get(3).map(|m| m.as_str())),
            current: Some(current),
            package,
        });
    }
    if base.starts_with("MP1584") || base.starts_with("MC34063") {
        return Some(RegulatorSpecs {
            regulator_type: SWITCHING,
            polarity: POSITIVE,
            output_voltage: Some(OutputVoltage::Adjustable),
            current: Some(if base.starts_with("MP1584") { 3.0 } else { 1.5 }),
            package: None,
        });
    }

    None
}

fn base_part(mpn: &str) -> Option<&str> {
    BASE_PART.find(mpn).map(|m| m.as_str())
}

/// Regulator similarity; topology and polarity have to match
#[derive(Debug, Clone, Copy, Default)]
pub struct VoltageRegulatorCalculator;

impl SpecFamily for VoltageRegulatorCalculator {
    fn family_name(&self) -> &'static str {
        "VoltageRegulatorCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::VoltageRegulator, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, ctx: &ScoringContext<'_>) -> SpecBag {
        let mut bag = SpecBag::new();
        let Some(specs) = decode(mpn) else {
            bag.insert_text("package", handler_package(mpn, ComponentType::VoltageRegulator, ctx));
            return bag;
        };
        bag.insert_text("regulator_type", Some(specs.regulator_type));
        bag.insert_text("polarity", Some(specs.polarity));
        match specs.output_voltage {
            Some(OutputVoltage::Fixed(v)) => {
                bag.insert_numeric("output_voltage", Some(v), SpecUnit::Volts);
            }
            Some(OutputVoltage::Adjustable) => {
                bag.insert("output_voltage", SpecValue::text("ADJ"));
            }
            None => {}
        }
        bag.insert_numeric("current", specs.current, SpecUnit::Amps);
        let package = handler_package(mpn, ComponentType::VoltageRegulator, ctx).or_else(|| specs.package.map(str::to_string));
        bag.insert_text("package", package);
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["regulator_type", "polarity"]
    }

    fn low_similarity(&self) -> f64 {
        TIERS.low
    }

    fn high_similarity(&self) -> f64 {
        TIERS.high
    }

    fn known_equivalent(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> bool {
        if ctx.handlers.is_official_replacement(mpn1, mpn2) {
            return true;
        }
        match (base_part(mpn1), base_part(mpn2)) {
            (Some(a), Some(b)) => ctx.equivalent(EquivalenceTables::REGULATOR, a, b),
            _ => false,
        }
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        let same_base = base_part(mpn1).is_some() && base_part(mpn1) == base_part(mpn2);
        TIERS.score(mpn1, mpn2, same_base || self.known_equivalent(mpn1, mpn2, ctx))
    }
}

impl SimilarityCalculator for VoltageRegulatorCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::VoltageRegulator)
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
    fn test_decode_78xx() {
        let specs = decode("L7805CV").unwrap();
        assert_eq!(specs.regulator_type, LINEAR);
        assert_eq!(specs.polarity, POSITIVE);
        assert_eq!(specs.output_voltage, Some(OutputVoltage::Fixed(5.0)));
        assert_eq!(specs.package, Some("TO-220"));

        let negative = decode("LM7912CT").unwrap();
        assert_eq!(negative.polarity, NEGATIVE);
        assert_eq!(negative.output_voltage, Some(OutputVoltage::Fixed(12.0)));
        assert_eq!(decode("78L05").unwrap().current, Some(0.1));
    }

    #[test]
    fn test_decode_ldo_variants() {
        let ams = decode("AMS1117-3.3").unwrap();
        assert_eq!(ams.regulator_type, LDO);
        assert_eq!(ams.output_voltage, Some(OutputVoltage::Fixed(3.3)));
        assert_eq!(ams.package, Some("SOT-223"));

        assert_eq!(
            decode("LD1117V33").unwrap().output_voltage,
            Some(OutputVoltage::Fixed(3.3))
        );
        assert_eq!(
            decode("LM1117MPX-ADJ").unwrap().output_voltage,
            Some(OutputVoltage::Adjustable)
        );

        let mcp = decode("MCP1700T-3302E/TT").unwrap();
        assert_eq!(mcp.output_voltage, Some(OutputVoltage::Fixed(3.3)));
        assert_eq!(mcp.current, Some(0.25));
        assert_eq!(mcp.package, Some("SOT-23"));
    }

    #[test]
    fn test_decode_switchers() {
        let specs = decode("LM2596S-5.0").unwrap();
        assert_eq!(specs.regulator_type, SWITCHING);
        assert_eq!(specs.output_voltage, Some(OutputVoltage::Fixed(5.0)));
        assert_eq!(specs.package, Some("TO-263"));
        assert_eq!(
            decode("LM2596T-ADJ").unwrap().output_voltage,
            Some(OutputVoltage::Adjustable)
        );
        assert_eq!(decode("LM317T").unwrap().output_voltage, Some(OutputVoltage::Adjustable));
    }

    #[test]
    fn test_cross_vendor_7805() {
        let s = assert_symmetric(&VoltageRegulatorCalculator, "LM7805CT", "L7805CV");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_polarity_mismatch_short_circuits() {
        let e = explain(&VoltageRegulatorCalculator, "LM7805CT", "LM7905CT");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - TIERS.low).abs() < 1e-12);
    }

    #[test]
    fn test_topology_mismatch_short_circuits() {
        let e = explain(&VoltageRegulatorCalculator, "LM7805CT", "LM2596T-5.0");
        assert_eq!(e.path, ScorePath::ShortCircuit);
    }

    #[test]
    fn test_output_voltage_mismatch_is_penalised() {
        let s = assert_symmetric(&VoltageRegulatorCalculator, "LM7805CT", "LM7812CT");
        assert!(s > TIERS.low && s < 0.75, "got {s}");
    }

    #[test]
    fn test_1117_second_sources_boosted() {
        let e = explain(&VoltageRegulatorCalculator, "LM1117MPX-3.3", "AMS1117-3.3");
        assert!(e.score >= 0.9, "got {}", e.score);
    }
}
