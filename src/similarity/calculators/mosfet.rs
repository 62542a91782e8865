//! Power and small-signal MOSFETs.

use regex::Regex;
use std::sync::LazyLock;

use super::{handler_package, scoring_type, Tiers};
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

#[derive(Debug, Clone, Copy, PartialEq)]
struct MosfetRating {
    channel: &'static str,
    voltage: Option<f64>,
    current: Option<f64>,
    package: Option<&'static str>,
}

const fn fet(channel: &'static str, voltage: f64, current: f64, package: &'static str) -> MosfetRating {
    MosfetRating {
        channel,
        voltage: Some(voltage),
        current: Some(current),
        package: Some(package),
    }
}

/// Parts whose ratings do not follow a decodable scheme
const FIXED_PARTS: &[(&str, MosfetRating)] = &[
    ("2N7000", fet("N", 60.0, 0.2, "TO-92")),
    ("2N7002", fet("N", 60.0, 0.115, "SOT-23")),
    ("BSS138", fet("N", 50.0, 0.22, "SOT-23")),
    ("BSS123", fet("N", 100.0, 0.17, "SOT-23")),
    ("BSS84", fet("P", 50.0, 0.13, "SOT-23")),
    ("IRFZ44", fet("N", 60.0, 50.0, "TO-220")),
    ("IRFZ34", fet("N", 60.0, 30.0, "TO-220")),
    ("IRFZ24", fet("N", 60.0, 17.0, "TO-220")),
    ("IRLZ44", fet("N", 55.0, 47.0, "TO-220")),
    ("IRF3205", fet("N", 55.0, 110.0, "TO-220")),
    ("IRF3710", fet("N", 100.0, 57.0, "TO-220")),
    ("IRF1404", fet("N", 40.0, 202.0, "TO-220")),
    ("IRF4905", fet("P", 55.0, 74.0, "TO-220")),
    ("IRLML2502", fet("N", 20.0, 4.2, "SOT-23")),
    ("IRLML6402", fet("P", 20.0, 3.7, "SOT-23")),
    ("AO3400", fet("N", 30.0, 5.7, "SOT-23")),
    ("AO3401", fet("P", 30.0, 4.0, "SOT-23")),
    ("AO3402", fet("N", 30.0, 4.0, "SOT-23")),
    ("AO3407", fet("P", 30.0, 4.1, "SOT-23")),
    ("AO3414", fet("N", 20.0, 4.2, "SOT-23")),
    ("AO3415", fet("P", 20.0, 4.0, "SOT-23")),
    ("SI2301", fet("P", 20.0, 2.3, "SOT-23")),
    ("SI2302", fet("N", 20.0, 2.6, "SOT-23")),
    ("SI2303", fet("P", 30.0, 1.9, "SOT-23")),
    ("SI2304", fet("N", 30.0, 2.5, "SOT-23")),
    ("SI2306", fet("N", 30.0, 3.5, "SOT-23")),
    ("SI2308", fet("N", 60.0, 2.0, "SOT-23")),
];

/// HEXFET voltage class by the first digit of the three-digit code
const IRF_VOLTAGE_CLASS: &[(&str, f64)] = &[("5", 100.0), ("6", 200.0), ("7", 400.0), ("8", 500.0)];

/// N-channel HEXFET continuous drain current at 25 °C
const IRF_N_CURRENTS: &[(&str, f64)] = &[
    ("510", 5.6),
    ("520", 9.2),
    ("530", 14.0),
    ("540", 28.0),
    ("610", 3.3),
    ("620", 5.2),
    ("630", 9.0),
    ("640", 18.0),
    ("710", 2.0),
    ("720", 3.3),
    ("730", 5.5),
    ("740", 10.0),
    ("830", 4.5),
    ("840", 8.0),
];

/// P-channel (IRF9xxx) continuous drain current at 25 °C
const IRF_P_CURRENTS: &[(&str, f64)] = &[
    ("510", 4.0),
    ("520", 6.8),
    ("530", 12.0),
    ("540", 19.0),
    ("610", 1.8),
    ("620", 3.5),
    ("630", 6.5),
    ("640", 11.0),
];

static HEXFET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^IR[FL]([RU]?)(9?)(([5-8])\d{2})(?:\D|$)").expect("static regex")
});
static INFINEON_OPTIMOS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:BS[CZ]|IP[PDBAW])\d{3}([NP])(\d{2})").expect("static regex"));
static INFINEON_COOLMOS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^IP[PDBAW](\d{2})R\d{3}").expect("static regex"));
static FAIRCHILD_QFET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^FQ([PDAU])(\d{1,2})([NP])(\d{2})").expect("static regex"));
static SMALL_SIGNAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:AON?|SI)\d{3}(\d)").expect("static regex"));
static DIODES_INC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^DM([NP])(\d{2})").expect("static regex"));
/// Base part for equivalence lookups: `IRF540N` in `IRF540NPBF`
static BASE_PART: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d?[A-Z]+\d+N?").expect("static regex"));

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn decode(mpn: &str) -> Option<MosfetRating> {
    let base = strip_ordering_suffix(mpn);
    if let Some((_, rating)) = match_part_prefix(FIXED_PARTS, base) {
        return Some(*rating);
    }

    if let Some(caps) = HEXFET.captures(base) {
        let p_channel = &caps[2] == "9";
        let current_table = if p_channel { IRF_P_CURRENTS } else { IRF_N_CURRENTS };
        return Some(MosfetRating {
            channel: if p_channel { "P" } else { "N" },
            voltage: lookup(IRF_VOLTAGE_CLASS, &caps[4]),
            current: lookup(current_table, &caps[3]),
            package: None,
        });
    }
    if let Some(caps) = INFINEON_COOLMOS.captures(base) {
        let volts: f64 = caps[1].parse().ok()?;
        return Some(MosfetRating {
            channel: "N",
            voltage: Some(volts * 10.0),
            current: None,
            package: None,
        });
    }
    if let Some(caps) = INFINEON_OPTIMOS.captures(base) {
        let volts: f64 = caps[2].parse().ok()?;
        return Some(MosfetRating {
            channel: if &caps[1] == "P" { "P" } else { "N" },
            voltage: Some(volts * 10.0),
            current: None,
            package: None,
        });
    }
    if let Some(caps) = FAIRCHILD_QFET.captures(base) {
        let amps: f64 = caps[2].parse().ok()?;
        let volts: f64 = caps[4].parse().ok()?;
        let package = match &caps[1] {
            "P" => "TO-220",
            "D" => "DPAK",
            "U" => "IPAK",
            _ => "TO-3P",
        };
        return Some(fet(
            if &caps[3] == "P" { "P" } else { "N" },
            volts * 10.0,
            amps,
            package,
        ));
    }
    if let Some(caps) = DIODES_INC.captures(base) {
        let volts: f64 = caps[2].parse().ok()?;
        return Some(MosfetRating {
            channel: if &caps[1] == "P" { "P" } else { "N" },
            voltage: Some(volts),
            current: None,
            package: None,
        });
    }
    // AOS and Siliconix small-signal parts: odd part numbers are P-channel
    if let Some(caps) = SMALL_SIGNAL.captures(base) {
        let last: u32 = caps[1].parse().ok()?;
        return Some(MosfetRating {
            channel: if last % 2 == 1 { "P" } else { "N" },
            voltage: None,
            current: None,
            package: None,
        });
    }

    None
}

fn base_part(mpn: &str) -> Option<&str> {
    BASE_PART
        .find(strip_ordering_suffix(mpn))
        .map(|m| m.as_str())
}

/// MOSFET similarity; opposite channel types never match
#[derive(Debug, Clone, Copy, Default)]
pub struct MosfetCalculator;

impl SpecFamily for MosfetCalculator {
    fn family_name(&self) -> &'static str {
        "MosfetCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Mosfet, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, ctx: &ScoringContext<'_>) -> SpecBag {
        let mut bag = SpecBag::new();
        let rating = decode(mpn);
        if let Some(rating) = rating {
            bag.insert_text("channel", Some(rating.channel));
            bag.insert_numeric("voltage", rating.voltage, SpecUnit::Volts);
            bag.insert_numeric("current", rating.current, SpecUnit::Amps);
        }
        let package = handler_package(mpn, ComponentType::Mosfet, ctx)
            .or_else(|| rating.and_then(|r| r.package).map(str::to_string));
        bag.insert_text("package", package);
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["channel"]
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
            (Some(a), Some(b)) => ctx.equivalent(EquivalenceTables::MOSFET, a, b),
            _ => false,
        }
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        let same_base = base_part(mpn1).is_some() && base_part(mpn1) == base_part(mpn2);
        TIERS.score(mpn1, mpn2, same_base || self.known_equivalent(mpn1, mpn2, ctx))
    }
}

impl SimilarityCalculator for MosfetCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Mosfet)
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
    fn test_decode_hexfet() {
        let n = decode("IRF530").unwrap();
        assert_eq!(n.channel, "N");
        assert_eq!(n.voltage, Some(100.0));
        assert_eq!(n.current, Some(14.0));

        let p = decode("IRF9530").unwrap();
        assert_eq!(p.channel, "P");
        assert_eq!(p.current, Some(12.0));

        assert_eq!(decode("IRF540NPBF").unwrap().current, Some(28.0));
        assert_eq!(decode("IRFZ44N").unwrap().voltage, Some(60.0));
    }

    #[test]
    fn test_decode_other_vendors() {
        assert_eq!(decode("BSC010N04LS").unwrap().voltage, Some(40.0));
        assert_eq!(decode("IPW60R045CP").unwrap().voltage, Some(600.0));
        let qfet = decode("FQP30N06L").unwrap();
        assert_eq!(qfet.voltage, Some(60.0));
        assert_eq!(qfet.current, Some(30.0));
        assert_eq!(decode("AO3423").unwrap().channel, "P");
        assert_eq!(decode("2N7002").unwrap().package, Some("SOT-23"));
    }

    #[test]
    fn test_package_comes_from_handler() {
        with_ctx(|ctx| {
            let bag = MosfetCalculator.extract_specs("IRF540NSPBF", ctx);
            assert_eq!(bag.text("package"), Some("D2PAK"));
        });
    }

    #[test]
    fn test_opposite_channels_score_low() {
        let e = explain(&MosfetCalculator, "IRF530", "IRF9530");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!(e.score < 0.6);
        assert!(!e.boosted);
    }

    #[test]
    fn test_official_replacement_is_boosted() {
        let s = assert_symmetric(&MosfetCalculator, "IRF540", "IRF540NPBF");
        assert!(s >= 0.9, "got {s}");
    }

    #[test]
    fn test_cross_vendor_equivalents() {
        let s = assert_symmetric(&MosfetCalculator, "AO3400A", "SI2302CDS-T1-GE3");
        assert!(s >= 0.9, "got {s}");
    }

    #[test]
    fn test_same_channel_different_rating() {
        let s = assert_symmetric(&MosfetCalculator, "IRF530", "IRF640");
        assert!(s < 0.7, "got {s}");
    }
}
