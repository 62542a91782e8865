//! Signal, rectifier, Schottky, Zener and TVS diodes.

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

const SIGNAL: &str = "SIGNAL";
const RECTIFIER: &str = "RECTIFIER";
const SCHOTTKY: &str = "SCHOTTKY";
const ZENER: &str = "ZENER";
const TVS: &str = "TVS";

#[derive(Debug, Clone, Copy, PartialEq)]
struct DiodeRating {
    family: &'static str,
    voltage: Option<f64>,
    current: Option<f64>,
    package: Option<&'static str>,
}

const fn rating(family: &'static str, voltage: f64, current: f64, package: &'static str) -> DiodeRating {
    DiodeRating {
        family,
        voltage: Some(voltage),
        current: Some(current),
        package: Some(package),
    }
}

/// Individually rated parts
const FIXED_PARTS: &[(&str, DiodeRating)] = &[
    ("1N4148", rating(SIGNAL, 100.0, 0.2, "DO-35")),
    ("1N914", rating(SIGNAL, 100.0, 0.2, "DO-35")),
    ("1N4448", rating(SIGNAL, 100.0, 0.2, "DO-35")),
    ("LL4148", rating(SIGNAL, 100.0, 0.2, "MINIMELF")),
    ("BAV99", rating(SIGNAL, 70.0, 0.2, "SOT-23")),
    ("BAW56", rating(SIGNAL, 70.0, 0.2, "SOT-23")),
    ("BAS16", rating(SIGNAL, 100.0, 0.2, "SOT-23")),
    ("1N5817", rating(SCHOTTKY, 20.0, 1.0, "DO-41")),
    ("1N5818", rating(SCHOTTKY, 30.0, 1.0, "DO-41")),
    ("1N5819", rating(SCHOTTKY, 40.0, 1.0, "DO-41")),
    ("1N5820", rating(SCHOTTKY, 20.0, 3.0, "DO-201AD")),
    ("1N5821", rating(SCHOTTKY, 30.0, 3.0, "DO-201AD")),
    ("1N5822", rating(SCHOTTKY, 40.0, 3.0, "DO-201AD")),
    ("BAT54", rating(SCHOTTKY, 30.0, 0.2, "SOT-23")),
    ("BAT54W", rating(SCHOTTKY, 30.0, 0.2, "SOT-323")),
    ("BAT85", rating(SCHOTTKY, 30.0, 0.2, "DO-34")),
    ("BAT43", rating(SCHOTTKY, 30.0, 0.2, "DO-35")),
];

/// Reverse voltage by the last digit of 1N400x / RL20x / UF400x
const RECTIFIER_VOLTAGES: [f64; 7] = [50.0, 100.0, 200.0, 400.0, 600.0, 800.0, 1000.0];

/// 1N5400 series: last digit to reverse voltage
const RECTIFIER_1N540X_VOLTAGES: [f64; 9] = [
    50.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0, 800.0, 1000.0,
];

/// 1N4728A..1N4764A, 1 W
const ZENER_1N47XX: [f64; 37] = [
    3.3, 3.6, 3.9, 4.3, 4.7, 5.1, 5.6, 6.2, 6.8, 7.5, 8.2, 9.1, 10.0, 11.0, 12.0, 13.0, 15.0,
    16.0, 18.0, 20.0, 22.0, 24.0, 27.0, 30.0, 33.0, 36.0, 39.0, 43.0, 47.0, 51.0, 56.0, 62.0,
    68.0, 75.0, 82.0, 91.0, 100.0,
];

/// 1N5221B..1N5271B, 500 mW (also sold as MMSZ52xx)
const ZENER_1N52XX: [f64; 51] = [
    2.4, 2.5, 2.7, 2.8, 3.0, 3.3, 3.6, 3.9, 4.3, 4.7, 5.1, 5.6, 6.0, 6.2, 6.8, 7.5, 8.2, 8.7,
    9.1, 10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0, 22.0, 24.0, 25.0,
    27.0, 28.0, 30.0, 33.0, 36.0, 39.0, 43.0, 47.0, 51.0, 56.0, 60.0, 62.0, 68.0, 75.0, 82.0,
    87.0, 91.0, 100.0,
];

static RECTIFIER_1N400X: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(1N400|RL20|UF400)([1-7])(?:\D|$)").expect("static regex"));
static RECTIFIER_1N540X: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^1N540([0-8])(?:\D|$)").expect("static regex"));
static ZENER_NUMBERED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(1N|MMSZ)(47\d{2}|52\d{2})(?:\D|$)").expect("static regex"));
static ZENER_BZX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(BZX55|BZX79|BZX84|BZT52)-?[A-C]?(\d+)(?:V(\d))?").expect("static regex")
});
static SCHOTTKY_SB: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SB(\d)(\d{2,3})(?:\D|$)").expect("static regex"));
static SCHOTTKY_SS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^S[SK](\d)(\d{1,2})(?:\D|$)").expect("static regex"));
static TVS_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(SMAJ|SMBJ|SMCJ|P6KE|P4SMA|1\.5KE)(\d+(?:\.\d+)?)").expect("static regex")
});
/// Base part for equivalence lookups: `1N4148` in `1N4148W-7-F`
static BASE_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(1N\d{3,4}B?|LL\d{4}|RL20\d|BAT\d{2}W?|SB\d{3,4}|[A-Z]+\d+)").expect("static regex")
});

fn with_package_suffix(mut rating: DiodeRating, suffix: &str) -> DiodeRating {
    let package = if suffix.starts_with("WS") {
        Some("SOD-323")
    } else if suffix.starts_with('W') && rating.package != Some("SOT-323") {
        Some("SOD-123")
    } else {
        None
    };
    if package.is_some() {
        rating.package = package;
    }
    rating
}

fn decode(mpn: &str) -> Option<DiodeRating> {
    if let Some((key, rating)) = match_part_prefix(FIXED_PARTS, mpn) {
        return Some(with_package_suffix(*rating, &mpn[key.len()..]));
    }

    if let Some(caps) = RECTIFIER_1N400X.captures(mpn) {
        let digit: usize = caps[2].parse().ok()?;
        let (current, package) = match &caps[1] {
            "RL20" => (2.0, "DO-15"),
            _ => (1.0, "DO-41"),
        };
        return Some(rating(RECTIFIER, RECTIFIER_VOLTAGES[digit - 1], current, package));
    }
    if let Some(caps) = RECTIFIER_1N540X.captures(mpn) {
        let digit: usize = caps[1].parse().ok()?;
        return Some(rating(RECTIFIER, RECTIFIER_1N540X_VOLTAGES[digit], 3.0, "DO-201AD"));
    }

    if let Some(caps) = ZENER_NUMBERED.captures(mpn) {
        let number: usize = caps[2].parse().ok()?;
        let voltage = match number {
            4728..=4764 => ZENER_1N47XX.get(number - 4728).copied(),
            5221..=5271 => ZENER_1N52XX.get(number - 5221).copied(),
            _ => None,
        };
        let package = if &caps[1] == "MMSZ" {
            "SOD-123"
        } else if number < 5000 {
            "DO-41"
        } else {
            "DO-35"
        };
        return Some(DiodeRating {
            family: ZENER,
            voltage,
            current: None,
            package: Some(package),
        });
    }
    if let Some(caps) = ZENER_BZX.captures(mpn) {
        let voltage: f64 = match caps.get(3) {
            Some(frac) => format!("{}.{}", &caps[2], frac.as_str()).parse().ok()?,
            None => caps[2].parse().ok()?,
        };
        let package = match &caps[1] {
            "BZX84" => "SOT-23",
            "BZT52" => "SOD-123",
            _ => "DO-35",
        };
        return Some(DiodeRating {
            family: ZENER,
            voltage: Some(voltage),
            current: None,
            package: Some(package),
        });
    }

    if let Some(caps) = SCHOTTKY_SB.captures(mpn) {
        let amps: f64 = caps[1].parse().ok()?;
        let volts: f64 = caps[2].parse().ok()?;
        return Some(rating(SCHOTTKY, volts, amps, "DO-41"));
    }
    if let Some(caps) = SCHOTTKY_SS.captures(mpn) {
        let amps: f64 = caps[1].parse().ok()?;
        let volts: f64 = caps[2].parse::<f64>().ok()? * 10.0;
        let package = if amps <= 1.0 { "SMA" } else { "SMB" };
        return Some(rating(SCHOTTKY, volts, amps, package));
    }

    if let Some(caps) = TVS_PARTS.captures(mpn) {
        let volts: f64 = caps[2].parse().ok()?;
        let package = match &caps[1] {
            "SMAJ" | "P4SMA" => "SMA",
            "SMBJ" => "SMB",
            "SMCJ" => "SMC",
            "P6KE" => "DO-15",
            _ => "DO-201",
        };
        return Some(DiodeRating {
            family: TVS,
            voltage: Some(volts),
            current: None,
            package: Some(package),
        });
    }

    None
}

fn base_part(mpn: &str) -> Option<&str> {
    BASE_PART
        .find(strip_ordering_suffix(mpn))
        .map(|m| m.as_str())
}

/// Diode similarity; a different diode family is disqualifying
#[derive(Debug, Clone, Copy, Default)]
pub struct DiodeCalculator;

impl SpecFamily for DiodeCalculator {
    fn family_name(&self) -> &'static str {
        "DiodeCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Diode, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, _ctx: &ScoringContext<'_>) -> SpecBag {
        let mut bag = SpecBag::new();
        if let Some(rating) = decode(mpn) {
            bag.insert_text("family", Some(rating.family));
            bag.insert_numeric("voltage", rating.voltage, SpecUnit::Volts);
            bag.insert_numeric("current", rating.current, SpecUnit::Amps);
            bag.insert_text("package", rating.package);
        }
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["family"]
    }

    fn low_similarity(&self) -> f64 {
        TIERS.low
    }

    fn high_similarity(&self) -> f64 {
        TIERS.high
    }

    fn known_equivalent(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> bool {
        match (base_part(mpn1), base_part(mpn2)) {
            (Some(a), Some(b)) => ctx.equivalent(EquivalenceTables::DIODE, a, b),
            _ => false,
        }
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        let same_base = base_part(mpn1).is_some() && base_part(mpn1) == base_part(mpn2);
        TIERS.score(mpn1, mpn2, same_base || self.known_equivalent(mpn1, mpn2, ctx))
    }
}

impl SimilarityCalculator for DiodeCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Diode)
    }

    fn explain(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> SimilarityExplanation {
        evaluate(self, mpn1, mpn2, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::similarity::calculators::test_support::{assert_symmetric, explain, score};
    use crate::similarity::traits::ScorePath;

    #[test]
    fn test_decode_signal_and_rectifier() {
        let signal = decode("1N4148").unwrap();
        assert_eq!(signal.family, SIGNAL);
        assert_eq!(signal.voltage, Some(100.0));

        let rect = decode("1N4007").unwrap();
        assert_eq!(rect.family, RECTIFIER);
        assert_eq!(rect.voltage, Some(1000.0));
        assert_eq!(rect.current, Some(1.0));

        let rl = decode("RL207").unwrap();
        assert_eq!(rl.current, Some(2.0));
        assert_eq!(decode("1N5408").unwrap().voltage, Some(1000.0));
    }

    #[test]
    fn test_package_suffixes() {
        assert_eq!(decode("1N4148W-7-F").unwrap().package, Some("SOD-123"));
        assert_eq!(decode("1N4148WS").unwrap().package, Some("SOD-323"));
        assert_eq!(decode("BAT54W").unwrap().package, Some("SOT-323"));
    }

    #[test]
    fn test_decode_zener() {
        assert_eq!(decode("1N4733A").unwrap().voltage, Some(5.1));
        assert_eq!(decode("1N4764A").unwrap().voltage, Some(100.0));
        assert_eq!(decode("1N5231B").unwrap().voltage, Some(5.1));
        assert_eq!(decode("MMSZ5231B").unwrap().package, Some("SOD-123"));
        assert_eq!(decode("BZX55C5V1").unwrap().voltage, Some(5.1));
        assert_eq!(decode("BZX84C12").unwrap().voltage, Some(12.0));
    }

    #[test]
    fn test_decode_schottky_and_tvs() {
        let ss = decode("SS34").unwrap();
        assert_eq!(ss.family, SCHOTTKY);
        assert_eq!(ss.voltage, Some(40.0));
        assert_eq!(ss.current, Some(3.0));

        let sb = decode("SB140").unwrap();
        assert_eq!(sb.voltage, Some(40.0));
        assert_eq!(sb.current, Some(1.0));

        let tvs = decode("SMAJ5.0A").unwrap();
        assert_eq!(tvs.family, TVS);
        assert_eq!(tvs.voltage, Some(5.0));
    }

    #[test]
    fn test_1n4148_and_1n914_are_interchangeable() {
        let s = assert_symmetric(&DiodeCalculator, "1N4148", "1N914");
        assert!(s >= 0.9, "got {s}");
    }

    #[test]
    fn test_rectifier_equivalents_are_boosted() {
        let e = explain(&DiodeCalculator, "1N4007", "RL207");
        assert!(e.score >= 0.9, "got {}", e.score);
        assert!(e.boosted);
    }

    #[test]
    fn test_family_mismatch_short_circuits() {
        let e = explain(&DiodeCalculator, "1N4148", "1N4733A");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_zener_voltage_mismatch() {
        let s = assert_symmetric(&DiodeCalculator, "1N4733A", "1N4742A");
        assert!(s < 0.8, "got {s}");
        assert_eq!(score(&DiodeCalculator, "1N4733A", "1N4733A"), 1.0);
    }

    #[test]
    fn test_undecodable_uses_tiers() {
        let e = explain(&DiodeCalculator, "BAV21", "BAV23");
        assert_eq!(e.path, ScorePath::Legacy);
        assert!((e.score - 0.7).abs() < 1e-12);
    }
}
