//! Indicator LEDs.

use regex::Regex;
use std::sync::LazyLock;

use super::{both_equal, scoring_type};
use crate::model::codes::{alpha_prefix, find_imperial_size, metric_to_imperial};
use crate::model::{ComponentType, SpecBag};
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const HIGH_SIMILARITY: f64 = 0.9;
const LOW_SIMILARITY: f64 = 0.2;

const LEGACY_COLOR_WEIGHT: f64 = 0.5;
const LEGACY_PACKAGE_WEIGHT: f64 = 0.3;
const LEGACY_SERIES_WEIGHT: f64 = 0.2;

static KINGBRIGHT_CHIP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(APTD|APHHS|APHCM|APT)(\d{4})([A-Z0-9]*)").expect("static regex"));
static KINGBRIGHT_THT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^WP(\d{3,4})[A-Z0-9/]*?([A-Z]{2,5})$").expect("static regex"));
static LITEON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^LTST-?([A-Z]\d{3})([A-Z]+)").expect("static regex"));
static OSRAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^L([SGYBWAOTR]) ?([A-Z]{1,2}\d{2})").expect("static regex"));

/// Kingbright colour suffixes, longest and most specific first
const KINGBRIGHT_COLORS: &[(&str, &str)] = &[
    ("SURC", "RED"),
    ("SRC", "RED"),
    ("SEC", "ORANGE"),
    ("SYC", "YELLOW"),
    ("SGC", "GREEN"),
    ("ZGC", "GREEN"),
    ("CGC", "GREEN"),
    ("PBC", "BLUE"),
    ("QBC", "BLUE"),
    ("VBC", "BLUE"),
    ("PWC", "WHITE"),
    ("QWF", "WHITE"),
    ("SGD", "GREEN"),
    ("ID", "RED"),
    ("EC", "RED"),
    ("GD", "GREEN"),
    ("YD", "YELLOW"),
    ("ND", "ORANGE"),
];

const LITEON_COLORS: &[(&str, &str)] = &[
    ("TBK", "BLUE"),
    ("KRK", "RED"),
    ("KFK", "ORANGE"),
    ("KSK", "YELLOW"),
    ("KGK", "GREEN"),
    ("BK", "BLUE"),
    ("GK", "GREEN"),
    ("YK", "YELLOW"),
    ("EK", "RED"),
    ("CK", "RED"),
    ("WK", "WHITE"),
];

const LITEON_PACKAGES: &[(&str, &str)] = &[
    ("C150", "1206"),
    ("C170", "0805"),
    ("C171", "0805"),
    ("C190", "0603"),
    ("C191", "0603"),
    ("C193", "0603"),
    ("C194", "0603"),
];

const OSRAM_COLORS: &[(&str, &str)] = &[
    ("S", "RED"),
    ("R", "RED"),
    ("G", "GREEN"),
    ("T", "GREEN"),
    ("Y", "YELLOW"),
    ("B", "BLUE"),
    ("W", "WHITE"),
    ("A", "AMBER"),
    ("O", "ORANGE"),
];

const OSRAM_PACKAGES: &[(&str, &str)] = &[
    ("T67", "PLCC-2"),
    ("E67", "PLCC-2"),
    ("M67", "MINI-PLCC-2"),
    ("L29", "0603"),
    ("R97", "0805"),
    ("Q97", "0805"),
    ("P47", "0402"),
];

const KINGBRIGHT_THT_PACKAGES: &[(&str, &str)] = &[
    ("7113", "5MM"),
    ("1503", "3MM"),
    ("710", "3MM"),
    ("937", "5MM"),
];

const COLOR_WORDS: &[&str] = &["RED", "GREEN", "BLUE", "YELLOW", "WHITE", "ORANGE", "AMBER"];

fn lookup(table: &[(&'static str, &'static str)], key: &str) -> Option<&'static str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn color_in(table: &[(&'static str, &'static str)], suffix: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(code, _)| suffix.contains(code))
        .map(|(_, color)| *color)
}

#[derive(Debug, Default, PartialEq)]
struct LedSpecs {
    color: Option<&'static str>,
    package: Option<String>,
    series: Option<String>,
}

fn decode(mpn: &str) -> LedSpecs {
    if let Some(caps) = KINGBRIGHT_CHIP.captures(mpn) {
        return LedSpecs {
            color: color_in(KINGBRIGHT_COLORS, &caps[3]),
            package: metric_to_imperial(&caps[2]).map(str::to_string),
            series: Some(caps[1].to_string()),
        };
    }
    if let Some(caps) = KINGBRIGHT_THT.captures(mpn) {
        return LedSpecs {
            color: color_in(KINGBRIGHT_COLORS, &caps[2]),
            package: lookup(KINGBRIGHT_THT_PACKAGES, &caps[1]).map(str::to_string),
            series: Some("WP".to_string()),
        };
    }
    if let Some(caps) = LITEON.captures(mpn) {
        return LedSpecs {
            color: color_in(LITEON_COLORS, &caps[2]),
            package: lookup(LITEON_PACKAGES, &caps[1]).map(str::to_string),
            series: Some(format!("LTST-{}", &caps[1])),
        };
    }
    if let Some(caps) = OSRAM.captures(mpn) {
        return LedSpecs {
            color: lookup(OSRAM_COLORS, &caps[1]),
            package: lookup(OSRAM_PACKAGES, &caps[2]).map(str::to_string),
            series: Some(caps[2].to_string()),
        };
    }

    LedSpecs {
        color: COLOR_WORDS.iter().find(|w| mpn.contains(*w)).copied(),
        package: find_imperial_size(mpn).map(str::to_string),
        series: Some(alpha_prefix(mpn))
            .filter(|s| !s.is_empty())
            .map(str::to_string),
    }
}

/// LED similarity; a colour mismatch is disqualifying
#[derive(Debug, Clone, Copy, Default)]
pub struct LedCalculator;

impl SpecFamily for LedCalculator {
    fn family_name(&self) -> &'static str {
        "LedCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Led, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, _ctx: &ScoringContext<'_>) -> SpecBag {
        let specs = decode(mpn);
        let mut bag = SpecBag::new();
        bag.insert_text("color", specs.color);
        bag.insert_text("package", specs.package);
        bag.insert_text("series", specs.series);
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["color"]
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
        if both_equal(a.color, b.color) {
            score += LEGACY_COLOR_WEIGHT;
        }
        if both_equal(a.package, b.package) {
            score += LEGACY_PACKAGE_WEIGHT;
        }
        if both_equal(a.series, b.series) {
            score += LEGACY_SERIES_WEIGHT;
        }
        score
    }
}

impl SimilarityCalculator for LedCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Led)
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
    fn test_decode_kingbright() {
        let specs = decode("APT2012SGC");
        assert_eq!(specs.color, Some("GREEN"));
        assert_eq!(specs.package.as_deref(), Some("0805"));
        assert_eq!(decode("APT1608SURCK").color, Some("RED"));
        assert_eq!(decode("WP7113ID").color, Some("RED"));
        assert_eq!(decode("WP7113ID").package.as_deref(), Some("5MM"));
    }

    #[test]
    fn test_decode_liteon_and_osram() {
        let liteon = decode("LTST-C150GKT");
        assert_eq!(liteon.color, Some("GREEN"));
        assert_eq!(liteon.package.as_deref(), Some("1206"));
        assert_eq!(decode("LTST-C191KRKT").color, Some("RED"));

        let osram = decode("LST676-Q1R2-1");
        assert_eq!(osram.color, Some("RED"));
        assert_eq!(osram.package.as_deref(), Some("PLCC-2"));
    }

    #[test]
    fn test_color_mismatch_short_circuits() {
        let e = explain(&LedCalculator, "LTST-C150GKT", "LTST-C150KRKT");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - LOW_SIMILARITY).abs() < 1e-12);
    }

    #[test]
    fn test_same_color_same_size_across_vendors() {
        let s = assert_symmetric(&LedCalculator, "APT2012SGC", "LTST-C170KGKT");
        // colour and package agree, series does not
        assert!(s > 0.8 && s < 1.0, "got {s}");
    }
}
