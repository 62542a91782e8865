//! Chip and through-hole resistors.

use regex::Regex;
use std::sync::LazyLock;

use super::{both_equal, scoring_type};
use crate::model::codes::{alpha_prefix, find_imperial_size, parse_resistance_code};
use crate::model::{ComponentType, SpecBag, SpecUnit};
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const HIGH_SIMILARITY: f64 = 0.9;
const LOW_SIMILARITY: f64 = 0.3;

const LEGACY_VALUE_WEIGHT: f64 = 0.5;
const LEGACY_PACKAGE_WEIGHT: f64 = 0.3;
const LEGACY_SERIES_WEIGHT: f64 = 0.2;

static VISHAY_CRCW: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CRCW(\d{4})(\d*[RKM]\d*|\d{3,4})").expect("static regex")
});
static YAGEO_RC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^RC(\d{4})[A-Z]R-\d{2}(\d*[RKM]\d*|\d{3,4})").expect("static regex")
});
static PANASONIC_ERJ: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ERJ-?(\d{1,2})[A-Z]{2,4}?(\d{3,4}|\d*R\d*)[A-Z]?$").expect("static regex")
});
/// Value in letter notation anywhere in the MPN (`10K`, `4R7`, `1M0`)
static LETTER_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+[RKM]\d*").expect("static regex"));

/// Panasonic ERJ size digit to imperial size
const PANASONIC_SIZES: &[(&str, &str)] = &[
    ("1", "0201"),
    ("2", "0402"),
    ("3", "0603"),
    ("6", "0805"),
    ("8", "1206"),
    ("14", "1210"),
    ("12", "1812"),
];

#[derive(Debug, Default, PartialEq)]
struct ResistorSpecs {
    resistance: Option<f64>,
    package: Option<String>,
    series: Option<String>,
}

fn decode(mpn: &str) -> ResistorSpecs {
    let series = Some(alpha_prefix(mpn)).filter(|s| !s.is_empty()).map(str::to_string);

    if let Some(caps) = VISHAY_CRCW.captures(mpn).or_else(|| YAGEO_RC.captures(mpn)) {
        return ResistorSpecs {
            resistance: parse_resistance_code(&caps[2]),
            package: Some(caps[1].to_string()),
            series,
        };
    }

    if let Some(caps) = PANASONIC_ERJ.captures(mpn) {
        let package = PANASONIC_SIZES
            .iter()
            .find(|(code, _)| *code == &caps[1])
            .map(|(_, size)| (*size).to_string());
        return ResistorSpecs {
            resistance: parse_resistance_code(&caps[2]),
            package,
            series,
        };
    }

    ResistorSpecs {
        resistance: LETTER_VALUE
            .find(mpn)
            .and_then(|m| parse_resistance_code(m.as_str())),
        package: find_imperial_size(mpn).map(str::to_string),
        series,
    }
}

/// Resistor similarity: resistance first, then package
#[derive(Debug, Clone, Copy, Default)]
pub struct ResistorCalculator;

impl SpecFamily for ResistorCalculator {
    fn family_name(&self) -> &'static str {
        "ResistorCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Resistor, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, _ctx: &ScoringContext<'_>) -> SpecBag {
        let specs = decode(mpn);
        let mut bag = SpecBag::new();
        bag.insert_numeric("resistance", specs.resistance, SpecUnit::Ohms);
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
        if let (Some(x), Some(y)) = (a.resistance, b.resistance) {
            if (x - y).abs() <= x.abs().max(y.abs()) * 1e-9 {
                score += LEGACY_VALUE_WEIGHT;
            }
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

impl SimilarityCalculator for ResistorCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Resistor)
    }

    fn explain(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> SimilarityExplanation {
        evaluate(self, mpn1, mpn2, ctx)
    }
}
