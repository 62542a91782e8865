//! Ceramic and electrolytic capacitors.
//!
//! Murata, KEMET, TDK, Samsung and Yageo ceramic numbering is decoded field
//! by field; anything else falls back to a size and dielectric search.

use regex::Regex;
use std::sync::LazyLock;

use super::{both_equal, scoring_type};
use crate::handlers::murata_size;
use crate::model::codes::{
    decode_eia, decode_letter_notation, find_imperial_size, metric_to_imperial,
    parse_capacitance_code,
};
use crate::model::{ComponentType, SpecBag, SpecUnit};
use crate::similarity::equivalence::EquivalenceTables;
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const HIGH_SIMILARITY: f64 = 0.9;
const LOW_SIMILARITY: f64 = 0.3;

const LEGACY_VALUE_WEIGHT: f64 = 0.5;
const LEGACY_PACKAGE_WEIGHT: f64 = 0.3;
const LEGACY_DIELECTRIC_WEIGHT: f64 = 0.2;

static MURATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^G[RC][MJT](\d{2})\w(\w{2})(\d[A-Z])(\d{3}|\d*R\d+)[A-Z]").expect("static regex")
});
static KEMET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^C(\d{4})C(\d{3}|\d*R\d+)[A-Z](\d)([A-Z])").expect("static regex")
});
static TDK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^C(\d{4})([A-Z]\d[A-Z]|C0G|NP0)(\d[A-Z])(\d{3}|\d*R\d+)[A-Z]").expect("static regex")
});
static SAMSUNG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CL(\d{2})([A-Z])(\d{3}|\d*R\d+)[A-Z]([A-Z])").expect("static regex")
});
static YAGEO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CC(\d{4})[A-Z]{2}(NP0|X7R|X5R|Y5V|C0G)(\d)BB(\d{3})").expect("static regex")
});
static PANASONIC_EEU: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^EEU-?[A-Z]{2}(\d[A-Z])(\d{3}|\d*R\d+)").expect("static regex")
});
static PANASONIC_EEE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^EEE-?(\d[A-Z])[A-Z]{1,2}?(\d{3}|\d*R\d+)").expect("static regex")
});
static DIELECTRIC_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(X7R|X5R|X7S|X7T|X6S|C0G|NP0|COG|Y5V|Z5U)").expect("static regex")
});

/// Murata/TDK/Panasonic two-character voltage codes
const JIS_VOLTAGE_CODES: &[(&str, f64)] = &[
    ("0G", 4.0),
    ("0J", 6.3),
    ("1A", 10.0),
    ("1C", 16.0),
    ("1E", 25.0),
    ("1V", 35.0),
    ("1H", 50.0),
    ("1J", 63.0),
    ("2A", 100.0),
    ("2D", 200.0),
    ("2E", 250.0),
    ("2J", 630.0),
];

const MURATA_DIELECTRICS: &[(&str, &str)] = &[
    ("R7", "X7R"),
    ("R6", "X5R"),
    ("5C", "C0G"),
    ("C7", "X7S"),
    ("D7", "X7T"),
    ("C8", "X6S"),
    ("F5", "Y5V"),
];

const KEMET_VOLTAGES: &[(&str, f64)] = &[
    ("9", 6.3),
    ("8", 10.0),
    ("4", 16.0),
    ("3", 25.0),
    ("6", 35.0),
    ("5", 50.0),
    ("1", 100.0),
    ("2", 200.0),
];

const KEMET_DIELECTRICS: &[(&str, &str)] = &[
    ("G", "C0G"),
    ("R", "X7R"),
    ("P", "X5R"),
    ("U", "Z5U"),
    ("V", "Y5V"),
];

const SAMSUNG_SIZES: &[(&str, &str)] = &[
    ("03", "0201"),
    ("05", "0402"),
    ("10", "0603"),
    ("21", "0805"),
    ("31", "1206"),
    ("32", "1210"),
    ("43", "1812"),
];

const SAMSUNG_DIELECTRICS: &[(&str, &str)] = &[
    ("C", "C0G"),
    ("B", "X7R"),
    ("A", "X5R"),
    ("F", "Y5V"),
    ("X", "X6S"),
];

const SAMSUNG_VOLTAGES: &[(&str, f64)] = &[
    ("R", 4.0),
    ("Q", 6.3),
    ("P", 10.0),
    ("O", 16.0),
    ("A", 25.0),
    ("L", 35.0),
    ("B", 50.0),
    ("C", 100.0),
    ("D", 200.0),
];

const YAGEO_VOLTAGES: &[(&str, f64)] = &[
    ("5", 6.3),
    ("6", 10.0),
    ("7", 16.0),
    ("8", 25.0),
    ("9", 50.0),
    ("0", 100.0),
];

fn lookup<T: Copy>(table: &[(&str, T)], key: &str) -> Option<T> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

#[derive(Debug, Default, PartialEq)]
struct CapacitorSpecs {
    capacitance: Option<f64>,
    package: Option<String>,
    dielectric: Option<String>,
    voltage: Option<f64>,
}

fn decode(mpn: &str) -> CapacitorSpecs {
    if let Some(caps) = MURATA.captures(mpn) {
        return CapacitorSpecs {
            capacitance: parse_capacitance_code(&caps[4]),
            package: murata_size(&caps[1]).map(str::to_string),
            dielectric: lookup(MURATA_DIELECTRICS, &caps[2]).map(str::to_string),
            voltage: lookup(JIS_VOLTAGE_CODES, &caps[3]),
        };
    }
    if let Some(caps) = KEMET.captures(mpn) {
        return CapacitorSpecs {
            capacitance: parse_capacitance_code(&caps[2]),
            package: Some(caps[1].to_string()),
            dielectric: lookup(KEMET_DIELECTRICS, &caps[4]).map(str::to_string),
            voltage: lookup(KEMET_VOLTAGES, &caps[3]),
        };
    }
    if let Some(caps) = TDK.captures(mpn) {
        return CapacitorSpecs {
            capacitance: parse_capacitance_code(&caps[4]),
            package: metric_to_imperial(&caps[1]).map(str::to_string),
            dielectric: Some(caps[2].to_string()),
            voltage: lookup(JIS_VOLTAGE_CODES, &caps[3]),
        };
    }
    if let Some(caps) = SAMSUNG.captures(mpn) {
        return CapacitorSpecs {
            capacitance: parse_capacitance_code(&caps[3]),
            package: lookup(SAMSUNG_SIZES, &caps[1]).map(str::to_string),
            dielectric: lookup(SAMSUNG_DIELECTRICS, &caps[2]).map(str::to_string),
            voltage: lookup(SAMSUNG_VOLTAGES, &caps[4]),
        };
    }
    if let Some(caps) = YAGEO.captures(mpn) {
        return CapacitorSpecs {
            capacitance: parse_capacitance_code(&caps[4]),
            package: Some(caps[1].to_string()),
            dielectric: Some(caps[2].to_string()),
            voltage: lookup(YAGEO_VOLTAGES, &caps[3]),
        };
    }
    // Aluminium electrolytics code the value in microfarads
    if let Some(caps) = PANASONIC_EEU.captures(mpn).or_else(|| PANASONIC_EEE.captures(mpn)) {
        return CapacitorSpecs {
            capacitance: electrolytic_value(&caps[2]),
            package: None,
            dielectric: Some("ALUMINUM".to_string()),
            voltage: lookup(JIS_VOLTAGE_CODES, &caps[1]),
        };
    }

    CapacitorSpecs {
        capacitance: None,
        package: find_imperial_size(mpn).map(str::to_string),
        dielectric: DIELECTRIC_WORD.find(mpn).map(|m| m.as_str().to_string()),
        voltage: None,
    }
}

fn electrolytic_value(code: &str) -> Option<f64> {
    if code.contains('R') {
        return decode_letter_notation(code, &[('R', 1e-6)]);
    }
    decode_eia(code, false).map(|uf| uf * 1e-6)
}

/// Capacitor similarity: capacitance, package, dielectric and rating
#[derive(Debug, Clone, Copy, Default)]
pub struct CapacitorCalculator;

impl SpecFamily for CapacitorCalculator {
    fn family_name(&self) -> &'static str {
        "CapacitorCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Capacitor, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, _ctx: &ScoringContext<'_>) -> SpecBag {
        let specs = decode(mpn);
        let mut bag = SpecBag::new();
        bag.insert_numeric("capacitance", specs.capacitance, SpecUnit::Farads);
        bag.insert_text("package", specs.package);
        bag.insert_text("dielectric", specs.dielectric);
        bag.insert_numeric("voltage", specs.voltage, SpecUnit::Volts);
        bag
    }

    fn low_similarity(&self) -> f64 {
        LOW_SIMILARITY
    }

    fn high_similarity(&self) -> f64 {
        HIGH_SIMILARITY
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        if mpn1 == mpn2 {
            return 1.0;
        }
        let a = decode(mpn1);
        let b = decode(mpn2);
        let mut score = 0.0;
        if let (Some(x), Some(y)) = (a.capacitance, b.capacitance) {
            if (x - y).abs() <= x.abs().max(y.abs()) * 1e-9 {
                score += LEGACY_VALUE_WEIGHT;
            }
        }
        if both_equal(a.package, b.package) {
            score += LEGACY_PACKAGE_WEIGHT;
        }
        if let (Some(x), Some(y)) = (&a.dielectric, &b.dielectric) {
            if x == y || ctx.equivalent(EquivalenceTables::DIELECTRIC, x, y) {
                score += LEGACY_DIELECTRIC_WEIGHT;
            }
        }
        score
    }
}

impl SimilarityCalculator for CapacitorCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Capacitor)
    }

    fn explain(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> SimilarityExplanation {
        evaluate(self, mpn1, mpn2, ctx)
    }
}
