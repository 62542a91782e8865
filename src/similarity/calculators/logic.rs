//! 7400/5400 series and CD4000 CMOS logic, plus the generic IC fallback.

use regex::Regex;
use std::sync::LazyLock;

use super::{handler_package, scoring_type};
use crate::model::codes::ic_package_from_suffix;
use crate::model::{ComponentType, SpecBag};
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::string_similarity::jaro_winkler;
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const HIGH_SIMILARITY: f64 = 0.9;
const LOW_SIMILARITY: f64 = 0.3;

/// `SN74HC00N`, `74HCT245`, `SN74LVC1G04DBVR`, `MC74HC595ADR2G`
static SERIES_7400: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:SN|MC|M|CD|NC|HD|TC|IDT|NLV|NL)?(74|54)([A-Z]{0,5}?)(\dG)?(\d{2,4})([A-Z0-9]*)")
        .expect("static regex")
});
/// `CD4017BE`, `HEF4017BP`, `MC14017BCP`
static SERIES_4000: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:CD|HEF|MC1|TC)4(\d{3,4})B?([A-Z]*)").expect("static regex")
});
static GENERIC_CORE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]*\d+").expect("static regex"));

#[derive(Debug, Default, PartialEq)]
struct LogicSpecs {
    function: Option<String>,
    logic_family: Option<String>,
    package: Option<&'static str>,
    temp_grade: Option<&'static str>,
}

fn decode(mpn: &str) -> LogicSpecs {
    if let Some(caps) = SERIES_4000.captures(mpn) {
        return LogicSpecs {
            function: Some(format!("4{}", &caps[1])),
            logic_family: Some("CD4000".to_string()),
            package: ic_package_from_suffix(&caps[2]),
            temp_grade: None,
        };
    }
    if let Some(caps) = SERIES_7400.captures(mpn) {
        let family = match &caps[2] {
            "" => "STD",
            f => f,
        };
        let gates = caps.get(3).map_or("", |m| m.as_str());
        return LogicSpecs {
            function: Some(format!("{gates}{}", &caps[4])),
            logic_family: Some(family.to_string()),
            package: ic_package_from_suffix(&caps[5]),
            temp_grade: Some(if &caps[1] == "54" { "MILITARY" } else { "COMMERCIAL" }),
        };
    }
    LogicSpecs::default()
}

/// Number that identifies the part across vendors: the logic function when
/// the MPN decodes, otherwise the leading letters and digits.
fn core_number(mpn: &str) -> Option<String> {
    decode(mpn)
        .function
        .or_else(|| GENERIC_CORE.find(mpn).map(|m| m.as_str().to_string()))
}

/// Logic IC similarity; different functions never match
#[derive(Debug, Clone, Copy, Default)]
pub struct LogicIcCalculator;

impl SpecFamily for LogicIcCalculator {
    fn family_name(&self) -> &'static str {
        "LogicIcCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::LogicIc, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, ctx: &ScoringContext<'_>) -> SpecBag {
        let specs = decode(mpn);
        let mut bag = SpecBag::new();
        bag.insert_text("function", specs.function);
        bag.insert_text("logic_family", specs.logic_family);
        if bag.contains("function") {
            let package = specs
                .package
                .map(str::to_string)
                .or_else(|| handler_package(mpn, ComponentType::LogicIc, ctx));
            bag.insert_text("package", package);
        }
        bag.insert_text("temp_grade", specs.temp_grade);
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["function"]
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
        match (core_number(mpn1), core_number(mpn2)) {
            (Some(a), Some(b)) if a == b => HIGH_SIMILARITY,
            _ => LOW_SIMILARITY * jaro_winkler(mpn1, mpn2),
        }
    }
}

impl SimilarityCalculator for LogicIcCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    /// Also the scorer of last resort for ICs no dedicated calculator claims
    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::LogicIc)
            || ty == ComponentType::Ic
            || ty.is_a(ComponentType::Microcontroller)
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
    fn test_decode_7400() {
        let specs = decode("SN74HC00N");
        assert_eq!(specs.function.as_deref(), Some("00"));
        assert_eq!(specs.logic_family.as_deref(), Some("HC"));
        assert_eq!(specs.package, Some("DIP"));
        assert_eq!(specs.temp_grade, Some("COMMERCIAL"));

        let single = decode("SN74LVC1G04DBVR");
        assert_eq!(single.function.as_deref(), Some("1G04"));
        assert_eq!(single.logic_family.as_deref(), Some("LVC"));
        assert_eq!(single.package, Some("SOT-23"));

        assert_eq!(decode("7400").logic_family.as_deref(), Some("STD"));
        assert_eq!(decode("SN54LS00J").temp_grade, Some("MILITARY"));
    }

    #[test]
    fn test_decode_4000() {
        let specs = decode("CD4017BE");
        assert_eq!(specs.function.as_deref(), Some("4017"));
        assert_eq!(specs.package, Some("DIP"));
        assert_eq!(decode("MC14017BCP").function.as_deref(), Some("4017"));
    }

    #[test]
    fn test_cross_vendor_same_part() {
        let s = assert_symmetric(&LogicIcCalculator, "SN74HC00N", "MC74HC00AN");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_ttl_compatible_families_match() {
        let s = assert_symmetric(&LogicIcCalculator, "SN74LS00N", "SN74HCT00N");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_incompatible_family_is_penalised() {
        let s = assert_symmetric(&LogicIcCalculator, "SN74HC00N", "SN74HCT00N");
        assert!(s > 0.6 && s < 0.8, "got {s}");
    }

    #[test]
    fn test_function_mismatch_short_circuits() {
        let e = explain(&LogicIcCalculator, "SN74HC00N", "SN74HC04N");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - LOW_SIMILARITY).abs() < 1e-12);
    }

    #[test]
    fn test_microcontroller_legacy() {
        let e = explain(&LogicIcCalculator, "ATMEGA328P-PU", "ATMEGA328P-AU");
        assert_eq!(e.path, ScorePath::Legacy);
        assert!((e.score - HIGH_SIMILARITY).abs() < 1e-12);

        let e = explain(&LogicIcCalculator, "ATMEGA328P-PU", "STM32F103C8T6");
        assert!(e.score < LOW_SIMILARITY);
    }
}
