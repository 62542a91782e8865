//! Texas Instruments (including the former National Semiconductor LM line).

use regex::Regex;
use std::sync::LazyLock;

use super::ManufacturerHandler;
use crate::model::codes::ic_package_from_suffix;
use crate::model::ComponentType;

static TI_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(LMV|LM|TLV|TL|TPS|OPA|SN74|SN54|CD74|UA|INA|NE)\d").expect("static regex")
});
/// Letters and digits up to the orderable suffix: `SN74HC00` in `SN74HC00N`.
static BASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]+\d+(?:[A-Z]{1,4}\d+)*").expect("static regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct TexasInstrumentsHandler;

impl TexasInstrumentsHandler {
    /// Base part and the variant after the first dash (`-3.3`, `-ADJ`)
    fn split(mpn: &str) -> Option<(&str, &str, &str)> {
        let (main, variant) = mpn.split_once('-').unwrap_or((mpn, ""));
        let base = BASE.find(main)?.as_str();
        Some((base, &main[base.len()..], variant))
    }
}

impl ManufacturerHandler for TexasInstrumentsHandler {
    fn name(&self) -> &'static str {
        "Texas Instruments"
    }

    fn handles(&self, mpn: &str) -> bool {
        TI_PREFIX.is_match(mpn)
    }

    fn supported_types(&self) -> &'static [ComponentType] {
        &[
            ComponentType::OpAmpTi,
            ComponentType::LogicIc,
            ComponentType::VoltageRegulator,
        ]
    }

    fn extract_series(&self, mpn: &str) -> Option<String> {
        Self::split(mpn).map(|(base, _, _)| base.to_string())
    }

    fn extract_package_code(&self, mpn: &str) -> Option<String> {
        let (_, suffix, _) = Self::split(mpn)?;
        ic_package_from_suffix(suffix).map(str::to_string)
    }

    /// Same die in another package or reel: base part and electrical
    /// variant both match.
    fn is_official_replacement(&self, original: &str, candidate: &str) -> bool {
        if original == candidate {
            return false;
        }
        match (Self::split(original), Self::split(candidate)) {
            (Some((base_a, _, var_a)), Some((base_b, _, var_b))) => {
                base_a == base_b && var_a == var_b
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_is_base_part() {
        let h = TexasInstrumentsHandler;
        assert_eq!(h.extract_series("LM358DR").as_deref(), Some("LM358"));
        assert_eq!(h.extract_series("SN74HC00N").as_deref(), Some("SN74HC00"));
        assert_eq!(h.extract_series("TL072CP").as_deref(), Some("TL072"));
    }

    #[test]
    fn test_package_from_suffix() {
        let h = TexasInstrumentsHandler;
        assert_eq!(h.extract_package_code("LM358DR").as_deref(), Some("SOIC"));
        assert_eq!(h.extract_package_code("LM358N").as_deref(), Some("DIP"));
        assert_eq!(h.extract_package_code("SN74LVC1G04DBVR").as_deref(), Some("SOT-23"));
    }

    #[test]
    fn test_replacement_requires_same_variant() {
        let h = TexasInstrumentsHandler;
        assert!(h.is_official_replacement("LM358DR", "LM358N"));
        assert!(!h.is_official_replacement("SN74HC00N", "SN74HC04N"));
        assert!(!h.is_official_replacement("LM1117MPX-3.3", "LM1117MPX-5.0"));
        assert!(h.is_official_replacement("LM1117MPX-3.3", "LM1117DT-3.3"));
    }
}
