//! Infineon, including the International Rectifier HEXFET line.

use regex::Regex;
use std::sync::LazyLock;

use super::{strip_ordering_suffix, ManufacturerHandler};
use crate::model::codes::alpha_prefix;
use crate::model::ComponentType;

static INFINEON: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(IRF|IRL|BSC|BSZ|IP[PDBAW]\d{2})").expect("static regex")
});
static HEXFET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(IR[FL][RUZ]?)(\d+)(N?)([SL]?)").expect("static regex"));

#[derive(Debug, Clone, Copy, Default)]
pub struct InfineonHandler;

impl ManufacturerHandler for InfineonHandler {
    fn name(&self) -> &'static str {
        "Infineon"
    }

    fn handles(&self, mpn: &str) -> bool {
        INFINEON.is_match(mpn)
    }

    fn supported_types(&self) -> &'static [ComponentType] {
        &[ComponentType::MosfetInfineon]
    }

    fn extract_series(&self, mpn: &str) -> Option<String> {
        if let Some(caps) = HEXFET.captures(mpn) {
            return Some(caps[1].to_string());
        }
        let prefix = alpha_prefix(mpn);
        (!prefix.is_empty()).then(|| prefix.to_string())
    }

    fn extract_package_code(&self, mpn: &str) -> Option<String> {
        let base = strip_ordering_suffix(mpn);
        if let Some(caps) = HEXFET.captures(base) {
            let package = match (&caps[1], &caps[4]) {
                ("IRFR" | "IRLR", _) => "DPAK",
                ("IRFU" | "IRLU", _) => "IPAK",
                (_, "S") => "D2PAK",
                (_, "L") => "TO-262",
                _ => "TO-220",
            };
            return Some(package.to_string());
        }
        let package = match base.get(..3)? {
            "BSC" => "TDSON-8",
            "BSZ" => "TSDSON-8",
            "IPP" => "TO-220",
            "IPD" => "DPAK",
            "IPB" => "D2PAK",
            "IPW" => "TO-247",
            "IPA" => "TO-220FP",
            _ => return None,
        };
        Some(package.to_string())
    }

    /// Lead-free (`PBF`) versions and the `N` generation replace the
    /// original HEXFET.
    fn is_official_replacement(&self, original: &str, candidate: &str) -> bool {
        if original == candidate || !self.handles(original) || !self.handles(candidate) {
            return false;
        }
        let a = strip_ordering_suffix(original);
        let b = strip_ordering_suffix(candidate);
        if a == b {
            return true;
        }
        match (HEXFET.captures(a), HEXFET.captures(b)) {
            (Some(ca), Some(cb)) => {
                ca[1] == cb[1] && ca[2] == cb[2] && ca[4] == cb[4] && ca[3].is_empty() && &cb[3] == "N"
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexfet_packages() {
        let h = InfineonHandler;
        assert_eq!(h.extract_package_code("IRF540N").as_deref(), Some("TO-220"));
        assert_eq!(h.extract_package_code("IRF540NSPBF").as_deref(), Some("D2PAK"));
        assert_eq!(h.extract_package_code("IRFR024N").as_deref(), Some("DPAK"));
        assert_eq!(h.extract_package_code("BSC010N04LS").as_deref(), Some("TDSON-8"));
    }

    #[test]
    fn test_n_generation_replaces_original() {
        let h = InfineonHandler;
        assert!(h.is_official_replacement("IRF540", "IRF540N"));
        assert!(h.is_official_replacement("IRFZ44", "IRFZ44NPBF"));
        assert!(!h.is_official_replacement("IRF540N", "IRF540"));
        assert!(!h.is_official_replacement("IRF540", "IRF530N"));
    }

    #[test]
    fn test_lead_free_variant() {
        let h = InfineonHandler;
        assert!(h.is_official_replacement("IRF530N", "IRF530NPBF"));
        assert_eq!(h.extract_series("IRFZ44N").as_deref(), Some("IRFZ"));
    }
}
