//! Vishay: CRCW thick-film chip resistors and Siliconix MOSFETs.

use regex::Regex;
use std::sync::LazyLock;

use super::ManufacturerHandler;
use crate::model::ComponentType;

static CRCW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^CRCW(\d{4})").expect("static regex"));
static SILICONIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^SI(\d)(\d{3})").expect("static regex"));

/// Vishay / Vishay Siliconix handler
#[derive(Debug, Clone, Copy, Default)]
pub struct VishayHandler;

impl ManufacturerHandler for VishayHandler {
    fn name(&self) -> &'static str {
        "Vishay"
    }

    fn handles(&self, mpn: &str) -> bool {
        CRCW.is_match(mpn) || SILICONIX.is_match(mpn)
    }

    fn supported_types(&self) -> &'static [ComponentType] {
        &[ComponentType::ResistorChipVishay, ComponentType::MosfetVishay]
    }

    fn extract_series(&self, mpn: &str) -> Option<String> {
        if CRCW.is_match(mpn) {
            return Some("CRCW".to_string());
        }
        SILICONIX
            .captures(mpn)
            .map(|c| format!("SI{}{}", &c[1], &c[2]))
    }

    fn extract_package_code(&self, mpn: &str) -> Option<String> {
        if let Some(caps) = CRCW.captures(mpn) {
            return Some(caps[1].to_string());
        }
        let caps = SILICONIX.captures(mpn)?;
        let package = match &caps[1] {
            "2" => "SOT-23",
            "4" => "SO-8",
            "7" => "POWERPAK",
            _ => return None,
        };
        Some(package.to_string())
    }

    /// Same resistor with another packaging code, or a Siliconix die
    /// revision (`SI2302DS` to `SI2302CDS`).
    fn is_official_replacement(&self, original: &str, candidate: &str) -> bool {
        if original == candidate {
            return false;
        }
        if CRCW.is_match(original) && CRCW.is_match(candidate) {
            let len = original.len();
            return len == candidate.len()
                && len > 2
                && original.get(..len - 2) == candidate.get(..len - 2);
        }
        match (self.extract_series(original), self.extract_series(candidate)) {
            (Some(a), Some(b)) => a.starts_with("SI") && a == b,
            _ => false,
        }
    }
}
