//! JST wire-to-board headers (`B4B-XH-A`, `SM04B-SRSS-TB`, ...).

use regex::Regex;
use std::sync::LazyLock;

use super::{ManufacturerHandler, MountingType};
use crate::model::ComponentType;

static JST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(BM|SM|B|S)(\d{1,2})B-([A-Z]+)").expect("static regex"));

/// Series code after the dash to (family, pitch in mm).
const SERIES: &[(&str, &str, f64)] = &[
    ("XH", "XH", 2.50),
    ("XA", "XA", 2.50),
    ("EH", "EH", 2.50),
    ("PH", "PH", 2.00),
    ("PA", "PA", 2.00),
    ("ZR", "ZH", 1.50),
    ("GHS", "GH", 1.25),
    ("SRSS", "SH", 1.00),
    ("SUR", "SUR", 0.80),
    ("VH", "VH", 3.96),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct JstHandler;

struct JstPart {
    family: &'static str,
    pitch: f64,
    pins: u32,
    mounting: MountingType,
}

impl JstHandler {
    fn decode(mpn: &str) -> Option<JstPart> {
        let caps = JST.captures(mpn)?;
        let code = caps.get(3)?.as_str();
        let (_, family, pitch) = SERIES
            .iter()
            .filter(|(prefix, _, _)| code.starts_with(prefix))
            .max_by_key(|(prefix, _, _)| prefix.len())?;
        let mounting = match caps.get(1)?.as_str() {
            "BM" | "SM" => MountingType::SurfaceMount,
            _ => MountingType::ThroughHole,
        };
        Some(JstPart {
            family,
            pitch: *pitch,
            pins: caps.get(2)?.as_str().parse().ok()?,
            mounting,
        })
    }
}

impl ManufacturerHandler for JstHandler {
    fn name(&self) -> &'static str {
        "JST"
    }

    fn handles(&self, mpn: &str) -> bool {
        Self::decode(mpn).is_some()
    }

    fn supported_types(&self) -> &'static [ComponentType] {
        &[ComponentType::ConnectorJst]
    }

    fn extract_series(&self, mpn: &str) -> Option<String> {
        self.family(mpn)
    }

    fn pin_count(&self, mpn: &str) -> Option<u32> {
        Self::decode(mpn).map(|p| p.pins)
    }

    fn pitch(&self, mpn: &str) -> Option<f64> {
        Self::decode(mpn).map(|p| p.pitch)
    }

    fn mounting_type(&self, mpn: &str) -> Option<MountingType> {
        Self::decode(mpn).map(|p| p.mounting)
    }

    fn family(&self, mpn: &str) -> Option<String> {
        Self::decode(mpn).map(|p| p.family.to_string())
    }

    /// Top and side entry headers of one series mate with the same housing.
    fn are_compatible(&self, mpn1: &str, mpn2: &str) -> bool {
        match (Self::decode(mpn1), Self::decode(mpn2)) {
            (Some(a), Some(b)) => a.family == b.family && a.pins == b.pins,
            _ => false,
        }
    }
}
