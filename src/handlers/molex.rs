//! Molex wire-to-board connectors.

use regex::Regex;
use std::sync::LazyLock;

use super::{ManufacturerHandler, MountingType};
use crate::model::ComponentType;

/// `22-23-2041` style KK numbers
static KK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(22-(?:23|27|05))-\d(\d{2})\d$").expect("static regex"));
/// `53047-0410` style numbers: series then circuits
static SERIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{5})-?(\d{2})\d{2}$").expect("static regex"));

struct MolexSeries {
    series: &'static str,
    family: &'static str,
    pitch_mm: f64,
    mounting: MountingType,
}

const SERIES_TABLE: &[MolexSeries] = &[
    MolexSeries {
        series: "22-23",
        family: "KK 254",
        pitch_mm: 2.54,
        mounting: MountingType::ThroughHole,
    },
    MolexSeries {
        series: "22-27",
        family: "KK 254",
        pitch_mm: 2.54,
        mounting: MountingType::ThroughHole,
    },
    MolexSeries {
        series: "22-05",
        family: "KK 254",
        pitch_mm: 2.54,
        mounting: MountingType::ThroughHole,
    },
    MolexSeries {
        series: "53047",
        family: "PICOBLADE",
        pitch_mm: 1.25,
        mounting: MountingType::ThroughHole,
    },
    MolexSeries {
        series: "53048",
        family: "PICOBLADE",
        pitch_mm: 1.25,
        mounting: MountingType::ThroughHole,
    },
    MolexSeries {
        series: "53261",
        family: "PICOBLADE",
        pitch_mm: 1.25,
        mounting: MountingType::SurfaceMount,
    },
    MolexSeries {
        series: "53398",
        family: "PICOBLADE",
        pitch_mm: 1.25,
        mounting: MountingType::SurfaceMount,
    },
    MolexSeries {
        series: "43650",
        family: "MICRO-FIT 3.0",
        pitch_mm: 3.0,
        mounting: MountingType::ThroughHole,
    },
    MolexSeries {
        series: "43045",
        family: "MICRO-FIT 3.0",
        pitch_mm: 3.0,
        mounting: MountingType::ThroughHole,
    },
    MolexSeries {
        series: "87758",
        family: "C-GRID III",
        pitch_mm: 2.54,
        mounting: MountingType::SurfaceMount,
    },
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MolexHandler;

impl MolexHandler {
    fn decode(mpn: &str) -> Option<(&'static MolexSeries, u32)> {
        let (series, pins) = if let Some(caps) = KK.captures(mpn) {
            (caps.get(1)?.as_str(), caps.get(2)?.as_str())
        } else {
            let caps = SERIES.captures(mpn)?;
            (caps.get(1)?.as_str(), caps.get(2)?.as_str())
        };
        let entry = SERIES_TABLE.iter().find(|s| s.series == series)?;
        let pins: u32 = pins.parse().ok()?;
        (pins > 0).then_some((entry, pins))
    }
}

impl ManufacturerHandler for MolexHandler {
    fn name(&self) -> &'static str {
        "Molex"
    }

    fn handles(&self, mpn: &str) -> bool {
        Self::decode(mpn).is_some()
    }

    fn supported_types(&self) -> &'static [ComponentType] {
        &[ComponentType::ConnectorMolex]
    }

    fn extract_series(&self, mpn: &str) -> Option<String> {
        Self::decode(mpn).map(|(s, _)| s.series.to_string())
    }

    fn pin_count(&self, mpn: &str) -> Option<u32> {
        Self::decode(mpn).map(|(_, pins)| pins)
    }

    fn pitch(&self, mpn: &str) -> Option<f64> {
        Self::decode(mpn).map(|(s, _)| s.pitch_mm)
    }

    fn mounting_type(&self, mpn: &str) -> Option<MountingType> {
        Self::decode(mpn).map(|(s, _)| s.mounting)
    }

    fn family(&self, mpn: &str) -> Option<String> {
        Self::decode(mpn).map(|(s, _)| s.family.to_string())
    }

    /// Headers of one family with the same circuit count mate with the same
    /// housing regardless of orientation.
    fn are_compatible(&self, mpn1: &str, mpn2: &str) -> bool {
        match (Self::decode(mpn1), Self::decode(mpn2)) {
            (Some((a, pa)), Some((b, pb))) => a.family == b.family && pa == pb,
            _ => false,
        }
    }
}
