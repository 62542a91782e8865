//! Serial and parallel memories: NOR flash, EEPROM and SRAM.

use regex::Regex;
use std::sync::LazyLock;

use super::{scoring_type, Tiers};
use crate::model::codes::ic_package_from_suffix;
use crate::model::{ComponentType, SpecBag, SpecUnit};
use crate::similarity::equivalence::EquivalenceTables;
use crate::similarity::scoring::{evaluate, SpecFamily};
use crate::similarity::traits::{ScoringContext, SimilarityCalculator, SimilarityExplanation};

const TIERS: Tiers = Tiers {
    high: 0.9,
    medium: 0.6,
    low: 0.2,
};

const KBIT: f64 = 1024.0;
const MBIT: f64 = 1024.0 * 1024.0;

/// Density code is Mbit: `W25Q128JVSIQ`, `S25FL064L`, `IS25LP128F`, `GD25Q64C`
static SPI_FLASH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(W25Q|S25FL|IS25[LW]P|GD25Q)(\d{2,4})([A-Z]{2}([SFWZ]))?").expect("static regex")
});
/// Macronix appends a two-digit revision to the density: `MX25L12835F`
static MACRONIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(MX25[LRUV])(\d{1,3})(\d{2})").expect("static regex"));
/// Adesto/Atmel: the last digit is a revision, `AT25SF041` is 4 Mbit
static ADESTO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(AT25[SD]F)(\d{2,3})\d").expect("static regex"));
static I2C_EEPROM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^((?:AT|CAT|BR)?24(?:LC|AA|FC|C)|M24C?)(\d{2,4})").expect("static regex")
});
static SPI_EEPROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^((?:AT)?25(?:LC|AA|C))(\d{3,4})").expect("static regex"));
static MICROWIRE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(93(?:LC|AA|C))(\d{2})").expect("static regex"));
static SPI_SRAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(23(?:LC|K|A))(\d{3,4})").expect("static regex"));
/// Cypress `CY62256`: density in Kbit
static CYPRESS_SRAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(CY62)(\d{3,4})").expect("static regex"));
/// ISSI `IS62WV51216`: depth in K words followed by word width
static ISSI_SRAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(IS6[12](?:WV|LV|C)?)(\d{3,4})(08|16)").expect("static regex"));
static PARALLEL_EEPROM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(AT28C)(\d{2,3})").expect("static regex"));

/// Microwire density by part code, in Kbit
const MICROWIRE_SIZES: &[(&str, f64)] = &[
    ("46", 1.0),
    ("56", 2.0),
    ("66", 4.0),
    ("76", 8.0),
    ("86", 16.0),
];

const WINBOND_PACKAGES: &[(&str, &str)] = &[
    ("S", "SOIC-8"),
    ("F", "SOIC-16"),
    ("W", "WSON-8"),
    ("Z", "WSON-8"),
];

/// Atmel/Microchip dash suffixes
const DASH_PACKAGES: &[(&str, &str)] = &[
    ("SSH", "SOIC"),
    ("SH", "SOIC"),
    ("PU", "DIP"),
    ("XH", "TSSOP"),
    ("MAH", "UDFN"),
];

#[derive(Debug, Clone, PartialEq)]
struct MemorySpecs {
    memory_type: &'static str,
    interface: &'static str,
    density_bits: Option<f64>,
    package: Option<&'static str>,
    /// Vendor prefix plus density code, as used by the equivalence groups
    base: String,
}

impl MemorySpecs {
    fn new(memory_type: &'static str, interface: &'static str, base: String) -> Self {
        Self {
            memory_type,
            interface,
            density_bits: None,
            package: None,
            base,
        }
    }

    fn density(mut self, bits: Option<f64>) -> Self {
        self.density_bits = bits;
        self
    }

    fn package(mut self, package: Option<&'static str>) -> Self {
        self.package = self.package.or(package);
        self
    }
}

/// Serial EEPROM and SRAM codes: three digits ending in zero are tenths of
/// the Kbit density (`640` is 64 Kbit), `1025` is the 1 Mbit I2C part.
fn serial_kbit(code: &str) -> Option<f64> {
    let value: f64 = code.parse().ok()?;
    Some(if code == "1025" {
        1024.0
    } else if code.len() == 3 && code.ends_with('0') {
        value / 10.0
    } else {
        value
    })
}

fn suffix_package(mpn: &str) -> Option<&'static str> {
    if mpn.contains('/') {
        return ic_package_from_suffix(mpn);
    }
    let (_, suffix) = mpn.split_once('-')?;
    DASH_PACKAGES
        .iter()
        .find(|(code, _)| suffix.starts_with(code))
        .map(|(_, package)| *package)
}

fn decode(mpn: &str) -> Option<MemorySpecs> {
    let package = suffix_package(mpn);

    if let Some(caps) = SPI_FLASH.captures(mpn) {
        let mbit: f64 = caps[2].parse().ok()?;
        let winbond = caps.get(4).and_then(|code| {
            WINBOND_PACKAGES
                .iter()
                .find(|(c, _)| *c == code.as_str())
                .map(|(_, p)| *p)
        });
        let winbond = winbond.filter(|_| &caps[1] == "W25Q");
        return Some(
            MemorySpecs::new("FLASH", "SPI", format!("{}{}", &caps[1], &caps[2]))
                .density(Some(mbit * MBIT))
                .package(winbond)
                .package(package),
        );
    }
    if let Some(caps) = MACRONIX.captures(mpn) {
        let mbit: f64 = caps[2].parse().ok()?;
        return Some(
            MemorySpecs::new("FLASH", "SPI", format!("{}{}", &caps[1], &caps[2]))
                .density(Some(mbit * MBIT))
                .package(package),
        );
    }
    if let Some(caps) = ADESTO.captures(mpn) {
        let mbit: f64 = caps[2].parse().ok()?;
        return Some(
            MemorySpecs::new("FLASH", "SPI", format!("{}{}", &caps[1], &caps[2]))
                .density(Some(mbit * MBIT))
                .package(package),
        );
    }
    if let Some(caps) = I2C_EEPROM.captures(mpn) {
        return Some(
            MemorySpecs::new("EEPROM", "I2C", format!("{}{}", &caps[1], &caps[2]))
                .density(serial_kbit(&caps[2]).map(|k| k * KBIT))
                .package(package),
        );
    }
    if let Some(caps) = SPI_EEPROM.captures(mpn) {
        return Some(
            MemorySpecs::new("EEPROM", "SPI", format!("{}{}", &caps[1], &caps[2]))
                .density(serial_kbit(&caps[2]).map(|k| k * KBIT))
                .package(package),
        );
    }
    if let Some(caps) = MICROWIRE.captures(mpn) {
        let kbit = MICROWIRE_SIZES
            .iter()
            .find(|(code, _)| *code == &caps[2])
            .map(|(_, k)| *k);
        return Some(
            MemorySpecs::new("EEPROM", "MICROWIRE", format!("{}{}", &caps[1], &caps[2]))
                .density(kbit.map(|k| k * KBIT))
                .package(package),
        );
    }
    if let Some(caps) = SPI_SRAM.captures(mpn) {
        return Some(
            MemorySpecs::new("SRAM", "SPI", format!("{}{}", &caps[1], &caps[2]))
                .density(serial_kbit(&caps[2]).map(|k| k * KBIT))
                .package(package),
        );
    }
    if let Some(caps) = ISSI_SRAM.captures(mpn) {
        let depth: f64 = caps[2].parse().ok()?;
        let width: f64 = caps[3].parse().ok()?;
        return Some(
            MemorySpecs::new("SRAM", "PARALLEL", format!("{}{}{}", &caps[1], &caps[2], &caps[3]))
                .density(Some(depth * width * KBIT))
                .package(package),
        );
    }
    if let Some(caps) = CYPRESS_SRAM.captures(mpn) {
        let kbit: f64 = caps[2].parse().ok()?;
        return Some(
            MemorySpecs::new("SRAM", "PARALLEL", format!("{}{}", &caps[1], &caps[2]))
                .density(Some(kbit * KBIT))
                .package(package),
        );
    }
    if let Some(caps) = PARALLEL_EEPROM.captures(mpn) {
        let kbit: f64 = caps[2].parse().ok()?;
        return Some(
            MemorySpecs::new("EEPROM", "PARALLEL", format!("{}{}", &caps[1], &caps[2]))
                .density(Some(kbit * KBIT))
                .package(package),
        );
    }

    None
}

/// Memory similarity; flash, EEPROM and SRAM never substitute for each other
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryCalculator;

impl SpecFamily for MemoryCalculator {
    fn family_name(&self) -> &'static str {
        "MemoryCalculator"
    }

    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType {
        scoring_type(ComponentType::Memory, mpn1, mpn2, ctx)
    }

    fn extract_specs(&self, mpn: &str, _ctx: &ScoringContext<'_>) -> SpecBag {
        let mut bag = SpecBag::new();
        if let Some(specs) = decode(mpn) {
            bag.insert_text("memory_type", Some(specs.memory_type));
            bag.insert_text("interface", Some(specs.interface));
            bag.insert_numeric("density", specs.density_bits, SpecUnit::Bits);
            bag.insert_text("package", specs.package);
        }
        bag
    }

    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &["memory_type"]
    }

    fn low_similarity(&self) -> f64 {
        TIERS.low
    }

    fn high_similarity(&self) -> f64 {
        TIERS.high
    }

    fn known_equivalent(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> bool {
        match (decode(mpn1), decode(mpn2)) {
            (Some(a), Some(b)) => ctx.equivalent(EquivalenceTables::MEMORY, &a.base, &b.base),
            _ => false,
        }
    }

    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        let same_base = match (decode(mpn1), decode(mpn2)) {
            (Some(a), Some(b)) => a.base == b.base,
            _ => false,
        };
        TIERS.score(mpn1, mpn2, same_base || self.known_equivalent(mpn1, mpn2, ctx))
    }
}

impl SimilarityCalculator for MemoryCalculator {
    fn name(&self) -> &'static str {
        self.family_name()
    }

    fn is_applicable(&self, ty: ComponentType) -> bool {
        ty.is_a(ComponentType::Memory)
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
    fn test_decode_flash() {
        let w = decode("W25Q128JVSIQ").unwrap();
        assert_eq!(w.memory_type, "FLASH");
        assert_eq!(w.density_bits, Some(128.0 * MBIT));
        assert_eq!(w.package, Some("SOIC-8"));
        assert_eq!(w.base, "W25Q128");

        let mx = decode("MX25L12835FM2I-10G").unwrap();
        assert_eq!(mx.density_bits, Some(128.0 * MBIT));
        assert_eq!(mx.base, "MX25L128");

        assert_eq!(decode("AT25SF041").unwrap().density_bits, Some(4.0 * MBIT));
    }

    #[test]
    fn test_decode_eeprom_and_sram() {
        let e = decode("24LC256-I/SN").unwrap();
        assert_eq!(e.interface, "I2C");
        assert_eq!(e.density_bits, Some(256.0 * KBIT));
        assert_eq!(e.package, Some("SOIC"));

        assert_eq!(decode("AT24C256C-SSHL-T").unwrap().package, Some("SOIC"));
        assert_eq!(decode("25LC640A").unwrap().density_bits, Some(64.0 * KBIT));
        assert_eq!(decode("93LC46B").unwrap().density_bits, Some(KBIT));
        assert_eq!(decode("23LC1024").unwrap().memory_type, "SRAM");
        assert_eq!(decode("IS62WV51216BLL").unwrap().density_bits, Some(8192.0 * KBIT));
    }

    #[test]
    fn test_second_source_eeprom() {
        let s = assert_symmetric(&MemoryCalculator, "24LC256-I/SN", "AT24C256C-SSHL-T");
        assert!((s - 1.0).abs() < 1e-9, "got {s}");
    }

    #[test]
    fn test_second_source_flash() {
        let s = assert_symmetric(&MemoryCalculator, "W25Q128JVSIQ", "MX25L12835FM2I-10G");
        assert!(s >= 0.9, "got {s}");
    }

    #[test]
    fn test_memory_type_mismatch_short_circuits() {
        let e = explain(&MemoryCalculator, "24LC256", "W25Q128JVSIQ");
        assert_eq!(e.path, ScorePath::ShortCircuit);
        assert!((e.score - TIERS.low).abs() < 1e-12);
    }

    #[test]
    fn test_density_mismatch() {
        let s = assert_symmetric(&MemoryCalculator, "W25Q128JVSIQ", "W25Q64JVSIQ");
        assert!(s < 0.8, "got {s}");
    }
}
