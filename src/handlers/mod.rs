//! Manufacturer-specific part number knowledge.
//!
//! A handler knows one vendor's numbering scheme well enough to pull out the
//! series, package and (for connectors) the mechanical properties, and to
//! say when one part is the vendor's own replacement for another. Every
//! method has a conservative default so a handler only implements what its
//! vendor actually encodes.

mod infineon;
mod jst;
mod molex;
mod murata;
mod texas_instruments;
mod vishay;

pub use infineon::InfineonHandler;
pub use jst::JstHandler;
pub use molex::MolexHandler;
pub use murata::{murata_size, MurataHandler};
pub use texas_instruments::TexasInstrumentsHandler;
pub use vishay::VishayHandler;

use serde::Serialize;
use std::fmt;

use crate::model::ComponentType;

/// How a connector attaches to the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MountingType {
    ThroughHole,
    SurfaceMount,
}

impl MountingType {
    /// Short code used as a spec value
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ThroughHole => "THT",
            Self::SurfaceMount => "SMT",
        }
    }
}

impl fmt::Display for MountingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Vendor-specific MPN decoding.
///
/// MPNs passed in are trimmed and upper-cased.
pub trait ManufacturerHandler: Send + Sync {
    /// Vendor name
    fn name(&self) -> &'static str;

    /// Whether this handler recognises the MPN
    fn handles(&self, mpn: &str) -> bool;

    /// Component types this vendor's numbering covers
    fn supported_types(&self) -> &'static [ComponentType] {
        &[]
    }

    /// Whether the numbering covers `family`: a supported type sits above or
    /// below it in the taxonomy. An empty type list covers everything.
    fn covers(&self, family: ComponentType) -> bool {
        let types = self.supported_types();
        types.is_empty() || types.iter().any(|t| t.is_a(family) || family.is_a(*t))
    }

    fn extract_series(&self, _mpn: &str) -> Option<String> {
        None
    }

    fn extract_package_code(&self, _mpn: &str) -> Option<String> {
        None
    }

    /// Whether the vendor documents `candidate` as a drop-in for `original`
    fn is_official_replacement(&self, _original: &str, _candidate: &str) -> bool {
        false
    }

    fn pin_count(&self, _mpn: &str) -> Option<u32> {
        None
    }

    /// Contact pitch in millimetres
    fn pitch(&self, _mpn: &str) -> Option<f64> {
        None
    }

    fn mounting_type(&self, _mpn: &str) -> Option<MountingType> {
        None
    }

    /// Product family (connector series, capacitor line)
    fn family(&self, _mpn: &str) -> Option<String> {
        None
    }

    /// Whether two parts of this vendor mate with the same counterpart
    fn are_compatible(&self, _mpn1: &str, _mpn2: &str) -> bool {
        false
    }
}

/// Ordered collection of handlers; the first that handles an MPN owns it.
pub struct HandlerRegistry {
    handlers: Vec<Box<dyn ManufacturerHandler>>,
}

impl HandlerRegistry {
    /// Registry with every built-in handler
    #[must_use]
    pub fn builtin() -> Self {
        Self::empty()
            .with_handler(Box::new(VishayHandler))
            .with_handler(Box::new(MurataHandler))
            .with_handler(Box::new(InfineonHandler))
            .with_handler(Box::new(TexasInstrumentsHandler))
            .with_handler(Box::new(MolexHandler))
            .with_handler(Box::new(JstHandler))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Append a handler
    #[must_use]
    pub fn with_handler(mut self, handler: Box<dyn ManufacturerHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    /// Handler owning `mpn`, if any
    #[must_use]
    pub fn find(&self, mpn: &str) -> Option<&dyn ManufacturerHandler> {
        self.handlers
            .iter()
            .find(|h| h.handles(mpn))
            .map(|h| &**h)
    }

    /// First handler owning `mpn` whose numbering covers `family`
    #[must_use]
    pub fn find_for(&self, mpn: &str, family: ComponentType) -> Option<&dyn ManufacturerHandler> {
        self.handlers
            .iter()
            .find(|h| h.covers(family) && h.handles(mpn))
            .map(|h| &**h)
    }

    /// First handler that recognises both MPNs; argument order does not matter
    #[must_use]
    pub fn find_common(&self, mpn1: &str, mpn2: &str) -> Option<&dyn ManufacturerHandler> {
        self.handlers
            .iter()
            .find(|h| h.handles(mpn1) && h.handles(mpn2))
            .map(|h| &**h)
    }

    /// Whether the owning vendor lists either part as the other's replacement
    #[must_use]
    pub fn is_official_replacement(&self, mpn1: &str, mpn2: &str) -> bool {
        self.find_common(mpn1, mpn2).is_some_and(|h| {
            h.is_official_replacement(mpn1, mpn2) || h.is_official_replacement(mpn2, mpn1)
        })
    }

    /// Whether the owning vendor declares the two parts compatible
    #[must_use]
    pub fn are_compatible(&self, mpn1: &str, mpn2: &str) -> bool {
        self.find_common(mpn1, mpn2)
            .is_some_and(|h| h.are_compatible(mpn1, mpn2))
    }

    /// Handler names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.handlers.iter().map(|h| h.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for HandlerRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.names())
            .finish()
    }
}

/// MPN with trailing lead-free and packaging markers removed.
pub(crate) fn strip_ordering_suffix(mpn: &str) -> &str {
    let mut base = mpn.split(['#', '+']).next().unwrap_or(mpn);
    for marker in ["PBF", "-TR", "TR", "-T", "/TR"] {
        if let Some(stripped) = base.strip_suffix(marker) {
            base = stripped;
        }
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registration_order() {
        let registry = HandlerRegistry::builtin();
        assert_eq!(
            registry.names(),
            vec!["Vishay", "Murata", "Infineon", "Texas Instruments", "Molex", "JST"]
        );
    }

    #[test]
    fn test_find_handler() {
        let registry = HandlerRegistry::builtin();
        assert_eq!(registry.find("CRCW060310K0FKEA").map(|h| h.name()), Some("Vishay"));
        assert_eq!(registry.find("IRF540N").map(|h| h.name()), Some("Infineon"));
        assert_eq!(registry.find("B4B-XH-A").map(|h| h.name()), Some("JST"));
        assert!(registry.find("XYZZY").is_none());
    }

    #[test]
    fn test_find_for_respects_supported_types() {
        let registry = HandlerRegistry::builtin();
        assert_eq!(
            registry.find_for("IRF540N", ComponentType::Mosfet).map(|h| h.name()),
            Some("Infineon")
        );
        assert_eq!(
            registry.find_for("LM358DR", ComponentType::OpAmp).map(|h| h.name()),
            Some("Texas Instruments")
        );
        assert!(registry.find_for("IRF540N", ComponentType::Connector).is_none());
        assert!(registry.find_for("LM358DR", ComponentType::Mosfet).is_none());
    }

    /// Claims every MPN starting with `IRF`, overlapping the Infineon handler
    struct CatchAll;

    impl ManufacturerHandler for CatchAll {
        fn name(&self) -> &'static str {
            "CatchAll"
        }

        fn handles(&self, mpn: &str) -> bool {
            mpn.starts_with("IRF") || mpn.starts_with("XQ")
        }
    }

    #[test]
    fn test_find_common_is_order_independent() {
        let registry = HandlerRegistry::builtin().with_handler(Box::new(CatchAll));
        let forward = registry.find_common("IRF540N", "XQ100").map(|h| h.name());
        let backward = registry.find_common("XQ100", "IRF540N").map(|h| h.name());
        assert_eq!(forward, Some("CatchAll"));
        assert_eq!(forward, backward);
        assert!(CatchAll.covers(ComponentType::Resistor));
    }

    #[test]
    fn test_official_replacement_is_checked_both_ways() {
        let registry = HandlerRegistry::builtin();
        assert!(registry.is_official_replacement("IRF540", "IRF540N"));
        assert!(registry.is_official_replacement("IRF540N", "IRF540"));
        assert!(!registry.is_official_replacement("IRF540", "CRCW060310K0FKEA"));
    }

    #[test]
    fn test_strip_ordering_suffix() {
        assert_eq!(strip_ordering_suffix("IRF540NPBF"), "IRF540N");
        assert_eq!(strip_ordering_suffix("DS18B20+"), "DS18B20");
        assert_eq!(strip_ordering_suffix("LM358"), "LM358");
    }

    #[test]
    fn test_empty_registry() {
        let registry = HandlerRegistry::empty();
        assert!(registry.is_empty());
        assert!(!registry.are_compatible("B4B-XH-A", "S4B-XH-A"));
    }
}
