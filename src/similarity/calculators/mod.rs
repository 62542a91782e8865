//! Family calculators.
//!
//! Each calculator decodes one component family's part numbers into a
//! [`SpecBag`](crate::model::SpecBag) and hands it to the shared weighted
//! scoring in [`scoring::evaluate`](super::scoring::evaluate). Constants such
//! as the high and low similarity values are local to each calculator.

mod capacitor;
mod connector;
mod default;
mod diode;
mod led;
mod levenshtein;
mod logic;
mod memory;
mod mosfet;
mod opamp;
mod passive;
mod regulator;
mod resistor;
mod sensor;
mod transistor;

pub use capacitor::CapacitorCalculator;
pub use connector::ConnectorCalculator;
pub use default::DefaultCalculator;
pub use diode::DiodeCalculator;
pub use led::LedCalculator;
pub use levenshtein::LevenshteinCalculator;
pub use logic::LogicIcCalculator;
pub use memory::MemoryCalculator;
pub use mosfet::MosfetCalculator;
pub use opamp::OpAmpCalculator;
pub use passive::PassiveCalculator;
pub use regulator::VoltageRegulatorCalculator;
pub use resistor::ResistorCalculator;
pub use sensor::SensorCalculator;
pub use transistor::TransistorCalculator;

use super::string_similarity::common_prefix_len;
use super::traits::ScoringContext;
use crate::model::ComponentType;

/// Type whose metadata scores a pair: the shared classified type when both
/// MPNs agree on one below `base`, otherwise `base` itself.
pub(crate) fn scoring_type(
    base: ComponentType,
    mpn1: &str,
    mpn2: &str,
    ctx: &ScoringContext<'_>,
) -> ComponentType {
    match (ctx.classify(mpn1), ctx.classify(mpn2)) {
        (Some(a), Some(b)) if a == b && a.is_a(base) => a,
        _ => base,
    }
}

/// Package code from the manufacturer handler owning `mpn` within `family`.
pub(crate) fn handler_package(
    mpn: &str,
    family: ComponentType,
    ctx: &ScoringContext<'_>,
) -> Option<String> {
    ctx.handlers
        .find_for(mpn, family)
        .and_then(|h| h.extract_package_code(mpn))
}

/// Three-tier fallback comparison.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tiers {
    pub high: f64,
    pub medium: f64,
    pub low: f64,
}

impl Tiers {
    /// Identical parts score 1.0, the same base part `high`, a shared
    /// series prefix `medium`, anything else `low`.
    pub(crate) fn score(&self, mpn1: &str, mpn2: &str, same_base: bool) -> f64 {
        if mpn1 == mpn2 {
            1.0
        } else if same_base {
            self.high
        } else if common_prefix_len(mpn1, mpn2) >= 3 {
            self.medium
        } else {
            self.low
        }
    }
}

/// Two optional values that are both present and equal
pub(crate) fn both_equal<T: PartialEq>(a: Option<T>, b: Option<T>) -> bool {
    matches!((a, b), (Some(x), Some(y)) if x == y)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tiers() {
        let tiers = Tiers {
            high: 0.9,
            medium: 0.7,
            low: 0.3,
        };
        assert_eq!(tiers.score("LM358", "LM358", false), 1.0);
        assert_eq!(tiers.score("LM358", "LM2904", true), 0.9);
        assert_eq!(tiers.score("LM358", "LM324", false), 0.7);
        assert_eq!(tiers.score("LM358", "TL072", false), 0.3);
    }

    #[test]
    fn test_scoring_type_uses_shared_subtype() {
        test_support::with_ctx(|ctx| {
            assert_eq!(
                scoring_type(ComponentType::Resistor, "CRCW060310K0FKEA", "CRCW080510K0FKEA", ctx),
                ComponentType::ResistorChipVishay
            );
            assert_eq!(
                scoring_type(ComponentType::Resistor, "CRCW060310K0FKEA", "RC0603FR-0710KL", ctx),
                ComponentType::Resistor
            );
        });
    }

    #[test]
    fn test_both_equal() {
        assert!(both_equal(Some(1), Some(1)));
        assert!(!both_equal(Some(1), None));
        assert!(!both_equal::<i32>(None, None));
    }
}
