//! Calculator selection and the generic fallback chain.

use tracing::debug;

use super::calculators::{
    CapacitorCalculator, ConnectorCalculator, DefaultCalculator, DiodeCalculator, LedCalculator,
    LevenshteinCalculator, LogicIcCalculator, MemoryCalculator, MosfetCalculator,
    OpAmpCalculator, PassiveCalculator, ResistorCalculator, SensorCalculator,
    TransistorCalculator, VoltageRegulatorCalculator,
};
use super::traits::{ScorePath, ScoringContext, SimilarityCalculator, SimilarityExplanation};
use crate::model::ComponentType;

/// Builder for a [`CalculatorChain`].
#[must_use]
pub struct CalculatorChainBuilder {
    calculators: Vec<Box<dyn SimilarityCalculator>>,
}

impl CalculatorChainBuilder {
    pub fn new() -> Self {
        Self {
            calculators: Vec::new(),
        }
    }

    /// Append a calculator; earlier calculators win ties.
    pub fn with_calculator(mut self, calculator: Box<dyn SimilarityCalculator>) -> Self {
        self.calculators.push(calculator);
        self
    }

    pub fn build(self) -> CalculatorChain {
        CalculatorChain {
            calculators: self.calculators,
        }
    }
}

impl Default for CalculatorChainBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Ordered family calculators with the token-overlap and edit-distance
/// fallbacks behind them.
///
/// Order matters: the first calculator applicable to a pair scores it, so
/// narrower families come before the broad ones (`Led` before `Diode`,
/// `Mosfet` before `Transistor`, `Passive` last).
pub struct CalculatorChain {
    calculators: Vec<Box<dyn SimilarityCalculator>>,
}

impl CalculatorChain {
    pub fn builder() -> CalculatorChainBuilder {
        CalculatorChainBuilder::new()
    }

    /// The built-in family calculators in registration order
    #[must_use]
    pub fn builtin() -> Self {
        Self::builder()
            .with_calculator(Box::new(ResistorCalculator))
            .with_calculator(Box::new(CapacitorCalculator))
            .with_calculator(Box::new(LedCalculator))
            .with_calculator(Box::new(DiodeCalculator))
            .with_calculator(Box::new(MosfetCalculator))
            .with_calculator(Box::new(TransistorCalculator))
            .with_calculator(Box::new(OpAmpCalculator))
            .with_calculator(Box::new(VoltageRegulatorCalculator))
            .with_calculator(Box::new(MemoryCalculator))
            .with_calculator(Box::new(SensorCalculator))
            .with_calculator(Box::new(ConnectorCalculator))
            .with_calculator(Box::new(LogicIcCalculator))
            .with_calculator(Box::new(PassiveCalculator))
            .build()
    }

    /// Calculator for a pair of classifications.
    ///
    /// With both types known the calculator must handle both; with one
    /// known it must handle that one.
    #[must_use]
    pub fn select(
        &self,
        ty1: Option<ComponentType>,
        ty2: Option<ComponentType>,
    ) -> Option<&dyn SimilarityCalculator> {
        let applies = |calc: &&Box<dyn SimilarityCalculator>| match (ty1, ty2) {
            (Some(a), Some(b)) => calc.is_applicable(a) && calc.is_applicable(b),
            (Some(t), None) | (None, Some(t)) => calc.is_applicable(t),
            (None, None) => false,
        };
        self.calculators.iter().find(applies).map(Box::as_ref)
    }

    /// Score two raw MPNs, running the null guard and normalization first.
    pub fn explain(
        &self,
        mpn1: Option<&str>,
        mpn2: Option<&str>,
        ctx: &ScoringContext<'_>,
    ) -> SimilarityExplanation {
        let (Some(a), Some(b)) = (normalize(mpn1), normalize(mpn2)) else {
            return SimilarityExplanation::new(
                "CalculatorChain",
                ScorePath::EmptyInput,
                0.0,
                "missing or blank part number",
            );
        };

        let ty1 = ctx.classify(&a);
        let ty2 = ctx.classify(&b);

        if let Some(calc) = self.select(ty1, ty2) {
            debug!(
                "{a} ({}) vs {b} ({}): using {}",
                type_label(ty1),
                type_label(ty2),
                calc.name()
            );
            return calc.explain(&a, &b, ctx).clamped();
        }

        debug!(
            "{a} ({}) vs {b} ({}): no family calculator applies",
            type_label(ty1),
            type_label(ty2)
        );
        DefaultCalculator
            .try_explain(&a, &b)
            .unwrap_or_else(|| LevenshteinCalculator.explain(&a, &b, ctx))
            .clamped()
    }

    /// Calculator names in registration order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.calculators.iter().map(|c| c.name()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.calculators.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calculators.is_empty()
    }
}

impl Default for CalculatorChain {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for CalculatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorChain")
            .field("calculators", &self.names())
            .finish()
    }
}

/// Trimmed, upper-cased MPN; `None` when absent or blank.
fn normalize(mpn: Option<&str>) -> Option<String> {
    let trimmed = mpn?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_ascii_uppercase())
}

fn type_label(ty: Option<ComponentType>) -> &'static str {
    ty.map_or("unclassified", |t| t.name())
}
