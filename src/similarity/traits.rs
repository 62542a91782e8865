//! Trait definitions for similarity calculators.
//!
//! A calculator scores one component family. The engine picks a calculator
//! per MPN pair through the [`CalculatorChain`](super::CalculatorChain) and
//! hands it a [`ScoringContext`] with read-only access to the registries.

use serde::Serialize;
use std::fmt;

use super::equivalence::EquivalenceTables;
use super::metadata::{ComponentTypeMetadata, MetadataRegistry};
use super::profile::{SimilarityProfile, SpecImportance};
use crate::classify::TypeClassifier;
use crate::handlers::HandlerRegistry;
use crate::model::ComponentType;

/// Read-only collaborators available while scoring one pair.
#[derive(Clone, Copy)]
pub struct ScoringContext<'a> {
    pub metadata: &'a MetadataRegistry,
    pub equivalences: &'a EquivalenceTables,
    pub handlers: &'a HandlerRegistry,
    pub classifier: &'a dyn TypeClassifier,
    /// Profile used instead of each type's default, if set
    pub profile_override: Option<SimilarityProfile>,
}

impl<'a> ScoringContext<'a> {
    /// Profile to apply for the given metadata
    #[must_use]
    pub fn profile_for(&self, metadata: &ComponentTypeMetadata) -> SimilarityProfile {
        self.profile_override
            .unwrap_or_else(|| metadata.default_profile())
    }

    /// Classify through the configured oracle
    #[must_use]
    pub fn classify(&self, mpn: &str) -> Option<ComponentType> {
        self.classifier.classify(mpn)
    }

    /// Whether two values share a group in the named equivalence table
    #[must_use]
    pub fn equivalent(&self, table: &str, a: &str, b: &str) -> bool {
        self.equivalences.same_group(table, a, b)
    }
}

impl fmt::Debug for ScoringContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScoringContext")
            .field("metadata_types", &self.metadata.len())
            .field("handlers", &self.handlers.len())
            .field("profile_override", &self.profile_override)
            .finish_non_exhaustive()
    }
}

/// How a score was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum ScorePath {
    /// Null, empty or whitespace input
    EmptyInput,
    /// Metadata-driven weighted comparison
    Weighted,
    /// A critical spec differed
    ShortCircuit,
    /// Calculator-specific comparison used when no metadata applies
    Legacy,
    /// Token overlap fallback
    TokenOverlap,
    /// Edit-distance fallback
    EditDistance,
}

impl fmt::Display for ScorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::EmptyInput => "empty input",
            Self::Weighted => "weighted specs",
            Self::ShortCircuit => "critical mismatch",
            Self::Legacy => "legacy comparison",
            Self::TokenOverlap => "token overlap",
            Self::EditDistance => "edit distance",
        };
        f.write_str(label)
    }
}

/// One spec's contribution to a weighted score.
#[derive(Debug, Clone, Serialize)]
pub struct ScoreComponent {
    /// Spec name
    pub name: String,
    pub importance: Option<SpecImportance>,
    /// Effective weight under the active profile
    pub weight: f64,
    /// Tolerance rule output before weighting
    pub raw_score: f64,
    /// `raw_score * weight`
    pub weighted_score: f64,
    /// What was compared
    pub description: String,
}

/// Human-readable account of a similarity score.
#[derive(Debug, Clone, Serialize)]
#[must_use]
pub struct SimilarityExplanation {
    /// Calculator that produced the score
    pub calculator: &'static str,
    pub path: ScorePath,
    /// Final score in `[0, 1]`
    pub score: f64,
    pub profile: Option<SimilarityProfile>,
    pub reason: String,
    pub breakdown: Vec<ScoreComponent>,
    /// Specs extracted from only one side, or from neither
    pub skipped_specs: Vec<String>,
    /// Set when an equivalence table or handler raised the score
    pub boosted: bool,
}

impl SimilarityExplanation {
    pub fn new(
        calculator: &'static str,
        path: ScorePath,
        score: f64,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            calculator,
            path,
            score,
            profile: None,
            reason: reason.into(),
            breakdown: Vec::new(),
            skipped_specs: Vec::new(),
            boosted: false,
        }
    }

    #[must_use]
    pub const fn with_profile(mut self, profile: SimilarityProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    #[must_use]
    pub fn with_score_component(mut self, component: ScoreComponent) -> Self {
        self.breakdown.push(component);
        self
    }

    /// Force the score into `[0, 1]`, mapping NaN to 0.0.
    #[must_use]
    pub fn clamped(mut self) -> Self {
        self.score = clamp_score(self.score);
        self
    }

    /// One-line summary
    #[must_use]
    pub fn summary(&self) -> String {
        let boost = if self.boosted { ", boosted" } else { "" };
        format!(
            "{:.3} via {} ({}{}): {}",
            self.score, self.calculator, self.path, boost, self.reason
        )
    }

    /// Multi-line explanation with the per-spec breakdown
    #[must_use]
    pub fn detailed(&self) -> String {
        let mut lines = vec![self.summary()];
        if let Some(profile) = self.profile {
            lines.push(format!("Profile: {profile}"));
        }

        if !self.breakdown.is_empty() {
            lines.push("Score breakdown:".to_string());
            for component in &self.breakdown {
                let tier = component
                    .importance
                    .map(|i| format!(" [{i}]"))
                    .unwrap_or_default();
                lines.push(format!(
                    "  - {}{}: {:.2} x {:.2} = {:.2} ({})",
                    component.name,
                    tier,
                    component.raw_score,
                    component.weight,
                    component.weighted_score,
                    component.description
                ));
            }
        }

        if !self.skipped_specs.is_empty() {
            lines.push(format!("Not compared: {}", self.skipped_specs.join(", ")));
        }

        lines.join("\n")
    }
}

impl fmt::Display for SimilarityExplanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}

/// Clamp to `[0, 1]`; NaN becomes 0.0.
#[must_use]
pub fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// A family-specific similarity strategy.
///
/// Implementations must be symmetric in their two MPN arguments and return
/// their ceiling for identical inputs. Inputs are already trimmed and
/// upper-cased by the chain.
pub trait SimilarityCalculator: Send + Sync {
    /// Name used in logs and explanations
    fn name(&self) -> &'static str;

    /// Whether this calculator handles the given type
    fn is_applicable(&self, ty: ComponentType) -> bool;

    /// Score two MPNs in `[0, 1]`
    fn calculate_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64 {
        self.explain(mpn1, mpn2, ctx).score
    }

    /// Score two MPNs with a breakdown of how the score was reached
    fn explain(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> SimilarityExplanation;
}
