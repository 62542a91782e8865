//! Similarity scoring between manufacturer part numbers.
//!
//! [`SimilarityEngine`] owns every registry the scoring needs: the type
//! classifier, manufacturer handlers, equivalence tables, component-type
//! metadata and the ordered [`CalculatorChain`]. All of them are built up
//! front and never change afterwards, so one engine can be shared freely
//! between threads.
//!
//! ```
//! use mpn_match::similarity::SimilarityEngine;
//!
//! let engine = SimilarityEngine::new();
//! let score = engine.calculate_similarity("CRCW060310K0FKEA", "CRCW080510K0FKEA");
//! assert!((score - 0.67).abs() < 0.02);
//! ```

pub mod calculators;
mod dispatch;
mod equivalence;
mod metadata;
mod profile;
pub mod scoring;
pub mod string_similarity;
mod tolerance;
mod traits;

pub use calculators::{
    CapacitorCalculator, ConnectorCalculator, DefaultCalculator, DiodeCalculator, LedCalculator,
    LevenshteinCalculator, LogicIcCalculator, MemoryCalculator, MosfetCalculator,
    OpAmpCalculator, PassiveCalculator, ResistorCalculator, SensorCalculator,
    TransistorCalculator, VoltageRegulatorCalculator,
};
pub use dispatch::{CalculatorChain, CalculatorChainBuilder};
pub use equivalence::{EquivalenceGroupEntry, EquivalenceTable, EquivalenceTables};
pub use metadata::{
    ComponentTypeMetadata, ComponentTypeMetadataBuilder, MetadataRegistry,
    MetadataRegistryBuilder, SpecConfig,
};
pub use profile::{SimilarityProfile, SpecImportance};
pub use tolerance::{ToleranceRule, DEFAULT_NUMERIC_CUTOFF};
pub use traits::{
    clamp_score, ScoreComponent, ScorePath, ScoringContext, SimilarityCalculator,
    SimilarityExplanation,
};

use rayon::prelude::*;
use serde::Serialize;
use std::str::FromStr;
use std::sync::OnceLock;
use tracing::info;

use crate::classify::{PatternClassifier, TypeClassifier};
use crate::config::AppConfig;
use crate::error::{MetadataErrorKind, MpnMatchError, Result};
use crate::handlers::HandlerRegistry;
use crate::model::ComponentType;

/// One scored candidate from [`SimilarityEngine::rank_candidates`].
#[derive(Debug, Clone, Serialize)]
pub struct RankedCandidate {
    /// Candidate MPN as given
    pub mpn: String,
    pub score: f64,
    /// Calculator that produced the score
    pub calculator: &'static str,
}

/// Scores part-number pairs against immutable, injected registries.
pub struct SimilarityEngine {
    classifier: Box<dyn TypeClassifier>,
    handlers: HandlerRegistry,
    equivalences: EquivalenceTables,
    metadata: MetadataRegistry,
    chain: CalculatorChain,
    profile_override: Option<SimilarityProfile>,
}

impl SimilarityEngine {
    /// Engine with every built-in registry.
    #[must_use]
    pub fn new() -> Self {
        Self::builder()
            .build()
            .expect("built-in equivalence tables cover the built-in metadata")
    }

    pub fn builder() -> SimilarityEngineBuilder {
        SimilarityEngineBuilder::default()
    }

    /// Build an engine from configuration.
    ///
    /// Fails on the first invalid entry; use
    /// [`Validatable`](crate::config::Validatable) first to report all of
    /// them.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let profile = config
            .scoring
            .profile
            .as_deref()
            .map(|p| parse_profile(p, "scoring.profile"))
            .transpose()?;

        let mut equivalences = EquivalenceTables::builtin();
        for entry in &config.equivalences {
            equivalences.extend_with(entry)?;
        }

        let mut metadata = MetadataRegistryBuilder::with_builtin(&equivalences)?;
        if let Some(cutoff) = config.scoring.numeric_cutoff {
            // Validates the range before touching the registry
            ToleranceRule::numeric_with_cutoff(cutoff)?;
            metadata = metadata.with_numeric_cutoff(cutoff);
        }
        for entry in &config.metadata {
            let ty = parse_component_type(&entry.component_type)?;
            if let Some(ref p) = entry.default_profile {
                metadata = metadata.override_default_profile(ty, parse_profile(p, ty.name())?);
            }
            for spec in &entry.specs {
                let context = format!("{ty}.{}", spec.name);
                let importance = SpecImportance::from_str(&spec.importance)
                    .map_err(|kind| MpnMatchError::metadata(context.as_str(), kind))?;
                let rule = ToleranceRule::parse(&spec.rule, &equivalences)?;
                metadata = metadata.override_spec(ty, SpecConfig::new(&spec.name, importance, rule));
            }
        }

        let mut classifier = PatternClassifier::new();
        for entry in &config.classifier.patterns {
            let ty = parse_component_type(&entry.component_type)?;
            classifier = classifier.with_pattern(&entry.pattern, ty)?;
        }

        let mut builder = Self::builder()
            .classifier(Box::new(classifier))
            .metadata(metadata.build())
            .equivalences(equivalences);
        if let Some(profile) = profile {
            builder = builder.profile(profile);
        }
        builder.build()
    }

    /// Context handed to calculators
    #[must_use]
    pub fn context(&self) -> ScoringContext<'_> {
        ScoringContext {
            metadata: &self.metadata,
            equivalences: &self.equivalences,
            handlers: &self.handlers,
            classifier: self.classifier.as_ref(),
            profile_override: self.profile_override,
        }
    }

    /// Similarity in `[0, 1]`; blank input scores 0.0.
    #[must_use]
    pub fn calculate_similarity(&self, mpn1: &str, mpn2: &str) -> f64 {
        self.explain(mpn1, mpn2).score
    }

    /// Similarity of possibly missing MPNs; a missing side scores 0.0.
    #[must_use]
    pub fn calculate_similarity_opt(&self, mpn1: Option<&str>, mpn2: Option<&str>) -> f64 {
        self.explain_opt(mpn1, mpn2).score
    }

    pub fn explain(&self, mpn1: &str, mpn2: &str) -> SimilarityExplanation {
        self.explain_opt(Some(mpn1), Some(mpn2))
    }

    pub fn explain_opt(&self, mpn1: Option<&str>, mpn2: Option<&str>) -> SimilarityExplanation {
        self.chain.explain(mpn1, mpn2, &self.context())
    }

    /// Classify one MPN after trimming and upper-casing it
    #[must_use]
    pub fn classify(&self, mpn: &str) -> Option<ComponentType> {
        let normalized = mpn.trim().to_ascii_uppercase();
        if normalized.is_empty() {
            return None;
        }
        self.classifier.classify(&normalized)
    }

    /// Score every candidate against `mpn`, best first.
    ///
    /// Candidates are scored in parallel; equal scores keep their input
    /// order.
    #[must_use]
    pub fn rank_candidates<S>(&self, mpn: &str, candidates: &[S]) -> Vec<RankedCandidate>
    where
        S: AsRef<str> + Sync,
    {
        let mut ranked: Vec<RankedCandidate> = candidates
            .par_iter()
            .map(|candidate| {
                let e = self.explain(mpn, candidate.as_ref());
                RankedCandidate {
                    mpn: candidate.as_ref().to_string(),
                    score: e.score,
                    calculator: e.calculator,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Whether the pair reaches the minimum score of the profile it was
    /// scored under.
    #[must_use]
    pub fn is_acceptable(&self, mpn1: &str, mpn2: &str) -> bool {
        let e = self.explain(mpn1, mpn2);
        e.profile
            .or(self.profile_override)
            .unwrap_or_default()
            .accepts(e.score)
    }

    #[must_use]
    pub const fn profile_override(&self) -> Option<SimilarityProfile> {
        self.profile_override
    }

    #[must_use]
    pub const fn chain(&self) -> &CalculatorChain {
        &self.chain
    }

    #[must_use]
    pub const fn metadata(&self) -> &MetadataRegistry {
        &self.metadata
    }

    #[must_use]
    pub const fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    #[must_use]
    pub const fn equivalences(&self) -> &EquivalenceTables {
        &self.equivalences
    }
}

impl Default for SimilarityEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SimilarityEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimilarityEngine")
            .field("classifier", &self.classifier.name())
            .field("handlers", &self.handlers)
            .field("metadata_types", &self.metadata.len())
            .field("chain", &self.chain)
            .field("profile_override", &self.profile_override)
            .finish_non_exhaustive()
    }
}

/// Builder for [`SimilarityEngine`]; unset parts use the built-ins.
#[derive(Default)]
#[must_use]
pub struct SimilarityEngineBuilder {
    classifier: Option<Box<dyn TypeClassifier>>,
    handlers: Option<HandlerRegistry>,
    equivalences: Option<EquivalenceTables>,
    metadata: Option<MetadataRegistry>,
    chain: Option<CalculatorChain>,
    profile_override: Option<SimilarityProfile>,
}

impl SimilarityEngineBuilder {
    pub fn classifier(mut self, classifier: Box<dyn TypeClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    pub fn handlers(mut self, handlers: HandlerRegistry) -> Self {
        self.handlers = Some(handlers);
        self
    }

    pub fn equivalences(mut self, tables: EquivalenceTables) -> Self {
        self.equivalences = Some(tables);
        self
    }

    /// Metadata registry; defaults to the built-in one over the configured
    /// equivalence tables.
    pub fn metadata(mut self, metadata: MetadataRegistry) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn chain(mut self, chain: CalculatorChain) -> Self {
        self.chain = Some(chain);
        self
    }

    /// Use `profile` for every type instead of its default.
    pub const fn profile(mut self, profile: SimilarityProfile) -> Self {
        self.profile_override = Some(profile);
        self
    }

    /// Fails when no metadata was given and the equivalence tables lack one
    /// the built-in metadata refers to.
    pub fn build(self) -> Result<SimilarityEngine> {
        let equivalences = self.equivalences.unwrap_or_else(EquivalenceTables::builtin);
        let metadata = match self.metadata {
            Some(metadata) => metadata,
            None => MetadataRegistry::builtin(&equivalences)?,
        };
        let engine = SimilarityEngine {
            classifier: self
                .classifier
                .unwrap_or_else(|| Box::new(PatternClassifier::new())),
            handlers: self.handlers.unwrap_or_else(HandlerRegistry::builtin),
            equivalences,
            metadata,
            chain: self.chain.unwrap_or_else(CalculatorChain::builtin),
            profile_override: self.profile_override,
        };
        info!(
            "Similarity engine ready: {} calculators, {} metadata types, {} handlers",
            engine.chain.len(),
            engine.metadata.len(),
            engine.handlers.len()
        );
        Ok(engine)
    }
}

fn parse_profile(value: &str, context: &str) -> Result<SimilarityProfile> {
    SimilarityProfile::from_str(value).map_err(|kind| MpnMatchError::metadata(context, kind))
}

fn parse_component_type(value: &str) -> Result<ComponentType> {
    ComponentType::from_str(value).map_err(|_| {
        MpnMatchError::metadata(
            "applying configuration",
            MetadataErrorKind::UnknownComponentType(value.to_string()),
        )
    })
}

static DEFAULT_ENGINE: OnceLock<SimilarityEngine> = OnceLock::new();

/// Process-wide engine with the built-in registries, created on first use.
pub fn default_engine() -> &'static SimilarityEngine {
    DEFAULT_ENGINE.get_or_init(SimilarityEngine::new)
}

/// Similarity of two MPNs using [`default_engine`].
#[must_use]
pub fn calculate_similarity(mpn1: &str, mpn2: &str) -> f64 {
    default_engine().calculate_similarity(mpn1, mpn2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MetadataOverride, SpecOverride};

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SimilarityEngine>();
    }

    #[test]
    fn test_classify_normalizes() {
        let engine = SimilarityEngine::new();
        assert_eq!(
            engine.classify(" crcw060310k0fkea "),
            Some(ComponentType::ResistorChipVishay)
        );
        assert_eq!(engine.classify("   "), None);
    }

    #[test]
    fn test_rank_candidates_orders_by_score() {
        let engine = SimilarityEngine::new();
        let ranked = engine.rank_candidates(
            "CRCW060310K0FKEA",
            &["CRCW0603100RFKEA", "CRCW060310K0FKEA", "CRCW080510K0FKEA"],
        );
        let order: Vec<&str> = ranked.iter().map(|r| r.mpn.as_str()).collect();
        assert_eq!(
            order,
            vec!["CRCW060310K0FKEA", "CRCW080510K0FKEA", "CRCW0603100RFKEA"]
        );
        assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_rank_candidates_stable_ties() {
        let engine = SimilarityEngine::new();
        let ranked = engine.rank_candidates("ZZZ", &["", "  ", "\t"]);
        let order: Vec<&str> = ranked.iter().map(|r| r.mpn.as_str()).collect();
        assert_eq!(order, vec!["", "  ", "\t"]);
    }

    #[test]
    fn test_is_acceptable_uses_profile_minimum() {
        let engine = SimilarityEngine::new();
        assert!(engine.is_acceptable("CRCW060310K0FKEA", "CRCW060310K0FKEA"));
        assert!(!engine.is_acceptable("CRCW0603100RFKEA", "CRCW060310K0FKEA"));
    }

    #[test]
    fn test_profile_override_changes_weighting() {
        let replacement = SimilarityEngine::new();
        let design = SimilarityEngine::builder()
            .profile(SimilarityProfile::DesignPhase)
            .build()
            .unwrap();
        let a = replacement.calculate_similarity("CRCW060310K0FKEA", "CRCW080510K0FKEA");
        let b = design.calculate_similarity("CRCW060310K0FKEA", "CRCW080510K0FKEA");
        // Package mismatch weighs more when HIGH specs carry full weight
        assert!(b < a, "{b} >= {a}");
    }

    #[test]
    fn test_from_config_applies_equivalences() {
        let engine = SimilarityEngine::new();
        let before = engine.calculate_similarity("LM358N", "LM324N");

        let config = AppConfig::builder()
            .equivalence_group("opamp", &["LM358", "LM324"])
            .build();
        let engine = SimilarityEngine::from_config(&config).unwrap();
        assert!(engine.equivalences().same_group(EquivalenceTables::OPAMP, "LM358", "LM324"));
        // Channel count still differs, so the short-circuit wins
        let after = engine.calculate_similarity("LM358N", "LM324N");
        assert!((before - after).abs() < 1e-12);
    }

    #[test]
    fn test_from_config_metadata_override() {
        let config = AppConfig::builder()
            .metadata_override(MetadataOverride {
                component_type: "resistor".to_string(),
                default_profile: Some("design-phase".to_string()),
                specs: vec![SpecOverride {
                    name: "package".to_string(),
                    importance: "low".to_string(),
                    rule: "exact".to_string(),
                }],
            })
            .build();
        let engine = SimilarityEngine::from_config(&config).unwrap();
        let metadata = engine.metadata().get(ComponentType::Resistor).unwrap();
        assert_eq!(metadata.default_profile(), SimilarityProfile::DesignPhase);
        assert_eq!(
            metadata.spec_config("package").map(|c| c.importance),
            Some(SpecImportance::Low)
        );
    }

    #[test]
    fn test_from_config_fails_fast() {
        let bad_profile = AppConfig::builder().profile("cheapest").build();
        let err = SimilarityEngine::from_config(&bad_profile).unwrap_err();
        assert!(matches!(
            err.metadata_kind(),
            Some(MetadataErrorKind::UnknownProfile(_))
        ));

        let bad_cutoff = AppConfig::builder().numeric_cutoff(1.0).build();
        let err = SimilarityEngine::from_config(&bad_cutoff).unwrap_err();
        assert!(matches!(
            err.metadata_kind(),
            Some(MetadataErrorKind::InvalidCutoff(_))
        ));

        let bad_table = AppConfig::builder()
            .equivalence_group("widgets", &["A", "B"])
            .build();
        assert!(SimilarityEngine::from_config(&bad_table).is_err());

        let bad_pattern = AppConfig::builder().pattern("(", "RESISTOR").build();
        assert!(matches!(
            SimilarityEngine::from_config(&bad_pattern),
            Err(MpnMatchError::Config(_))
        ));
    }

    #[test]
    fn test_from_config_custom_pattern() {
        let config = AppConfig::builder().pattern(r"^ACME-R\d+", "RESISTOR").build();
        let engine = SimilarityEngine::from_config(&config).unwrap();
        assert_eq!(engine.classify("acme-r100"), Some(ComponentType::Resistor));
    }

    #[test]
    fn test_builder_rejects_tables_missing_builtin_rules() {
        let err = SimilarityEngine::builder()
            .equivalences(EquivalenceTables::new())
            .build()
            .unwrap_err();
        assert!(matches!(
            err.metadata_kind(),
            Some(MetadataErrorKind::UnknownEquivalenceTable(_))
        ));

        // explicit metadata does not need the built-in tables
        let engine = SimilarityEngine::builder()
            .equivalences(EquivalenceTables::new())
            .metadata(MetadataRegistry::default())
            .build()
            .unwrap();
        assert!(engine.metadata().is_empty());
    }

    #[test]
    fn test_default_engine_is_shared() {
        let a: *const SimilarityEngine = default_engine();
        let b: *const SimilarityEngine = default_engine();
        assert_eq!(a, b);
        assert_eq!(calculate_similarity("", "LM358"), 0.0);
    }
}
