//! Shared metadata-driven weighted scoring.
//!
//! Every family calculator runs the same pipeline: look up metadata, extract
//! a [`SpecBag`] from each MPN, short-circuit on a differing critical spec,
//! accumulate weighted rule scores over the specs both sides carry, and
//! finally apply an equivalence boost. Only the extraction and the
//! family-specific constants differ, and those come from [`SpecFamily`].

use tracing::debug;

use super::metadata::ComponentTypeMetadata;
use super::profile::SimilarityProfile;
use super::traits::{ScoreComponent, ScorePath, ScoringContext, SimilarityExplanation};
use crate::model::{ComponentType, SpecBag};

/// Result of accumulating weighted spec scores.
#[derive(Debug, Clone, Default)]
pub struct WeightedScore {
    /// Sum of `rule score * weight`
    pub total: f64,
    /// Sum of weights of specs present on both sides
    pub max: f64,
    pub components: Vec<ScoreComponent>,
    /// Configured specs missing on at least one side
    pub skipped: Vec<String>,
}

impl WeightedScore {
    /// `total / max`, or `None` when nothing was comparable
    #[must_use]
    pub fn similarity(&self) -> Option<f64> {
        (self.max > 0.0).then(|| self.total / self.max)
    }
}

/// Accumulate weighted rule scores over the specs present in both bags.
///
/// The denominator only counts specs extracted from both sides, so a spec
/// that could not be read never penalises the pair.
#[must_use]
pub fn score_spec_bags(
    metadata: &ComponentTypeMetadata,
    profile: SimilarityProfile,
    a: &SpecBag,
    b: &SpecBag,
) -> WeightedScore {
    let mut result = WeightedScore::default();

    for config in metadata.spec_configs() {
        let (Some(va), Some(vb)) = (a.get(&config.name), b.get(&config.name)) else {
            result.skipped.push(config.name.clone());
            continue;
        };
        let weight = profile.effective_weight(config.importance);
        let raw = config.rule.compare(va, vb);
        result.total += raw * weight;
        result.max += weight;
        result.components.push(ScoreComponent {
            name: config.name.clone(),
            importance: Some(config.importance),
            weight,
            raw_score: raw,
            weighted_score: raw * weight,
            description: format!("{va} vs {vb} ({})", config.rule),
        });
    }

    result
}

/// First short-circuit spec present in both bags with unequal values.
///
/// Raw values are compared directly; tolerance rules are not consulted.
#[must_use]
pub fn find_short_circuit<'n>(names: &[&'n str], a: &SpecBag, b: &SpecBag) -> Option<&'n str> {
    names.iter().copied().find(|name| match (a.get(name), b.get(name)) {
        (Some(va), Some(vb)) => va != vb,
        _ => false,
    })
}

/// Family-specific hooks for the shared pipeline.
///
/// Constants are per family: each calculator keeps its own high and low
/// similarity values.
pub trait SpecFamily {
    /// Name reported in explanations
    fn family_name(&self) -> &'static str;

    /// Type whose metadata drives scoring
    fn metadata_type(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> ComponentType;

    /// Extract specs from a normalized MPN; unreadable specs are left out
    fn extract_specs(&self, mpn: &str, ctx: &ScoringContext<'_>) -> SpecBag;

    /// Critical specs whose inequality ends scoring at [`Self::low_similarity`]
    fn short_circuit_specs(&self) -> &'static [&'static str] {
        &[]
    }

    fn low_similarity(&self) -> f64;

    /// Floor applied when two parts are known equivalents
    fn high_similarity(&self) -> f64;

    /// Whether curated data says the two parts are interchangeable
    fn known_equivalent(&self, _mpn1: &str, _mpn2: &str, _ctx: &ScoringContext<'_>) -> bool {
        false
    }

    /// Comparison used when no metadata applies or nothing was extractable
    fn legacy_similarity(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> f64;
}

/// Run the shared pipeline for one family.
pub fn evaluate<F: SpecFamily + ?Sized>(
    family: &F,
    mpn1: &str,
    mpn2: &str,
    ctx: &ScoringContext<'_>,
) -> SimilarityExplanation {
    let name = family.family_name();
    let ty = family.metadata_type(mpn1, mpn2, ctx);

    let explanation = match ctx.metadata.get(ty) {
        None => {
            debug!("{name}: no metadata for {ty}, using legacy comparison");
            legacy(family, mpn1, mpn2, ctx, format!("no metadata for {ty}"))
        }
        Some(metadata) => {
            let profile = ctx.profile_for(metadata);
            let a = family.extract_specs(mpn1, ctx);
            let b = family.extract_specs(mpn2, ctx);

            if let Some(spec) = find_short_circuit(family.short_circuit_specs(), &a, &b) {
                debug!("{name}: '{spec}' differs between {mpn1} and {mpn2}");
                let reason = match (a.get(spec), b.get(spec)) {
                    (Some(va), Some(vb)) => format!("{spec} differs: {va} vs {vb}"),
                    _ => format!("{spec} differs"),
                };
                return SimilarityExplanation::new(
                    name,
                    ScorePath::ShortCircuit,
                    family.low_similarity(),
                    reason,
                )
                .with_profile(profile)
                .clamped();
            }

            let weighted = score_spec_bags(metadata, profile, &a, &b);
            match weighted.similarity() {
                Some(score) => {
                    let mut e = SimilarityExplanation::new(
                        name,
                        ScorePath::Weighted,
                        score,
                        format!(
                            "{} of {} {} specs compared",
                            weighted.components.len(),
                            weighted.components.len() + weighted.skipped.len(),
                            ty
                        ),
                    )
                    .with_profile(profile);
                    e.breakdown = weighted.components;
                    e.skipped_specs = weighted.skipped;
                    e
                }
                None => {
                    debug!("{name}: no comparable specs for {mpn1} / {mpn2}");
                    let mut e = legacy(
                        family,
                        mpn1,
                        mpn2,
                        ctx,
                        "no spec extractable from both parts".to_string(),
                    );
                    e.skipped_specs = weighted.skipped;
                    e
                }
            }
        }
    };

    apply_boost(family, explanation, mpn1, mpn2, ctx).clamped()
}

fn legacy<F: SpecFamily + ?Sized>(
    family: &F,
    mpn1: &str,
    mpn2: &str,
    ctx: &ScoringContext<'_>,
    reason: String,
) -> SimilarityExplanation {
    SimilarityExplanation::new(
        family.family_name(),
        ScorePath::Legacy,
        family.legacy_similarity(mpn1, mpn2, ctx),
        reason,
    )
}

fn apply_boost<F: SpecFamily + ?Sized>(
    family: &F,
    mut explanation: SimilarityExplanation,
    mpn1: &str,
    mpn2: &str,
    ctx: &ScoringContext<'_>,
) -> SimilarityExplanation {
    let high = family.high_similarity();
    if explanation.score < high && family.known_equivalent(mpn1, mpn2, ctx) {
        debug!(
            "{}: {mpn1} and {mpn2} are known equivalents, raising {:.3} to {high}",
            family.family_name(),
            explanation.score
        );
        explanation.score = high;
        explanation.boosted = true;
    }
    explanation
}
