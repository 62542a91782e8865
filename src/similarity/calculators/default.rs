//! Generic fallback for pairs no family calculator claims.

use super::levenshtein::LevenshteinCalculator;
use crate::model::ComponentType;
use crate::similarity::string_similarity::{jaro_winkler, token_similarity};
use crate::similarity::traits::{ScorePath, ScoringContext, SimilarityCalculator, SimilarityExplanation};

/// Ceiling for two MPNs that are not identical
const MAX_FALLBACK_SIMILARITY: f64 = 0.8;
const TOKEN_WEIGHT: f64 = 0.5;
const JARO_WINKLER_WEIGHT: f64 = 0.5;

/// Token overlap blended with Jaro-Winkler.
///
/// Knows nothing about the parts, so a non-identical pair never scores above
/// 0.8 here.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultCalculator;

impl DefaultCalculator {
    /// Score the pair, or `None` when a side has no alphanumeric token.
    #[must_use]
    pub fn try_explain(&self, mpn1: &str, mpn2: &str) -> Option<SimilarityExplanation> {
        let tokens = token_similarity(mpn1, mpn2)?;
        if mpn1 == mpn2 {
            return Some(SimilarityExplanation::new(
                self.name(),
                ScorePath::TokenOverlap,
                1.0,
                "identical part numbers",
            ));
        }

        let jw = jaro_winkler(mpn1, mpn2);
        let score = (TOKEN_WEIGHT * tokens + JARO_WINKLER_WEIGHT * jw).min(MAX_FALLBACK_SIMILARITY);
        Some(
            SimilarityExplanation::new(
                self.name(),
                ScorePath::TokenOverlap,
                score,
                format!("token overlap {tokens:.2}, jaro-winkler {jw:.2}"),
            )
            .clamped(),
        )
    }
}

impl SimilarityCalculator for DefaultCalculator {
    fn name(&self) -> &'static str {
        "DefaultCalculator"
    }

    fn is_applicable(&self, _ty: ComponentType) -> bool {
        true
    }

    fn explain(&self, mpn1: &str, mpn2: &str, ctx: &ScoringContext<'_>) -> SimilarityExplanation {
        self.try_explain(mpn1, mpn2)
            .unwrap_or_else(|| LevenshteinCalculator.explain(mpn1, mpn2, ctx))
    }
}
