//! Edit-distance fallback, the last link in the chain.

use crate::model::ComponentType;
use crate::similarity::string_similarity::normalized_levenshtein;
use crate::similarity::traits::{ScorePath, ScoringContext, SimilarityCalculator, SimilarityExplanation};

/// `1 - distance / max_len` over the raw MPN characters
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinCalculator;

impl SimilarityCalculator for LevenshteinCalculator {
    fn name(&self) -> &'static str {
        "LevenshteinCalculator"
    }

    fn is_applicable(&self, _ty: ComponentType) -> bool {
        true
    }

    fn explain(&self, mpn1: &str, mpn2: &str, _ctx: &ScoringContext<'_>) -> SimilarityExplanation {
        let score = normalized_levenshtein(mpn1, mpn2);
        SimilarityExplanation::new(
            self.name(),
            ScorePath::EditDistance,
            score,
            format!("normalized edit distance {score:.2}"),
        )
        .clamped()
    }
}
